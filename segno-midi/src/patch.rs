//! General MIDI name tables used for channel descriptions and event dumps.

/// All Notes Off channel mode controller.
pub const CTRL_ALL_NOTES_OFF: u8 = 123;

/// Returns the General MIDI patch name for a program number, or `None`
/// when the number is out of range.
pub fn program_name(program: u8) -> Option<&'static str> {
  GM_PATCHSET.get(program as usize).copied()
}

/// Returns a human readable controller name. Unassigned controller
/// numbers map to "Undefined".
pub fn controller_name(controller: u8) -> &'static str {
  match controller {
    0 => "Bank Select (coarse)",
    1 => "Modulation Wheel (coarse)",
    2 => "Breath controller (coarse)",
    4 => "Foot Pedal (coarse)",
    5 => "Portamento Time (coarse)",
    6 => "Data Entry (coarse)",
    7 => "Volume (coarse)",
    8 => "Balance (coarse)",
    10 => "Pan position (coarse)",
    11 => "Expression (coarse)",
    12 => "Effect Control 1 (coarse)",
    13 => "Effect Control 2 (coarse)",
    16 => "General Purpose Slider 1",
    17 => "General Purpose Slider 2",
    18 => "General Purpose Slider 3",
    19 => "General Purpose Slider 4",
    32 => "Bank Select (fine)",
    33 => "Modulation Wheel (fine)",
    34 => "Breath controller (fine)",
    36 => "Foot Pedal (fine)",
    37 => "Portamento Time (fine)",
    38 => "Data Entry (fine)",
    39 => "Volume (fine)",
    40 => "Balance (fine)",
    42 => "Pan position (fine)",
    43 => "Expression (fine)",
    44 => "Effect Control 1 (fine)",
    45 => "Effect Control 2 (fine)",
    64 => "Hold Pedal (on/off)",
    65 => "Portamento (on/off)",
    66 => "Sustenuto Pedal (on/off)",
    67 => "Soft Pedal (on/off)",
    68 => "Legato Pedal (on/off)",
    69 => "Hold 2 Pedal (on/off)",
    70 => "Sound Variation",
    71 => "Sound Timbre",
    72 => "Sound Release Time",
    73 => "Sound Attack Time",
    74 => "Sound Brightness",
    75 => "Sound Control 6",
    76 => "Sound Control 7",
    77 => "Sound Control 8",
    78 => "Sound Control 9",
    79 => "Sound Control 10",
    80 => "General Purpose Button 1 (on/off)",
    81 => "General Purpose Button 2 (on/off)",
    82 => "General Purpose Button 3 (on/off)",
    83 => "General Purpose Button 4 (on/off)",
    91 => "Effects Level",
    92 => "Tremulo Level",
    93 => "Chorus Level",
    94 => "Celeste Level",
    95 => "Phaser Level",
    96 => "Data Button increment",
    97 => "Data Button decrement",
    98 => "Non-registered Parameter (fine)",
    99 => "Non-registered Parameter (coarse)",
    100 => "Registered Parameter (fine)",
    101 => "Registered Parameter (coarse)",
    120 => "All Sound Off",
    121 => "All Controllers Off",
    122 => "Local Keyboard (on/off)",
    123 => "All Notes Off",
    124 => "Omni Mode Off",
    125 => "Omni Mode On",
    126 => "Mono Operation",
    127 => "Poly Operation",
    _ => "Undefined",
  }
}

static GM_PATCHSET: [&str; 128] = [
  "Acoustic Grand",
  "Bright Acoustic",
  "Electric Grand",
  "Honky-Tonk",
  "Electric Piano 1",
  "Electric Piano 2",
  "Harpsichord",
  "Clavinet",
  "Celesta",
  "Glockenspiel",
  "Music Box",
  "Vibraphone",
  "Marimba",
  "Xylophone",
  "Tubular Bells",
  "Dulcimer",
  "Drawbar Organ",
  "Percussive Organ",
  "Rock Organ",
  "Church Organ",
  "Reed Organ",
  "Accoridan",
  "Harmonica",
  "Tango Accordian",
  "Nylon String Guitar",
  "Steel String Guitar",
  "Electric Jazz Guitar",
  "Electric Clean Guitar",
  "Electric Muted Guitar",
  "Overdriven Guitar",
  "Distortion Guitar",
  "Guitar Harmonics",
  "Acoustic Bass",
  "Electric Bass (fingered)",
  "Electric Bass (picked)",
  "Fretless Bass",
  "Slap Bass 1",
  "Slap Bass 2",
  "Synth Bass 1",
  "Synth Bass 2",
  "Violin",
  "Viola",
  "Cello",
  "Contrabass",
  "Tremolo Strings",
  "Pizzicato Strings",
  "Orchestral Strings",
  "Timpani",
  "String Ensemble 1",
  "String Ensemble 2",
  "SynthStrings 1",
  "SynthStrings 2",
  "Choir Aahs",
  "Voice Oohs",
  "Synth Voice",
  "Orchestra Hit",
  "Trumpet",
  "Trombone",
  "Tuba",
  "Muted Trumpet",
  "French Horn",
  "Brass Section",
  "SynthBrass 1",
  "SynthBrass 2",
  "Soprano Sax",
  "Alto Sax",
  "Tenor Sax",
  "Baritone Sax",
  "Oboe",
  "English Horn",
  "Bassoon",
  "Clarinet",
  "Piccolo",
  "Flute",
  "Recorder",
  "Pan Flute",
  "Blown Bottle",
  "Skakuhachi",
  "Whistle",
  "Ocarina",
  "Lead 1 (square)",
  "Lead 2 (sawtooth)",
  "Lead 3 (calliope)",
  "Lead 4 (chiff)",
  "Lead 5 (charang)",
  "Lead 6 (voice)",
  "Lead 7 (fifths)",
  "Lead 8 (bass+lead)",
  "Pad 1 (new age)",
  "Pad 2 (warm)",
  "Pad 3 (polysynth)",
  "Pad 4 (choir)",
  "Pad 5 (bowed)",
  "Pad 6 (metallic)",
  "Pad 7 (halo)",
  "Pad 8 (sweep)",
  "FX 1 (rain)",
  "FX 2 (soundtrack)",
  "FX 3 (crystal)",
  "FX 4 (atmosphere)",
  "FX 5 (brightness)",
  "FX 6 (goblins)",
  "FX 7 (echoes)",
  "FX 8 (sci-fi)",
  "Sitar",
  "Banjo",
  "Shamisen",
  "Koto",
  "Kalimba",
  "Bagpipe",
  "Fiddle",
  "Shanai",
  "Tinkle Bell",
  "Agogo",
  "Steel Drums",
  "Woodblock",
  "Taiko Drum",
  "Melodic Tom",
  "Synth Drum",
  "Reverse Cymbal",
  "Guitar Fret Noise",
  "Breath Noise",
  "Seashore",
  "Bird Tweet",
  "Telephone Ring",
  "Helicopter",
  "Applause",
  "Gunshot",
];

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn program_names() {
    assert_eq!(program_name(0), Some("Acoustic Grand"));
    assert_eq!(program_name(127), Some("Gunshot"));
    assert_eq!(program_name(128), None);
  }

  #[test]
  fn controller_names() {
    assert_eq!(controller_name(CTRL_ALL_NOTES_OFF), "All Notes Off");
    assert_eq!(controller_name(3), "Undefined");
  }
}
