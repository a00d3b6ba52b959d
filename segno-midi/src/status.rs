use std::fmt::{Display, Formatter};

/// Status class of a MIDI message, taken from the high nibble of the
/// status byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
  NoteOff,
  NoteOn,
  KeyPressure,
  Control,
  Program,
  ChannelPressure,
  PitchBend,
  Sysex,
}

impl Status {
  pub fn from_byte(byte: u8) -> Option<Self> {
    match byte & 0xf0 {
      0x80 => Some(Self::NoteOff),
      0x90 => Some(Self::NoteOn),
      0xa0 => Some(Self::KeyPressure),
      0xb0 => Some(Self::Control),
      0xc0 => Some(Self::Program),
      0xd0 => Some(Self::ChannelPressure),
      0xe0 => Some(Self::PitchBend),
      0xf0 => Some(Self::Sysex),
      _ => None,
    }
  }

  /// The status byte with the channel bits cleared.
  pub fn byte(&self) -> u8 {
    match self {
      Self::NoteOff => 0x80,
      Self::NoteOn => 0x90,
      Self::KeyPressure => 0xa0,
      Self::Control => 0xb0,
      Self::Program => 0xc0,
      Self::ChannelPressure => 0xd0,
      Self::PitchBend => 0xe0,
      Self::Sysex => 0xf0,
    }
  }
}

impl Display for Status {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let name = match self {
      Self::NoteOff => "note off",
      Self::NoteOn => "note on",
      Self::KeyPressure => "after touch",
      Self::Control => "controller",
      Self::Program => "program change",
      Self::ChannelPressure => "channel pressure",
      Self::PitchBend => "pitch wheel",
      Self::Sysex => "sysex",
    };
    f.write_str(name)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn from_byte_roundtrip() {
    for status in [
      Status::NoteOff,
      Status::NoteOn,
      Status::KeyPressure,
      Status::Control,
      Status::Program,
      Status::ChannelPressure,
      Status::PitchBend,
      Status::Sysex,
    ] {
      assert_eq!(Status::from_byte(status.byte()), Some(status));
      assert_eq!(Status::from_byte(status.byte() | 0x05), Some(status));
    }
  }

  #[test]
  fn from_byte_data() {
    assert_eq!(Status::from_byte(0x40), None);
    assert_eq!(Status::from_byte(0x7f), None);
  }
}
