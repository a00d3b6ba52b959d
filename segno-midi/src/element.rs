/// A parsed musical element. The loader emits these in ascending tick
/// order and the index builder consumes them exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
  pub tick: u64,
  pub channel: u8,
  pub kind: ElementKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
  /// File header: ticks per quarter note.
  Timebase(u16),
  /// Tempo change: microseconds per quarter note.
  Tempo(u32),
  Note {
    key: u8,
    velocity: u8,
    off_velocity: u8,
    /// Note length in ticks. The note-off is scheduled at tick + duration.
    duration: u64,
  },
  KeyTouch {
    key: u8,
    velocity: u8,
  },
  Control {
    controller: u8,
    value: u8,
  },
  Program {
    program: u8,
  },
  ChannelPressure {
    pressure: u8,
  },
  PitchBend {
    /// Bipolar value in -8192..=8191.
    value: i16,
  },
  /// Sysex payload, without the leading 0xF0 status byte.
  Sysex(Vec<u8>),
}

impl Element {
  pub fn new(tick: u64, channel: u8, kind: ElementKind) -> Self {
    Self {
      tick,
      channel,
      kind,
    }
  }
}
