use crate::index::TimeIndex;

/// Static per-channel information gathered during the load pass. Only
/// read after loading completes.
#[derive(Debug, Clone)]
pub struct ChannelInfo {
  /// Human readable channel number, channel index + 1.
  pub number: u8,
  /// True when at least one event was scheduled on this channel.
  pub has_data: bool,
  /// First program change seen on this channel.
  pub program: Option<u8>,
}

impl ChannelInfo {
  pub(crate) fn new(index: usize) -> Self {
    Self {
      number: index as u8 + 1,
      has_data: false,
      program: None,
    }
  }
}

/// The product of one load pass: the immutable time index plus the file
/// level metadata exposed to the command layer. Lives until the next
/// file is loaded.
#[derive(Debug)]
pub struct Song {
  filename: String,
  timebase: u16,
  channels: [ChannelInfo; 16],
  index: TimeIndex,
}

impl Song {
  pub(crate) fn new(
    filename: String,
    timebase: u16,
    channels: [ChannelInfo; 16],
    index: TimeIndex,
  ) -> Self {
    Self {
      filename,
      timebase,
      channels,
      index,
    }
  }

  pub fn filename(&self) -> &str {
    &self.filename
  }

  /// Timebase of the loaded file in ticks per quarter note.
  pub fn timebase(&self) -> u16 {
    self.timebase
  }

  pub fn channels(&self) -> &[ChannelInfo; 16] {
    &self.channels
  }

  pub fn channel(&self, index: usize) -> Option<&ChannelInfo> {
    self.channels.get(index)
  }

  pub fn index(&self) -> &TimeIndex {
    &self.index
  }
}
