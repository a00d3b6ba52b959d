use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy)]
struct BufferEvent {
  offset: u32,
  start: usize,
  len: usize,
}

/// Fixed capacity MIDI output region for one audio block.
///
/// Each entry is a raw message tagged with its intra block frame offset.
/// Storage is preallocated once; `write` fails instead of growing, so
/// the realtime path never allocates.
pub struct MidiBuffer {
  data: Vec<u8>,
  events: Vec<BufferEvent>,
}

impl MidiBuffer {
  pub const DEFAULT_DATA_CAPACITY: usize = 4096;
  pub const DEFAULT_EVENT_CAPACITY: usize = 512;

  pub fn new() -> Self {
    Self::with_capacity(Self::DEFAULT_DATA_CAPACITY, Self::DEFAULT_EVENT_CAPACITY)
  }

  pub fn with_capacity(data_capacity: usize, event_capacity: usize) -> Self {
    Self {
      data: Vec::with_capacity(data_capacity),
      events: Vec::with_capacity(event_capacity),
    }
  }

  pub fn clear(&mut self) {
    self.data.clear();
    self.events.clear();
  }

  pub fn len(&self) -> usize {
    self.events.len()
  }

  pub fn is_empty(&self) -> bool {
    self.events.is_empty()
  }

  /// Appends a message at the given intra block offset.
  pub fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<()> {
    if self.events.len() == self.events.capacity()
      || self.data.len() + bytes.len() > self.data.capacity()
    {
      return Err(Error::BufferOverflow);
    }
    let start = self.data.len();
    self.data.extend_from_slice(bytes);
    self.events.push(BufferEvent {
      offset,
      start,
      len: bytes.len(),
    });
    Ok(())
  }

  /// Iterates the block's messages in write order as (offset, bytes).
  pub fn iter(&self) -> impl Iterator<Item = (u32, &[u8])> {
    self
      .events
      .iter()
      .map(|event| (event.offset, &self.data[event.start..event.start + event.len]))
  }
}

impl Default for MidiBuffer {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn write_and_iterate() {
    let mut buffer = MidiBuffer::with_capacity(16, 4);
    buffer.write(0, &[0xb0, 123, 0]).unwrap();
    buffer.write(32, &[0x90, 60, 100]).unwrap();

    let events: Vec<(u32, Vec<u8>)> = buffer
      .iter()
      .map(|(offset, bytes)| (offset, bytes.to_vec()))
      .collect();
    assert_eq!(
      events,
      vec![(0, vec![0xb0, 123, 0]), (32, vec![0x90, 60, 100])]
    );
  }

  #[test]
  fn clear_resets_the_block() {
    let mut buffer = MidiBuffer::with_capacity(16, 4);
    buffer.write(0, &[0x90, 60, 100]).unwrap();
    buffer.clear();
    assert!(buffer.is_empty());
    assert_eq!(buffer.iter().count(), 0);
  }

  #[test]
  fn write_fails_when_data_capacity_exhausted() {
    let mut buffer = MidiBuffer::with_capacity(4, 4);
    buffer.write(0, &[0x90, 60, 100]).unwrap();
    assert_eq!(
      buffer.write(0, &[0x80, 60, 0]),
      Err(Error::BufferOverflow)
    );
    // The failed write leaves the buffer unchanged.
    assert_eq!(buffer.len(), 1);
  }

  #[test]
  fn write_fails_when_event_capacity_exhausted() {
    let mut buffer = MidiBuffer::with_capacity(64, 1);
    buffer.write(0, &[0x90, 60, 100]).unwrap();
    assert_eq!(
      buffer.write(1, &[0x80, 60, 0]),
      Err(Error::BufferOverflow)
    );
  }
}
