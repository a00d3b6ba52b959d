mod builder;
mod record;
mod tempo;

pub use builder::IndexBuilder;
pub use record::TimeRecord;
pub use tempo::{TempoCursor, DEFAULT_TEMPO_MPQ, DEFAULT_TIMEBASE};

/// Position of a record within a `TimeIndex`. Obtained from `head`,
/// `next` or `lookup_entrypoint` and only meaningful for the index that
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor(pub(crate) usize);

/// The complete, frame ordered collection of time records for one
/// loaded file. Built exactly once per load and immutable afterwards.
///
/// The forward links of the record sequence are materialized as arena
/// order: records live in one contiguous ascending-frame slice and a
/// cursor advances by index. Entry point records at every whole second
/// make `lookup_entrypoint` an O(1) table lookup.
#[derive(Debug)]
pub struct TimeIndex {
  sample_rate: u32,
  records: Vec<TimeRecord>,
  entry_points: Vec<Option<usize>>,
}

impl TimeIndex {
  pub(crate) fn new(sample_rate: u32, records: Vec<TimeRecord>) -> Self {
    let last_frame = records.last().map_or(0, |record| record.frame());
    let seconds = (last_frame / sample_rate as u64) as usize;
    let mut entry_points = vec![None; seconds + 1];
    for (index, record) in records.iter().enumerate() {
      if record.frame() % sample_rate as u64 == 0 {
        entry_points[(record.frame() / sample_rate as u64) as usize] = Some(index);
      }
    }
    Self {
      sample_rate,
      records,
      entry_points,
    }
  }

  pub fn sample_rate(&self) -> u32 {
    self.sample_rate
  }

  /// Number of time records, entry points included.
  pub fn record_count(&self) -> usize {
    self.records.len()
  }

  /// Total number of scheduled events.
  pub fn event_count(&self) -> usize {
    self.records.iter().map(TimeRecord::event_count).sum()
  }

  /// Frame of the last record, or zero for an empty index.
  pub fn last_frame(&self) -> u64 {
    self.records.last().map_or(0, |record| record.frame())
  }

  pub fn head(&self) -> Option<Cursor> {
    (!self.records.is_empty()).then_some(Cursor(0))
  }

  pub fn next(&self, cursor: Cursor) -> Option<Cursor> {
    (cursor.0 + 1 < self.records.len()).then_some(Cursor(cursor.0 + 1))
  }

  pub fn record(&self, cursor: Cursor) -> &TimeRecord {
    &self.records[cursor.0]
  }

  /// Returns the record at the whole-second boundary at or before the
  /// given frame. `None` when the frame lies beyond the end of the data.
  /// The caller scans forward from here, which is bounded by one second
  /// worth of records.
  pub fn lookup_entrypoint(&self, frame: u64) -> Option<Cursor> {
    let seconds = (frame / self.sample_rate as u64) as usize;
    self
      .entry_points
      .get(seconds)
      .copied()
      .flatten()
      .map(Cursor)
  }

  pub fn iter(&self) -> impl Iterator<Item = &TimeRecord> {
    self.records.iter()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn index_with_frames(sample_rate: u32, frames: &[u64]) -> TimeIndex {
    let records = frames
      .iter()
      .map(|frame| TimeRecord::new(0, *frame))
      .collect();
    TimeIndex::new(sample_rate, records)
  }

  #[test]
  fn traversal_follows_ascending_frames() {
    let index = index_with_frames(100, &[0, 50, 100, 170]);
    let mut cursor = index.head();
    let mut frames = Vec::new();
    while let Some(c) = cursor {
      frames.push(index.record(c).frame());
      cursor = index.next(c);
    }
    assert_eq!(frames, vec![0, 50, 100, 170]);
  }

  #[test]
  fn entrypoint_lookup_resolves_second_boundaries() {
    let index = index_with_frames(100, &[0, 50, 100, 170, 200]);
    assert_eq!(index.lookup_entrypoint(0), Some(Cursor(0)));
    assert_eq!(index.lookup_entrypoint(99), Some(Cursor(0)));
    assert_eq!(index.lookup_entrypoint(120), Some(Cursor(2)));
    assert_eq!(index.lookup_entrypoint(200), Some(Cursor(4)));
    assert_eq!(index.lookup_entrypoint(500), None);
  }

  #[test]
  fn empty_index() {
    let index = index_with_frames(100, &[]);
    assert_eq!(index.head(), None);
    assert_eq!(index.lookup_entrypoint(0), None);
    assert_eq!(index.record_count(), 0);
  }
}
