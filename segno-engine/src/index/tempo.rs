/// Default tempo: 500k microseconds per quarter note, i.e. 120 BPM.
pub const DEFAULT_TEMPO_MPQ: u32 = 500_000;

/// Default SMF timebase in ticks per quarter note, used until the root
/// element overrides it.
pub const DEFAULT_TIMEBASE: u16 = 480;

/// Piecewise linear tick to frame map.
///
/// The cursor keeps a single (frame, tick) anchor plus the current
/// samples-per-tick rate. A tempo change first moves the anchor to the
/// frame of the change computed under the previous rate, then updates
/// the rate, so any later tick converts along the new linear segment.
/// Tempo changes must be observed in ascending tick order.
#[derive(Debug, Clone)]
pub struct TempoCursor {
  sample_rate: u32,
  timebase: u16,
  tempo_mpq: u32,
  anchor_frame: u64,
  anchor_tick: u64,
  samples_per_tick: f64,
}

impl TempoCursor {
  pub fn new(sample_rate: u32) -> Self {
    let mut cursor = Self {
      sample_rate,
      timebase: DEFAULT_TIMEBASE,
      tempo_mpq: DEFAULT_TEMPO_MPQ,
      anchor_frame: 0,
      anchor_tick: 0,
      samples_per_tick: 0.0,
    };
    cursor.update_rate();
    cursor
  }

  pub fn sample_rate(&self) -> u32 {
    self.sample_rate
  }

  pub fn timebase(&self) -> u16 {
    self.timebase
  }

  pub fn samples_per_tick(&self) -> f64 {
    self.samples_per_tick
  }

  pub fn set_timebase(&mut self, timebase: u16) {
    self.timebase = timebase;
    self.update_rate();
  }

  /// Records a tempo change at `tick` microseconds-per-quarter `tempo_mpq`.
  pub fn set_tempo(&mut self, tick: u64, tempo_mpq: u32) {
    self.anchor_frame = self.frame_at(tick);
    self.anchor_tick = tick;
    self.tempo_mpq = tempo_mpq;
    self.update_rate();
  }

  /// Converts an absolute tick into an absolute sample frame along the
  /// current linear segment.
  pub fn frame_at(&self, tick: u64) -> u64 {
    let ticks = tick.saturating_sub(self.anchor_tick);
    self.anchor_frame + (self.samples_per_tick * ticks as f64) as u64
  }

  fn update_rate(&mut self) {
    // ( sample rate * MPQ ) / ( 1000000 * TPQ )
    self.samples_per_tick = (self.sample_rate as f64 * self.tempo_mpq as f64)
      / (1_000_000.0 * self.timebase as f64);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_rate() {
    let mut cursor = TempoCursor::new(44_100);
    cursor.set_timebase(480);
    // 120 BPM at 480 TPQ: one tick is 44100 * 500000 / (1e6 * 480) samples
    assert!((cursor.samples_per_tick() - 45.9375).abs() < 1e-9);
    assert_eq!(cursor.frame_at(0), 0);
    assert_eq!(cursor.frame_at(480), 22_050);
    assert_eq!(cursor.frame_at(960), 44_100);
  }

  #[test]
  fn tempo_change_moves_anchor_under_previous_rate() {
    let mut cursor = TempoCursor::new(44_100);
    cursor.set_timebase(480);
    // Double the tempo at tick 480: the anchor frame is computed with
    // the 120 BPM rate, later ticks use the 240 BPM rate.
    cursor.set_tempo(480, 250_000);
    assert_eq!(cursor.frame_at(480), 22_050);
    assert_eq!(cursor.frame_at(960), 22_050 + 11_025);
  }

  #[test]
  fn conversion_is_monotonic_across_anchors() {
    let mut cursor = TempoCursor::new(48_000);
    cursor.set_timebase(96);
    cursor.set_tempo(100, 250_000);
    cursor.set_tempo(200, 1_000_000);

    let mut prev = 0;
    for tick in 200..1_000 {
      let frame = cursor.frame_at(tick);
      assert!(frame >= prev);
      prev = frame;
    }
  }

  #[test]
  fn exact_frame_on_anchor_boundary() {
    let mut cursor = TempoCursor::new(44_100);
    cursor.set_timebase(480);
    let frame_before = cursor.frame_at(480);
    cursor.set_tempo(480, 600_000);
    assert_eq!(cursor.frame_at(480), frame_before);
  }
}
