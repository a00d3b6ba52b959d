use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};

/// Transport running state, mirrored from the audio clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportState {
  Stopped,
  Rolling,
  Looping,
  Starting,
}

impl TransportState {
  fn from_u8(value: u8) -> Self {
    match value {
      1 => Self::Rolling,
      2 => Self::Looping,
      3 => Self::Starting,
      _ => Self::Stopped,
    }
  }

  fn as_u8(self) -> u8 {
    match self {
      Self::Stopped => 0,
      Self::Rolling => 1,
      Self::Looping => 2,
      Self::Starting => 3,
    }
  }
}

/// Shared sample clock. The command thread writes state transitions and
/// relocations, the audio callback reads the position once per block and
/// advances it while rolling.
///
/// Relocations also bump a generation counter, so the scheduler can tell
/// a jump back to a recently played frame apart from a duplicated block
/// callback.
///
/// Access is lock free with relaxed ordering: the scheduler tolerates a
/// write landing one block late, and blocking here would break the
/// realtime contract.
#[derive(Debug)]
pub struct Transport {
  frame: AtomicU64,
  state: AtomicU8,
  generation: AtomicU64,
}

impl Transport {
  pub fn new() -> Self {
    Self {
      frame: AtomicU64::new(0),
      state: AtomicU8::new(TransportState::Stopped.as_u8()),
      generation: AtomicU64::new(0),
    }
  }

  pub fn state(&self) -> TransportState {
    TransportState::from_u8(self.state.load(Ordering::Relaxed))
  }

  pub fn position(&self) -> u64 {
    self.frame.load(Ordering::Relaxed)
  }

  pub fn start(&self) {
    self.state
      .store(TransportState::Rolling.as_u8(), Ordering::Relaxed);
  }

  pub fn stop(&self) {
    self.state
      .store(TransportState::Stopped.as_u8(), Ordering::Relaxed);
  }

  pub fn locate(&self, frame: u64) {
    self.frame.store(frame, Ordering::Relaxed);
    self.generation.fetch_add(1, Ordering::Relaxed);
  }

  /// Counts relocations. The frame and the counter may be observed one
  /// block apart, within the relaxed consistency contract.
  pub fn generation(&self) -> u64 {
    self.generation.load(Ordering::Relaxed)
  }

  /// Advances the clock by one block. Called only by the audio callback
  /// and only while the transport is rolling.
  pub fn advance(&self, nframes: u64) {
    self.frame.fetch_add(nframes, Ordering::Relaxed);
  }
}

impl Default for Transport {
  fn default() -> Self {
    Self::new()
  }
}
