use segno_midi::Event;

/// All events scheduled at one absolute sample frame, together with the
/// file tick the frame was derived from. Entry point records carry no
/// events and a tick of zero.
#[derive(Debug, Clone)]
pub struct TimeRecord {
  frame: u64,
  tick: u64,
  events: Vec<Event>,
}

impl TimeRecord {
  pub(crate) fn new(tick: u64, frame: u64) -> Self {
    Self {
      frame,
      tick,
      events: Vec::new(),
    }
  }

  pub fn frame(&self) -> u64 {
    self.frame
  }

  pub fn tick(&self) -> u64 {
    self.tick
  }

  pub fn events(&self) -> &[Event] {
    &self.events
  }

  pub fn event_count(&self) -> usize {
    self.events.len()
  }

  pub(crate) fn push_event(&mut self, event: Event) {
    self.events.push(event);
  }
}
