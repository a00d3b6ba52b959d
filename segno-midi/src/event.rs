use crate::status::Status;

/// Identifies an event within one loaded file. Ids are assigned in the
/// order events are created during the load pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventId(pub u32);

/// One scheduled MIDI message: the raw wire bytes plus an optional link
/// to a paired event. A note-on points at its note-off and vice versa.
/// The link is informational and never consulted during playback.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
  id: EventId,
  related: Option<EventId>,
  data: Vec<u8>,
}

impl Event {
  pub fn new(id: EventId, data: Vec<u8>) -> Self {
    Self {
      id,
      related: None,
      data,
    }
  }

  pub fn id(&self) -> EventId {
    self.id
  }

  pub fn related(&self) -> Option<EventId> {
    self.related
  }

  pub fn set_related(&mut self, related: EventId) {
    self.related = Some(related);
  }

  pub fn data(&self) -> &[u8] {
    &self.data
  }

  pub fn len(&self) -> usize {
    self.data.len()
  }

  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }

  pub fn is_sysex(&self) -> bool {
    self.data.first() == Some(&0xf0)
  }

  /// The channel bits of the status byte. Meaningless for sysex events.
  pub fn channel(&self) -> u8 {
    self.data.first().copied().unwrap_or(0) & 0x0f
  }

  pub fn status(&self) -> Option<Status> {
    self.data.first().copied().and_then(Status::from_byte)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn channel_and_status() {
    let event = Event::new(EventId(0), vec![0x93, 60, 100]);
    assert_eq!(event.channel(), 3);
    assert_eq!(event.status(), Some(Status::NoteOn));
    assert!(!event.is_sysex());
    assert_eq!(event.len(), 3);
  }

  #[test]
  fn sysex() {
    let event = Event::new(EventId(1), vec![0xf0, 0x7e, 0x7f, 0xf7]);
    assert!(event.is_sysex());
    assert_eq!(event.status(), Some(Status::Sysex));
  }

  #[test]
  fn related_link() {
    let mut on = Event::new(EventId(0), vec![0x90, 60, 100]);
    let mut off = Event::new(EventId(1), vec![0x80, 60, 0]);
    on.set_related(off.id());
    off.set_related(on.id());
    assert_eq!(on.related(), Some(EventId(1)));
    assert_eq!(off.related(), Some(EventId(0)));
  }
}
