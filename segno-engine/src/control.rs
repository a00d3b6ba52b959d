use log::warn;
use ringbuf::{Consumer, Producer, RingBuffer};

use crate::error::{Error, Result};

/// Maximum payload of a control message in bytes.
pub const MAX_MESSAGE_LEN: usize = 3;

/// A reusable message slot. Slots are created once when the channel is
/// set up and shuttle between the two threads by move, so a slot is
/// never owned by both sides at the same time.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ControlMessage {
  data: heapless::Vec<u8, MAX_MESSAGE_LEN>,
}

impl ControlMessage {
  pub fn set(&mut self, bytes: &[u8]) -> Result<()> {
    self.data.clear();
    self
      .data
      .extend_from_slice(bytes)
      .map_err(|_| Error::MessageTooLong(MAX_MESSAGE_LEN))
  }

  pub fn data(&self) -> &[u8] {
    &self.data
  }

  fn clear(&mut self) {
    self.data.clear();
  }
}

/// Creates the fixed capacity control message channel.
///
/// Two SPSC queues carry the slots: the available queue flows from the
/// realtime thread back to the command thread, the pending queue flows
/// the other way. All `capacity` slots start out available. Nothing
/// allocates after this call.
pub fn control_channel(capacity: usize) -> (ControlSender, ControlReceiver) {
  let (mut available_tx, available_rx) = RingBuffer::new(capacity).split();
  let (pending_tx, pending_rx) = RingBuffer::new(capacity).split();

  for _ in 0..capacity {
    available_tx.push(ControlMessage::default()).ok();
  }

  (
    ControlSender {
      available: available_rx,
      pending: pending_tx,
    },
    ControlReceiver {
      pending: pending_rx,
      available: available_tx,
    },
  )
}

/// Command thread end: reserve a free slot, fill it in, submit it for
/// delivery at offset 0 of the next audio block.
pub struct ControlSender {
  available: Consumer<ControlMessage>,
  pending: Producer<ControlMessage>,
}

impl ControlSender {
  /// Takes a free slot out of the pool. `None` when the pool is
  /// exhausted; the caller drops the message in that case, since
  /// blocking here would stall the command thread against the
  /// realtime one.
  pub fn reserve(&mut self) -> Option<ControlMessage> {
    self.available.pop()
  }

  /// Hands a filled slot to the realtime thread. Messages are delivered
  /// in submission order, each exactly once.
  pub fn submit(&mut self, message: ControlMessage) {
    if self.pending.push(message).is_err() {
      // Cannot happen while every slot comes from reserve().
      warn!("control message dropped: pending queue full");
    }
  }
}

/// Realtime thread end: drain pending slots, copy their bytes out, and
/// return each slot to the pool.
pub struct ControlReceiver {
  pending: Consumer<ControlMessage>,
  available: Producer<ControlMessage>,
}

impl ControlReceiver {
  /// Next pending message, in submission order. Draining is bounded by
  /// the pool capacity.
  pub fn drain_next(&mut self) -> Option<ControlMessage> {
    self.pending.pop()
  }

  /// Returns a drained slot to the available pool.
  pub fn release(&mut self, mut message: ControlMessage) {
    message.clear();
    self.available.push(message).ok();
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn reserve_up_to_capacity() {
    let (mut sender, _receiver) = control_channel(4);
    let mut held = Vec::new();
    for _ in 0..4 {
      held.push(sender.reserve().expect("slot available"));
    }
    assert_eq!(sender.reserve(), None);
  }

  #[test]
  fn release_makes_one_slot_reservable_again() {
    let (mut sender, mut receiver) = control_channel(2);
    let a = sender.reserve().unwrap();
    let _b = sender.reserve().unwrap();
    assert_eq!(sender.reserve(), None);

    sender.submit(a);
    let drained = receiver.drain_next().unwrap();
    receiver.release(drained);

    assert!(sender.reserve().is_some());
    assert_eq!(sender.reserve(), None);
  }

  #[test]
  fn messages_arrive_in_submission_order() {
    let (mut sender, mut receiver) = control_channel(4);
    for value in [1u8, 2, 3] {
      let mut message = sender.reserve().unwrap();
      message.set(&[0xb0, 123, value]).unwrap();
      sender.submit(message);
    }

    for value in [1u8, 2, 3] {
      let message = receiver.drain_next().unwrap();
      assert_eq!(message.data(), &[0xb0, 123, value]);
      receiver.release(message);
    }
    assert_eq!(receiver.drain_next(), None);
  }

  #[test]
  fn released_slots_come_back_empty() {
    let (mut sender, mut receiver) = control_channel(1);
    let mut message = sender.reserve().unwrap();
    message.set(&[0xb0, 120, 0]).unwrap();
    sender.submit(message);

    let drained = receiver.drain_next().unwrap();
    receiver.release(drained);

    let reused = sender.reserve().unwrap();
    assert!(reused.data().is_empty());
  }

  #[test]
  fn message_payload_is_bounded() {
    let mut message = ControlMessage::default();
    assert!(message.set(&[0xb0, 123, 0]).is_ok());
    assert_eq!(
      message.set(&[0xf0, 1, 2, 3]),
      Err(Error::MessageTooLong(MAX_MESSAGE_LEN))
    );
  }
}
