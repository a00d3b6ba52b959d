use std::sync::Arc;

use log::warn;

use segno_midi::patch::CTRL_ALL_NOTES_OFF;
use segno_midi::{Event, Status};

use crate::buffer::MidiBuffer;
use crate::control::ControlReceiver;
use crate::controls::{Controls, NUM_CHANNELS};
use crate::index::Cursor;
use crate::song::Song;
use crate::transport::{Transport, TransportState};

/// Walks the time index once per audio block and emits the events that
/// fall inside it, each at its intra block frame offset.
///
/// All state lives on the realtime thread. The only inputs from outside
/// are the shared transport clock, the shared `Controls` switches and
/// the control message queue, all lock free.
pub struct Scheduler {
  song: Arc<Song>,
  controls: Arc<Controls>,
  control_rx: ControlReceiver,
  cursor: Option<Cursor>,
  expected_frame: Option<u64>,
  generation: u64,
  prev_state: TransportState,
}

impl Scheduler {
  pub fn new(song: Arc<Song>, controls: Arc<Controls>, control_rx: ControlReceiver) -> Self {
    Self {
      song,
      controls,
      control_rx,
      cursor: None,
      expected_frame: None,
      generation: 0,
      prev_state: TransportState::Stopped,
    }
  }

  /// Produces the MIDI output for one block of `nframes` starting at the
  /// transport position.
  ///
  /// Control messages are delivered first, at offset 0, regardless of
  /// the transport state. Song events only go out while rolling.
  pub fn process(&mut self, transport: &Transport, nframes: u64, out: &mut MidiBuffer) {
    out.clear();

    while let Some(message) = self.control_rx.drain_next() {
      if out.write(0, message.data()).is_err() {
        warn!("midi buffer full, control message dropped");
      }
      self.control_rx.release(message);
    }

    let state = transport.state();
    if self.prev_state == TransportState::Rolling && state != TransportState::Rolling {
      // Leaving roll: silence everything that may still be sounding.
      for channel in 0..NUM_CHANNELS as u8 {
        out
          .write(0, &[0xb0 | channel, CTRL_ALL_NOTES_OFF, 0])
          .ok();
      }
    }
    self.prev_state = state;

    if state != TransportState::Rolling {
      return;
    }

    let frame = transport.position();
    let generation = transport.generation();
    let song = self.song.clone();
    let index = song.index();

    if self.cursor.is_none()
      || self.expected_frame != Some(frame)
      || generation != self.generation
    {
      // An unexpected frame with no relocation in between is the same
      // block delivered twice; its events already went out. A locate()
      // back to that frame bumps the generation and replays instead.
      if generation == self.generation && self.expected_frame == Some(frame + nframes) {
        return;
      }
      self.generation = generation;
      // Resync through the entry point at or below the target, then
      // scan forward to the first record in range. The scan covers at
      // most one second of records.
      let mut cursor = index.lookup_entrypoint(frame);
      while let Some(c) = cursor {
        if index.record(c).frame() >= frame {
          break;
        }
        cursor = index.next(c);
      }
      self.cursor = cursor;
    }

    let block_end = frame + nframes;
    self.expected_frame = Some(block_end);

    while let Some(cursor) = self.cursor {
      let record = index.record(cursor);
      if record.frame() >= block_end {
        break;
      }
      let offset = record.frame().saturating_sub(frame) as u32;
      for event in record.events() {
        if self.passes_filters(event) && out.write(offset, event.data()).is_err() {
          warn!("midi buffer full at frame {}", record.frame());
        }
      }
      self.cursor = index.next(cursor);
    }
  }

  fn passes_filters(&self, event: &Event) -> bool {
    if event.is_sysex() {
      return self.controls.is_send_sysex_enabled();
    }

    let channel = event.channel();
    if let Some(solo) = self.controls.solo_channel() {
      if channel != solo {
        return false;
      }
    }
    if self.controls.is_muted(channel) {
      return false;
    }
    // Channel 10 percussion: note offs are dropped.
    if channel == 9 && event.status() == Some(Status::NoteOff) {
      return false;
    }
    true
  }
}
