use std::sync::atomic::{AtomicBool, AtomicI8, Ordering};

use log::debug;

use segno_midi::patch::CTRL_ALL_NOTES_OFF;

use crate::control::ControlSender;
use crate::error::{Error, Result};
use crate::song::Song;

pub const NUM_CHANNELS: usize = 16;

/// Shared playback switches: per channel mutes, the solo selection and
/// the sysex gate. Written by the command thread, read by the scheduler
/// every block.
///
/// Reads and writes use relaxed atomics with no further synchronization.
/// A change may take effect one block late; that staleness is the
/// documented contract, since any lock here would be taken on the
/// realtime thread.
#[derive(Debug)]
pub struct Controls {
  muted: [AtomicBool; NUM_CHANNELS],
  solo: AtomicI8,
  send_sysex: AtomicBool,
}

impl Controls {
  pub fn new() -> Self {
    Self {
      muted: std::array::from_fn(|_| AtomicBool::new(false)),
      solo: AtomicI8::new(-1),
      send_sysex: AtomicBool::new(true),
    }
  }

  /// Channel index 0-15.
  pub fn is_muted(&self, channel: u8) -> bool {
    self
      .muted
      .get(channel as usize)
      .map_or(false, |muted| muted.load(Ordering::Relaxed))
  }

  /// The soloed channel index, or `None` when solo is off.
  pub fn solo_channel(&self) -> Option<u8> {
    let solo = self.solo.load(Ordering::Relaxed);
    (solo >= 0).then_some(solo as u8)
  }

  pub fn is_send_sysex_enabled(&self) -> bool {
    self.send_sysex.load(Ordering::Relaxed)
  }

  pub fn set_send_sysex_enabled(&self, enabled: bool) {
    self.send_sysex.store(enabled, Ordering::Relaxed);
  }

  /// Mutes a channel (1-16) and queues an all notes off message for it,
  /// so notes already sounding there fall silent in the next block.
  pub fn mute(&self, channel: u8, sender: &mut ControlSender) -> Result<()> {
    let index = Self::channel_index(channel)?;
    self.muted[index].store(true, Ordering::Relaxed);
    queue_all_notes_off(sender, index as u8);
    Ok(())
  }

  /// Unmutes a channel (1-16). No silencing message is needed.
  pub fn unmute(&self, channel: u8) -> Result<()> {
    let index = Self::channel_index(channel)?;
    self.muted[index].store(false, Ordering::Relaxed);
    Ok(())
  }

  /// Solos a channel (1-16), or disables solo when `channel` is 0.
  /// Every other channel with data gets an all notes off message.
  pub fn solo(&self, channel: u8, song: &Song, sender: &mut ControlSender) -> Result<()> {
    if channel == 0 {
      self.solo.store(-1, Ordering::Relaxed);
      return Ok(());
    }

    let index = Self::channel_index(channel)?;
    self.solo.store(index as i8, Ordering::Relaxed);

    for other in 0..NUM_CHANNELS {
      if other != index && song.channels()[other].has_data {
        queue_all_notes_off(sender, other as u8);
      }
    }
    Ok(())
  }

  fn channel_index(channel: u8) -> Result<usize> {
    if (1..=NUM_CHANNELS as u8).contains(&channel) {
      Ok(channel as usize - 1)
    } else {
      Err(Error::InvalidChannel(channel))
    }
  }
}

impl Default for Controls {
  fn default() -> Self {
    Self::new()
  }
}

/// Queues an all notes off controller message for a channel index.
/// Best effort: when the pool is exhausted the message is dropped.
pub fn queue_all_notes_off(sender: &mut ControlSender, channel_index: u8) {
  match sender.reserve() {
    Some(mut message) => {
      message
        .set(&[0xb0 | (channel_index & 0x0f), CTRL_ALL_NOTES_OFF, 0])
        .ok();
      sender.submit(message);
    }
    None => debug!(
      "control pool exhausted, dropping all notes off for channel {}",
      channel_index + 1
    ),
  }
}
