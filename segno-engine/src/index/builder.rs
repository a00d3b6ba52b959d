use std::collections::BTreeMap;

use log::debug;

use segno_midi::{Element, ElementKind, Event, EventId};

use crate::index::record::TimeRecord;
use crate::index::tempo::TempoCursor;
use crate::index::TimeIndex;
use crate::song::{ChannelInfo, Song};

/// Builds the immutable `TimeIndex` from a tick ordered element stream.
///
/// The build phase needs random access insertion keyed by frame, so
/// records accumulate in an ordered map; `finish` inserts the one-second
/// entry points and then materializes the map into the arena consumed by
/// playback. The traversal runs exactly once and the result is never
/// mutated again.
pub struct IndexBuilder {
  filename: String,
  tempo: TempoCursor,
  records: BTreeMap<u64, TimeRecord>,
  channels: [ChannelInfo; 16],
  last_frame: u64,
  next_event_id: u32,
}

impl IndexBuilder {
  pub fn new(filename: impl Into<String>, sample_rate: u32) -> Self {
    Self {
      filename: filename.into(),
      tempo: TempoCursor::new(sample_rate),
      records: BTreeMap::new(),
      channels: std::array::from_fn(ChannelInfo::new),
      last_frame: 0,
      next_event_id: 0,
    }
  }

  pub fn process(&mut self, element: Element) {
    let channel = element.channel & 0x0f;
    let tick = element.tick;
    match element.kind {
      ElementKind::Timebase(timebase) => {
        self.tempo.set_timebase(timebase);
      }
      ElementKind::Tempo(tempo_mpq) => {
        self.tempo.set_tempo(tick, tempo_mpq);
      }
      ElementKind::Note {
        key,
        velocity,
        off_velocity,
        duration,
      } => {
        self.channels[channel as usize].has_data = true;

        let on_id = self.next_id();
        let off_id = self.next_id();

        let mut on_event = Event::new(on_id, vec![0x90 | channel, key, velocity]);
        on_event.set_related(off_id);
        self.record_at(tick).push_event(on_event);

        let mut off_event = Event::new(off_id, vec![0x80 | channel, key, off_velocity]);
        off_event.set_related(on_id);
        self.record_at(tick + duration).push_event(off_event);
      }
      ElementKind::KeyTouch { key, velocity } => {
        self.channels[channel as usize].has_data = true;
        self.add_event(tick, vec![0xa0 | channel, key, velocity]);
      }
      ElementKind::Control { controller, value } => {
        self.channels[channel as usize].has_data = true;
        self.add_event(tick, vec![0xb0 | channel, controller, value]);
      }
      ElementKind::Program { program } => {
        let info = &mut self.channels[channel as usize];
        info.has_data = true;
        if info.program.is_none() {
          info.program = Some(program);
        }
        self.add_event(tick, vec![0xc0 | channel, program]);
      }
      ElementKind::ChannelPressure { pressure } => {
        self.channels[channel as usize].has_data = true;
        self.add_event(tick, vec![0xd0 | channel, pressure]);
      }
      ElementKind::PitchBend { value } => {
        self.channels[channel as usize].has_data = true;
        let value = value as i32 + 0x2000;
        self.add_event(
          tick,
          vec![
            0xe0 | channel,
            (value & 0x7f) as u8,
            ((value >> 7) & 0x7f) as u8,
          ],
        );
      }
      ElementKind::Sysex(payload) => {
        let mut data = Vec::with_capacity(payload.len() + 1);
        data.push(0xf0);
        data.extend_from_slice(&payload);
        self.add_event(tick, data);
      }
    }
  }

  /// Inserts the entry points and materializes the index.
  pub fn finish(mut self) -> Song {
    let sample_rate = self.tempo.sample_rate();

    // An entry point every second keeps seek scans short.
    let mut epframe = 0;
    while epframe < self.last_frame {
      self
        .records
        .entry(epframe)
        .or_insert_with(|| TimeRecord::new(0, epframe));
      epframe += sample_rate as u64;
    }

    let records: Vec<TimeRecord> = self.records.into_values().collect();
    let index = TimeIndex::new(sample_rate, records);
    debug!(
      "indexed {}: {} records, {} events",
      self.filename,
      index.record_count(),
      index.event_count()
    );

    Song::new(self.filename, self.tempo.timebase(), self.channels, index)
  }

  fn next_id(&mut self) -> EventId {
    let id = EventId(self.next_event_id);
    self.next_event_id += 1;
    id
  }

  fn add_event(&mut self, tick: u64, data: Vec<u8>) {
    let id = self.next_id();
    self.record_at(tick).push_event(Event::new(id, data));
  }

  /// Get-or-create the record for the frame this tick converts to.
  fn record_at(&mut self, tick: u64) -> &mut TimeRecord {
    let frame = self.tempo.frame_at(tick);
    self.last_frame = self.last_frame.max(frame);
    self
      .records
      .entry(frame)
      .or_insert_with(|| TimeRecord::new(tick, frame))
  }
}
