use std::collections::{HashMap, VecDeque};
use std::path::Path;

use log::{debug, warn};
use midly::{MetaMessage, MidiMessage, Smf, Timing, TrackEventKind};
use thiserror::Error;

use segno_engine::{IndexBuilder, Song};
use segno_midi::{Element, ElementKind};

#[derive(Debug, Error)]
pub enum LoadError {
  #[error("failed to read file: {0}")]
  Io(#[from] std::io::Error),
  #[error("failed to parse midi file: {0}")]
  Midi(#[from] midly::Error),
  #[error("smpte timecode timing is not supported")]
  UnsupportedTiming,
}

pub type Result<T> = core::result::Result<T, LoadError>;

/// Reads a standard MIDI file and builds its time index.
pub fn load_song(path: &Path, sample_rate: u32) -> Result<Song> {
  let bytes = std::fs::read(path)?;
  let smf = Smf::parse(&bytes)?;
  song_from_smf(&smf, &path.display().to_string(), sample_rate)
}

/// Turns a parsed file into a `Song`: note on/off pairs become single
/// note elements, tracks are merged into one tick ordered stream and
/// the stream is fed through the index builder.
fn song_from_smf(smf: &Smf, name: &str, sample_rate: u32) -> Result<Song> {
  let timebase = match smf.header.timing {
    Timing::Metrical(ticks) => ticks.as_int(),
    Timing::Timecode(..) => return Err(LoadError::UnsupportedTiming),
  };

  let mut elements = vec![Element::new(0, 0, ElementKind::Timebase(timebase))];

  for (track_index, track) in smf.tracks.iter().enumerate() {
    let mut tick = 0u64;
    // Sounding notes per (channel, key), in onset order: overlapping
    // repeats of the same key close first-on first-off.
    let mut pending: HashMap<(u8, u8), VecDeque<(u64, u8)>> = HashMap::new();

    for event in track {
      tick += u64::from(event.delta.as_int());
      match event.kind {
        TrackEventKind::Midi { channel, message } => {
          let channel = channel.as_int();
          match message {
            MidiMessage::NoteOn { key, vel } => {
              let key = key.as_int();
              let vel = vel.as_int();
              if vel > 0 {
                pending
                  .entry((channel, key))
                  .or_default()
                  .push_back((tick, vel));
              } else {
                // Running status convention: velocity 0 means note off.
                close_note(&mut pending, &mut elements, channel, key, 0, tick);
              }
            }
            MidiMessage::NoteOff { key, vel } => {
              close_note(
                &mut pending,
                &mut elements,
                channel,
                key.as_int(),
                vel.as_int(),
                tick,
              );
            }
            MidiMessage::Aftertouch { key, vel } => {
              elements.push(Element::new(
                tick,
                channel,
                ElementKind::KeyTouch {
                  key: key.as_int(),
                  velocity: vel.as_int(),
                },
              ));
            }
            MidiMessage::Controller { controller, value } => {
              elements.push(Element::new(
                tick,
                channel,
                ElementKind::Control {
                  controller: controller.as_int(),
                  value: value.as_int(),
                },
              ));
            }
            MidiMessage::ProgramChange { program } => {
              elements.push(Element::new(
                tick,
                channel,
                ElementKind::Program {
                  program: program.as_int(),
                },
              ));
            }
            MidiMessage::ChannelAftertouch { vel } => {
              elements.push(Element::new(
                tick,
                channel,
                ElementKind::ChannelPressure {
                  pressure: vel.as_int(),
                },
              ));
            }
            MidiMessage::PitchBend { bend } => {
              elements.push(Element::new(
                tick,
                channel,
                ElementKind::PitchBend {
                  value: bend.as_int(),
                },
              ));
            }
          }
        }
        TrackEventKind::SysEx(data) => {
          elements.push(Element::new(tick, 0, ElementKind::Sysex(data.to_vec())));
        }
        TrackEventKind::Meta(MetaMessage::Tempo(tempo)) => {
          elements.push(Element::new(tick, 0, ElementKind::Tempo(tempo.as_int())));
        }
        TrackEventKind::Meta(_) | TrackEventKind::Escape(_) => {}
      }
    }

    for ((channel, key), onsets) in pending {
      for (start, velocity) in onsets {
        warn!(
          "track {}: channel {} key {} never released, closing at track end",
          track_index,
          channel + 1,
          key
        );
        elements.push(Element::new(
          start,
          channel,
          ElementKind::Note {
            key,
            velocity,
            off_velocity: 0,
            duration: tick.saturating_sub(start),
          },
        ));
      }
    }
  }

  // Merge the tracks: stable sort by tick, tempo map entries first so a
  // tempo change applies to the events sharing its tick.
  elements.sort_by_key(|element| (element.tick, tempo_rank(element)));

  let mut builder = IndexBuilder::new(name, sample_rate);
  for element in elements {
    builder.process(element);
  }
  Ok(builder.finish())
}

fn tempo_rank(element: &Element) -> u8 {
  match element.kind {
    ElementKind::Timebase(_) | ElementKind::Tempo(_) => 0,
    _ => 1,
  }
}

fn close_note(
  pending: &mut HashMap<(u8, u8), VecDeque<(u64, u8)>>,
  elements: &mut Vec<Element>,
  channel: u8,
  key: u8,
  off_velocity: u8,
  tick: u64,
) {
  match pending
    .get_mut(&(channel, key))
    .and_then(VecDeque::pop_front)
  {
    Some((start, velocity)) => elements.push(Element::new(
      start,
      channel,
      ElementKind::Note {
        key,
        velocity,
        off_velocity,
        duration: tick.saturating_sub(start),
      },
    )),
    None => debug!("unmatched note off: channel {} key {}", channel + 1, key),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use midly::num::{u15, u24, u28, u4, u7};
  use midly::{Format, Header, TrackEvent};

  const SAMPLE_RATE: u32 = 44_100;

  fn midi(delta: u32, channel: u8, message: MidiMessage) -> TrackEvent<'static> {
    TrackEvent {
      delta: u28::new(delta),
      kind: TrackEventKind::Midi {
        channel: u4::new(channel),
        message,
      },
    }
  }

  fn note_on(delta: u32, channel: u8, key: u8, vel: u8) -> TrackEvent<'static> {
    midi(
      delta,
      channel,
      MidiMessage::NoteOn {
        key: u7::new(key),
        vel: u7::new(vel),
      },
    )
  }

  fn note_off(delta: u32, channel: u8, key: u8) -> TrackEvent<'static> {
    midi(
      delta,
      channel,
      MidiMessage::NoteOff {
        key: u7::new(key),
        vel: u7::new(0),
      },
    )
  }

  fn end_of_track() -> TrackEvent<'static> {
    TrackEvent {
      delta: u28::new(0),
      kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    }
  }

  fn smf(tracks: Vec<Vec<TrackEvent<'static>>>) -> Smf<'static> {
    Smf {
      header: Header::new(Format::Parallel, Timing::Metrical(u15::new(480))),
      tracks,
    }
  }

  #[test]
  fn pairs_note_on_and_off() {
    let smf = smf(vec![vec![
      note_on(0, 0, 60, 100),
      note_off(480, 0, 60),
      end_of_track(),
    ]]);
    let song = song_from_smf(&smf, "pairs.mid", SAMPLE_RATE).unwrap();

    let index = song.index();
    assert_eq!(index.event_count(), 2);
    let head = index.head().unwrap();
    assert_eq!(index.record(head).events()[0].data(), &[0x90, 60, 100]);
    let second = index.record(index.next(head).unwrap());
    assert_eq!(second.frame(), 22_050);
    assert_eq!(second.events()[0].data(), &[0x80, 60, 0]);
  }

  #[test]
  fn note_on_with_zero_velocity_closes_the_note() {
    let smf = smf(vec![vec![
      note_on(0, 2, 64, 90),
      note_on(240, 2, 64, 0),
      end_of_track(),
    ]]);
    let song = song_from_smf(&smf, "zero-vel.mid", SAMPLE_RATE).unwrap();
    assert_eq!(song.index().event_count(), 2);
    assert_eq!(song.index().last_frame(), 11_025);
  }

  #[test]
  fn overlapping_same_key_notes_close_in_onset_order() {
    let smf = smf(vec![vec![
      note_on(0, 0, 60, 100),
      note_on(120, 0, 60, 80),
      note_off(120, 0, 60),
      note_off(120, 0, 60),
      end_of_track(),
    ]]);
    let song = song_from_smf(&smf, "overlap.mid", SAMPLE_RATE).unwrap();

    // First onset (vel 100) pairs with the first off at tick 240.
    let index = song.index();
    let mut ons = Vec::new();
    for record in index.iter() {
      for event in record.events() {
        if event.data()[0] & 0xf0 == 0x90 {
          ons.push((record.frame(), event.data()[2]));
        }
      }
    }
    assert_eq!(ons, vec![(0, 100), (5_512, 80)]);
  }

  #[test]
  fn unreleased_notes_are_closed_at_track_end() {
    let smf = smf(vec![vec![note_on(0, 0, 60, 100), end_of_track()]]);
    let song = song_from_smf(&smf, "stuck.mid", SAMPLE_RATE).unwrap();
    // One on, one synthesized off.
    assert_eq!(song.index().event_count(), 2);
  }

  #[test]
  fn tempo_applies_to_events_at_the_same_tick() {
    let tempo_track = vec![
      TrackEvent {
        delta: u28::new(480),
        kind: TrackEventKind::Meta(MetaMessage::Tempo(u24::new(250_000))),
      },
      end_of_track(),
    ];
    let note_track = vec![
      note_on(480, 0, 60, 100),
      note_off(480, 0, 60),
      end_of_track(),
    ];
    let smf = smf(vec![tempo_track, note_track]);
    let song = song_from_smf(&smf, "tempo.mid", SAMPLE_RATE).unwrap();

    // One beat at 120 BPM, then one beat at 240 BPM.
    assert_eq!(song.index().last_frame(), 22_050 + 11_025);
  }

  #[test]
  fn rejects_timecode_timing() {
    let smf = Smf {
      header: Header::new(
        Format::SingleTrack,
        Timing::Timecode(midly::Fps::Fps25, 40),
      ),
      tracks: vec![vec![end_of_track()]],
    };
    let result = song_from_smf(&smf, "timecode.mid", SAMPLE_RATE);
    assert!(matches!(result, Err(LoadError::UnsupportedTiming)));
  }
}
