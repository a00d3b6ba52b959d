use segno_engine::{Cursor, Song};
use segno_midi::{patch, Event, Status};

/// Resumable tabular listing of the time index. Repeated calls continue
/// where the previous one stopped and wrap around at the end.
pub struct Dump {
  next: Option<Cursor>,
}

impl Dump {
  pub fn new() -> Self {
    Self { next: None }
  }

  /// Prints the next `count` non-empty records.
  pub fn print(&mut self, song: &Song, count: usize) {
    let index = song.index();
    let mut cursor = match self.next {
      Some(cursor) => Some(cursor),
      None => index.head(),
    };
    if cursor.is_none() {
      println!("(empty song)");
      return;
    }

    println!(
      "{:>10} {:>12} {:>4} {:>4}  {}",
      "TICK", "FRAME", "CHAN", "DLEN", "DESCRIPTION"
    );

    let mut printed = 0;
    while printed < count {
      let current = match cursor {
        Some(current) => current,
        None => {
          println!("(end of song)");
          self.next = None;
          return;
        }
      };
      let record = index.record(current);
      // Entry point records carry no events and are skipped.
      if record.event_count() > 0 {
        for event in record.events() {
          println!(
            "{:>10} {:>12} {:>4} {:>4}  {}",
            record.tick(),
            record.frame(),
            channel_column(event),
            event.len(),
            describe(event)
          );
        }
        printed += 1;
      }
      cursor = index.next(current);
    }
    self.next = cursor;
  }

  /// Repositions at the first record at or after `tick`, then prints.
  pub fn print_from(&mut self, song: &Song, count: usize, tick: u64) {
    let index = song.index();
    let mut cursor = index.head();
    while let Some(current) = cursor {
      let record = index.record(current);
      if record.event_count() > 0 && record.tick() >= tick {
        break;
      }
      cursor = index.next(current);
    }
    if cursor.is_none() {
      println!("(end of song)");
      self.next = None;
      return;
    }
    self.next = cursor;
    self.print(song, count);
  }
}

impl Default for Dump {
  fn default() -> Self {
    Self::new()
  }
}

fn channel_column(event: &Event) -> String {
  if event.is_sysex() {
    "-".to_string()
  } else {
    (event.channel() + 1).to_string()
  }
}

fn describe(event: &Event) -> String {
  let data = event.data();
  match event.status() {
    Some(status @ (Status::NoteOn | Status::NoteOff)) => {
      format!("{}: key {} velocity {}", status, byte(data, 1), byte(data, 2))
    }
    Some(status @ Status::KeyPressure) => {
      format!("{}: key {} pressure {}", status, byte(data, 1), byte(data, 2))
    }
    Some(status @ Status::Control) => format!(
      "{}: {} = {}",
      status,
      patch::controller_name(byte(data, 1)),
      byte(data, 2)
    ),
    Some(status @ Status::Program) => format!(
      "{}: {}",
      status,
      patch::program_name(byte(data, 1)).unwrap_or("Unknown")
    ),
    Some(status @ Status::ChannelPressure) => {
      format!("{}: {}", status, byte(data, 1))
    }
    Some(status @ Status::PitchBend) => {
      let value = (byte(data, 1) as i32 | (byte(data, 2) as i32) << 7) - 0x2000;
      format!("{}: {}", status, value)
    }
    Some(status @ Status::Sysex) => format!("{}: {} bytes", status, data.len()),
    None => format!("unknown: {:02x?}", data),
  }
}

fn byte(data: &[u8], index: usize) -> u8 {
  data.get(index).copied().unwrap_or(0)
}
