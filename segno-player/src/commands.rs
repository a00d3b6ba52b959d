use std::io::{BufRead, Write};
use std::sync::Arc;

use segno_engine::{ControlSender, Controls, Song, Transport, TransportState};
use segno_midi::patch;

use crate::dump::Dump;

const DUMP_COUNT: usize = 25;

const COMMANDS: &[&str] = &[
  "channels", "dump", "exit", "help", "locate", "mute", "play", "quit", "solo", "status", "stop",
  "sysex", "unmute",
];

/// Resolves a command token by unique prefix. An exact name always
/// wins, even when it prefixes another command.
fn resolve(token: &str) -> Option<&'static str> {
  if let Some(name) = COMMANDS.iter().copied().find(|name| *name == token) {
    return Some(name);
  }
  let mut candidates = COMMANDS
    .iter()
    .copied()
    .filter(|name| name.starts_with(token));
  match (candidates.next(), candidates.next()) {
    (Some(name), None) => Some(name),
    _ => None,
  }
}

/// Interactive command shell. Runs on the main thread and talks to the
/// realtime side only through the shared transport, the control switches
/// and the control message channel.
pub struct Shell {
  song: Arc<Song>,
  controls: Arc<Controls>,
  transport: Arc<Transport>,
  sender: ControlSender,
  dump: Dump,
}

impl Shell {
  pub fn new(
    song: Arc<Song>,
    controls: Arc<Controls>,
    transport: Arc<Transport>,
    sender: ControlSender,
  ) -> Self {
    Self {
      song,
      controls,
      transport,
      sender,
      dump: Dump::new(),
    }
  }

  pub fn run(&mut self) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
      print!("segno> ");
      std::io::stdout().flush()?;
      line.clear();
      if stdin.lock().read_line(&mut line)? == 0 {
        break;
      }
      if !self.dispatch(line.trim()) {
        break;
      }
    }
    Ok(())
  }

  /// Returns false when the shell should exit.
  fn dispatch(&mut self, line: &str) -> bool {
    let mut parts = line.split_whitespace();
    let token = match parts.next() {
      Some(token) => token,
      None => return true,
    };
    match resolve(token) {
      Some("help") => help(),
      Some("status") => self.status(),
      Some("channels") => self.channels(),
      Some("play") => self.transport.start(),
      Some("stop") => self.transport.stop(),
      Some("locate") => self.locate(parts.next()),
      Some("mute") => self.mute(parts.next()),
      Some("unmute") => self.unmute(parts.next()),
      Some("solo") => self.solo(parts.next()),
      Some("sysex") => self.sysex(parts.next()),
      Some("dump") => {
        let count = parse_count(parts.next()).unwrap_or(DUMP_COUNT);
        match parts.next().and_then(|value| value.parse().ok()) {
          Some(tick) => self.dump.print_from(&self.song, count, tick),
          None => self.dump.print(&self.song, count),
        }
      }
      Some("quit") | Some("exit") => return false,
      _ => println!("unknown or ambiguous command '{}', try 'help'", token),
    }
    true
  }

  fn status(&self) {
    let sample_rate = self.song.index().sample_rate();
    let frame = self.transport.position();
    let state = match self.transport.state() {
      TransportState::Rolling => "rolling",
      TransportState::Looping => "looping",
      TransportState::Starting => "starting",
      TransportState::Stopped => "stopped",
    };
    println!(
      "{}: {} at frame {} ({:.1}s of {:.1}s)",
      self.song.filename(),
      state,
      frame,
      frame as f64 / sample_rate as f64,
      self.song.index().last_frame() as f64 / sample_rate as f64,
    );
  }

  fn channels(&self) {
    let solo = self.controls.solo_channel();
    for info in self.song.channels().iter().filter(|info| info.has_data) {
      let program = info
        .program
        .and_then(patch::program_name)
        .unwrap_or("-");
      let mut flags = String::new();
      if self.controls.is_muted(info.number - 1) {
        flags.push_str(" [muted]");
      }
      if solo == Some(info.number - 1) {
        flags.push_str(" [solo]");
      }
      println!("{:>3}  {}{}", info.number, program, flags);
    }
  }

  fn locate(&self, arg: Option<&str>) {
    match arg.and_then(|value| value.parse::<u64>().ok()) {
      Some(frame) => self.transport.locate(frame),
      None => println!("usage: locate <frame>"),
    }
  }

  fn mute(&mut self, arg: Option<&str>) {
    match parse_channel(arg) {
      Some(channel) => {
        if let Err(err) = self.controls.mute(channel, &mut self.sender) {
          println!("{}", err);
        }
      }
      None => println!("usage: mute <channel 1-16>"),
    }
  }

  fn unmute(&mut self, arg: Option<&str>) {
    match parse_channel(arg) {
      Some(channel) => {
        if let Err(err) = self.controls.unmute(channel) {
          println!("{}", err);
        }
      }
      None => println!("usage: unmute <channel 1-16>"),
    }
  }

  fn solo(&mut self, arg: Option<&str>) {
    match parse_channel(arg) {
      Some(channel) => {
        if let Err(err) = self.controls.solo(channel, &self.song, &mut self.sender) {
          println!("{}", err);
        }
      }
      None => println!("usage: solo <channel 1-16, 0 to disable>"),
    }
  }

  fn sysex(&self, arg: Option<&str>) {
    match arg {
      Some("1") => self.controls.set_send_sysex_enabled(true),
      Some("0") => self.controls.set_send_sysex_enabled(false),
      _ => println!(
        "sysex is {}",
        if self.controls.is_send_sysex_enabled() {
          "1"
        } else {
          "0"
        }
      ),
    }
  }
}

fn help() {
  println!("commands:");
  println!("  status              transport state and position");
  println!("  channels            channels with data, programs and flags");
  println!("  play                start playback");
  println!("  stop                stop playback");
  println!("  locate <frame>      move the playback position");
  println!("  mute <channel>      mute a channel (1-16)");
  println!("  unmute <channel>    unmute a channel (1-16)");
  println!("  solo <channel>      solo a channel, 0 to disable");
  println!("  sysex [0|1]         show or set sysex forwarding");
  println!("  dump [count] [tick] list indexed events, resumable");
  println!("  quit                exit");
}

fn parse_channel(arg: Option<&str>) -> Option<u8> {
  arg.and_then(|value| value.parse().ok())
}

fn parse_count(arg: Option<&str>) -> Option<usize> {
  arg.and_then(|value| value.parse().ok())
}
