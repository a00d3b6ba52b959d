mod commands;
mod driver;
mod dump;
mod loader;
mod midi;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::bail;
use log::info;

use segno_engine::{control_channel, Controls, EngineConfig, Scheduler, Transport};

use crate::commands::Shell;
use crate::driver::{AudioConfig, AudioDriver, PlaybackHandler};

struct Args {
  file: PathBuf,
  port: Option<usize>,
  no_audio: bool,
}

fn parse_args() -> anyhow::Result<Args> {
  let mut file = None;
  let mut port = None;
  let mut no_audio = false;

  let mut args = std::env::args().skip(1);
  while let Some(arg) = args.next() {
    match arg.as_str() {
      "--no-audio" => no_audio = true,
      "--port" => match args.next() {
        Some(value) => port = Some(value.parse()?),
        None => bail!("--port needs a port index"),
      },
      _ if arg.starts_with('-') => bail!("unknown option '{}'", arg),
      _ => file = Some(PathBuf::from(arg)),
    }
  }

  match file {
    Some(file) => Ok(Args {
      file,
      port,
      no_audio,
    }),
    None => bail!("usage: segno-player [--no-audio] [--port <index>] <file.mid>"),
  }
}

fn main() -> anyhow::Result<()> {
  env_logger::init();

  let args = parse_args()?;
  let config = EngineConfig::default();

  let song = Arc::new(loader::load_song(&args.file, config.sample_rate)?);
  let index = song.index();
  println!(
    "{}: timebase {}, {} events in {} records, {:.1}s",
    song.filename(),
    song.timebase(),
    index.event_count(),
    index.record_count(),
    index.last_frame() as f64 / config.sample_rate as f64,
  );

  let controls = Arc::new(Controls::new());
  let transport = Arc::new(Transport::new());
  let (sender, receiver) = control_channel(config.control_capacity);

  let _driver = if args.no_audio {
    info!("audio disabled, transport commands will have no effect");
    None
  } else {
    let midi_out = midi::connect(args.port)?;
    let scheduler = Scheduler::new(song.clone(), controls.clone(), receiver);
    let handler = PlaybackHandler::new(transport.clone(), scheduler, midi_out);
    let driver = AudioDriver::new(
      AudioConfig {
        sample_rate: config.sample_rate,
        buffer_size: AudioConfig::DEFAULT_BUFFER_SIZE,
      },
      handler,
    )?;
    driver.start()?;
    info!("audio clock running at {} Hz", driver.sample_rate());
    Some(driver)
  };

  Shell::new(song, controls, transport, sender).run()
}
