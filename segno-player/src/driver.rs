use std::sync::Arc;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{BufferSize, Device, OutputCallbackInfo, SampleRate, Stream, StreamConfig};
use log::{info, warn};
use midir::MidiOutputConnection;
use thiserror::Error;

use segno_engine::{MidiBuffer, Scheduler, Transport, TransportState};

#[derive(Debug, Error)]
pub enum AudioError {
  #[error("no default output device")]
  NoDefaultOutputDevice,
  #[error("no default stream config: {0}")]
  NoDefaultStreamConfig(cpal::DefaultStreamConfigError),
  #[error("failed to build the output stream: {0}")]
  BuildStream(#[from] cpal::BuildStreamError),
  #[error("failed to play the output stream: {0}")]
  PlayStream(cpal::PlayStreamError),
}

pub type Result<T> = core::result::Result<T, AudioError>;

#[derive(Debug, Clone)]
pub struct AudioConfig {
  pub sample_rate: u32,
  pub buffer_size: usize,
}

impl AudioConfig {
  pub const DEFAULT_BUFFER_SIZE: usize = 256;
}

pub trait AudioHandler: Send {
  fn process(&mut self, output: &mut [f32], channels: usize);
}

/// Owns the audio output stream. The player emits no audio of its own;
/// the stream exists to drive the handler with a steady block clock.
pub struct AudioDriver {
  _device: Device,
  output_config: StreamConfig,
  output_stream: Stream,
}

impl AudioDriver {
  pub fn new<Handler: AudioHandler + 'static>(
    config: AudioConfig,
    mut handler: Handler,
  ) -> Result<Self> {
    let host = cpal::default_host();

    let device = host
      .default_output_device()
      .ok_or(AudioError::NoDefaultOutputDevice)?;
    info!(
      "using default output device: '{}'",
      device.name().unwrap_or_else(|_| "unknown".to_string())
    );

    let mut output_config: StreamConfig = device
      .default_output_config()
      .map_err(AudioError::NoDefaultStreamConfig)?
      .into();

    let channels = output_config.channels as usize;

    output_config.sample_rate = SampleRate(config.sample_rate);
    output_config.buffer_size = BufferSize::Fixed(config.buffer_size as u32);

    let output_stream = device.build_output_stream(
      &output_config,
      move |data: &mut [f32], _: &OutputCallbackInfo| handler.process(data, channels),
      move |err| warn!("audio stream error: {:?}", err),
    )?;

    Ok(AudioDriver {
      _device: device,
      output_config,
      output_stream,
    })
  }

  pub fn sample_rate(&self) -> u32 {
    self.output_config.sample_rate.0
  }

  pub fn start(&self) -> Result<()> {
    self.output_stream.play().map_err(AudioError::PlayStream)
  }
}

/// The audio callback body: runs the scheduler for the block the
/// transport clock is at, pushes the resulting bytes to the MIDI port
/// and advances the clock.
///
/// Intra block offsets order the messages; the whole block is flushed
/// to the port at the block boundary.
pub struct PlaybackHandler {
  transport: Arc<Transport>,
  scheduler: Scheduler,
  buffer: MidiBuffer,
  midi_out: MidiOutputConnection,
}

impl PlaybackHandler {
  pub fn new(
    transport: Arc<Transport>,
    scheduler: Scheduler,
    midi_out: MidiOutputConnection,
  ) -> Self {
    Self {
      transport,
      scheduler,
      buffer: MidiBuffer::new(),
      midi_out,
    }
  }
}

impl AudioHandler for PlaybackHandler {
  fn process(&mut self, output: &mut [f32], channels: usize) {
    for sample in output.iter_mut() {
      *sample = 0.0;
    }

    let nframes = (output.len() / channels) as u64;
    self.scheduler.process(&self.transport, nframes, &mut self.buffer);

    for (_offset, bytes) in self.buffer.iter() {
      if self.midi_out.send(bytes).is_err() {
        warn!("failed to send {} bytes to the midi port", bytes.len());
      }
    }

    if self.transport.state() == TransportState::Rolling {
      self.transport.advance(nframes);
    }
  }
}
