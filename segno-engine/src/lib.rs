pub mod buffer;
pub mod config;
pub mod control;
pub mod controls;
mod error;
pub mod index;
pub mod scheduler;
pub mod song;
pub mod transport;

pub use buffer::MidiBuffer;
pub use config::EngineConfig;
pub use control::{control_channel, ControlMessage, ControlReceiver, ControlSender};
pub use controls::{Controls, NUM_CHANNELS};
pub use error::{Error, Result};
pub use index::{Cursor, IndexBuilder, TempoCursor, TimeIndex, TimeRecord};
pub use scheduler::Scheduler;
pub use song::{ChannelInfo, Song};
pub use transport::{Transport, TransportState};
