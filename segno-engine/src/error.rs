use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq)]
pub enum Error {
  #[error("Channel out of range: {0}")]
  InvalidChannel(u8),

  #[error("Control message longer than {0} bytes")]
  MessageTooLong(usize),

  #[error("Output buffer overflow")]
  BufferOverflow,
}
