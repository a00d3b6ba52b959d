pub mod element;
pub mod event;
pub mod patch;
pub mod status;

pub use element::{Element, ElementKind};
pub use event::{Event, EventId};
pub use status::Status;
