mod common;
mod event;
mod player;
mod registration;

pub use common::parse_timestamp;
pub use event::*;
pub use player::*;
pub use registration::*;
