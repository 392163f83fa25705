//! Packet timeouts, by destination height and by destination timestamp.

mod height;
mod timestamp;

pub use height::*;
pub use timestamp::*;
