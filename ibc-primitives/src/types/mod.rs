mod any;
mod error;
mod event;
mod signer;
mod timestamp;

pub use any::*;
pub use error::*;
pub use event::*;
pub use signer::*;
pub use timestamp::*;
