//! ICS-04: Channel & Packet Semantics implementation to process channel open
//! handshake and incoming data packets. Exports data structures and
//! implementations of IBC core channel module.
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

pub mod context;
pub mod handler;

/// Re-exports ICS-04 data structures from the `ibc-tao-channel-types` crate.
pub mod types {
    #[doc(inline)]
    pub use ibc_tao_channel_types::*;
}
