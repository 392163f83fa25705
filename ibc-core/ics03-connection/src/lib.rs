//! ICS-03: Connection Semantics implementation to process connection open
//! handshake. Exports data structures and implementations of IBC core
//! connection module.
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

pub mod delay;
pub mod handler;

/// Re-exports ICS-03 data structures from the `ibc-tao-connection-types` crate
pub mod types {
    #[doc(inline)]
    pub use ibc_tao_connection_types::*;
}
