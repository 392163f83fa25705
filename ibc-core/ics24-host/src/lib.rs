//! ICS-24: Host defines the minimal set of interfaces that a state machine
//! hosting an IBC-enabled chain must implement.
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

mod context;
pub mod utils;

pub use context::*;

/// Re-exports ICS-24 data structures from the `ibc-tao-host-types` crate.
pub mod types {
    #[doc(inline)]
    pub use ibc_tao_host_types::*;
}
