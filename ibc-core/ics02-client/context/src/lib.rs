//! This crate functions as an intermediary layer between the storage of host
//! chains and an IBC client implementation, providing the traits a light
//! client implements and the store access a host grants to it.
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

pub mod client_state;
pub mod consensus_state;
mod context;

pub use context::*;

/// Trait preludes for the ICS-02 client implementation.
pub mod prelude {
    pub use crate::client_state::*;
    pub use crate::consensus_state::*;
    pub use crate::context::*;
}

pub mod types {
    #[doc(inline)]
    pub use ibc_tao_client_types::*;
}
