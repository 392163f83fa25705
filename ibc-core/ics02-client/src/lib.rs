//! ICS-02: Client Semantics implementation for verifying remote IBC-enabled chains,
//! along with re-exporting data structures from `ibc-tao-client-types` crate.
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

pub mod handler;

/// Re-exports ICS-02 traits from `ibc-tao-client-context` for custom IBC
/// client implementation.
pub mod context {
    #[doc(inline)]
    pub use ibc_tao_client_context::*;
}

/// Re-exports ICS-02 data structures from the `ibc-tao-client-types` crate.
pub mod types {
    #[doc(inline)]
    pub use ibc_tao_client_types::*;
}
