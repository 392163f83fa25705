//! Exposes the handler entry points of the protocol layer, along with the
//! redundant-relay ante filter run at mempool admission.
//!
//! When processing a given message `M`, if any method in this library returns
//! an error, the runtime is expected to rollback all state modifications made
//! to the context (e.g. [`ExecutionContext`](ibc_tao_host::ExecutionContext))
//! while processing `M`. If the transaction containing `M` consists of multiple
//! messages, then typically the state modifications from all messages is
//! expected to be rolled back as well.
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

pub mod ante;
pub mod entrypoint;

/// Re-export handler types from the `ibc-tao-handler-types` crate.
pub mod types {
    #[doc(inline)]
    pub use ibc_tao_handler_types::*;
}
