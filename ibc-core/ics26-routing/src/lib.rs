//! This library contains the traits an application module and a router
//! implement to plug into the protocol layer.
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

pub mod module;
pub mod router;

/// Re-exports router data structures from the `ibc-tao-router-types` crate
pub mod types {
    #[doc(inline)]
    pub use ibc_tao_router_types::*;
}
