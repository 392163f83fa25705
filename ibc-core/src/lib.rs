//! Re-exports data structures and implementations of the transport,
//! authentication and ordering layer.
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

/// Re-exports the handler entrypoints from the `ibc-tao-handler` crate for
/// added convenience.
pub mod entrypoint {
    #[doc(inline)]
    pub use ibc_tao_handler::entrypoint::*;
}

/// Re-exports primitive types from the `ibc-tao-primitives` crate
pub mod primitives {
    #[doc(inline)]
    pub use ibc_tao_primitives::*;
}

/// Re-exports ICS-02 implementation from the `ibc-tao-client` crate
pub mod client {
    #[doc(inline)]
    pub use ibc_tao_client::*;
}

/// Re-exports ICS-03 implementation from the `ibc-tao-connection` crate
pub mod connection {
    #[doc(inline)]
    pub use ibc_tao_connection::*;
}

/// Re-exports ICS-04 implementation from the `ibc-tao-channel` crate
pub mod channel {
    #[doc(inline)]
    pub use ibc_tao_channel::*;
}

/// Re-exports ICS-23 data structures from the `ibc-tao-commitment-types` crate
pub mod commitment_types {
    #[doc(inline)]
    pub use ibc_tao_commitment_types::*;
}

/// Re-exports ICS-24 implementation from the `ibc-tao-host` crate
pub mod host {
    #[doc(inline)]
    pub use ibc_tao_host::*;
}

/// Re-exports ICS-25 implementation from the `ibc-tao-handler` crate
pub mod handler {
    #[doc(inline)]
    pub use ibc_tao_handler::*;
}

/// Re-exports ICS-26 implementation from the `ibc-tao-router` crate
pub mod router {
    #[doc(inline)]
    pub use ibc_tao_router::*;
}
