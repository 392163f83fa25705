//! ICS-25: Handler interface data structures shared by the entrypoints and
//! by hosts embedding the protocol layer.
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

pub mod error;
pub mod events;
pub mod msgs;
pub mod response;
