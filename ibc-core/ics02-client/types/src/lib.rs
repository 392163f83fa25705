//! Implementation of the Client Semantics (ICS-02) data structures.
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

pub mod error;
pub mod events;
mod height;
pub mod msgs;
mod status;

pub use height::*;
pub use status::*;
