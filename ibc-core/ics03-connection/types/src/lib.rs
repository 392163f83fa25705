//! Implementation of the Connection Semantics (ICS-03) data structures.
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

pub mod connection;
pub mod error;
pub mod events;
pub mod msgs;
pub mod version;

pub use connection::*;
