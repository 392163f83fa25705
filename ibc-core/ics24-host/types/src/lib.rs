//! ICS-24: Host defines the minimal set of interfaces that a state machine
//! hosting an IBC-enabled chain must implement.
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

pub mod error;
pub mod identifiers;
pub mod params;
pub mod path;
pub mod store;
pub(crate) mod validate;
