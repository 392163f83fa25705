//! ICS-26 routing data structures: which module owns which port or channel,
//! and what a module hands back to the core from its callbacks.
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

pub mod capability;
pub mod error;
pub mod event;
pub mod module;
