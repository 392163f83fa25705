//! ICS-23: Commitment implementation of a cryptographic scheme that verifies
//! state transitions between chains.
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

pub mod commitment;
pub mod error;
pub mod merkle;
pub mod verifier;
