//! Test harness for the `ibc-tao` handlers: an in-memory host chain with
//! provable snapshots, a mock light client that verifies them, a ping-pong
//! application module and a relayer driving two such chains.
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

pub mod context;
pub mod fixtures;
pub mod hosts;
pub mod relayer;
pub mod testapp;
pub mod utils;
