//! Contains primitives types and traits common to various IBC TAO components.
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

pub mod utils;

mod traits;
pub use traits::*;

mod types;
pub use types::*;
