//! Helpers shared across the workspace.

mod pretty;

pub use pretty::PrettySlice;
