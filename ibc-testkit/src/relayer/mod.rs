pub mod context;
pub mod error;
pub mod integration;
pub mod utils;
