//! Error handling
//!
//! Defines error types and handling for the library and its binary.

pub mod handlers;
pub mod types;

pub use types::*;
