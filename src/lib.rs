//! fs-kit
//!
//! Convenience layer over native filesystem primitives: file and directory
//! records, a validating writer, permission changes and an upload processor.

pub mod config;
pub mod directory;
pub mod error;
pub mod file;
pub mod manager;
pub mod permission;
pub mod upload;
pub mod utils;

pub use manager::Manager;
