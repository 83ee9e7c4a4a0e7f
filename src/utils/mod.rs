//! Utility functions
//!
//! Provides logging setup, size formatting and name generation.

pub mod format;
pub mod logging;
pub mod naming;

pub use format::format_size;
pub use naming::unique_name;
