//! Permission management
//!
//! Applies owner, group and mode changes to files and directories.

pub mod accounts;
pub mod maker;

pub use maker::{GroupFailurePolicy, PermissionMaker, Permittable};
