//! Upload processing
//!
//! Validates host-provided upload records and moves accepted files into
//! their destination folders.

pub mod descriptor;
pub mod input;
pub mod manifest;
pub mod options;
pub mod processor;

pub use descriptor::{UploadDescriptor, UploadErrorCode, UploadStatus};
pub use input::{UploadField, UploadInput, UploadRecord};
pub use manifest::UploadManifest;
pub use options::{NameStrategy, UploadConfig};
pub use processor::{UploadHook, UploadProcessor};
