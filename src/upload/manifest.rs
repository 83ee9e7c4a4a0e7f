//! Upload manifest
//!
//! TOML description of a request's uploads, used by the binary:
//!
//! ```toml
//! [uploads.avatar]
//! name = "me.png"
//! size = 2048
//! tmp_name = "/tmp/upload-1"
//! type = "image/png"
//!
//! [[uploads.documents]]
//! name = "a.pdf"
//! size = 100
//! tmp_name = "/tmp/upload-2"
//! type = "application/pdf"
//! ```
//!
//! Table keys are lowercased on load, so `[uploads.Avatar]` is requested as
//! `avatar`.

use config::{Config, ConfigError, File};
use serde::Deserialize;
use std::path::Path;

use crate::upload::input::UploadInput;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadManifest {
    #[serde(default)]
    pub uploads: UploadInput,
}

impl UploadManifest {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path))
            .build()?
            .try_deserialize()
    }

    /// Field names in sorted order.
    pub fn field_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.uploads.keys().cloned().collect();
        names.sort();
        names
    }
}
