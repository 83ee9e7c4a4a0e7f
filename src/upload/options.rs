//! Upload processor options

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// How accepted uploads are named in their destination folder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase", tag = "strategy", content = "name")]
pub enum NameStrategy {
    /// Keep the client's file stem.
    #[default]
    Original,
    /// Use a generated unique name.
    Generated,
    /// Use the given name; files of a multiple-file field get `_<index>`.
    Fixed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub default_folder: PathBuf,
    /// MIME type to destination folder.
    pub type_folders: HashMap<String, PathBuf>,
    /// Maximum accepted size in bytes.
    pub max_file_size: Option<u64>,
    /// Raise validation failures instead of only recording them.
    pub strict: bool,
    pub naming: NameStrategy,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            default_folder: PathBuf::from("uploads"),
            type_folders: HashMap::new(),
            max_file_size: None,
            strict: false,
            naming: NameStrategy::default(),
        }
    }
}

impl UploadConfig {
    pub fn new(default_folder: impl Into<PathBuf>) -> Self {
        Self {
            default_folder: default_folder.into(),
            ..Self::default()
        }
    }

    pub fn with_type_folder(
        mut self,
        mime_type: impl Into<String>,
        folder: impl Into<PathBuf>,
    ) -> Self {
        self.type_folders.insert(mime_type.into(), folder.into());
        self
    }

    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = Some(bytes);
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_naming(mut self, naming: NameStrategy) -> Self {
        self.naming = naming;
        self
    }

    /// Folder for a declared MIME type, falling back to the default folder.
    /// MIME types compare case-insensitively.
    pub fn destination_for(&self, declared_type: &str) -> &Path {
        self.type_folders
            .iter()
            .find(|(mime, _)| mime.eq_ignore_ascii_case(declared_type))
            .map(|(_, folder)| folder.as_path())
            .unwrap_or(&self.default_folder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_by_type_with_default_fallback() {
        let config = UploadConfig::new("/misc/").with_type_folder("image/png", "/img/");

        assert_eq!(config.destination_for("image/png"), Path::new("/img/"));
        assert_eq!(config.destination_for("IMAGE/PNG"), Path::new("/img/"));
        assert_eq!(config.destination_for("text/plain"), Path::new("/misc/"));
        assert_eq!(config.destination_for(""), Path::new("/misc/"));
    }
}
