//! Configuration management for fs-kit
//!
//! Loads writer, upload and permission settings from an optional TOML file
//! with environment overrides (`FS_KIT__UPLOAD__STRICT=true`, ...).

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::file::WriterConfig;
use crate::permission::{GroupFailurePolicy, PermissionMaker};
use crate::upload::UploadConfig;

/// Files searched by [`KitConfig::load`], without extension.
const CONFIG_PATHS: [&str; 2] = ["fs-kit", "config"];

/// Complete library configuration
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct KitConfig {
    /// Length bounds and newline behaviour for file writes
    pub writer: WriterConfig,

    /// Upload destinations, size limit, strictness and naming
    pub upload: UploadConfig,

    pub permissions: PermissionConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct PermissionConfig {
    /// Whether failed group changes are reported or only logged
    pub group_failure_policy: GroupFailurePolicy,
}

impl KitConfig {
    /// Load configuration from `fs-kit.toml` / `config.toml` (both optional)
    /// with environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        for config_path in CONFIG_PATHS {
            builder = builder.add_source(File::with_name(config_path).required(false));
        }

        let settings = builder
            .add_source(
                Environment::with_prefix("FS_KIT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: KitConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from one explicit file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let config: KitConfig = Config::builder()
            .add_source(File::from(path))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        if let (Some(min), Some(max)) = (self.writer.min_length(), self.writer.max_length()) {
            if min > max {
                return Err(ConfigError::Message(format!(
                    "writer.min_length ({}) must not exceed writer.max_length ({})",
                    min, max
                )));
            }
        }

        if self.upload.max_file_size == Some(0) {
            return Err(ConfigError::Message(
                "upload.max_file_size must be greater than 0".into(),
            ));
        }

        if self.upload.default_folder.as_os_str().is_empty() {
            return Err(ConfigError::Message(
                "upload.default_folder cannot be empty".into(),
            ));
        }

        Ok(())
    }

    pub fn permission_maker(&self) -> PermissionMaker {
        PermissionMaker::with_group_failure_policy(self.permissions.group_failure_policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::NameStrategy;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_config(contents: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fs-kit.toml");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_defaults() {
        let config = KitConfig::default();
        assert_eq!(config.writer, WriterConfig::default());
        assert_eq!(config.upload.default_folder, PathBuf::from("uploads"));
        assert!(!config.upload.strict);
        assert_eq!(
            config.permissions.group_failure_policy,
            GroupFailurePolicy::Ignore
        );
    }

    #[test]
    fn test_from_file() {
        let (_dir, path) = write_config(
            r#"
[writer]
min_length = 2
max_length = 80
append_newline = true

[upload]
default_folder = "/srv/misc"
max_file_size = 1048576
strict = true

[upload.type_folders]
"image/png" = "/srv/img"

[permissions]
group_failure_policy = "report"
"#,
        );

        let config = KitConfig::from_file(&path).unwrap();

        assert_eq!(config.writer.min_length(), Some(2));
        assert_eq!(config.writer.max_length(), Some(80));
        assert!(config.writer.appends_newline());
        assert_eq!(config.upload.max_file_size, Some(1048576));
        assert!(config.upload.strict);
        assert_eq!(config.upload.naming, NameStrategy::Original);
        assert_eq!(
            config.upload.destination_for("image/png"),
            Path::new("/srv/img")
        );
        assert_eq!(
            config.upload.destination_for("text/plain"),
            Path::new("/srv/misc")
        );
        assert_eq!(
            config.permission_maker().group_failure_policy(),
            GroupFailurePolicy::Report
        );
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let (_dir, path) = write_config("[writer]\nmin_length = 10\nmax_length = 5\n");
        assert!(KitConfig::from_file(&path).is_err());
    }

    #[test]
    fn test_load_reads_environment_overrides() {
        // Only this test touches FS_KIT__ variables or calls `load`.
        unsafe {
            std::env::set_var("FS_KIT__UPLOAD__STRICT", "true");
            std::env::set_var("FS_KIT__WRITER__MAX_LENGTH", "3");
        }

        let loaded = KitConfig::load();

        unsafe {
            std::env::remove_var("FS_KIT__UPLOAD__STRICT");
            std::env::remove_var("FS_KIT__WRITER__MAX_LENGTH");
        }

        let config = loaded.unwrap();
        assert!(config.upload.strict);
        assert_eq!(config.writer.max_length(), Some(3));
        assert_eq!(config.upload.default_folder, PathBuf::from("uploads"));
    }

    #[test]
    fn test_rejects_zero_file_size() {
        let (_dir, path) = write_config("[upload]\nmax_file_size = 0\n");
        assert!(KitConfig::from_file(&path).is_err());
    }
}
