//! File content writer
//!
//! Appends validated string data to a file. Length bounds and the newline
//! toggle live in a [`WriterConfig`] owned by each writer, so two writers
//! never observe each other's settings.

use log::{debug, warn};
use serde::Deserialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::WriteError;

/// Length bounds and newline behaviour applied to every write.
///
/// A bound of `0` counts as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    min_length: Option<usize>,
    max_length: Option<usize>,
    append_newline: bool,
}

impl WriterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum length, in bytes, expected from written data.
    pub fn set_minimum_length(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }

    /// Sets the maximum length, in bytes, allowed for written data.
    pub fn set_maximum_length(mut self, length: usize) -> Self {
        self.max_length = Some(length);
        self
    }

    pub fn clear_minimum_length(mut self) -> Self {
        self.min_length = None;
        self
    }

    pub fn clear_maximum_length(mut self) -> Self {
        self.max_length = None;
        self
    }

    /// Makes every subsequent write end with a newline. Sticky.
    pub fn to_new_line(mut self) -> Self {
        self.append_newline = true;
        self
    }

    pub fn min_length(&self) -> Option<usize> {
        self.min_length.filter(|&n| n > 0)
    }

    pub fn max_length(&self) -> Option<usize> {
        self.max_length.filter(|&n| n > 0)
    }

    pub fn appends_newline(&self) -> bool {
        self.append_newline
    }

    /// Checks `data` against the configured bounds.
    pub fn validate(&self, data: &str) -> Result<(), WriteError> {
        let length = data.len();

        if let Some(minimum) = self.min_length() {
            if length < minimum {
                return Err(WriteError::TooShort { length, minimum });
            }
        }

        if let Some(maximum) = self.max_length() {
            if length > maximum {
                return Err(WriteError::TooLong { length, maximum });
            }
        }

        Ok(())
    }
}

/// Appends data to a single file.
#[derive(Debug, Clone)]
pub struct Writer {
    path: PathBuf,
    config: WriterConfig,
}

impl Writer {
    pub fn new(path: impl Into<PathBuf>, config: WriterConfig) -> Self {
        Self {
            path: path.into(),
            config,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Validates `data` and appends it to the file, creating the file if
    /// needed. The newline toggle applies on every call, including the
    /// first write into an empty file.
    pub fn write(&self, data: &str) -> Result<(), WriteError> {
        if let Err(e) = self.config.validate(data) {
            warn!("Rejected write to {}: {}", self.path.display(), e);
            return Err(e);
        }

        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;

        if self.config.append_newline {
            file.write_all(format!("{}\n", data).as_bytes())?;
        } else {
            file.write_all(data.as_bytes())?;
        }

        debug!("Appended {} bytes to {}", data.len(), self.path.display());
        Ok(())
    }
}
