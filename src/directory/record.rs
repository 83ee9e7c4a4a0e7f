//! Directory record
//!
//! Identifies one directory path and exposes creation, listing, removal and
//! permission operations on it.

use log::{error, info};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DirectoryError, PermissionError};
use crate::permission::{PermissionMaker, Permittable};

#[derive(Debug, Clone)]
pub struct DirectoryRecord {
    path: PathBuf,
    permissions: PermissionMaker,
}

impl DirectoryRecord {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            permissions: PermissionMaker::default(),
        }
    }

    pub fn with_permission_maker(mut self, maker: PermissionMaker) -> Self {
        self.permissions = maker;
        self
    }

    /// Returns a record for `path` sharing this record's configuration.
    pub fn at(&self, path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            permissions: self.permissions.clone(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true iff the path denotes an existing directory.
    pub fn exists(&self) -> bool {
        self.path.exists() && self.path.is_dir()
    }

    /// Creates the directory and any missing parents.
    pub fn create(&self) -> Result<&Self, DirectoryError> {
        fs::create_dir_all(&self.path)?;
        info!("Created directory {}", self.path.display());
        Ok(self)
    }

    pub fn create_if_not_exists(&self) -> Result<&Self, DirectoryError> {
        if !self.exists() {
            self.create()?;
        }
        Ok(self)
    }

    /// Removes the directory, which must be empty.
    pub fn delete(&self) -> Result<(), DirectoryError> {
        if !self.exists() {
            return Err(DirectoryError::NotFound(self.path.display().to_string()));
        }
        fs::remove_dir(&self.path).map_err(|e| {
            error!("Failed to delete directory {}: {}", self.path.display(), e);
            DirectoryError::from(e)
        })?;
        info!("Deleted directory {}", self.path.display());
        Ok(())
    }

    /// Removes the directory and everything below it.
    pub fn delete_recursive(&self) -> Result<(), DirectoryError> {
        if !self.exists() {
            return Err(DirectoryError::NotFound(self.path.display().to_string()));
        }
        fs::remove_dir_all(&self.path)?;
        info!("Deleted directory tree {}", self.path.display());
        Ok(())
    }

    /// Lists entry names in sorted order; directories carry a trailing `/`.
    /// Returns `None` when the directory does not exist.
    pub fn list(&self) -> Result<Option<Vec<String>>, DirectoryError> {
        if !self.exists() {
            return Ok(None);
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.path)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            if entry.file_type()?.is_dir() {
                entries.push(format!("{}/", name));
            } else {
                entries.push(name);
            }
        }
        entries.sort();

        Ok(Some(entries))
    }

    /// Changes the owner; `None` when the directory does not exist.
    pub fn chown(&self, owner: &str) -> Result<Option<bool>, PermissionError> {
        if !self.exists() {
            return Ok(None);
        }
        self.permissions.change_owner(self, owner).map(Some)
    }

    /// Changes the group; `None` when the directory does not exist.
    pub fn chgrp(&self, group: &str) -> Result<Option<bool>, PermissionError> {
        if !self.exists() {
            return Ok(None);
        }
        self.permissions.change_group(self, group).map(Some)
    }

    /// Changes the mode; `None` when the directory does not exist.
    pub fn chmod(&self, mode: u32) -> Result<Option<bool>, PermissionError> {
        if !self.exists() {
            return Ok(None);
        }
        self.permissions.change_mode(self, mode).map(Some)
    }
}

impl Permittable for DirectoryRecord {
    fn permitted_path(&self) -> &Path {
        &self.path
    }
}
