//! Facade
//!
//! Binds one resource path to both a file record and a directory record.

use std::path::{Path, PathBuf};

use crate::config::KitConfig;
use crate::directory::DirectoryRecord;
use crate::file::FileRecord;

#[derive(Debug, Clone)]
pub struct Manager {
    resource: PathBuf,
    file: FileRecord,
    directory: DirectoryRecord,
}

impl Manager {
    pub fn new(resource: impl Into<PathBuf>) -> Self {
        let resource = resource.into();
        Self {
            file: FileRecord::new(&resource),
            directory: DirectoryRecord::new(&resource),
            resource,
        }
    }

    /// Builds records that use the configured writer bounds and group
    /// failure policy.
    pub fn with_config(resource: impl Into<PathBuf>, config: &KitConfig) -> Self {
        let resource = resource.into();
        Self {
            file: FileRecord::new(&resource)
                .with_writer_config(config.writer.clone())
                .with_permission_maker(config.permission_maker()),
            directory: DirectoryRecord::new(&resource)
                .with_permission_maker(config.permission_maker()),
            resource,
        }
    }

    pub fn resource(&self) -> &Path {
        &self.resource
    }

    pub fn file(&self) -> &FileRecord {
        &self.file
    }

    pub fn directory(&self) -> &DirectoryRecord {
        &self.directory
    }
}
