//! File record
//!
//! A [`FileRecord`] identifies one filesystem path and exposes existence,
//! metadata, read/write, rename/copy/delete and permission operations on it.
//! Records are immutable: pointing at another file means asking for a new
//! record with [`FileRecord::at`].

use log::{debug, info, warn};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::{FileError, PermissionError};
use crate::file::reader;
use crate::file::writer::{Writer, WriterConfig};
use crate::permission::{PermissionMaker, Permittable};
use crate::utils::unique_name;

/// Kind of entry a file record points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    File,
    Symlink,
}

#[derive(Debug, Clone)]
pub struct FileRecord {
    path: PathBuf,
    writer_config: WriterConfig,
    permissions: PermissionMaker,
}

impl FileRecord {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writer_config: WriterConfig::default(),
            permissions: PermissionMaker::default(),
        }
    }

    pub fn with_writer_config(mut self, config: WriterConfig) -> Self {
        self.writer_config = config;
        self
    }

    pub fn with_permission_maker(mut self, maker: PermissionMaker) -> Self {
        self.permissions = maker;
        self
    }

    /// Returns a record for `path` sharing this record's configuration.
    pub fn at(&self, path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writer_config: self.writer_config.clone(),
            permissions: self.permissions.clone(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn writer_config(&self) -> &WriterConfig {
        &self.writer_config
    }

    // --------------------
    // Creation and queries
    // --------------------

    /// Creates the file, truncating it if it already exists.
    pub fn create(&self) -> Result<&Self, FileError> {
        File::create(&self.path)?;
        info!("Created file {}", self.path.display());
        Ok(self)
    }

    /// Creates the file only when it does not exist yet.
    pub fn create_if_not_exists(&self) -> Result<&Self, FileError> {
        if !self.exists() {
            self.create()?;
        }
        Ok(self)
    }

    /// Returns true iff the path denotes an existing regular file.
    pub fn exists(&self) -> bool {
        self.path.exists() && self.path.is_file()
    }

    pub fn size(&self) -> Option<u64> {
        if !self.exists() {
            return None;
        }
        fs::metadata(&self.path).ok().map(|m| m.len())
    }

    pub fn file_type(&self) -> Option<FileKind> {
        if !self.exists() {
            return None;
        }
        let metadata = fs::symlink_metadata(&self.path).ok()?;
        if metadata.file_type().is_symlink() {
            Some(FileKind::Symlink)
        } else {
            Some(FileKind::File)
        }
    }

    pub fn modified_time(&self) -> Option<SystemTime> {
        if !self.exists() {
            return None;
        }
        fs::metadata(&self.path).ok()?.modified().ok()
    }

    pub fn accessed_time(&self) -> Option<SystemTime> {
        if !self.exists() {
            return None;
        }
        fs::metadata(&self.path).ok()?.accessed().ok()
    }

    /// Permission-bit check: true when the file has any write bit set. It does
    /// not consider the file's owner, so it is not an access check.
    pub fn is_writable(&self) -> bool {
        fs::metadata(&self.path)
            .map(|m| m.is_file() && !m.permissions().readonly())
            .unwrap_or(false)
    }

    pub fn is_executable(&self) -> bool {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::metadata(&self.path)
                .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
                .unwrap_or(false)
        }
        #[cfg(not(unix))]
        {
            false
        }
    }

    pub fn real_path(&self) -> Option<PathBuf> {
        if !self.exists() {
            return None;
        }
        self.path.canonicalize().ok()
    }

    pub fn extension(&self) -> Option<String> {
        if !self.exists() {
            return None;
        }
        self.path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
    }

    pub fn name_without_extension(&self) -> Option<String> {
        if !self.exists() {
            return None;
        }
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
    }

    // --------------------
    // Moving and removal
    // --------------------

    /// Copies the file to `destination`, which must already exist.
    ///
    /// A directory destination receives the file under its own name; an
    /// existing file is overwritten. Returns `Ok(false)` when either side is
    /// missing.
    pub fn copy_to(&self, destination: impl AsRef<Path>) -> Result<bool, FileError> {
        let destination = destination.as_ref();
        if !self.exists() || !destination.exists() {
            debug!(
                "Skipping copy of {} to {}: source or destination missing",
                self.path.display(),
                destination.display()
            );
            return Ok(false);
        }

        let target = match (destination.is_dir(), self.path.file_name()) {
            (true, Some(name)) => destination.join(name),
            _ => destination.to_path_buf(),
        };

        let bytes = fs::copy(&self.path, &target)?;
        info!(
            "Copied {} to {} ({} bytes)",
            self.path.display(),
            target.display(),
            bytes
        );
        Ok(true)
    }

    /// Renames the file and returns the record for its new path.
    ///
    /// An empty name is replaced by a generated unique name that keeps the
    /// current extension. A bare name stays in the file's directory.
    /// Returns `Ok(None)` when the file does not exist.
    pub fn rename(&self, new_name: &str) -> Result<Option<FileRecord>, FileError> {
        if !self.exists() {
            return Ok(None);
        }

        let new_name = if new_name.is_empty() {
            match self.path.extension() {
                Some(ext) => format!("{}.{}", unique_name(), ext.to_string_lossy()),
                None => unique_name(),
            }
        } else {
            new_name.to_string()
        };

        let candidate = PathBuf::from(&new_name);
        let is_bare = candidate
            .parent()
            .is_none_or(|parent| parent.as_os_str().is_empty());
        let target = match (is_bare, self.path.parent()) {
            (true, Some(parent)) => parent.join(candidate),
            _ => candidate,
        };

        fs::rename(&self.path, &target)?;
        info!("Renamed {} to {}", self.path.display(), target.display());
        Ok(Some(self.at(target)))
    }

    /// Deletes the file.
    pub fn delete(&self) -> Result<(), FileError> {
        if !self.exists() {
            return Err(FileError::NotFound(self.path.display().to_string()));
        }
        fs::remove_file(&self.path)?;
        info!("Deleted file {}", self.path.display());
        Ok(())
    }

    /// Deletes the file only if it exists.
    pub fn delete_if_exists(&self) -> Result<bool, FileError> {
        if !self.exists() {
            return Ok(false);
        }
        self.delete()?;
        Ok(true)
    }

    /// Deletes every listed file that exists, reporting per path whether it
    /// was removed.
    pub fn delete_multiple<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<bool>, FileError> {
        paths
            .iter()
            .map(|path| self.at(path.as_ref()).delete_if_exists())
            .collect()
    }

    // --------------------
    // Content
    // --------------------

    /// Returns the file content, or `None` when the file does not exist.
    pub fn read(&self) -> Result<Option<String>, FileError> {
        if !self.exists() {
            return Ok(None);
        }
        Ok(Some(reader::read(&self.path)?))
    }

    /// Returns the file content as lines, or `None` when the file does not
    /// exist.
    pub fn read_lines(&self) -> Result<Option<Vec<String>>, FileError> {
        if !self.exists() {
            return Ok(None);
        }
        Ok(Some(reader::read_lines(&self.path)?))
    }

    /// Returns line `line` (zero-based).
    pub fn get_line(&self, line: usize) -> Result<String, FileError> {
        if !self.exists() {
            return Err(FileError::NotFound(format!(
                "Unable to get line from file {}",
                self.path.display()
            )));
        }

        let mut lines = reader::read_lines(&self.path)?;
        let count = lines.len();
        if line >= count {
            return Err(FileError::LineOutOfRange { line, count });
        }
        Ok(lines.swap_remove(line))
    }

    /// Appends `data` through a [`Writer`] configured from this record.
    ///
    /// Returns `Ok(false)` without creating anything when the file does not
    /// exist.
    pub fn write(&self, data: &str) -> Result<bool, FileError> {
        if !self.exists() {
            warn!("Refusing to write to missing file {}", self.path.display());
            return Ok(false);
        }
        Writer::new(&self.path, self.writer_config.clone()).write(data)?;
        Ok(true)
    }

    // --------------------
    // Permissions
    // --------------------

    /// Changes the owner; `None` when the file does not exist.
    pub fn chown(&self, owner: &str) -> Result<Option<bool>, PermissionError> {
        if !self.exists() {
            return Ok(None);
        }
        self.permissions.change_owner(self, owner).map(Some)
    }

    /// Changes the group; `None` when the file does not exist.
    pub fn chgrp(&self, group: &str) -> Result<Option<bool>, PermissionError> {
        if !self.exists() {
            return Ok(None);
        }
        self.permissions.change_group(self, group).map(Some)
    }

    /// Changes the mode; `None` when the file does not exist.
    pub fn chmod(&self, mode: u32) -> Result<Option<bool>, PermissionError> {
        if !self.exists() {
            return Ok(None);
        }
        self.permissions.change_mode(self, mode).map(Some)
    }
}

impl Permittable for FileRecord {
    fn permitted_path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn with_file(contents: &str) -> (TempDir, FileRecord) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, contents).unwrap();
        (dir, FileRecord::new(path))
    }

    #[test]
    fn test_exists_only_for_regular_files() {
        let dir = TempDir::new().unwrap();
        assert!(!FileRecord::new(dir.path()).exists());
        assert!(!FileRecord::new(dir.path().join("missing")).exists());

        let (_dir, record) = with_file("x");
        assert!(record.exists());
        assert_eq!(record.file_type(), Some(FileKind::File));
    }

    #[test]
    fn test_missing_file_queries_return_nothing() {
        let dir = TempDir::new().unwrap();
        let record = FileRecord::new(dir.path().join("missing.txt"));

        assert_eq!(record.read().unwrap(), None);
        assert_eq!(record.read_lines().unwrap(), None);
        assert_eq!(record.size(), None);
        assert_eq!(record.extension(), None);
        assert_eq!(record.modified_time(), None);
        assert!(!record.write("data").unwrap());
        assert!(!record.path().exists());
    }

    #[test]
    fn test_create_if_not_exists_keeps_content() {
        let (_dir, record) = with_file("keep me");
        record.create_if_not_exists().unwrap();
        assert_eq!(record.read().unwrap().as_deref(), Some("keep me"));

        record.create().unwrap();
        assert_eq!(record.size(), Some(0));
    }

    #[test]
    fn test_get_line() {
        let (_dir, record) = with_file("alpha\nbeta\ngamma\n");
        assert_eq!(record.get_line(0).unwrap(), "alpha");
        assert_eq!(record.get_line(2).unwrap(), "gamma");

        let err = record.get_line(3).unwrap_err();
        assert!(matches!(err, FileError::LineOutOfRange { line: 3, count: 3 }));
    }

    #[test]
    fn test_get_line_on_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = FileRecord::new(dir.path().join("gone.txt"))
            .get_line(0)
            .unwrap_err();
        assert!(matches!(err, FileError::NotFound(_)));
    }

    #[test]
    fn test_write_uses_record_writer_config() {
        let (_dir, record) = with_file("");
        let record =
            record.with_writer_config(WriterConfig::new().set_minimum_length(2).to_new_line());

        assert!(record.write("ok").unwrap());
        assert!(matches!(record.write("x"), Err(FileError::Write(_))));
        assert_eq!(record.read().unwrap().as_deref(), Some("ok\n"));
    }

    #[test]
    fn test_at_does_not_rebind_original() {
        let (dir, record) = with_file("a");
        let other = record.at(dir.path().join("other.txt"));

        assert_ne!(record.path(), other.path());
        assert!(record.exists());
        assert!(!other.exists());
    }

    #[test]
    fn test_rename_with_name_stays_in_directory() {
        let (dir, record) = with_file("a");
        let renamed = record.rename("renamed.txt").unwrap().unwrap();

        assert_eq!(renamed.path(), dir.path().join("renamed.txt"));
        assert!(renamed.exists());
        assert!(!record.exists());
    }

    #[test]
    fn test_rename_with_empty_name_generates_unique_names() {
        let (_dir, record) = with_file("a");
        let first = record.rename("").unwrap().unwrap();
        let second = first.rename("").unwrap().unwrap();

        assert_ne!(first.path(), second.path());
        assert_eq!(second.extension().as_deref(), Some("txt"));
        assert!(!second.name_without_extension().unwrap().is_empty());
    }

    #[test]
    fn test_rename_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(FileRecord::new(dir.path().join("x")).rename("y").unwrap().is_none());
    }

    #[test]
    fn test_copy_requires_destination() {
        let (dir, record) = with_file("payload");
        let missing = dir.path().join("nowhere.txt");
        assert!(!record.copy_to(&missing).unwrap());
        assert!(!missing.exists());

        let existing = dir.path().join("existing.txt");
        fs::write(&existing, "old").unwrap();
        assert!(record.copy_to(&existing).unwrap());
        assert_eq!(fs::read_to_string(&existing).unwrap(), "payload");

        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        assert!(record.copy_to(&sub).unwrap());
        assert_eq!(fs::read_to_string(sub.join("notes.txt")).unwrap(), "payload");
    }

    #[test]
    fn test_delete_variants() {
        let (dir, record) = with_file("a");
        record.delete().unwrap();
        assert!(matches!(record.delete(), Err(FileError::NotFound(_))));
        assert!(!record.delete_if_exists().unwrap());

        let a = dir.path().join("a.txt");
        fs::write(&a, "a").unwrap();
        let outcome = record
            .delete_multiple(&[a.clone(), dir.path().join("b.txt")])
            .unwrap();
        assert_eq!(outcome, vec![true, false]);
        assert!(!a.exists());
    }

    #[test]
    fn test_real_path_and_writable() {
        let (dir, record) = with_file("a");
        let real = record.real_path().unwrap();
        assert_eq!(real, dir.path().canonicalize().unwrap().join("notes.txt"));
        assert!(record.is_writable());
    }

    #[cfg(unix)]
    #[test]
    fn test_writable_follows_write_bits() {
        let (_dir, record) = with_file("a");
        record.chmod(0o444).unwrap();
        assert!(!record.is_writable());

        record.chmod(0o644).unwrap();
        assert!(record.is_writable());
    }

    #[cfg(unix)]
    #[test]
    fn test_chmod_through_record() {
        let (_dir, record) = with_file("a");
        assert_eq!(record.chmod(0o755).unwrap(), Some(true));
        assert!(record.is_executable());

        let missing = record.at("/definitely/not/here.txt");
        assert_eq!(missing.chmod(0o755).unwrap(), None);
    }
}
