//! Error types
//!
//! Defines domain-specific error types for each module of the library.

use std::fmt;
use std::io;

/// File record errors
#[derive(Debug)]
pub enum FileError {
    NotFound(String),
    LineOutOfRange { line: usize, count: usize },
    Write(WriteError),
    Permission(PermissionError),
    IoError(io::Error),
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::NotFound(p) => write!(f, "File not found: {}", p),
            FileError::LineOutOfRange { line, count } => {
                write!(f, "Line {} is out of range (file has {} lines)", line, count)
            }
            FileError::Write(e) => write!(f, "Write failed: {}", e),
            FileError::Permission(e) => write!(f, "Permission change failed: {}", e),
            FileError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for FileError {}

impl From<io::Error> for FileError {
    fn from(error: io::Error) -> Self {
        FileError::IoError(error)
    }
}

impl From<WriteError> for FileError {
    fn from(error: WriteError) -> Self {
        FileError::Write(error)
    }
}

impl From<PermissionError> for FileError {
    fn from(error: PermissionError) -> Self {
        FileError::Permission(error)
    }
}

/// Writer errors
#[derive(Debug)]
pub enum WriteError {
    TooShort { length: usize, minimum: usize },
    TooLong { length: usize, maximum: usize },
    IoError(io::Error),
}

impl WriteError {
    /// Returns true when the data was rejected by the configured length bounds.
    pub fn is_length_violation(&self) -> bool {
        matches!(self, WriteError::TooShort { .. } | WriteError::TooLong { .. })
    }
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteError::TooShort { length, minimum } => write!(
                f,
                "Unable to write data into file. Data length {} is lower than required length {}",
                length, minimum
            ),
            WriteError::TooLong { length, maximum } => write!(
                f,
                "Unable to write data into file. Data length {} is higher than allowed length {}",
                length, maximum
            ),
            WriteError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for WriteError {}

impl From<io::Error> for WriteError {
    fn from(error: io::Error) -> Self {
        WriteError::IoError(error)
    }
}

/// Permission module errors
#[derive(Debug)]
pub enum PermissionError {
    ChangeOwner { path: String, owner: String, source: io::Error },
    ChangeGroup { path: String, group: String, source: io::Error },
    ChangeMode { path: String, mode: u32, source: io::Error },
    UnknownUser(String),
    UnknownGroup(String),
}

impl fmt::Display for PermissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionError::ChangeOwner { path, owner, source } => write!(
                f,
                "Could not change ownership of {} to {}: {}",
                path, owner, source
            ),
            PermissionError::ChangeGroup { path, group, source } => {
                write!(f, "Could not change group of {} to {}: {}", path, group, source)
            }
            PermissionError::ChangeMode { path, mode, source } => {
                write!(f, "Could not change mode of {} to {:o}: {}", path, mode, source)
            }
            PermissionError::UnknownUser(u) => write!(f, "Unknown user: {}", u),
            PermissionError::UnknownGroup(g) => write!(f, "Unknown group: {}", g),
        }
    }
}

impl std::error::Error for PermissionError {}

/// Directory record errors
#[derive(Debug)]
pub enum DirectoryError {
    NotFound(String),
    Permission(PermissionError),
    IoError(io::Error),
}

impl fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectoryError::NotFound(p) => write!(f, "Directory not found: {}", p),
            DirectoryError::Permission(e) => write!(f, "Permission change failed: {}", e),
            DirectoryError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for DirectoryError {}

impl From<io::Error> for DirectoryError {
    fn from(error: io::Error) -> Self {
        DirectoryError::IoError(error)
    }
}

impl From<PermissionError> for DirectoryError {
    fn from(error: PermissionError) -> Self {
        DirectoryError::Permission(error)
    }
}

/// Upload processor errors
///
/// Only raised in strict mode; otherwise the message is recorded on the
/// processor and the batch halts.
#[derive(Debug)]
pub enum UploadError {
    Fatal(String),
    MissingField(String),
}

impl UploadError {
    pub fn message(&self) -> String {
        match self {
            UploadError::Fatal(msg) => msg.clone(),
            UploadError::MissingField(field) => format!("No upload found for field {}", field),
        }
    }
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::Fatal(msg) => write!(f, "Upload failed: {}", msg),
            UploadError::MissingField(_) => write!(f, "Upload failed: {}", self.message()),
        }
    }
}

impl std::error::Error for UploadError {}

/// General error that encompasses all error types
#[derive(Debug)]
pub enum KitError {
    File(FileError),
    Write(WriteError),
    Permission(PermissionError),
    Directory(DirectoryError),
    Upload(UploadError),
    Config(config::ConfigError),
    IoError(io::Error),
}

impl fmt::Display for KitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KitError::File(e) => write!(f, "File error: {}", e),
            KitError::Write(e) => write!(f, "Write error: {}", e),
            KitError::Permission(e) => write!(f, "Permission error: {}", e),
            KitError::Directory(e) => write!(f, "Directory error: {}", e),
            KitError::Upload(e) => write!(f, "Upload error: {}", e),
            KitError::Config(e) => write!(f, "Configuration error: {}", e),
            KitError::IoError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for KitError {}

impl From<FileError> for KitError {
    fn from(error: FileError) -> Self {
        KitError::File(error)
    }
}

impl From<WriteError> for KitError {
    fn from(error: WriteError) -> Self {
        KitError::Write(error)
    }
}

impl From<PermissionError> for KitError {
    fn from(error: PermissionError) -> Self {
        KitError::Permission(error)
    }
}

impl From<DirectoryError> for KitError {
    fn from(error: DirectoryError) -> Self {
        KitError::Directory(error)
    }
}

impl From<UploadError> for KitError {
    fn from(error: UploadError) -> Self {
        KitError::Upload(error)
    }
}

impl From<config::ConfigError> for KitError {
    fn from(error: config::ConfigError) -> Self {
        KitError::Config(error)
    }
}

impl From<io::Error> for KitError {
    fn from(error: io::Error) -> Self {
        KitError::IoError(error)
    }
}
