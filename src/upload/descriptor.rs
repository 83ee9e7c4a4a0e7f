//! Upload descriptor
//!
//! Per-file state carried through the upload pipeline.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::upload::input::UploadRecord;

/// Host upload error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadErrorCode {
    Ok,
    IniSize,
    FormSize,
    Partial,
    NoFile,
    NoTmpDir,
    CantWrite,
    Extension,
    Other(u32),
}

impl UploadErrorCode {
    pub fn code(&self) -> u32 {
        match self {
            UploadErrorCode::Ok => 0,
            UploadErrorCode::IniSize => 1,
            UploadErrorCode::FormSize => 2,
            UploadErrorCode::Partial => 3,
            UploadErrorCode::NoFile => 4,
            UploadErrorCode::NoTmpDir => 6,
            UploadErrorCode::CantWrite => 7,
            UploadErrorCode::Extension => 8,
            UploadErrorCode::Other(code) => *code,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, UploadErrorCode::Ok)
    }

    pub fn message(&self) -> &'static str {
        match self {
            UploadErrorCode::Ok => "the file uploaded successfully",
            UploadErrorCode::IniSize => "the file exceeds the host's maximum upload size",
            UploadErrorCode::FormSize => "the file exceeds the form's maximum upload size",
            UploadErrorCode::Partial => "the file was only partially uploaded",
            UploadErrorCode::NoFile => "no file was uploaded",
            UploadErrorCode::NoTmpDir => "the temporary upload folder is missing",
            UploadErrorCode::CantWrite => "the file could not be written to disk",
            UploadErrorCode::Extension => "an extension stopped the upload",
            UploadErrorCode::Other(_) => "unknown upload error",
        }
    }
}

impl From<u32> for UploadErrorCode {
    fn from(code: u32) -> Self {
        match code {
            0 => UploadErrorCode::Ok,
            1 => UploadErrorCode::IniSize,
            2 => UploadErrorCode::FormSize,
            3 => UploadErrorCode::Partial,
            4 => UploadErrorCode::NoFile,
            6 => UploadErrorCode::NoTmpDir,
            7 => UploadErrorCode::CantWrite,
            8 => UploadErrorCode::Extension,
            other => UploadErrorCode::Other(other),
        }
    }
}

impl fmt::Display for UploadErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message(), self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    Pending,
    Success,
}

/// A single upload moving through validation and placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadDescriptor {
    pub original_name: String,
    pub size: u64,
    pub temp_location: PathBuf,
    pub error_code: UploadErrorCode,
    pub declared_type: String,
    /// Target file name without extension.
    pub new_name: String,
    /// Position within a multiple-file field.
    pub index: Option<usize>,
    pub extension: String,
    pub destination_folder: PathBuf,
    pub new_location: PathBuf,
    pub status: UploadStatus,
}

impl UploadDescriptor {
    /// Builds a pending descriptor from a host record. The new name starts
    /// out as the original file stem.
    pub fn from_record(record: &UploadRecord, index: Option<usize>) -> Self {
        let original = Path::new(&record.name);
        let extension = original
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();
        let new_name = original
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            original_name: record.name.clone(),
            size: record.size,
            temp_location: record.tmp_name.clone(),
            error_code: UploadErrorCode::from(record.error),
            declared_type: record.mime_type.clone(),
            new_name,
            index,
            extension,
            destination_folder: PathBuf::new(),
            new_location: PathBuf::new(),
            status: UploadStatus::Pending,
        }
    }

    pub fn has_index(&self) -> bool {
        self.index.is_some()
    }

    /// Final file name: `<new_name>.<extension>`, or just the name when
    /// there is no extension.
    pub fn file_name(&self) -> String {
        if self.extension.is_empty() {
            self.new_name.clone()
        } else {
            format!("{}.{}", self.new_name, self.extension)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_round_trip_names() {
        assert_eq!(UploadErrorCode::from(0), UploadErrorCode::Ok);
        assert_eq!(UploadErrorCode::from(3), UploadErrorCode::Partial);
        assert_eq!(UploadErrorCode::from(5), UploadErrorCode::Other(5));
        assert_eq!(UploadErrorCode::Other(5).code(), 5);
        assert!(!UploadErrorCode::NoFile.is_ok());
    }

    #[test]
    fn test_from_record_splits_name() {
        let record = UploadRecord::new("photo.final.png", 10, "/tmp/php123", "image/png");
        let descriptor = UploadDescriptor::from_record(&record, Some(2));

        assert_eq!(descriptor.new_name, "photo.final");
        assert_eq!(descriptor.extension, "png");
        assert_eq!(descriptor.file_name(), "photo.final.png");
        assert!(descriptor.has_index());
        assert_eq!(descriptor.status, UploadStatus::Pending);
    }

    #[test]
    fn test_file_name_without_extension() {
        let record = UploadRecord::new("README", 10, "/tmp/php123", "text/plain");
        assert_eq!(UploadDescriptor::from_record(&record, None).file_name(), "README");
    }
}
