//! Upload input model
//!
//! The host hands over a map of form field name to either one upload record
//! or an array of them.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// One uploaded file as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadRecord {
    /// Original file name on the client.
    pub name: String,
    #[serde(default)]
    pub size: u64,
    /// Where the host stored the uploaded bytes.
    pub tmp_name: PathBuf,
    /// Host error code, `0` when the upload succeeded.
    #[serde(default)]
    pub error: u32,
    #[serde(rename = "type", default)]
    pub mime_type: String,
}

impl UploadRecord {
    pub fn new(
        name: impl Into<String>,
        size: u64,
        tmp_name: impl Into<PathBuf>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            size,
            tmp_name: tmp_name.into(),
            error: 0,
            mime_type: mime_type.into(),
        }
    }

    pub fn with_error(mut self, code: u32) -> Self {
        self.error = code;
        self
    }
}

/// A form field carrying one or several uploads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum UploadField {
    Multiple(Vec<UploadRecord>),
    Single(UploadRecord),
}

impl UploadField {
    pub fn len(&self) -> usize {
        match self {
            UploadField::Multiple(records) => records.len(),
            UploadField::Single(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<UploadRecord> for UploadField {
    fn from(record: UploadRecord) -> Self {
        UploadField::Single(record)
    }
}

impl From<Vec<UploadRecord>> for UploadField {
    fn from(records: Vec<UploadRecord>) -> Self {
        UploadField::Multiple(records)
    }
}

/// Uploads of one request, keyed by form field name.
pub type UploadInput = HashMap<String, UploadField>;
