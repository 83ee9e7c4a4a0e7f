//! Directory management
//!
//! Directory counterpart of the file record.

pub mod record;

pub use record::DirectoryRecord;
