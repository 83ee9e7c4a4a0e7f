//! File management
//!
//! Single-file record, content reader and validating writer.

pub mod reader;
pub mod record;
pub mod writer;

pub use record::{FileKind, FileRecord};
pub use writer::{Writer, WriterConfig};
