//! Error handlers
//!
//! Provides error reporting and exit-code mapping for the binary.

use crate::error::types::KitError;
use log::error;

/// Log an error
pub fn handle_error(err: &KitError) {
    error!("fs-kit error: {}", err);
}

/// Convert error to a process exit code
pub fn error_to_exit_code(err: &KitError) -> i32 {
    match err {
        KitError::Config(_) => 78,
        KitError::File(_) => 66,
        KitError::Directory(_) => 66,
        KitError::Write(_) => 65,
        KitError::Upload(_) => 65,
        KitError::Permission(_) => 77,
        KitError::IoError(_) => 74,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FileError, UploadError};

    #[test]
    fn test_exit_codes_follow_sysexits() {
        let missing = KitError::from(FileError::NotFound("a.txt".into()));
        assert_eq!(error_to_exit_code(&missing), 66);

        let fatal = KitError::from(UploadError::Fatal("too big".into()));
        assert_eq!(error_to_exit_code(&fatal), 65);
    }
}
