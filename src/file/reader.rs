//! File content reader

use std::fs;
use std::io;
use std::path::Path;

/// Returns the full content of a file.
pub fn read(path: &Path) -> io::Result<String> {
    fs::read_to_string(path)
}

/// Returns the content of a file as a line sequence, without line
/// terminators.
pub fn read_lines(path: &Path) -> io::Result<Vec<String>> {
    Ok(read(path)?.lines().map(str::to_string).collect())
}
