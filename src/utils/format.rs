//! Size formatting
//!
//! Renders byte counts for user-facing messages.

const UNITS: [&str; 5] = ["bytes", "KB", "MB", "GB", "TB"];

/// Formats a byte count as a human-readable string (`"512 bytes"`, `"2.00 MB"`).
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} bytes", bytes);
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{:.2} {}", value, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_units() {
        assert_eq!(format_size(0), "0 bytes");
        assert_eq!(format_size(1023), "1023 bytes");
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(2 * 1024 * 1024), "2.00 MB");
        assert_eq!(format_size(1536), "1.50 KB");
    }
}
