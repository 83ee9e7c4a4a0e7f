//! Account lookup
//!
//! Resolves user and group names to numeric ids through the system account
//! databases. Numeric specs are accepted as-is.

use log::debug;
use std::fs;
use std::path::Path;

const PASSWD_DB: &str = "/etc/passwd";
const GROUP_DB: &str = "/etc/group";

/// Resolves a user name or numeric uid.
pub fn resolve_user_id(spec: &str) -> Option<u32> {
    resolve_id(spec, Path::new(PASSWD_DB))
}

/// Resolves a group name or numeric gid.
pub fn resolve_group_id(spec: &str) -> Option<u32> {
    resolve_id(spec, Path::new(GROUP_DB))
}

fn resolve_id(spec: &str, database: &Path) -> Option<u32> {
    let spec = spec.trim();
    if spec.is_empty() {
        return None;
    }

    if spec.bytes().all(|b| b.is_ascii_digit()) {
        return spec.parse().ok();
    }

    match fs::read_to_string(database) {
        Ok(contents) => lookup_id(&contents, spec),
        Err(e) => {
            debug!("Unable to read account database {}: {}", database.display(), e);
            None
        }
    }
}

/// Finds the id column for `name` in passwd/group formatted text
/// (`name:password:id:...`).
pub(crate) fn lookup_id(contents: &str, name: &str) -> Option<u32> {
    contents
        .lines()
        .filter(|line| !line.starts_with('#'))
        .find_map(|line| {
            let mut fields = line.split(':');
            let entry = fields.next()?;
            if entry != name {
                return None;
            }
            fields.nth(1)?.parse().ok()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PASSWD: &str = "\
# comment line
root:x:0:0:root:/root:/bin/bash
daemon:x:1:1:daemon:/usr/sbin:/usr/sbin/nologin
www-data:x:33:33:www-data:/var/www:/usr/sbin/nologin
";

    #[test]
    fn test_lookup_id_finds_named_entry() {
        assert_eq!(lookup_id(PASSWD, "root"), Some(0));
        assert_eq!(lookup_id(PASSWD, "www-data"), Some(33));
        assert_eq!(lookup_id(PASSWD, "nobody-here"), None);
    }

    #[test]
    fn test_lookup_id_requires_exact_name() {
        assert_eq!(lookup_id(PASSWD, "www"), None);
    }

    #[test]
    fn test_numeric_spec_skips_database() {
        assert_eq!(resolve_user_id("1000"), Some(1000));
        assert_eq!(resolve_group_id(" 42 "), Some(42));
        assert_eq!(resolve_group_id(""), None);
    }
}
