//! Name generation

use uuid::Uuid;

/// Generates a name that is unique across calls, used when a rename or an
/// upload has no explicit target name.
pub fn unique_name() -> String {
    Uuid::new_v4().simple().to_string()
}
