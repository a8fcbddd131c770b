//! Reader for the optional per-mod `_user.ini` metadata file.
//!
//! Only the `Name` key of the `[Settings]` section is used. The format follows the
//! usual INI conventions: `key=value` or `key: value`, `;`/`#` comments, section
//! names compared exactly and keys compared case-insensitively.

use camino::Utf8Path;
use std::fs;

/// File name of the metadata file inside a mod folder.
pub const METADATA_FILE_NAME: &str = "_user.ini";

const NAME_SECTION: &str = "Settings";
const NAME_KEY: &str = "Name";

/// Look up `key` in `section` of INI-formatted `content`.
///
/// The first matching key wins. Empty values count as absent.
pub fn ini_value(content: &str, section: &str, key: &str) -> Option<String> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut in_section = false;

    for line in content.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with(';') || trimmed.starts_with('#') {
            continue;
        }

        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            in_section = trimmed[1..trimmed.len() - 1].trim() == section;
            continue;
        }

        if !in_section {
            continue;
        }

        let Some(sep) = trimmed.find(['=', ':']) else {
            continue;
        };

        if trimmed[..sep].trim().eq_ignore_ascii_case(key) {
            let value = trimmed[sep + 1..].trim();
            return (!value.is_empty()).then(|| value.to_string());
        }
    }

    None
}

/// Display name declared by a mod folder, if any.
///
/// Missing or unreadable metadata yields `None`; callers fall back to the folder name.
pub fn read_display_name(mod_dir: &Utf8Path) -> Option<String> {
    let path = mod_dir.join(METADATA_FILE_NAME);
    if !path.is_file() {
        return None;
    }

    match fs::read(&path) {
        Ok(bytes) => ini_value(&String::from_utf8_lossy(&bytes), NAME_SECTION, NAME_KEY),
        Err(e) => {
            tracing::warn!("Failed to read mod metadata {}: {}", path, e);
            None
        }
    }
}
