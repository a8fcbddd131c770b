//! Discovery of installed mods.
//!
//! Every immediate subdirectory of the install root is one mod. Its folder name is
//! the identity written to the game's load order, and its display name comes from
//! `_user.ini` when the mod ships one.

use crate::error::{ModOrderError, Result};
use crate::models::{Catalog, ModEntry};
use crate::services::metadata::read_display_name;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Scan `install_root` and build a fresh [`Catalog`] in directory enumeration order.
///
/// # Errors
///
/// - [`ModOrderError::DirectoryNotFound`] when the root is empty or not a directory
/// - [`ModOrderError::Io`] when the directory listing itself fails
///
/// Metadata problems inside individual mods never fail the scan.
pub fn scan(install_root: &Utf8Path) -> Result<Catalog> {
    if install_root.as_str().is_empty() || !install_root.is_dir() {
        return Err(ModOrderError::DirectoryNotFound(install_root.to_string()));
    }

    let read_dir =
        fs::read_dir(install_root).map_err(|e| ModOrderError::io(install_root, e))?;

    let mut entries = Vec::new();
    for dir_entry in read_dir {
        let dir_entry = dir_entry.map_err(|e| ModOrderError::io(install_root, e))?;
        let path = dir_entry.path();

        if !path.is_dir() {
            continue;
        }

        let path = match Utf8PathBuf::try_from(path) {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!("Skipping mod folder with non UTF-8 name: {}", e);
                continue;
            }
        };

        let Some(identity) = path.file_name().map(str::to_string) else {
            continue;
        };

        let entry = match read_display_name(&path) {
            Some(name) => ModEntry::new(identity, path).with_display_name(name),
            None => ModEntry::new(identity, path),
        };
        entries.push(entry);
    }

    let catalog: Catalog = entries.into_iter().collect();
    tracing::debug!("Scanned {} mods in {}", catalog.len(), install_root);
    Ok(catalog)
}
