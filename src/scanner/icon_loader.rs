use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

use crate::models::{FolderEntry, FolderIndex, IconFile};

/// Loads every icon directly inside a folder, skipping unreadable files.
pub fn load_folder(folder: &FolderEntry) -> Vec<IconFile> {
    folder
        .icons
        .iter()
        .filter_map(|path| match IconFile::load(path) {
            Ok(icon) => Some(icon),
            Err(e) => {
                warn!("Skipping icon {:?}: {:#}", path, e);
                None
            }
        })
        .collect()
}

/// Loads a single icon, provided the scan discovered it.
pub fn load_discovered(index: &FolderIndex, file: &Path) -> Result<Option<IconFile>> {
    if index.find_icon(file).is_none() {
        return Ok(None);
    }
    IconFile::load(file)
        .map(Some)
        .with_context(|| format!("Failed to load discovered icon: {:?}", file))
}

/// Resolves a user-supplied icon path against the scan root.
pub fn resolve_icon_path(root: &Path, file: &Path) -> PathBuf {
    if file.is_absolute() {
        file.to_path_buf()
    } else {
        root.join(file)
    }
}
