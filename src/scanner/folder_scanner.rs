//! Folder discovery for icon directories.
//!
//! This module provides the `FolderScanner` struct which handles:
//! - Recursive directory walking using walkdir, in post-order
//! - Icon detection by file extension
//! - Grouping icons under the folder that directly contains them
//! - Skipping unreadable entries and symlink cycles without failing the scan

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::task;
use tracing::{debug, info, trace, warn};
use walkdir::WalkDir;

use crate::models::{FolderEntry, FolderIndex, IconFormat};

/// Configuration for the folder scanner.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Icon file format to look for.
    pub format: IconFormat,
    /// Maximum directory depth (0 = unlimited).
    pub max_depth: usize,
    /// Whether to follow symbolic links.
    pub follow_symlinks: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            format: IconFormat::default(),
            max_depth: 0, // unlimited
            follow_symlinks: false,
        }
    }
}

/// What is known about a directory while its contents are being walked.
#[derive(Debug, Default)]
struct DirSummary {
    qualifies: bool,
    icons: Vec<PathBuf>,
}

/// Scanner that finds every folder holding icons, directly or below it.
#[derive(Debug, Clone, Default)]
pub struct FolderScanner {
    config: ScanConfig,
}

impl FolderScanner {
    /// Creates a new folder scanner with custom configuration.
    pub fn with_config(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Scans `root` on the blocking pool.
    pub async fn scan_async(&self, root: PathBuf) -> Result<FolderIndex> {
        let scanner = self.clone();
        task::spawn_blocking(move || scanner.scan(&root))
            .await
            .context("Scan task panicked")
    }

    /// Scans `root` and returns the qualifying folders.
    ///
    /// Siblings are visited in file-name order and each directory is emitted
    /// after its contents, so descendants precede their ancestors. A missing
    /// root yields an empty index.
    pub fn scan(&self, root: &Path) -> FolderIndex {
        info!(
            "Starting scan of {:?} for .{} files",
            root,
            self.config.format.extension()
        );

        if !root.is_dir() {
            warn!("Scan root is not a directory: {:?}", root);
            return FolderIndex::new(root.to_path_buf(), Vec::new());
        }

        let mut walker = WalkDir::new(root)
            .follow_links(self.config.follow_symlinks)
            .contents_first(true)
            .sort_by_file_name();

        if self.config.max_depth > 0 {
            walker = walker.max_depth(self.config.max_depth);
        }

        let mut pending: HashMap<PathBuf, DirSummary> = HashMap::new();
        let mut folders = Vec::new();
        let mut icon_count = 0;

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    // Unreadable directories and symlink loops count as empty.
                    debug!("Skipping entry: {}", e);
                    continue;
                }
            };
            let path = entry.path();

            if entry.file_type().is_dir() {
                let summary = pending.remove(path).unwrap_or_default();
                if !summary.qualifies {
                    trace!("No icons under {:?}", path);
                    continue;
                }

                if entry.depth() > 0 {
                    if let Some(parent) = path.parent() {
                        pending.entry(parent.to_path_buf()).or_default().qualifies = true;
                    }
                }
                folders.push(FolderEntry {
                    path: path.to_path_buf(),
                    icons: summary.icons,
                });
                continue;
            }

            // Unfollowed links to directories are neither folders nor icons.
            if entry.path_is_symlink() && path.is_dir() {
                continue;
            }

            if !self.config.format.matches(path) {
                continue;
            }

            if let Some(parent) = path.parent() {
                let summary = pending.entry(parent.to_path_buf()).or_default();
                summary.qualifies = true;
                summary.icons.push(path.to_path_buf());
                icon_count += 1;
            }
        }

        info!(
            "Scan complete: {} folders, {} icons",
            folders.len(),
            icon_count
        );

        FolderIndex::new(root.to_path_buf(), folders)
    }
}
