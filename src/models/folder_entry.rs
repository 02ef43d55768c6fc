use std::path::{Path, PathBuf};

use serde::Serialize;

/// A folder that contains icons directly or through a descendant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderEntry {
    pub path: PathBuf,
    /// Icon files directly inside this folder, in scan order.
    pub icons: Vec<PathBuf>,
}

/// Result of one discovery scan.
///
/// Folders are kept in post-order: descendants precede their ancestors.
#[derive(Debug, Clone, Default)]
pub struct FolderIndex {
    root: PathBuf,
    folders: Vec<FolderEntry>,
}

/// Summary of a folder for listings.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FolderSummary {
    pub path: String,
    pub label: String,
    pub icon_count: usize,
}

impl FolderIndex {
    pub fn new(root: PathBuf, folders: Vec<FolderEntry>) -> Self {
        Self { root, folders }
    }

    pub fn folders(&self) -> &[FolderEntry] {
        &self.folders
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    pub fn len(&self) -> usize {
        self.folders.len()
    }

    pub fn get(&self, path: &Path) -> Option<&FolderEntry> {
        self.folders.iter().find(|f| f.path == path)
    }

    /// Picks the folder to display.
    ///
    /// Unknown or absent requests fall back to the first folder. Returns
    /// `None` only when nothing was discovered.
    pub fn select(&self, requested: Option<&Path>) -> Option<&FolderEntry> {
        requested
            .and_then(|path| self.get(path))
            .or_else(|| self.folders.first())
    }

    /// Finds the folder owning a discovered icon file.
    pub fn find_icon(&self, file: &Path) -> Option<&FolderEntry> {
        let parent = file.parent()?;
        self.get(parent)
            .filter(|folder| folder.icons.iter().any(|icon| icon == file))
    }

    /// Display label: the path relative to the scan root, `.` for the root itself.
    pub fn label(&self, folder: &FolderEntry) -> String {
        match folder.path.strip_prefix(&self.root) {
            Ok(rel) if rel.as_os_str().is_empty() => ".".to_string(),
            Ok(rel) => rel.to_string_lossy().into_owned(),
            Err(_) => folder.path.to_string_lossy().into_owned(),
        }
    }

    pub fn summaries(&self) -> Vec<FolderSummary> {
        self.folders
            .iter()
            .map(|folder| FolderSummary {
                path: folder.path.to_string_lossy().into_owned(),
                label: self.label(folder),
                icon_count: folder.icons.len(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_index() -> FolderIndex {
        let sub = FolderEntry {
            path: PathBuf::from("/root/icons/sub"),
            icons: vec![PathBuf::from("/root/icons/sub/star.svg")],
        };
        let icons = FolderEntry {
            path: PathBuf::from("/root/icons"),
            icons: vec![PathBuf::from("/root/icons/arrow.svg")],
        };
        FolderIndex::new(PathBuf::from("/root"), vec![sub, icons])
    }

    #[test]
    fn test_select_known_folder() {
        let index = make_index();
        let selected = index.select(Some(Path::new("/root/icons"))).unwrap();
        assert_eq!(selected.path, Path::new("/root/icons"));
    }

    #[test]
    fn test_select_unknown_matches_absent() {
        let index = make_index();
        let unknown = index.select(Some(Path::new("/root/nope"))).unwrap();
        let absent = index.select(None).unwrap();
        assert_eq!(unknown, absent);
        assert_eq!(absent.path, Path::new("/root/icons/sub"));
    }

    #[test]
    fn test_select_empty_index() {
        let index = FolderIndex::new(PathBuf::from("/root"), Vec::new());
        assert!(index.select(None).is_none());
        assert!(index.select(Some(Path::new("/root"))).is_none());
    }

    #[test]
    fn test_get_unknown_folder() {
        let index = make_index();
        assert!(index.get(Path::new("/elsewhere")).is_none());
        assert_eq!(index.get(Path::new("/root/icons")).unwrap().icons.len(), 1);
    }

    #[test]
    fn test_select_root_only_index() {
        let root = FolderEntry {
            path: PathBuf::from("/root"),
            icons: vec![PathBuf::from("/root/a.svg")],
        };
        let index = FolderIndex::new(PathBuf::from("/root"), vec![root.clone()]);

        assert_eq!(index.select(Some(Path::new("/root/missing"))), Some(&root));
        assert_eq!(index.select(None), Some(&root));
        assert_eq!(index.label(&root), ".");
    }

    #[test]
    fn test_labels() {
        let index = make_index();
        let root = FolderEntry {
            path: PathBuf::from("/root"),
            icons: Vec::new(),
        };
        assert_eq!(index.label(&index.folders()[0]), "icons/sub");
        assert_eq!(index.label(&index.folders()[1]), "icons");
        assert_eq!(index.label(&root), ".");
    }

    #[test]
    fn test_find_icon() {
        let index = make_index();
        assert!(index.find_icon(Path::new("/root/icons/sub/star.svg")).is_some());
        assert!(index.find_icon(Path::new("/root/icons/sub/other.svg")).is_none());
        assert!(index.find_icon(Path::new("/etc/passwd")).is_none());
    }
}
