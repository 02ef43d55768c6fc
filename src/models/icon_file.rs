use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Extension used when none is configured.
pub const DEFAULT_EXTENSION: &str = "svg";

/// The icon file format recognized by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconFormat {
    extension: String,
}

impl IconFormat {
    /// Creates a format from an extension, with or without the leading dot.
    pub fn new(extension: &str) -> Self {
        Self {
            extension: extension.trim_start_matches('.').to_lowercase(),
        }
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Checks an extension against the format, ignoring case.
    pub fn matches_extension(&self, ext: &str) -> bool {
        ext.to_lowercase() == self.extension
    }

    /// Checks whether a path names a file of this format.
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.matches_extension(ext))
            .unwrap_or(false)
    }
}

impl Default for IconFormat {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSION)
    }
}

/// A single icon loaded from disk.
#[derive(Debug, Clone)]
pub struct IconFile {
    pub path: PathBuf,
    /// File name without its extension.
    pub name: String,
    /// Raw markup as stored on disk.
    pub markup: String,
}

impl IconFile {
    /// Reads an icon file eagerly.
    pub fn load(path: &Path) -> Result<Self> {
        let markup = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read icon: {:?}", path))?;
        Ok(Self::from_markup(path, markup))
    }

    pub fn from_markup(path: &Path, markup: String) -> Self {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path: path.to_path_buf(),
            name,
            markup,
        }
    }

    /// Lowercased name used for search matching.
    pub fn search_key(&self) -> String {
        self.name.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_format_matches_case_insensitive() {
        let format = IconFormat::default();
        assert!(format.matches(Path::new("/a/arrow.svg")));
        assert!(format.matches(Path::new("/a/ARROW.SVG")));
        assert!(format.matches(Path::new("/a/arrow.Svg")));
        assert!(!format.matches(Path::new("/a/arrow.png")));
        assert!(!format.matches(Path::new("/a/svg")));
        assert!(!format.matches(Path::new("/a/arrow.svg.bak")));
    }

    #[test]
    fn test_format_strips_leading_dot() {
        let format = IconFormat::new(".SVG");
        assert_eq!(format.extension(), "svg");
        assert!(format.matches_extension("svg"));
    }

    #[test]
    fn test_load_icon() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Star.svg");
        std::fs::write(&path, "<svg></svg>").unwrap();

        let icon = IconFile::load(&path).unwrap();
        assert_eq!(icon.name, "Star");
        assert_eq!(icon.search_key(), "star");
        assert_eq!(icon.path, path);
        assert_eq!(icon.markup, "<svg></svg>");
    }

    #[test]
    fn test_load_missing_icon_fails() {
        let dir = tempdir().unwrap();
        assert!(IconFile::load(&dir.path().join("missing.svg")).is_err());
    }
}
