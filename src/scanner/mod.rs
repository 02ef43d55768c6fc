//! Icon discovery for the icondex viewer.
//!
//! This module provides:
//! - `FolderScanner` - Finds every folder holding icons, directly or below it
//! - `icon_loader` - Reads icon markup for a discovered folder or file

pub mod folder_scanner;
pub mod icon_loader;

pub use folder_scanner::{FolderScanner, ScanConfig};
