//! Client-facing icon transforms.
//!
//! This module provides:
//! - `clipboard` - Export markup for the clipboard, raw or restyled
//! - `color` - CSS color parsing and contrast theme selection
//! - `search` - Icon name filtering

pub mod clipboard;
pub mod color;
pub mod search;
