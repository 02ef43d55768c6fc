//! Viewer settings driven by the grid controls.
//!
//! Every control event maps to a pure update returning a new `ViewState`.
//! Rejected input yields an unchanged copy of the current state.

use std::ops::RangeInclusive;

use thiserror::Error;

use crate::markup::clipboard::{ExportMode, DEFAULT_DIMENSION};
use crate::markup::color::{self, Theme, FALLBACK_HEX};
use crate::markup::search;

/// Range covered by the size slider.
pub const SLIDER_RANGE: RangeInclusive<u32> = 16..=200;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Not a recognized color: {0:?}")]
pub struct InvalidColor(pub String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// Icon color as entered, any accepted CSS syntax.
    pub color: String,
    /// Icon size in pixels.
    pub size: u32,
    pub search: String,
    /// Whether exports restyle the markup.
    pub apply_settings: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            color: FALLBACK_HEX.to_string(),
            size: DEFAULT_DIMENSION,
            search: String::new(),
            apply_settings: true,
        }
    }
}

impl ViewState {
    pub fn with_search(&self, query: &str) -> Self {
        Self {
            search: query.to_string(),
            ..self.clone()
        }
    }

    /// Free-form size input. Non-numeric or non-positive input is ignored.
    pub fn with_size_text(&self, text: &str) -> Self {
        match parse_size(text) {
            Some(size) => Self {
                size,
                ..self.clone()
            },
            None => self.clone(),
        }
    }

    /// Free-form color input; the caller keeps the current state on error.
    pub fn with_color_text(&self, text: &str) -> Result<Self, InvalidColor> {
        let text = text.trim();
        if !color::is_valid_color(text) {
            return Err(InvalidColor(text.to_string()));
        }
        Ok(Self {
            color: text.to_string(),
            ..self.clone()
        })
    }

    pub fn with_apply_settings(&self, enabled: bool) -> Self {
        Self {
            apply_settings: enabled,
            ..self.clone()
        }
    }

    /// Value mirrored into the slider, clamped to its bounds.
    pub fn slider_value(&self) -> u32 {
        self.size.clamp(*SLIDER_RANGE.start(), *SLIDER_RANGE.end())
    }

    /// Value mirrored into the color picker.
    pub fn picker_value(&self) -> String {
        color::picker_value(&self.color)
    }

    pub fn theme(&self) -> Theme {
        Theme::for_color(&self.color)
    }

    pub fn is_visible(&self, name: &str) -> bool {
        search::matches(&self.search, name)
    }

    pub fn export_mode(&self) -> ExportMode {
        ExportMode::new(self.apply_settings, self.size)
    }
}

/// Parses a positive pixel size, accepting a leading integer like `"24px"`.
pub fn parse_size(text: &str) -> Option<u32> {
    let text = text.trim();
    let digits_end = text
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    text[..digits_end].parse::<u32>().ok().filter(|&v| v > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = ViewState::default();
        assert_eq!(state.color, "#000000");
        assert_eq!(state.size, 20);
        assert!(state.search.is_empty());
        assert!(state.apply_settings);
        assert_eq!(state.export_mode(), ExportMode::Styled { size: 20 });
    }

    #[test]
    fn test_size_text_rejects_invalid() {
        let state = ViewState::default().with_size_text("48");
        assert_eq!(state.size, 48);
        assert_eq!(state.with_size_text("abc").size, 48);
        assert_eq!(state.with_size_text("0").size, 48);
        assert_eq!(state.with_size_text("-5").size, 48);
        assert_eq!(state.with_size_text("").size, 48);
        assert_eq!(state.with_size_text("64px").size, 64);
    }

    #[test]
    fn test_size_text_beyond_slider() {
        let state = ViewState::default().with_size_text("512");
        assert_eq!(state.size, 512);
        assert_eq!(state.slider_value(), 200);
    }

    #[test]
    fn test_slider_value_clamps() {
        let state = ViewState::default();
        assert_eq!(state.with_size_text("4").slider_value(), 16);
        assert_eq!(state.with_size_text("32").slider_value(), 32);
        assert_eq!(state.with_size_text("300").slider_value(), 200);
    }

    #[test]
    fn test_hex_color_round_trip() {
        let state = ViewState::default().with_color_text("#3366cc").unwrap();
        assert_eq!(state.color, "#3366cc");
        assert_eq!(state.picker_value(), "#3366cc");
    }

    #[test]
    fn test_color_text_named_and_rgb() {
        let state = ViewState::default().with_color_text("tomato").unwrap();
        assert_eq!(state.color, "tomato");
        assert_eq!(state.picker_value(), "#000000");

        let state = state.with_color_text(" rgb(255, 255, 255) ").unwrap();
        assert_eq!(state.color, "rgb(255, 255, 255)");
        assert_eq!(state.picker_value(), "#000000");
        assert_eq!(state.theme(), Theme::Dark);
    }

    #[test]
    fn test_color_text_hex_syncs_picker() {
        let state = ViewState::default().with_color_text("#FFF").unwrap();
        assert_eq!(state.picker_value(), "#ffffff");
    }

    #[test]
    fn test_color_text_accepts_wide_gamut() {
        let state = ViewState::default().with_color_text("oklch(70% 0.1 200)").unwrap();
        assert_eq!(state.color, "oklch(70% 0.1 200)");
        assert_eq!(state.picker_value(), "#000000");
        assert_eq!(state.theme(), Theme::Light);

        let state = state.with_color_text("currentColor").unwrap();
        assert_eq!(state.color, "currentColor");

        let state = state.with_color_text("hwb(0 100% 0%)").unwrap();
        assert_eq!(state.theme(), Theme::Dark);
    }

    #[test]
    fn test_color_text_rejects_non_finite() {
        let state = ViewState::default();
        assert!(state.with_color_text("rgb(nan, 0, 0)").is_err());
        assert!(state.with_color_text("hsl(inf, 50%, 50%)").is_err());
    }

    #[test]
    fn test_color_text_invalid_keeps_state() {
        let state = ViewState::default().with_color_text("teal").unwrap();
        let err = state.with_color_text("not-a-color").unwrap_err();
        assert_eq!(err, InvalidColor("not-a-color".to_string()));
        assert_eq!(state.color, "teal");
    }

    #[test]
    fn test_search_visibility() {
        let state = ViewState::default().with_search("Arr");
        assert!(state.is_visible("arrow"));
        assert!(!state.is_visible("star"));
        assert!(ViewState::default().is_visible("anything"));
    }

    #[test]
    fn test_apply_settings_toggle() {
        let state = ViewState::default()
            .with_size_text("32")
            .with_apply_settings(false);
        assert_eq!(state.export_mode(), ExportMode::Raw);
        assert_eq!(
            state.with_apply_settings(true).export_mode(),
            ExportMode::Styled { size: 32 }
        );
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("20"), Some(20));
        assert_eq!(parse_size(" 7 "), Some(7));
        assert_eq!(parse_size("12.5"), Some(12));
        assert_eq!(parse_size("0"), None);
        assert_eq!(parse_size("x1"), None);
    }
}
