//! HTTP handlers for the viewer page and its JSON/markup endpoints.
//!
//! Every request runs a fresh scan on the blocking pool; nothing is cached
//! between requests.

use std::path::{Path, PathBuf};

use anyhow::Context;
use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use serde::Deserialize;
use tokio::task;
use tracing::debug;

use crate::app::AppState;
use crate::error::AppError;
use crate::markup::clipboard;
use crate::models::{FolderSummary, ViewState};
use crate::scanner::icon_loader;
use crate::ui::page;

/// Query accepted by the viewer page.
#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    pub folder: Option<String>,
    pub q: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub apply: Option<String>,
}

impl ViewQuery {
    /// Seeds the view state; invalid values keep their defaults.
    pub fn view_state(&self) -> ViewState {
        let mut view = ViewState::default();
        if let Some(q) = &self.q {
            view = view.with_search(q);
        }
        if let Some(size) = &self.size {
            view = view.with_size_text(size);
        }
        if let Some(color) = &self.color {
            view = view.with_color_text(color).unwrap_or(view);
        }
        if let Some(apply) = parse_flag(self.apply.as_deref()) {
            view = view.with_apply_settings(apply);
        }
        view
    }

    fn requested_folder(&self) -> Option<PathBuf> {
        self.folder
            .as_deref()
            .filter(|f| !f.is_empty())
            .map(PathBuf::from)
    }
}

/// Query accepted by the export endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    pub file: Option<String>,
    pub size: Option<String>,
    pub apply: Option<String>,
}

fn parse_flag(value: Option<&str>) -> Option<bool> {
    match value?.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

/// Renders the viewer page for the requested folder.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> Result<Html<String>, AppError> {
    let view = query.view_state();
    let requested = query.requested_folder();
    let scanner = state.scanner.clone();
    let root = state.config.root.clone();

    let html = task::spawn_blocking(move || {
        let index = scanner.scan(&root);
        if index.is_empty() {
            debug!("No icon folders under {:?}", root);
        }
        let selected = index.select(requested.as_deref());
        if let (Some(requested), Some(selected)) = (&requested, selected) {
            if requested != &selected.path {
                debug!("Unknown folder {:?}, showing {:?}", requested, selected.path);
            }
        }
        let icons = selected.map(icon_loader::load_folder).unwrap_or_default();
        page::render(&index, selected, &icons, &view)
    })
    .await
    .context("Render task panicked")?;

    Ok(Html(html))
}

/// Lists the qualifying folders.
pub async fn folders(State(state): State<AppState>) -> Result<Json<Vec<FolderSummary>>, AppError> {
    let index = state.scanner.scan_async(state.config.root.clone()).await?;
    debug!("Listing {} folders", index.len());
    Ok(Json(index.summaries()))
}

/// Returns the clipboard markup for one discovered icon.
pub async fn export(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let file = query
        .file
        .as_deref()
        .filter(|f| !f.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing file parameter".into()))?;

    let mut view = ViewState::default();
    if let Some(size) = &query.size {
        view = view.with_size_text(size);
    }
    if let Some(apply) = parse_flag(query.apply.as_deref()) {
        view = view.with_apply_settings(apply);
    }

    let root = state.config.root.clone();
    let file = icon_loader::resolve_icon_path(&root, Path::new(file));
    let not_found = format!("{} is not a discovered icon", file.display());
    let scanner = state.scanner.clone();

    let icon = task::spawn_blocking(move || {
        let index = scanner.scan(&root);
        icon_loader::load_discovered(&index, &file)
    })
    .await
    .context("Export task panicked")??
    .ok_or(AppError::NotFound(not_found))?;

    let markup = clipboard::export(&icon.markup, view.export_mode());
    Ok(([(header::CONTENT_TYPE, "image/svg+xml; charset=utf-8")], markup))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag(Some("1")), Some(true));
        assert_eq!(parse_flag(Some("On")), Some(true));
        assert_eq!(parse_flag(Some("false")), Some(false));
        assert_eq!(parse_flag(Some("maybe")), None);
        assert_eq!(parse_flag(None), None);
    }

    #[test]
    fn test_view_query_defaults() {
        assert_eq!(ViewQuery::default().view_state(), ViewState::default());
    }

    #[test]
    fn test_view_query_seeds_state() {
        let query = ViewQuery {
            folder: None,
            q: Some("arrow".into()),
            size: Some("40".into()),
            color: Some("#ff0000".into()),
            apply: Some("0".into()),
        };
        let view = query.view_state();
        assert_eq!(view.search, "arrow");
        assert_eq!(view.size, 40);
        assert_eq!(view.color, "#ff0000");
        assert!(!view.apply_settings);
    }

    #[test]
    fn test_view_query_ignores_invalid_values() {
        let query = ViewQuery {
            folder: Some(String::new()),
            q: None,
            size: Some("huge".into()),
            color: Some("not-a-color".into()),
            apply: Some("maybe".into()),
        };
        assert_eq!(query.view_state(), ViewState::default());
        assert!(query.requested_folder().is_none());
    }
}
