use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ViewerConfig;
use crate::markup::clipboard::{self, ExportMode};
use crate::models::FolderSummary;
use crate::scanner::{icon_loader, FolderScanner};
use crate::ui::handlers;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ViewerConfig>,
    pub scanner: FolderScanner,
}

impl AppState {
    pub fn new(config: ViewerConfig) -> Self {
        let scanner = FolderScanner::with_config(config.scan.clone());
        Self {
            config: Arc::new(config),
            scanner,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/folders", get(handlers::folders))
        .route("/api/export", get(handlers::export))
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub struct IconDexApp {
    state: AppState,
}

impl IconDexApp {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }

    pub fn router(&self) -> Router {
        create_router(self.state.clone())
    }

    /// Serves the viewer until the process is stopped.
    pub async fn serve(&self, bind: SocketAddr) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(bind)
            .await
            .with_context(|| format!("Failed to bind {}", bind))?;
        info!(
            "Serving icons from {:?} on http://{}",
            self.state.config.root, bind
        );

        axum::serve(listener, self.router())
            .await
            .context("Server error")
    }

    /// Folders discovered under the configured root.
    pub async fn list(&self) -> Result<Vec<FolderSummary>> {
        let index = self
            .state
            .scanner
            .scan_async(self.state.config.root.clone())
            .await?;
        Ok(index.summaries())
    }

    /// Clipboard markup for one icon, read directly from disk.
    pub fn export(&self, file: &Path, mode: ExportMode) -> Result<String> {
        let path = icon_loader::resolve_icon_path(&self.state.config.root, file);
        let icon = crate::models::IconFile::load(&path)?;
        Ok(clipboard::export(&icon.markup, mode))
    }
}
