//! HTTP front-end: one form page and one POST endpoint.
//!
//! Each download request runs the downloader to completion on the blocking pool
//! before the response is rendered. There is no job queue.

use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tokio::signal;
use ytdrop_core::config::YtdropConfig;
use ytdrop_core::invoker::{DownloadOutcome, InvokeError, Invoker};
use ytdrop_core::listing::{self, DirEntry};
use ytdrop_core::subdir::{ResolveError, SubdirResolver};

use crate::view::Page;

/// Read-only state shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    resolver: Arc<SubdirResolver>,
    invoker: Arc<Invoker>,
}

impl AppState {
    pub fn new(cfg: &YtdropConfig) -> Self {
        Self {
            resolver: Arc::new(SubdirResolver::new(&cfg.download_root)),
            invoker: Arc::new(Invoker::new(cfg.downloader.clone())),
        }
    }

    fn root_display(&self) -> String {
        self.resolver.root().display().to_string()
    }

    fn list_dirs(&self) -> Vec<DirEntry> {
        listing::list_subdirs(self.resolver.root())
    }

    /// Resolve, then download. Blocking.
    fn fetch(&self, url: &str, subdir: &str) -> Result<DownloadOutcome, FetchError> {
        let target = self.resolver.resolve(subdir)?;
        Ok(self.invoker.run(url, &target)?)
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Invoke(#[from] InvokeError),
}

#[derive(Debug, Default, Deserialize)]
pub struct DownloadForm {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub subdir: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/download", post(download))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// Bind to the configured address and serve until Ctrl+C.
pub async fn serve(cfg: &YtdropConfig) -> Result<()> {
    let state = AppState::new(cfg);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind((cfg.host.as_str(), cfg.port))
        .await
        .with_context(|| format!("binding to {}:{}", cfg.host, cfg.port))?;
    let local = listener.local_addr()?;
    tracing::info!(
        "listening on http://{} (root={}, downloader={})",
        local,
        cfg.download_root.display(),
        cfg.downloader
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("running HTTP server")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        tracing::warn!("failed to install Ctrl+C handler: {}", err);
    }
}

async fn healthz() -> &'static str {
    "ok"
}

async fn index(State(state): State<AppState>) -> Response {
    let page = Page::new(state.root_display(), listing_of(&state).await);
    (StatusCode::OK, Html(page.render())).into_response()
}

async fn download(State(state): State<AppState>, Form(form): Form<DownloadForm>) -> Response {
    let url = form.url.trim().to_string();
    let subdir = form.subdir.trim().to_string();

    let mut page = Page::new(state.root_display(), Vec::new());
    page.url = url.clone();
    page.subdir = subdir.clone();

    if url.is_empty() {
        page.error = Some("URL is required.".to_string());
        page.dirs = listing_of(&state).await;
        return (StatusCode::OK, Html(page.render())).into_response();
    }

    tracing::info!(url = %url, subdir = %subdir, "download requested");
    let worker = state.clone();
    let joined = tokio::task::spawn_blocking(move || {
        let result = worker.fetch(&url, &subdir);
        (result, worker.list_dirs())
    })
    .await;

    let status = match joined {
        Ok((result, dirs)) => {
            page.dirs = dirs;
            apply_outcome(&mut page, result)
        }
        Err(err) => {
            tracing::error!("download worker failed: {}", err);
            page.error = Some("Internal error while running the download.".to_string());
            page.dirs = listing_of(&state).await;
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, Html(page.render())).into_response()
}

/// Fill the banner and log for `result`; returns the HTTP status to use.
fn apply_outcome(page: &mut Page, result: Result<DownloadOutcome, FetchError>) -> StatusCode {
    match result {
        Ok(outcome) => {
            page.success = Some(success_message(&outcome.target_dir));
            page.log = Some(outcome.log);
            StatusCode::OK
        }
        Err(FetchError::Resolve(err)) if err.is_validation() => {
            tracing::info!("rejected subdirectory: {}", err);
            page.error = Some(err.to_string());
            StatusCode::OK
        }
        Err(FetchError::Invoke(InvokeError::DownloadFailed { log })) => {
            page.error = Some("Download failed.".to_string());
            page.log = Some(log);
            StatusCode::OK
        }
        Err(FetchError::Invoke(
            err @ (InvokeError::ToolUnavailable { .. } | InvokeError::OptionLikeUrl),
        )) => {
            tracing::warn!("{}", err);
            page.error = Some(err.to_string());
            StatusCode::OK
        }
        Err(err) => {
            tracing::error!("download request failed: {}", err);
            page.error = Some(err.to_string());
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn success_message(target_dir: &Path) -> String {
    format!("Download complete. Saved under {}.", target_dir.display())
}

async fn listing_of(state: &AppState) -> Vec<DirEntry> {
    let state = state.clone();
    match tokio::task::spawn_blocking(move || state.list_dirs()).await {
        Ok(dirs) => dirs,
        Err(err) => {
            tracing::error!("directory listing failed: {}", err);
            Vec::new()
        }
    }
}
