//! `ytdrop serve` – run the web front-end.

use anyhow::Result;
use ytdrop_core::config::YtdropConfig;

use crate::server;

pub async fn run_serve(cfg: &YtdropConfig) -> Result<()> {
    server::serve(cfg).await
}
