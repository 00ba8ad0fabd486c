//! `ytdrop fetch` – one download from the command line.

use anyhow::{Context, Result};
use ytdrop_core::config::YtdropConfig;
use ytdrop_core::invoker::{InvokeError, Invoker};
use ytdrop_core::subdir::SubdirResolver;

pub async fn run_fetch(cfg: &YtdropConfig, url: &str, subdir: &str) -> Result<()> {
    let url = url.trim().to_string();
    if url.is_empty() {
        anyhow::bail!("URL is required.");
    }

    let resolver = SubdirResolver::new(&cfg.download_root);
    let invoker = Invoker::new(cfg.downloader.clone());
    let subdir = subdir.to_string();

    let result = tokio::task::spawn_blocking(move || -> Result<_> {
        let target = resolver.resolve(&subdir)?;
        invoker.run(&url, &target).map_err(anyhow::Error::from)
    })
    .await
    .context("download worker failed")?;

    match result {
        Ok(outcome) => {
            print!("{}", outcome.log);
            println!("Download complete. Saved under {}.", outcome.target_dir.display());
            Ok(())
        }
        Err(err) => {
            if let Some(InvokeError::DownloadFailed { log }) = err.downcast_ref::<InvokeError>() {
                eprint!("{log}");
            }
            Err(err)
        }
    }
}
