//! CLI for ytdrop.

mod commands;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use ytdrop_core::config::{self, YtdropConfig};

use commands::{run_dirs, run_fetch, run_serve};

/// Top-level CLI for ytdrop.
#[derive(Debug, Parser)]
#[command(name = "ytdrop")]
#[command(about = "ytdrop: web form that hands URLs to yt-dlp", long_about = None)]
pub struct Cli {
    /// Log to stderr instead of the XDG state log file.
    #[arg(long, global = true)]
    pub log_stderr: bool,

    /// Defaults to `serve` when omitted.
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Run the web front-end.
    Serve(ServeArgs),

    /// Print the existing subdirectories of the download root.
    Dirs {
        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Download one URL from the command line, using the same checks as the web form.
    Fetch {
        /// URL handed to the downloader.
        url: String,

        /// Subdirectory of the download root (e.g. "music/live").
        #[arg(long, default_value = "")]
        subdir: String,

        #[command(flatten)]
        config: ConfigArgs,
    },
}

/// Options shared by every command that needs configuration.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// Read configuration from this file instead of ~/.config/ytdrop/config.toml.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Download root directory.
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Downloader program.
    #[arg(long, value_name = "PROG")]
    pub downloader: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ServeArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Address to bind.
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind (overrides PORT).
    #[arg(long)]
    pub port: Option<u16>,
}

impl ConfigArgs {
    /// Defaults, then config file, then `PORT`, then these flags.
    pub fn load(&self) -> Result<YtdropConfig> {
        let mut cfg = match &self.config {
            Some(path) => config::load_from_path(path)?,
            None => config::load_or_init().unwrap_or_else(|err| {
                tracing::warn!("using built-in config defaults: {:#}", err);
                YtdropConfig::default()
            }),
        };
        cfg.apply_env();
        self.apply(&mut cfg);
        // Relative roots resolve against the startup directory.
        if !cfg.download_root.is_absolute() {
            cfg.download_root = std::env::current_dir()
                .context("resolving relative download root")?
                .join(&cfg.download_root);
        }
        tracing::debug!("loaded config: {:?}", cfg);
        Ok(cfg)
    }

    fn apply(&self, cfg: &mut YtdropConfig) {
        if let Some(root) = &self.root {
            cfg.download_root = root.clone();
        }
        if let Some(downloader) = &self.downloader {
            cfg.downloader = downloader.clone();
        }
    }
}

impl ServeArgs {
    pub fn load(&self) -> Result<YtdropConfig> {
        let mut cfg = self.config.load()?;
        self.apply(&mut cfg);
        Ok(cfg)
    }

    fn apply(&self, cfg: &mut YtdropConfig) {
        if let Some(host) = &self.host {
            cfg.host = host.clone();
        }
        if let Some(port) = self.port {
            cfg.port = port;
        }
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command.unwrap_or_else(|| CliCommand::Serve(ServeArgs::default())) {
            CliCommand::Serve(args) => run_serve(&args.load()?).await?,
            CliCommand::Dirs { config } => run_dirs(&config.load()?).await?,
            CliCommand::Fetch {
                url,
                subdir,
                config,
            } => run_fetch(&config.load()?, &url, &subdir).await?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
