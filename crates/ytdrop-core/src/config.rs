use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the listener port.
pub const PORT_ENV: &str = "PORT";

/// Global configuration loaded from `~/.config/ytdrop/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct YtdropConfig {
    /// Root directory every download lands under.
    pub download_root: PathBuf,
    /// Downloader program (looked up on PATH unless absolute).
    pub downloader: String,
    /// Address the HTTP listener binds to.
    pub host: String,
    /// Port the HTTP listener binds to. `PORT` in the environment wins over this.
    pub port: u16,
}

impl Default for YtdropConfig {
    fn default() -> Self {
        Self {
            download_root: PathBuf::from("/download"),
            downloader: "yt-dlp".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl YtdropConfig {
    /// Apply the `PORT` environment override. Unparseable values are ignored with a warning.
    pub fn apply_env(&mut self) {
        self.apply_port_var(std::env::var(PORT_ENV).ok().as_deref());
    }

    fn apply_port_var(&mut self, value: Option<&str>) {
        let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return;
        };
        match raw.parse::<u16>() {
            Ok(port) => self.port = port,
            Err(_) => tracing::warn!("ignoring invalid {}={:?}", PORT_ENV, raw),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("ytdrop")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<YtdropConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = YtdropConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from_path(&path)
}

/// Load configuration from an explicit file. Missing keys fall back to defaults.
pub fn load_from_path(path: &Path) -> Result<YtdropConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: YtdropConfig = toml::from_str(&data)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    Ok(cfg)
}
