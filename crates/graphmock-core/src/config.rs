use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// What to do with a request whose URL cannot be sanitized (empty result).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Fail the whole generation run, naming the offending source location.
    #[default]
    Abort,
    /// Log a warning and drop that single record, keeping the rest.
    Skip,
}

/// Global configuration loaded from `~/.config/graphmock/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphmockConfig {
    /// Origin prepended to server-relative request URLs found in the docs.
    pub graph_origin: String,
    /// Default Graph API version used when a URL carries no version segment.
    pub graph_version: String,
    /// Policy for requests whose URL sanitizes to nothing.
    #[serde(default)]
    pub on_sanitize_failure: FailurePolicy,
}

impl Default for GraphmockConfig {
    fn default() -> Self {
        Self {
            graph_origin: "https://graph.microsoft.com".to_string(),
            graph_version: "v1.0".to_string(),
            on_sanitize_failure: FailurePolicy::Abort,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("graphmock")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<GraphmockConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = GraphmockConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: GraphmockConfig = toml::from_str(&data)?;
    Ok(cfg)
}
