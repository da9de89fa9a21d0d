use anyhow::Context;
use directories::{BaseDirs, ProjectDirs};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::scheme::Scheme;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scheme: SchemeConfig,
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemeConfig {
    /// Persisted scheme name. Validated at startup; unknown names fall back
    /// to the default scheme with a warning.
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Where the color files and scratch covers go. Defaults to Cavasik's
    /// Flatpak data dir so the sandboxed visualizer can read the files.
    pub data_dir: PathBuf,
}

impl Default for SchemeConfig {
    fn default() -> Self {
        Self {
            name: Scheme::default().name().to_string(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        let data_dir = BaseDirs::new()
            .map(|b| {
                b.home_dir()
                    .join(".var/app/io.github.TheWisker.Cavasik/data")
            })
            .unwrap_or_else(|| std::env::temp_dir().join("cavasync"));
        Self { data_dir }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let proj = ProjectDirs::from("io.github", "thewisker", "cavasync")
        .context("ProjectDirs unavailable")?;
    Ok(proj.config_dir().join("config.toml"))
}

/// Load the config, creating a default file on first run. A malformed file
/// is recovered, not fatal: warn and run with the built-in defaults.
pub fn load(override_path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match override_path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };

    if !path.exists() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create dir {}", parent.display()))?;
        }
        let cfg = Config::default();
        let raw = toml::to_string_pretty(&cfg).context("serialize default config")?;
        fs::write(&path, raw).with_context(|| format!("write {}", path.display()))?;
        return Ok(cfg);
    }

    let raw = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    match toml::from_str::<Config>(&raw) {
        Ok(cfg) => Ok(cfg),
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "malformed config, using built-in defaults"
            );
            Ok(Config::default())
        }
    }
}
