use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::common::paths;

pub const DEFAULT_XDG_MIME_PROGRAM: &str = "xdg-mime";

fn default_xdg_mime_program() -> String {
    DEFAULT_XDG_MIME_PROGRAM.to_string()
}

/// Which desktop service answers default-application queries
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    #[default]
    XdgMime,
    Gio,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MatConfig {
    #[serde(default)]
    pub backend: BackendKind,
    /// Program invoked by the xdg-mime backend
    #[serde(default = "default_xdg_mime_program")]
    pub xdg_mime_program: String,
}

impl Default for MatConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            xdg_mime_program: default_xdg_mime_program(),
        }
    }
}

impl MatConfig {
    pub fn config_file_path() -> Result<PathBuf> {
        paths::mat_config_file()
    }

    /// Load from the default location, or from `path` when given.
    ///
    /// A missing file is not an error and yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let cfg_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_file_path()?,
        };

        if !cfg_path.exists() {
            return Ok(Self::default());
        }

        let s = fs::read_to_string(&cfg_path)
            .with_context(|| format!("reading config {}", cfg_path.display()))?;
        Self::from_toml(&s).with_context(|| format!("parsing config {}", cfg_path.display()))
    }

    pub fn from_toml(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        Ok(config)
    }
}
