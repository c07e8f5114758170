//! Centralized path management for xdg-mat

use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

const DEFAULT_DATA_DIRS: &str = "/usr/local/share:/usr/share";

/// Get the xdg-mat config directory (not created on lookup)
pub fn mat_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Unable to determine user config directory")?
        .join("xdg-mat");

    Ok(config_dir)
}

/// Default location of the config file
pub fn mat_config_file() -> Result<PathBuf> {
    Ok(mat_config_dir()?.join("config.toml"))
}

/// XDG base directories that hold `applications/` subdirectories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XdgDirs {
    pub data_home: PathBuf,
    pub data_dirs: Vec<PathBuf>,
}

impl XdgDirs {
    pub fn new(data_home: impl Into<PathBuf>, data_dirs: Vec<PathBuf>) -> Self {
        Self {
            data_home: data_home.into(),
            data_dirs,
        }
    }

    /// Read `XDG_DATA_HOME` and `XDG_DATA_DIRS`, falling back to the basedir defaults.
    pub fn from_env() -> Self {
        let data_home = env::var_os("XDG_DATA_HOME")
            .map(PathBuf::from)
            .filter(|p| p.is_absolute())
            .or_else(dirs::data_dir)
            .unwrap_or_else(|| PathBuf::from("~/.local/share"));

        let raw_dirs = env::var("XDG_DATA_DIRS")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_DIRS.to_string());

        Self::new(data_home, split_dirs(&raw_dirs))
    }

    /// Data home first, then the system data dirs, in lookup priority order.
    pub fn search_dirs(&self) -> impl Iterator<Item = &Path> {
        std::iter::once(self.data_home.as_path()).chain(self.data_dirs.iter().map(PathBuf::as_path))
    }

    /// The `applications/` directory of every search dir.
    pub fn application_dirs(&self) -> Vec<PathBuf> {
        self.search_dirs().map(|d| d.join("applications")).collect()
    }
}

fn split_dirs(raw: &str) -> Vec<PathBuf> {
    raw.split(':')
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        // relative entries are invalid per the basedir spec
        .filter(|p| p.is_absolute())
        .collect()
}
