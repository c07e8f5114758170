use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DesktopFileError {
    #[error("Desktop file not found: {0}")]
    NotFound(String),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}
