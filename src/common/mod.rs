pub mod config;
pub mod paths;

// Re-export commonly used types
pub use config::{BackendKind, MatConfig};
pub use paths::XdgDirs;
