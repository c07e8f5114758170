use thiserror::Error;

use crate::desktop::DesktopFileError;

/// Reasons a backend call failed. These never cross the facade; they are
/// reported on the diagnostic channel and collapsed to `None`/`false`.
#[derive(Error, Debug)]
pub enum MimeAppsError {
    #[error("{0} command not found. Please install xdg-utils.")]
    ProgramNotFound(String),

    #[error("{program} exited with {status}: {stderr}")]
    CommandFailed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("'{0}' is not a desktop application")]
    NotAnApplication(String),

    #[error("'{0}' has no desktop-file id")]
    MissingId(String),

    #[error(transparent)]
    DesktopFile(#[from] DesktopFileError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "gio")]
    #[error("GLib error: {0}")]
    Glib(#[from] gio::glib::Error),
}
