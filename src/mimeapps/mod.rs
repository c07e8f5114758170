//! Default-application lookup and registration per MIME type.
//!
//! [`MimeApps`] is the facade callers use. It owns exactly one
//! [`MimeAppsBackend`] behind one mutex; every clone of a handle shares that
//! backend, so construct one handle at startup and pass it around.

mod backend;
mod error;
#[cfg(feature = "gio")]
mod gio_backend;
mod xdg_mime;

use std::sync::{Arc, Mutex, PoisonError};

pub use backend::MimeAppsBackend;
pub use error::MimeAppsError;
#[cfg(feature = "gio")]
pub use gio_backend::GioBackend;
pub use xdg_mime::XdgMimeBackend;

use crate::common::config::{BackendKind, MatConfig};
use crate::common::paths::XdgDirs;
use crate::desktop::DesktopFile;
#[cfg(not(feature = "gio"))]
use crate::ui::prelude::*;

struct Shared {
    backend: Mutex<Box<dyn MimeAppsBackend>>,
    dirs: XdgDirs,
}

#[derive(Clone)]
pub struct MimeApps {
    shared: Arc<Shared>,
}

impl MimeApps {
    pub fn new(backend: Box<dyn MimeAppsBackend>, dirs: XdgDirs) -> Self {
        Self {
            shared: Arc::new(Shared {
                backend: Mutex::new(backend),
                dirs,
            }),
        }
    }

    /// Build the backend selected in `config`.
    pub fn from_config(config: &MatConfig, dirs: XdgDirs) -> Self {
        let backend = backend_for(config, &dirs);
        Self::new(backend, dirs)
    }

    pub fn dirs(&self) -> &XdgDirs {
        &self.shared.dirs
    }

    pub fn backend_name(&self) -> &'static str {
        self.with_backend(|b| b.name())
    }

    /// The default application for `mime_type`, or `None` when there is none
    /// or it cannot be loaded.
    pub fn default_app(&self, mime_type: &str) -> Option<DesktopFile> {
        if mime_type.is_empty() {
            return None;
        }

        self.with_backend(|b| b.default_app(mime_type))
    }

    /// Make `app` the default for `mime_type`. Returns false if the input is
    /// rejected or the backend fails.
    pub fn set_default_app(&self, mime_type: &str, app: &DesktopFile) -> bool {
        if mime_type.is_empty() || !app.is_valid() {
            return false;
        }

        if app.id(&self.shared.dirs).is_empty() {
            return false;
        }

        self.with_backend(|b| b.set_default_app(mime_type, app))
    }

    // The guard lives only for this call; the lock is not reentrant.
    fn with_backend<T>(&self, f: impl FnOnce(&dyn MimeAppsBackend) -> T) -> T {
        let guard = self
            .shared
            .backend
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f(&**guard)
    }
}

fn backend_for(config: &MatConfig, dirs: &XdgDirs) -> Box<dyn MimeAppsBackend> {
    match config.backend {
        BackendKind::XdgMime => Box::new(XdgMimeBackend::new(
            config.xdg_mime_program.clone(),
            dirs.clone(),
        )),
        #[cfg(feature = "gio")]
        BackendKind::Gio => Box::new(GioBackend::new()),
        #[cfg(not(feature = "gio"))]
        BackendKind::Gio => {
            emit(
                Level::Warn,
                "mimeapps.backend.gio_unavailable",
                "Built without GIO support, using xdg-mime instead",
                None,
            );
            Box::new(XdgMimeBackend::new(
                config.xdg_mime_program.clone(),
                dirs.clone(),
            ))
        }
    }
}
