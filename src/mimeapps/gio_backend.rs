use gio::prelude::*;
use gio::{AppInfo, DesktopAppInfo};

use super::backend::MimeAppsBackend;
use super::error::MimeAppsError;
use crate::desktop::DesktopFile;
use crate::ui::prelude::*;

/// Backend asking GIO, which reads and writes `mimeapps.list` itself.
#[derive(Debug, Default, Clone, Copy)]
pub struct GioBackend;

impl GioBackend {
    pub fn new() -> Self {
        Self
    }

    fn lookup(mime_type: &str) -> Result<Option<DesktopFile>, MimeAppsError> {
        let Some(info) = AppInfo::default_for_type(mime_type, false) else {
            return Ok(None);
        };

        let Ok(desktop_info) = info.downcast::<DesktopAppInfo>() else {
            return Ok(None);
        };

        let Some(path) = desktop_info.filename() else {
            return Ok(None);
        };

        let app = DesktopFile::load(&path)?;
        if app.is_valid() {
            Ok(Some(app))
        } else {
            Ok(None)
        }
    }
}

impl MimeAppsBackend for GioBackend {
    fn name(&self) -> &'static str {
        "gio"
    }

    fn default_app(&self, mime_type: &str) -> Option<DesktopFile> {
        if mime_type.is_empty() {
            return None;
        }

        match Self::lookup(mime_type) {
            Ok(app) => app,
            Err(e) => {
                emit(
                    Level::Debug,
                    "backend.gio.load_failed",
                    &format!("Default for '{}' did not load. {}", mime_type, e),
                    None,
                );
                None
            }
        }
    }

    fn set_default_app(&self, mime_type: &str, app: &DesktopFile) -> bool {
        if mime_type.is_empty() {
            return false;
        }

        let file = app.file_name().display().to_string();
        let Some(info) = DesktopAppInfo::from_filename(app.file_name()) else {
            emit(
                Level::Warn,
                "backend.gio.load_failed",
                &format!("Failed to load GDesktopAppInfo for '{}'", file),
                None,
            );
            return false;
        };

        if let Err(e) = info.set_as_default_for_type(mime_type) {
            let e = MimeAppsError::from(e);
            emit(
                Level::Warn,
                "backend.gio.set_failed",
                &format!(
                    "Failed to set '{}' as the default for '{}'. {}",
                    file, mime_type, e
                ),
                None,
            );
            return false;
        }

        emit(
            Level::Debug,
            "backend.gio.set",
            &format!("Set '{}' as the default for '{}'", file, mime_type),
            None,
        );
        true
    }
}
