use duct::cmd;
use serde_json::json;

use super::backend::MimeAppsBackend;
use super::error::MimeAppsError;
use crate::common::paths::XdgDirs;
use crate::desktop::{DesktopFile, find_desktop_file};
use crate::ui::prelude::*;

/// Backend driving the `xdg-mime` program from xdg-utils.
#[derive(Debug, Clone)]
pub struct XdgMimeBackend {
    program: String,
    dirs: XdgDirs,
}

impl XdgMimeBackend {
    pub fn new(program: impl Into<String>, dirs: XdgDirs) -> Self {
        Self {
            program: program.into(),
            dirs,
        }
    }

    fn ensure_program(&self) -> Result<(), MimeAppsError> {
        which::which(&self.program)
            .map(|_| ())
            .map_err(|_| MimeAppsError::ProgramNotFound(self.program.clone()))
    }

    /// Desktop-file id registered for `mime_type`, if any.
    fn query_default(&self, mime_type: &str) -> Result<Option<String>, MimeAppsError> {
        self.ensure_program()?;

        let output = cmd!(self.program.as_str(), "query", "default", mime_type)
            .stdout_capture()
            .stderr_capture()
            .unchecked()
            .run()?;

        if !output.status.success() {
            return Ok(None);
        }

        let default_app = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if default_app.is_empty() {
            Ok(None)
        } else {
            Ok(Some(default_app))
        }
    }

    fn lookup(&self, mime_type: &str) -> Result<Option<DesktopFile>, MimeAppsError> {
        let Some(desktop_id) = self.query_default(mime_type)? else {
            return Ok(None);
        };

        let Some(path) = find_desktop_file(&desktop_id, &self.dirs) else {
            emit(
                Level::Debug,
                "backend.xdg_mime.unresolved",
                &format!("No desktop file found for '{}'", desktop_id),
                Some(json!({ "mime_type": mime_type, "desktop_id": desktop_id })),
            );
            return Ok(None);
        };

        let app = DesktopFile::load(&path)?;
        if app.is_valid() && app.is_application() {
            Ok(Some(app))
        } else {
            Ok(None)
        }
    }

    /// Re-read the record from disk the way the service would, and get its id.
    fn service_id(&self, app: &DesktopFile) -> Result<String, MimeAppsError> {
        let loaded = DesktopFile::load(app.file_name())?;
        let file = app.file_name().display().to_string();
        if !loaded.is_application() {
            return Err(MimeAppsError::NotAnApplication(file));
        }

        let desktop_id = loaded.id(&self.dirs);
        if desktop_id.is_empty() {
            return Err(MimeAppsError::MissingId(file));
        }
        Ok(desktop_id)
    }

    fn register_default(&self, mime_type: &str, desktop_id: &str) -> Result<(), MimeAppsError> {
        self.ensure_program()?;

        let output = cmd!(self.program.as_str(), "default", desktop_id, mime_type)
            .stdout_capture()
            .stderr_capture()
            .unchecked()
            .run()?;

        if !output.status.success() {
            return Err(MimeAppsError::CommandFailed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

impl MimeAppsBackend for XdgMimeBackend {
    fn name(&self) -> &'static str {
        "xdg-mime"
    }

    fn default_app(&self, mime_type: &str) -> Option<DesktopFile> {
        if mime_type.is_empty() {
            return None;
        }

        match self.lookup(mime_type) {
            Ok(app) => app,
            Err(e) => {
                emit(
                    Level::Warn,
                    "backend.xdg_mime.query_failed",
                    &format!("Failed to query the default for '{}'. {}", mime_type, e),
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
        let desktop_id = match self.service_id(app) {
            Ok(id) => id,
            Err(e) => {
                emit(
                    Level::Warn,
                    "backend.xdg_mime.load_failed",
                    &format!("Failed to load desktop entry for '{}'. {}", file, e),
                    None,
                );
                return false;
            }
        };

        if let Err(e) = self.register_default(mime_type, &desktop_id) {
            emit(
                Level::Warn,
                "backend.xdg_mime.set_failed",
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
            "backend.xdg_mime.set",
            &format!("Set '{}' as the default for '{}'", file, mime_type),
            Some(json!({ "mime_type": mime_type, "desktop_id": desktop_id })),
        );
        true
    }
}
