use std::fs;
use std::path::{Path, PathBuf};

use freedesktop_file_parser::{EntryType, parse};

use super::error::DesktopFileError;
use super::id::{desktop_file_id, find_desktop_file};
use crate::common::paths::XdgDirs;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum EntryKind {
    /// Nothing was loaded
    #[default]
    None,
    Application,
    Other,
}

/// One desktop entry loaded from disk.
///
/// `DesktopFile::default()` is the empty placeholder record and is never valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesktopFile {
    file_name: PathBuf,
    kind: EntryKind,
    name: String,
}

impl DesktopFile {
    /// Load and parse the desktop entry at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DesktopFileError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| DesktopFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_content(path, &content)
    }

    /// Load an application given either a path or a desktop-file id.
    pub fn load_by_name(name: &str, dirs: &XdgDirs) -> Result<Self, DesktopFileError> {
        let path = find_desktop_file(name, dirs)
            .ok_or_else(|| DesktopFileError::NotFound(name.to_string()))?;
        Self::load(path)
    }

    fn from_content(path: &Path, content: &str) -> Result<Self, DesktopFileError> {
        let desktop_file = parse(content).map_err(|e| DesktopFileError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let kind = match &desktop_file.entry.entry_type {
            EntryType::Application(_) => EntryKind::Application,
            _ => EntryKind::Other,
        };

        Ok(Self {
            file_name: path.to_path_buf(),
            kind,
            name: desktop_file.entry.name.default,
        })
    }

    /// True when the record was loaded from a real file and names something.
    pub fn is_valid(&self) -> bool {
        self.kind != EntryKind::None
            && !self.file_name.as_os_str().is_empty()
            && !self.name.trim().is_empty()
    }

    pub fn is_application(&self) -> bool {
        self.kind == EntryKind::Application
    }

    pub fn file_name(&self) -> &Path {
        &self.file_name
    }

    /// The desktop-file id, empty when the file sits outside every `applications/` dir.
    pub fn id(&self, dirs: &XdgDirs) -> String {
        if self.file_name.as_os_str().is_empty() {
            return String::new();
        }
        desktop_file_id(&self.file_name, dirs)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
