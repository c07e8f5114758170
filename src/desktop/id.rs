//! Desktop-file id derivation and lookup.
//!
//! A desktop-file id is the path of the file relative to an `applications/`
//! data directory with every `/` replaced by `-`, so
//! `/usr/share/applications/kde/konsole.desktop` has the id `kde-konsole.desktop`.

use std::path::{Path, PathBuf};

use crate::common::paths::XdgDirs;

pub const DESKTOP_SUFFIX: &str = ".desktop";

/// Derive the desktop-file id of `path`.
///
/// Returns an empty string when the file does not exist or does not live
/// below any `applications/` directory of `dirs`.
pub fn desktop_file_id(path: &Path, dirs: &XdgDirs) -> String {
    if !path.exists() {
        return String::new();
    }

    let Ok(abs) = std::path::absolute(path) else {
        return String::new();
    };

    for apps_dir in dirs.application_dirs() {
        if let Ok(rest) = abs.strip_prefix(&apps_dir) {
            let parts: Vec<String> = rest
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            return parts.join("-");
        }
    }

    String::new()
}

/// Append `.desktop` when the name has no suffix yet.
pub fn with_desktop_suffix(name: &str) -> String {
    if name.ends_with(DESKTOP_SUFFIX) {
        name.to_string()
    } else {
        format!("{name}{DESKTOP_SUFFIX}")
    }
}

/// Locate the file behind an application name.
///
/// Names containing a `/` are paths (relative ones against the working
/// directory). Anything else is a desktop-file id searched for in the
/// `applications/` directories, data home first.
pub fn find_desktop_file(name: &str, dirs: &XdgDirs) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }

    if name.contains('/') {
        let path = PathBuf::from(name);
        return path.is_file().then_some(path);
    }

    let id = with_desktop_suffix(name);
    dirs.application_dirs()
        .iter()
        .find_map(|apps_dir| resolve_id_in(apps_dir, &id))
}

// `kde-foo.desktop` may live at `kde/foo.desktop`, so each dash is also
// tried as a directory separator when the prefix names an existing directory.
fn resolve_id_in(dir: &Path, id: &str) -> Option<PathBuf> {
    let direct = dir.join(id);
    if direct.is_file() {
        return Some(direct);
    }

    for (idx, _) in id.match_indices('-') {
        let (prefix, rest) = (&id[..idx], &id[idx + 1..]);
        if prefix.is_empty() || rest.is_empty() {
            continue;
        }
        let sub = dir.join(prefix);
        if sub.is_dir()
            && let Some(found) = resolve_id_in(&sub, rest)
        {
            return Some(found);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn dirs_with_apps() -> (TempDir, XdgDirs) {
        let tmp = tempfile::tempdir().unwrap();
        let home = tmp.path().join("home");
        let system = tmp.path().join("system");
        fs::create_dir_all(home.join("applications")).unwrap();
        fs::create_dir_all(system.join("applications/kde")).unwrap();
        let dirs = XdgDirs::new(home, vec![system]);
        (tmp, dirs)
    }

    #[test]
    fn test_id_of_top_level_file() {
        let (_tmp, dirs) = dirs_with_apps();
        let path = dirs.data_home.join("applications/editor.desktop");
        fs::write(&path, "").unwrap();
        assert_eq!(desktop_file_id(&path, &dirs), "editor.desktop");
    }

    #[test]
    fn test_id_of_nested_file_uses_dashes() {
        let (_tmp, dirs) = dirs_with_apps();
        let path = dirs.data_dirs[0].join("applications/kde/konsole.desktop");
        fs::write(&path, "").unwrap();
        assert_eq!(desktop_file_id(&path, &dirs), "kde-konsole.desktop");
    }

    #[test]
    fn test_id_outside_application_dirs_is_empty() {
        let (tmp, dirs) = dirs_with_apps();
        let path = tmp.path().join("stray.desktop");
        fs::write(&path, "").unwrap();
        assert_eq!(desktop_file_id(&path, &dirs), "");
    }

    #[test]
    fn test_id_of_missing_file_is_empty() {
        let (_tmp, dirs) = dirs_with_apps();
        let path = dirs.data_home.join("applications/ghost.desktop");
        assert_eq!(desktop_file_id(&path, &dirs), "");
    }

    #[test]
    fn test_find_prefers_data_home() {
        let (_tmp, dirs) = dirs_with_apps();
        let user = dirs.data_home.join("applications/editor.desktop");
        let system = dirs.data_dirs[0].join("applications/editor.desktop");
        fs::write(&user, "").unwrap();
        fs::write(&system, "").unwrap();
        assert_eq!(find_desktop_file("editor.desktop", &dirs), Some(user));
    }

    #[test]
    fn test_find_appends_suffix() {
        let (_tmp, dirs) = dirs_with_apps();
        let path = dirs.data_dirs[0].join("applications/editor.desktop");
        fs::write(&path, "").unwrap();
        assert_eq!(find_desktop_file("editor", &dirs), Some(path));
    }

    #[test]
    fn test_find_resolves_subdirectory_ids() {
        let (_tmp, dirs) = dirs_with_apps();
        let path = dirs.data_dirs[0].join("applications/kde/konsole.desktop");
        fs::write(&path, "").unwrap();
        assert_eq!(find_desktop_file("kde-konsole.desktop", &dirs), Some(path));
    }

    #[test]
    fn test_find_by_path() {
        let (tmp, dirs) = dirs_with_apps();
        let path = tmp.path().join("stray.desktop");
        fs::write(&path, "").unwrap();
        let name = path.to_string_lossy().into_owned();
        assert_eq!(find_desktop_file(&name, &dirs), Some(path));
        assert_eq!(find_desktop_file("/nonexistent/x.desktop", &dirs), None);
        assert_eq!(find_desktop_file("", &dirs), None);
    }
}
