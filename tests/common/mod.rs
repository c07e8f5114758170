use anyhow::Result;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Stand-in for xdg-mime that keeps its associations in a file next to itself.
/// Registering anything for `text/broken` fails.
const FAKE_XDG_MIME: &str = r#"#!/bin/sh
store="$(dirname "$0")/defaults.list"
case "$1" in
    query)
        [ "$2" = "default" ] || exit 1
        [ -f "$store" ] || exit 0
        awk -F= -v m="$3" '$1 == m { v = $2 } END { if (v != "") print v }' "$store"
        ;;
    default)
        if [ "$3" = "text/broken" ]; then
            echo "cannot write mimeapps.list" >&2
            exit 4
        fi
        echo "$3=$2" >> "$store"
        ;;
    *)
        exit 1
        ;;
esac
"#;

pub const EDITOR_DESKTOP: &str = "[Desktop Entry]
Type=Application
Name=Editor
Comment=Edit text files
Exec=editor %F
MimeType=text/plain;text/markdown;
";

/// Isolated XDG layout: config home, data home, one system data dir and a
/// fake xdg-mime wired up through config.toml.
pub struct TestEnvironment {
    temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let env = Self { temp_dir };

        fs::create_dir_all(env.data_home().join("applications"))?;
        fs::create_dir_all(env.system_data_dir().join("applications"))?;
        fs::create_dir_all(env.bin_dir())?;

        let script = env.bin_dir().join("xdg-mime");
        fs::write(&script, FAKE_XDG_MIME)?;
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755))?;

        env.write_config(&format!(
            "backend = \"xdg-mime\"\nxdg_mime_program = \"{}\"\n",
            script.display()
        ))?;

        Ok(env)
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn config_home(&self) -> PathBuf {
        self.path().join("config")
    }

    pub fn data_home(&self) -> PathBuf {
        self.path().join("data")
    }

    pub fn system_data_dir(&self) -> PathBuf {
        self.path().join("system")
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.path().join("bin")
    }

    /// Associations recorded by the fake xdg-mime
    pub fn defaults_list(&self) -> PathBuf {
        self.bin_dir().join("defaults.list")
    }

    pub fn write_config(&self, content: &str) -> Result<()> {
        let dir = self.config_home().join("xdg-mat");
        fs::create_dir_all(&dir)?;
        fs::write(dir.join("config.toml"), content)?;
        Ok(())
    }

    /// Install a desktop file below the data home's `applications/` dir.
    pub fn install_app(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.data_home().join("applications").join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }
}
