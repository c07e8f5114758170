use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use serde_json::json;
use thiserror::Error;

use super::{MatCommand, MatContext};
use crate::desktop::DesktopFile;
use crate::ui::prelude::*;

/// Get/Set the default application for a mimetype
#[derive(Parser, Debug)]
#[command(name = "xdg-mat", bin_name = "xdg-mat mime", version)]
pub struct MimeArgs {
    /// Application to be set as default
    #[arg(short = 'd', long = "default-app", value_name = "app name")]
    pub default_app: Option<String>,

    /// mimetype(s)
    #[arg(value_name = "mimetype")]
    pub mime_types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MimeRequest {
    Get {
        mime_type: String,
    },
    Set {
        app_name: String,
        mime_types: Vec<String>,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MimeArgsError {
    #[error("no application name")]
    NoApplicationName,

    #[error("mimeType missing")]
    MimeTypeMissing,

    #[error("only one mimeType, please")]
    OnlyOneMimeType,
}

impl MimeArgs {
    pub fn into_request(self) -> Result<MimeRequest, MimeArgsError> {
        if matches!(&self.default_app, Some(name) if name.is_empty()) {
            return Err(MimeArgsError::NoApplicationName);
        }

        if self.mime_types.is_empty() {
            return Err(MimeArgsError::MimeTypeMissing);
        }

        match self.default_app {
            Some(app_name) => Ok(MimeRequest::Set {
                app_name,
                mime_types: self.mime_types,
            }),
            None => {
                let mut mime_types = self.mime_types;
                if mime_types.len() > 1 {
                    return Err(MimeArgsError::OnlyOneMimeType);
                }
                Ok(MimeRequest::Get {
                    mime_type: mime_types.remove(0),
                })
            }
        }
    }
}

/// Parse the command's arguments; `args[0]` is the command name.
///
/// `Err` carries the exit code after help, version or an error was printed.
pub fn parse_request(args: &[String]) -> Result<MimeRequest, i32> {
    let parsed = match MimeArgs::try_parse_from(args) {
        Ok(parsed) => parsed,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Err(0),
                _ => Err(1),
            };
        }
    };

    parsed.into_request().map_err(|e| {
        eprint!("{}\n\n{}", e, MimeArgs::command().render_help());
        1
    })
}

#[derive(Debug, Default)]
pub struct MimeCommand;

impl MatCommand for MimeCommand {
    fn name(&self) -> &'static str {
        "mime"
    }

    fn description(&self) -> &'static str {
        "Get/Set the default application for a mimetype"
    }

    fn run(&self, ctx: &MatContext, args: &[String]) -> i32 {
        match parse_request(args) {
            Ok(MimeRequest::Get { mime_type }) => show_default(ctx, &mime_type),
            Ok(MimeRequest::Set {
                app_name,
                mime_types,
            }) => set_default(ctx, &app_name, &mime_types),
            Err(code) => code,
        }
    }
}

fn show_default(ctx: &MatContext, mime_type: &str) -> i32 {
    match ctx.apps.default_app(mime_type) {
        Some(app) => {
            let desktop_id = app.id(ctx.apps.dirs());
            emit(
                Level::Info,
                "mime.default.found",
                &desktop_id,
                Some(json!({
                    "mime_type": mime_type,
                    "desktop_id": desktop_id,
                    "file": app.file_name().display().to_string(),
                })),
            );
        }
        None => emit(
            Level::Info,
            "mime.default.none",
            &format!("No default application for '{}'", mime_type),
            Some(json!({ "mime_type": mime_type })),
        ),
    }
    0
}

// Per-type failures are reported, not turned into a failing exit code.
fn set_default(ctx: &MatContext, app_name: &str, mime_types: &[String]) -> i32 {
    let app = match DesktopFile::load_by_name(app_name, ctx.apps.dirs()) {
        Ok(app) => app,
        Err(e) => {
            emit(
                Level::Info,
                "mime.app.not_found",
                &format!("Could not find '{}'", app_name),
                Some(json!({ "app": app_name, "reason": e.to_string() })),
            );
            return 0;
        }
    };

    let file = app.file_name().display().to_string();
    for mime_type in mime_types {
        let data = Some(json!({ "mime_type": mime_type, "file": file }));
        if ctx.apps.set_default_app(mime_type, &app) {
            emit(
                Level::Success,
                "mime.set.success",
                &format!("Set '{}' as default for '{}'", file, mime_type),
                data,
            );
        } else {
            emit(
                Level::Info,
                "mime.set.failed",
                &format!("Could not set '{}' as default for '{}'", file, mime_type),
                data,
            );
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<MimeRequest, MimeArgsError> {
        let mut argv = vec!["mime"];
        argv.extend_from_slice(args);
        MimeArgs::try_parse_from(argv).unwrap().into_request()
    }

    #[test]
    fn test_get_request() {
        assert_eq!(
            parse(&["text/plain"]),
            Ok(MimeRequest::Get {
                mime_type: "text/plain".into()
            })
        );
    }

    #[test]
    fn test_set_request_with_many_types() {
        assert_eq!(
            parse(&["-d", "editor.desktop", "text/plain", "text/markdown"]),
            Ok(MimeRequest::Set {
                app_name: "editor.desktop".into(),
                mime_types: vec!["text/plain".into(), "text/markdown".into()],
            })
        );
        assert_eq!(
            parse(&["--default-app", "editor", "text/plain"]),
            Ok(MimeRequest::Set {
                app_name: "editor".into(),
                mime_types: vec!["text/plain".into()],
            })
        );
    }

    #[test]
    fn test_empty_application_name() {
        assert_eq!(
            parse(&["-d", "", "text/plain"]),
            Err(MimeArgsError::NoApplicationName)
        );
    }

    #[test]
    fn test_missing_mime_type() {
        assert_eq!(parse(&[]), Err(MimeArgsError::MimeTypeMissing));
        assert_eq!(
            parse(&["-d", "editor.desktop"]),
            Err(MimeArgsError::MimeTypeMissing)
        );
    }

    #[test]
    fn test_get_accepts_only_one_type() {
        assert_eq!(
            parse(&["text/plain", "text/markdown"]),
            Err(MimeArgsError::OnlyOneMimeType)
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            MimeArgsError::NoApplicationName.to_string(),
            "no application name"
        );
        assert_eq!(MimeArgsError::MimeTypeMissing.to_string(), "mimeType missing");
    }

    #[test]
    fn test_version_names_the_binary() {
        let version = MimeArgs::command().render_version();
        assert!(version.starts_with("xdg-mat "), "version: {}", version);
    }

    #[test]
    fn test_parse_request_exit_codes() {
        let args = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(parse_request(&args(&["mime"])), Err(1));
        assert_eq!(parse_request(&args(&["mime", "--bogus", "x"])), Err(1));
        assert_eq!(parse_request(&args(&["mime", "--help"])), Err(0));
        assert_eq!(parse_request(&args(&["mime", "--version"])), Err(0));
        assert!(parse_request(&args(&["mime", "text/plain"])).is_ok());
    }
}
