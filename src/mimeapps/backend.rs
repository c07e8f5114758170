use crate::desktop::DesktopFile;

/// A desktop service that knows the default application of each MIME type.
///
/// Implementations report failure as `None`/`false` and emit the reason as a
/// diagnostic; they must not panic on odd input such as an empty MIME type.
pub trait MimeAppsBackend: Send {
    /// Short name used in diagnostics
    fn name(&self) -> &'static str;

    fn default_app(&self, mime_type: &str) -> Option<DesktopFile>;

    /// Register `app` as the default for `mime_type`. Persists outside the process.
    fn set_default_app(&self, mime_type: &str, app: &DesktopFile) -> bool;
}
