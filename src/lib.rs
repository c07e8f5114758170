//! Query and set the default application of MIME types.
//!
//! The [`mimeapps::MimeApps`] facade validates requests and forwards them to a
//! desktop service backend; the [`mat`] module holds the commands of the
//! `xdg-mat` binary.

pub mod common;
pub mod desktop;
pub mod mat;
pub mod mimeapps;
pub mod ui;
