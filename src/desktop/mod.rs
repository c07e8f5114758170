mod error;
mod file;
mod id;

pub use error::DesktopFileError;
pub use file::DesktopFile;
pub use id::{desktop_file_id, find_desktop_file};
