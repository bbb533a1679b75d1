pub mod api;
pub mod driver;
pub mod error;
pub mod line_reader;
pub mod session;
pub mod view;

pub use driver::{drive_lines, SessionHandle};
pub use error::ImportStreamError;
pub use session::{ImportLogEntry, ImportSession, LogLevel};
pub use view::{start_import, ImportProgressModal};
