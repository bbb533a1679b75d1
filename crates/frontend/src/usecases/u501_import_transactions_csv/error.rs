use thiserror::Error;

/// Transport-level failures of an import session.
///
/// The `Display` text is what ends up as the single error line in the progress log.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportStreamError {
    #[error("Failed to build import request: {0}")]
    Request(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Server responded with HTTP {status} {status_text}")]
    HttpStatus { status: u16, status_text: String },

    #[error("Server response has no body to stream")]
    MissingBody,

    #[error("Failed to read import stream: {0}")]
    Read(String),
}
