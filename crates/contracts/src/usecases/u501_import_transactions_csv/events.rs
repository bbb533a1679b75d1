use serde::{Deserialize, Serialize};

use super::result::ImportResult;

/// Discriminator of a streamed import line (`type` field on the wire)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportEventKind {
    Progress,
    Log,
    Complete,
    Error,
    /// Any type this client does not know yet; rendered as a log line
    #[serde(other)]
    Unknown,
}

impl ImportEventKind {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ImportEventKind::Complete | ImportEventKind::Error)
    }
}

/// One line of the NDJSON import stream.
///
/// ```text
/// {"type":"progress","message":"Row 3","current":3,"total":10}
/// {"type":"complete","message":"Done","result":{"success":true,"imported_count":3}}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportEvent {
    #[serde(rename = "type")]
    pub kind: ImportEventKind,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ImportResult>,
}

impl ImportEvent {
    pub fn progress(current: u64, total: u64, message: impl Into<String>) -> Self {
        Self {
            kind: ImportEventKind::Progress,
            message: message.into(),
            current: Some(current),
            total: Some(total),
            result: None,
        }
    }

    pub fn log(message: impl Into<String>) -> Self {
        Self {
            kind: ImportEventKind::Log,
            message: message.into(),
            current: None,
            total: None,
            result: None,
        }
    }

    pub fn complete(result: ImportResult, message: impl Into<String>) -> Self {
        Self {
            kind: ImportEventKind::Complete,
            message: message.into(),
            current: None,
            total: None,
            result: Some(result),
        }
    }

    pub fn error(message: impl Into<String>, result: Option<ImportResult>) -> Self {
        Self {
            kind: ImportEventKind::Error,
            message: message.into(),
            current: None,
            total: None,
            result,
        }
    }

    /// Success value reported to the caller once this event ends the session.
    ///
    /// `None` for informational events. A `complete` without a result object counts as
    /// success; an `error` is always a failure regardless of its payload.
    pub fn terminal_success(&self) -> Option<bool> {
        match self.kind {
            ImportEventKind::Complete => {
                Some(self.result.as_ref().map(|r| r.success).unwrap_or(true))
            }
            ImportEventKind::Error => Some(false),
            _ => None,
        }
    }
}
