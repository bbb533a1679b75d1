//! State of one import session as seen by the progress dialog.
//!
//! The dialog owns a single `ImportSession`. Lines from the stream are dispatched
//! through [`ImportSession::handle_line`]; the first terminal event (or a transport
//! failure) finishes the session and is the only call that returns `Some(success)`,
//! which is what the caller forwards to its completion callback.

use chrono::{DateTime, Utc};
use contracts::usecases::u501_import_transactions_csv::{ImportEvent, ImportEventKind, ImportResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Progress,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    pub fn css_class(&self) -> &'static str {
        match self {
            LogLevel::Info => "import-log__entry--info",
            LogLevel::Progress => "import-log__entry--progress",
            LogLevel::Success => "import-log__entry--success",
            LogLevel::Warning => "import-log__entry--warning",
            LogLevel::Error => "import-log__entry--error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportLogEntry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ImportLogEntry {
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ImportSession {
    /// Bumped on every reset; stream tasks compare it before writing
    generation: u64,
    started: bool,
    /// Set exactly once, by the first terminal event or failure
    outcome: Option<bool>,
    current: Option<u64>,
    total: Option<u64>,
    logs: Vec<ImportLogEntry>,
    result: Option<ImportResult>,
}

impl ImportSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.started && self.outcome.is_none()
    }

    pub fn current(&self) -> Option<u64> {
        self.current
    }

    pub fn total(&self) -> Option<u64> {
        self.total
    }

    pub fn logs(&self) -> &[ImportLogEntry] {
        &self.logs
    }

    pub fn result(&self) -> Option<&ImportResult> {
        self.result.as_ref()
    }

    /// Mark the session as started.
    ///
    /// Returns the generation the new stream must write under, or `None` if a stream was
    /// already started since the last reset.
    pub fn try_start(&mut self) -> Option<u64> {
        if self.started {
            return None;
        }
        self.started = true;
        Some(self.generation)
    }

    /// Drop everything so a reopened dialog starts clean
    pub fn reset(&mut self) {
        *self = Self {
            generation: self.generation.wrapping_add(1),
            ..Self::default()
        };
    }

    pub fn is_generation(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Dispatch one raw line from the stream.
    ///
    /// Lines that are not valid JSON are logged to the console and skipped.
    pub fn handle_line(&mut self, line: &str) -> Option<bool> {
        if self.is_finished() {
            log::debug!("import already finished, ignoring line: {}", line);
            return None;
        }
        match serde_json::from_str::<ImportEvent>(line) {
            Ok(event) => self.apply(event),
            Err(e) => {
                log::warn!("skipping malformed import line ({}): {}", e, line);
                None
            }
        }
    }

    pub fn apply(&mut self, event: ImportEvent) -> Option<bool> {
        if self.is_finished() {
            return None;
        }

        if let Some(current) = event.current {
            self.current = Some(current);
        }
        if let Some(total) = event.total {
            self.total = Some(total);
        }

        let success = event.terminal_success();
        let level = match (event.kind, success) {
            (ImportEventKind::Progress, _) => LogLevel::Progress,
            (ImportEventKind::Complete, Some(true)) => LogLevel::Success,
            (ImportEventKind::Complete, _) | (ImportEventKind::Error, _) => LogLevel::Error,
            (ImportEventKind::Log, _) | (ImportEventKind::Unknown, _) => LogLevel::Info,
        };

        let message = if !event.message.is_empty() {
            Some(event.message)
        } else if success.is_some() {
            Some(match &event.result {
                Some(result) => result.summary(),
                None if success == Some(true) => "Import finished".to_string(),
                None => "Import failed".to_string(),
            })
        } else {
            None
        };
        if let Some(message) = message {
            self.push_log(level, message);
        }

        if success.is_some() {
            if let Some(result) = &event.result {
                log::info!("import finished: {}", result.summary());
            }
            self.result = event.result;
            self.outcome = success;
        }
        success
    }

    /// Record a transport-level failure as a single error entry
    pub fn fail(&mut self, message: impl Into<String>) -> Option<bool> {
        if self.is_finished() {
            return None;
        }
        self.push_log(LogLevel::Error, message.into());
        self.outcome = Some(false);
        Some(false)
    }

    /// Called once the stream is exhausted; fails the session if no terminal event arrived
    pub fn finish_stream(&mut self) -> Option<bool> {
        if self.is_finished() {
            return None;
        }
        self.fail("Import stream ended before a result was received")
    }

    pub fn push_log(&mut self, level: LogLevel, message: String) {
        self.logs.push(ImportLogEntry {
            level,
            message,
            timestamp: Utc::now(),
        });
    }

    /// "3 / 10"; just the counter when the total is unknown
    pub fn progress_label(&self) -> Option<String> {
        match (self.current, self.total) {
            (Some(current), Some(total)) => Some(format!("{} / {}", current, total)),
            (None, Some(total)) => Some(format!("0 / {}", total)),
            (Some(current), None) => Some(current.to_string()),
            (None, None) => None,
        }
    }

    /// Text under the progress bar, e.g. "3 / 10 (30%)"
    pub fn status_text(&self) -> String {
        match (self.progress_label(), self.percent()) {
            (Some(label), Some(percent)) => format!("{} ({}%)", label, percent),
            (Some(label), None) => label,
            (None, _) if self.is_running() => "Waiting for server...".to_string(),
            (None, _) => String::new(),
        }
    }

    pub fn percent(&self) -> Option<u8> {
        let total = self.total.filter(|t| *t > 0)?;
        let current = self.current.unwrap_or(0).min(total);
        Some((u128::from(current) * 100 / u128::from(total)) as u8)
    }

    /// Outcome shown in the result panel once finished
    pub fn succeeded(&self) -> Option<bool> {
        self.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(lines: &[&str]) -> (ImportSession, Vec<bool>) {
        let mut session = ImportSession::new();
        session.try_start().unwrap();
        let mut callbacks = Vec::new();
        for line in lines {
            if let Some(success) = session.handle_line(line) {
                callbacks.push(success);
            }
        }
        if let Some(success) = session.finish_stream() {
            callbacks.push(success);
        }
        (session, callbacks)
    }

    #[test]
    fn test_progress_then_complete() {
        let (session, callbacks) = run(&[
            r#"{"type":"progress","message":"Row 3","current":3,"total":10}"#,
            r#"{"type":"complete","message":"Done","result":{"success":true,"imported_count":3}}"#,
        ]);
        assert_eq!(callbacks, vec![true]);
        assert_eq!(session.progress_label().as_deref(), Some("3 / 10"));
        assert_eq!(session.percent(), Some(30));
        assert_eq!(session.result().map(|r| r.imported_count), Some(3));
        assert_eq!(session.succeeded(), Some(true));
        assert!(!session.is_running());
    }

    #[test]
    fn test_malformed_line_does_not_end_session() {
        let (session, callbacks) = run(&[
            r#"{"type":"log","message":"Parsing file"}"#,
            r#"{"type":"progress", oops"#,
            r#"{"type":"progress","message":"Row 1","current":1,"total":2}"#,
            r#"{"type":"complete","result":{"success":true,"imported_count":2}}"#,
        ]);
        assert_eq!(callbacks, vec![true]);
        assert_eq!(session.current(), Some(1));
        // log + progress + generated summary for the bare complete
        assert_eq!(session.logs().len(), 3);
        assert_eq!(session.logs()[2].message, "Imported 2 transaction(s)");
    }

    #[test]
    fn test_only_first_terminal_event_counts() {
        let (session, callbacks) = run(&[
            r#"{"type":"error","message":"Bad header","result":{"success":false,"imported_count":0,"errors":["missing column: symbol"]}}"#,
            r#"{"type":"complete","result":{"success":true,"imported_count":5}}"#,
            r#"{"type":"progress","current":9,"total":9}"#,
        ]);
        assert_eq!(callbacks, vec![false]);
        assert_eq!(session.current(), None);
        assert_eq!(session.result().unwrap().errors, vec!["missing column: symbol"]);
        assert_eq!(session.succeeded(), Some(false));
    }

    #[test]
    fn test_stream_without_terminal_event_fails_once() {
        let (session, callbacks) =
            run(&[r#"{"type":"progress","message":"Row 1","current":1,"total":4}"#]);
        assert_eq!(callbacks, vec![false]);
        assert_eq!(session.logs().last().unwrap().level, LogLevel::Error);
        assert_eq!(session.percent(), Some(25));
    }

    #[test]
    fn test_transport_failure_is_one_error_entry() {
        let mut session = ImportSession::new();
        session.try_start().unwrap();
        assert_eq!(session.fail("Server responded with HTTP 502"), Some(false));
        assert_eq!(session.finish_stream(), None);
        assert_eq!(session.fail("again"), None);
        assert_eq!(session.logs().len(), 1);
        assert_eq!(session.logs()[0].level, LogLevel::Error);
        assert_eq!(session.succeeded(), Some(false));
    }

    #[test]
    fn test_partial_progress_survives_failure() {
        let mut session = ImportSession::new();
        session.try_start().unwrap();
        session.handle_line(r#"{"type":"progress","current":7,"total":20}"#);
        session.fail("Failed to read import stream: network lost");
        assert_eq!(session.progress_label().as_deref(), Some("7 / 20"));
        assert_eq!(session.percent(), Some(35));
    }

    #[test]
    fn test_started_flag_blocks_second_start() {
        let mut session = ImportSession::new();
        assert_eq!(session.try_start(), Some(0));
        assert_eq!(session.try_start(), None);
        session.reset();
        assert_eq!(session.try_start(), Some(1));
    }

    #[test]
    fn test_reset_clears_everything() {
        let (mut session, _) = run(&[
            r#"{"type":"progress","message":"Row 3","current":3,"total":10}"#,
            r#"{"type":"complete","result":{"success":true,"imported_count":3}}"#,
        ]);
        let before = session.generation();
        session.reset();
        assert_eq!(session.generation(), before + 1);
        assert!(!session.is_started());
        assert!(!session.is_finished());
        assert_eq!(session.current(), None);
        assert_eq!(session.total(), None);
        assert!(session.logs().is_empty());
        assert!(session.result().is_none());
        assert_eq!(session.progress_label(), None);
        assert!(!session.is_generation(before));
    }

    #[test]
    fn test_status_text() {
        let mut session = ImportSession::new();
        assert_eq!(session.status_text(), "");
        session.try_start();
        assert_eq!(session.status_text(), "Waiting for server...");
        session.apply(ImportEvent::progress(3, 10, "Row 3"));
        assert_eq!(session.status_text(), "3 / 10 (30%)");
    }

    #[test]
    fn test_percent_edge_cases() {
        let mut session = ImportSession::new();
        assert_eq!(session.percent(), None);
        session.apply(ImportEvent::progress(0, 0, ""));
        assert_eq!(session.percent(), None);
        session.apply(ImportEvent::progress(15, 10, ""));
        assert_eq!(session.percent(), Some(100));
        assert_eq!(session.progress_label().as_deref(), Some("15 / 10"));
    }

    #[test]
    fn test_percent_with_huge_counters() {
        let mut session = ImportSession::new();
        session.handle_line(r#"{"type":"progress","current":200000000000000000,"total":400000000000000000}"#);
        assert_eq!(session.percent(), Some(50));

        let near_max = u64::MAX / 10;
        session.apply(ImportEvent::progress(near_max, near_max, ""));
        assert_eq!(session.percent(), Some(100));
        session.apply(ImportEvent::progress(u64::MAX / 4, u64::MAX, ""));
        assert_eq!(session.percent(), Some(24));
    }

    #[test]
    fn test_constructed_terminal_events() {
        let mut session = ImportSession::new();
        session.try_start();
        let result = ImportResult {
            success: true,
            imported_count: 4,
            errors: Vec::new(),
            warnings: vec!["duplicate row 7".to_string()],
        };
        assert_eq!(session.apply(ImportEvent::complete(result, "")), Some(true));
        assert_eq!(session.logs()[0].message, "Imported 4 transaction(s), 1 warning(s)");
        assert_eq!(session.apply(ImportEvent::error("late", None)), None);

        let mut session = ImportSession::new();
        session.try_start();
        assert_eq!(session.apply(ImportEvent::error("Upload rejected", None)), Some(false));
        assert_eq!(session.logs()[0].message, "Upload rejected");
        assert_eq!(session.logs()[0].level, LogLevel::Error);
        assert!(session.result().is_none());
    }

    #[test]
    fn test_empty_progress_message_adds_no_log() {
        let mut session = ImportSession::new();
        session.apply(ImportEvent::progress(1, 2, ""));
        assert!(session.logs().is_empty());
        session.apply(ImportEvent::log("Validating rows"));
        assert_eq!(session.logs()[0].level, LogLevel::Info);
    }

    #[test]
    fn test_complete_with_failed_result_reports_false() {
        let (session, callbacks) = run(&[
            r#"{"type":"complete","message":"Nothing imported","result":{"success":false,"imported_count":0,"warnings":["empty file"]}}"#,
        ]);
        assert_eq!(callbacks, vec![false]);
        assert_eq!(session.logs()[0].level, LogLevel::Error);
        assert_eq!(session.result().unwrap().warnings.len(), 1);
    }
}
