//! Feeds an import stream into a session owned by someone else.
//!
//! The dialog keeps its session in a signal that may be reset or disposed while the
//! stream is still in flight, so every write goes through [`SessionHandle`] with the
//! generation the stream was started under.

use std::cell::RefCell;

use futures::{Stream, StreamExt};

use super::error::ImportStreamError;
use super::session::ImportSession;

/// Access to the session a stream writes into
pub trait SessionHandle {
    /// Apply `f` if the session is still on `generation`; `None` otherwise
    fn update_current<F>(&self, generation: u64, f: F) -> Option<bool>
    where
        F: FnOnce(&mut ImportSession) -> Option<bool>;

    /// True once the session has moved past `generation` or is gone
    fn is_abandoned(&self, generation: u64) -> bool;
}

impl SessionHandle for RefCell<ImportSession> {
    fn update_current<F>(&self, generation: u64, f: F) -> Option<bool>
    where
        F: FnOnce(&mut ImportSession) -> Option<bool>,
    {
        let mut session = self.borrow_mut();
        if session.is_generation(generation) {
            f(&mut session)
        } else {
            None
        }
    }

    fn is_abandoned(&self, generation: u64) -> bool {
        !self.borrow().is_generation(generation)
    }
}

/// Drive `lines` into the session until it finishes or is abandoned.
///
/// `on_complete` runs at most once: with the outcome of the first terminal event, of a
/// transport failure, or of the stream ending early. It never runs for an abandoned
/// generation.
pub async fn drive_lines<H, S, C>(
    session: &H,
    generation: u64,
    lines: Result<S, ImportStreamError>,
    on_complete: C,
) where
    H: SessionHandle,
    S: Stream<Item = Result<String, ImportStreamError>>,
    C: FnOnce(bool),
{
    let lines = match lines {
        Ok(lines) => lines,
        Err(e) => {
            log::error!("import request failed: {}", e);
            if let Some(success) = session.update_current(generation, |s| s.fail(e.to_string())) {
                on_complete(success);
            }
            return;
        }
    };

    let mut lines = std::pin::pin!(lines);
    while let Some(line) = lines.next().await {
        if session.is_abandoned(generation) {
            log::debug!("import dialog closed, dropping the rest of the stream");
            return;
        }

        let outcome = match line {
            Ok(line) => session.update_current(generation, |s| s.handle_line(&line)),
            Err(e) => {
                log::error!("import stream failed: {}", e);
                session.update_current(generation, |s| s.fail(e.to_string()))
            }
        };
        if let Some(success) = outcome {
            on_complete(success);
            return;
        }
    }

    if let Some(success) = session.update_current(generation, |s| s.finish_stream()) {
        on_complete(success);
    }
}
