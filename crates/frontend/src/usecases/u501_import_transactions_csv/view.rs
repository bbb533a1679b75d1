use super::api;
use super::driver::{drive_lines, SessionHandle};
use super::session::{ImportSession, LogLevel};
use crate::shared::icons::icon;
use crate::shared::modal_frame::ModalFrame;
use crate::system::auth::storage;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_import_transactions_csv::{ImportRequest, ImportTransactionsCsv};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use web_sys::File;

impl SessionHandle for RwSignal<ImportSession> {
    /// `None` for stale generations and for a disposed signal (dialog unmounted)
    fn update_current<F>(&self, generation: u64, f: F) -> Option<bool>
    where
        F: FnOnce(&mut ImportSession) -> Option<bool>,
    {
        self.try_update(|s| {
            if s.is_generation(generation) {
                f(s)
            } else {
                None
            }
        })
        .flatten()
    }

    fn is_abandoned(&self, generation: u64) -> bool {
        self.try_with_untracked(|s| !s.is_generation(generation))
            .unwrap_or(true)
    }
}

/// Start streaming `file` into `session`.
///
/// Does nothing if the session was already started since its last reset. `on_complete`
/// runs exactly once with the final outcome, unless the dialog is closed first. The
/// request itself is never aborted.
pub fn start_import(
    session: RwSignal<ImportSession>,
    request: ImportRequest,
    file: File,
    on_complete: Callback<bool>,
) {
    let Some(generation) = session.try_update(|s| s.try_start()).flatten() else {
        log::debug!("import already started for this dialog, ignoring trigger");
        return;
    };

    log::info!(
        "starting import of {} into portfolio {}",
        file.name(),
        request.portfolio_id
    );
    session.update_current(generation, |s| {
        s.push_log(LogLevel::Info, format!("Uploading {}", file.name()));
        None
    });

    spawn_local(async move {
        let lines = api::stream_import(&request, &file, storage::get_access_token()).await;
        drive_lines(&session, generation, lines, |success| on_complete.run(success)).await;
    });
}

/// Progress dialog of one CSV import.
///
/// Setting `file` to `Some` starts the upload; the dialog clears `file` and resets its
/// session when closed, so the next open starts from scratch.
#[component]
pub fn ImportProgressModal(
    #[prop(into)] portfolio_id: Signal<String>,
    /// Overrides the default streaming endpoint
    #[prop(optional)]
    endpoint: Option<String>,
    file: RwSignal<Option<File>, LocalStorage>,
    on_close: Callback<()>,
    on_complete: Callback<bool>,
) -> impl IntoView {
    let session = RwSignal::new(ImportSession::new());

    Effect::new(move |_| {
        let Some(file) = file.get() else {
            return;
        };
        let mut request = ImportRequest::new(portfolio_id.get_untracked());
        if let Some(endpoint) = endpoint.clone() {
            request = request.with_endpoint(endpoint);
        }
        start_import(session, request, file, on_complete);
    });

    let close = move || {
        session.update(|s| s.reset());
        file.set(None);
        on_close.run(());
    };

    view! {
        <ModalFrame
            on_close=Callback::new(move |_| close())
            close_on_overlay=false
            modal_class="import-progress-modal".to_string()
        >
            <div class="modal-header">
                <h2 class="modal-title">{ImportTransactionsCsv::display_name()}</h2>
                <div class="modal-header-actions">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| close()>
                        {icon("x")}
                        " Close"
                    </Button>
                </div>
            </div>

            <div class="modal-body import-progress">
                <div class="import-progress__bar">
                    <div
                        class=move || {
                            if session.with(|s| s.succeeded() == Some(false)) {
                                "import-progress__fill import-progress__fill--failed"
                            } else {
                                "import-progress__fill"
                            }
                        }
                        style=move || format!("width: {}%;", session.with(|s| s.percent().unwrap_or(0)))
                    ></div>
                </div>
                <div class="import-progress__label">
                    {move || session.with(|s| s.status_text())}
                </div>

                <ul class="import-log">
                    {move || session.with(|s| {
                        s.logs()
                            .iter()
                            .map(|entry| {
                                let class = format!("import-log__entry {}", entry.level.css_class());
                                let time = entry.time_label();
                                let message = entry.message.clone();
                                view! {
                                    <li class=class>
                                        <span class="import-log__time">{time}</span>
                                        " "
                                        <span class="import-log__message">{message}</span>
                                    </li>
                                }
                            })
                            .collect_view()
                    })}
                </ul>

                {move || session.with(|s| {
                    s.succeeded().map(|success| {
                        let result = s.result().cloned();
                        let (class, headline) = if success {
                            ("warning-box warning-box--success", "Import completed")
                        } else {
                            ("warning-box warning-box--error", "Import failed")
                        };
                        let imported = result.as_ref().map(|r| r.imported_count).unwrap_or(0);
                        let errors = result.as_ref().map(|r| r.errors.clone()).unwrap_or_default();
                        let warnings = result.as_ref().map(|r| r.warnings.clone()).unwrap_or_default();
                        view! {
                            <div class=class>
                                <div class="warning-box__text">
                                    <strong>{headline}</strong>
                                    {format!(": {} transaction(s) imported", imported)}
                                </div>
                                {(!errors.is_empty()).then(|| view! {
                                    <div class="import-result__section">
                                        <strong>"Errors"</strong>
                                        <ul>
                                            {errors.into_iter().map(|e| view! { <li>{e}</li> }).collect_view()}
                                        </ul>
                                    </div>
                                })}
                                {(!warnings.is_empty()).then(|| view! {
                                    <div class="import-result__section">
                                        <strong>"Warnings"</strong>
                                        <ul>
                                            {warnings.into_iter().map(|w| view! { <li>{w}</li> }).collect_view()}
                                        </ul>
                                    </div>
                                })}
                            </div>
                        }
                    })
                })}
            </div>
        </ModalFrame>
    }
}
