use contracts::system::upload::UploadHistoryItem;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;
use thaw::*;
use wasm_bindgen::JsCast;

use super::controller::{SelectedFile, UploadController, UploadState};
use super::transport::BrowserUploadTransport;
use crate::shared::api_client::HttpTransport;
use crate::shared::components::loading::EmptyState;
use crate::shared::components::page_header::PageHeader;
use crate::shared::config::AppConfig;
use crate::shared::date_utils::format_datetime;
use crate::shared::format::{format_count, format_number, or_missing, MISSING};
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_SYSTEM};
use crate::system::auth::context::{use_auth, SessionIdentity};

type Controller = UploadController<BrowserUploadTransport>;

fn format_size(bytes: u64) -> String {
    if bytes < 1024 * 1024 {
        format!("{} KB", format_number((bytes as f64 / 1024.0 * 10.0).round() / 10.0))
    } else {
        format!(
            "{} MB",
            format_number((bytes as f64 / (1024.0 * 1024.0) * 10.0).round() / 10.0)
        )
    }
}

fn history_badge(item: &UploadHistoryItem) -> &'static str {
    if item.is_success() {
        "badge badge--success"
    } else {
        "badge badge--error"
    }
}

/// Admin page for importing Excel/CSV data files.
#[component]
pub fn UploadPage() -> impl IntoView {
    let config = use_context::<AppConfig>().unwrap_or_default();
    let (auth, set_auth) = use_auth();
    let accept = config
        .upload
        .allowed_extensions
        .iter()
        .map(|ext| format!(".{}", ext))
        .collect::<Vec<_>>()
        .join(",");
    let max_mb = config.upload.max_size_mb;

    let controller: Rc<Controller> = Rc::new(UploadController::new(
        Rc::new(BrowserUploadTransport::new(HttpTransport::new(config.clone()))),
        Rc::new(SessionIdentity::new(auth, set_auth, config.clone())),
        config.upload.clone(),
    ));
    let state = RwSignal::new(UploadState::default());
    controller.subscribe(move |next| {
        let _ = state.try_set(next.clone());
    });
    let controller = StoredValue::new_local(controller);

    // History is best-effort: failures are only logged
    Effect::new(move |_| {
        if auth.with(|s| s.is_loaded) {
            let controller = controller.get_value();
            spawn_local(async move { controller.refresh_history().await });
        }
    });

    let on_file_change = move |ev: leptos::ev::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            controller.with_value(|c| c.clear_selection());
            return;
        };
        let selected = SelectedFile {
            name: file.name(),
            size_bytes: file.size() as u64,
            handle: file,
        };
        if controller.with_value(|c| c.select_file(selected)).is_err() {
            // let the same file be picked again after a rejection
            input.set_value("");
        }
    };

    let on_upload = move |_| {
        let controller = controller.get_value();
        spawn_local(async move {
            if let Err(e) = controller.upload().await {
                log::debug!("Upload not completed: {}", e);
            }
        });
    };

    let uploading = Signal::derive(move || state.with(|s| s.uploading));
    let can_upload = Signal::derive(move || state.with(|s| s.selected.is_some() && !s.uploading));

    view! {
        <PageFrame page_id="system_upload--page" category=PAGE_CAT_SYSTEM>
            <PageHeader
                title="Data upload"
                subtitle=format!("Excel or CSV files up to {} MB", max_mb)
            />

            <div class="upload-card">
                <label class="upload-dropzone">
                    {icon("upload")}
                    <span>"Choose a file"</span>
                    <input
                        type="file"
                        accept=accept
                        class="upload-dropzone__input"
                        on:change=on_file_change
                        prop:disabled=move || uploading.get()
                    />
                </label>

                {move || state.with(|s| s.selected.clone()).map(|(name, size)| view! {
                    <div class="upload-selected">
                        <span class="upload-selected__name">{name}</span>
                        <span class="upload-selected__size">{format_size(size)}</span>
                    </div>
                })}

                <Flex gap=FlexGap::Small>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=on_upload
                        disabled=Signal::derive(move || !can_upload.get())
                    >
                        "Upload"
                    </Button>
                    <Show when=move || uploading.get()>
                        <Spinner size=SpinnerSize::Small />
                        <span>"Uploading..."</span>
                    </Show>
                </Flex>

                {move || state.with(|s| s.error.clone()).map(|message| view! {
                    <div class="alert alert--error">
                        {icon("alert")}
                        <span>{message}</span>
                    </div>
                })}

                {move || state.with(|s| s.result.clone()).map(|result| {
                    if result.success {
                        view! {
                            <div class="alert alert--success">
                                <span>
                                    {format!(
                                        "Upload complete: {} rows processed.",
                                        format_count(result.records_processed)
                                    )}
                                </span>
                                {result.duplicates_found.filter(|n| *n > 0).map(|n| view! {
                                    <span>{format!(" {} duplicates skipped.", format_count(n))}</span>
                                })}
                            </div>
                        }
                        .into_any()
                    } else {
                        view! {
                            <div class="alert alert--error">
                                <span>
                                    {result
                                        .error
                                        .clone()
                                        .unwrap_or_else(|| "The file could not be processed.".to_string())}
                                </span>
                                <ul class="upload-row-errors">
                                    {result
                                        .errors
                                        .iter()
                                        .map(|row| {
                                            let at = or_missing(row.row, |r| r.to_string());
                                            view! { <li>{format!("Row {}: {}", at, row.message)}</li> }
                                        })
                                        .collect_view()}
                                </ul>
                            </div>
                        }
                        .into_any()
                    }
                })}
            </div>

            <h2 class="section-title">"Upload history"</h2>
            <UploadHistory state=state />
        </PageFrame>
    }
}

#[component]
fn UploadHistory(state: RwSignal<UploadState>) -> impl IntoView {
    view! {
        <Show
            when=move || state.with(|s| !s.history.is_empty())
            fallback=|| view! { <EmptyState message="No uploads yet" /> }
        >
            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"File"</TableHeaderCell>
                        <TableHeaderCell>"Uploaded at"</TableHeaderCell>
                        <TableHeaderCell>"Status"</TableHeaderCell>
                        <TableHeaderCell>"Rows"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || {
                        state.with(|s| s.history.clone())
                            .into_iter()
                            .map(|item| {
                                let badge = history_badge(&item);
                                view! {
                                    <TableRow>
                                        <TableCell>{item.filename.unwrap_or_else(|| MISSING.to_string())}</TableCell>
                                        <TableCell>
                                            {item.uploaded_at.as_deref().map(format_datetime).unwrap_or_else(|| MISSING.to_string())}
                                        </TableCell>
                                        <TableCell>
                                            <span class=badge title=item.error_message.unwrap_or_default()>
                                                {item.status}
                                            </span>
                                        </TableCell>
                                        <TableCell>{or_missing(item.rows_imported, format_count)}</TableCell>
                                    </TableRow>
                                }
                            })
                            .collect_view()
                    }}
                </TableBody>
            </Table>
        </Show>
    }
}
