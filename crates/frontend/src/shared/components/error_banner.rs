use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;
use thaw::*;

use crate::shared::config::AppConfig;
use crate::shared::errors::{ErrorInfo, ErrorKind};
use crate::shared::icons::icon;

/// Inline, dismissible error with the action that fits its kind.
///
/// Retriable kinds offer "Retry"; `auth` offers the way back to sign-in.
#[component]
pub fn ErrorBanner(
    #[prop(into)] error: Signal<Option<ErrorInfo>>,
    on_retry: Callback<()>,
    on_dismiss: Callback<()>,
) -> impl IntoView {
    let entry_path = use_context::<AppConfig>()
        .unwrap_or_default()
        .auth
        .entry_path;
    let navigate = use_navigate();

    move || {
        error.get().map(|info| {
            let action = if info.kind == ErrorKind::Auth {
                let entry_path = entry_path.clone();
                let navigate = navigate.clone();
                Some(view! {
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| navigate(&entry_path, NavigateOptions::default())
                    >
                        "Sign in"
                    </Button>
                }.into_any())
            } else if info.is_retriable() {
                Some(view! {
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| on_retry.run(())
                    >
                        "Retry"
                    </Button>
                }.into_any())
            } else {
                None
            };

            view! {
                <div class="error-banner" data-kind=info.kind.as_str() role="alert">
                    <span class="error-banner__icon">{icon("alert")}</span>
                    <span class="error-banner__message">{info.message.clone()}</span>
                    <div class="error-banner__actions">
                        {action}
                        <Button
                            size=ButtonSize::Small
                            appearance=ButtonAppearance::Subtle
                            on_click=move |_| on_dismiss.run(())
                        >
                            "Dismiss"
                        </Button>
                    </div>
                </div>
            }
        })
    }
}
