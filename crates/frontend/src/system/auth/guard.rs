use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use super::context::use_auth;
use crate::shared::config::AppConfig;

/// Renders `children` for signed-in users.
///
/// Shows a placeholder while the session is restored, then sends anyone
/// not signed in to the sign-in page.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();
    let entry_path = use_context::<AppConfig>()
        .unwrap_or_default()
        .auth
        .entry_path;
    let navigate = use_navigate();

    Effect::new(move |_| {
        let signed_out = auth_state.with(|s| s.is_loaded && !s.is_signed_in());
        if signed_out {
            navigate(&entry_path, NavigateOptions::default());
        }
    });

    view! {
        <Show
            when=move || auth_state.with(|s| s.is_loaded && s.is_signed_in())
            fallback=|| view! { <div class="session-loading">"Loading session..."</div> }
        >
            {children()}
        </Show>
    }
}

/// Renders `children` for administrators only.
#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.with(|s| s.is_admin())
            fallback=|| view! { <div class="access-denied">"Access denied. Administrator privileges required."</div> }
        >
            {children()}
        </Show>
    }
}
