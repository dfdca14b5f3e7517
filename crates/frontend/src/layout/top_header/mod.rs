//! Application top bar: sidebar toggle, title, current user and sign-out.

use crate::shared::config::AppConfig;
use crate::shared::icons::icon;
use crate::system::auth::context::{do_logout, use_auth};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

#[component]
pub fn TopHeader(sidebar_open: RwSignal<bool>) -> impl IntoView {
    let (auth_state, set_auth_state) = use_auth();
    let config = use_context::<AppConfig>().unwrap_or_default();
    let navigate = use_navigate();

    let toggle_sidebar = move |_| sidebar_open.update(|open| *open = !*open);

    let logout = move |_| {
        let config = config.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            do_logout(&config, set_auth_state).await;
            navigate(&config.auth.entry_path, NavigateOptions::default());
        });
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=toggle_sidebar
                    title=move || if sidebar_open.get() { "Hide navigation" } else { "Show navigation" }
                >
                    {icon("menu")}
                </button>
                <span class="top-header__title">"University Analytics"</span>
            </div>

            <div class="top-header__actions">
                <div class="top-header__user">
                    {icon("user")}
                    <span>
                        {move || auth_state.with(|s| {
                            s.user_info
                                .as_ref()
                                .map(|u| u.display_name().to_string())
                                .unwrap_or_else(|| "Guest".to_string())
                        })}
                    </span>
                    <Show when=move || auth_state.with(|s| s.is_admin())>
                        <span class="badge badge--primary">"Admin"</span>
                    </Show>
                </div>

                <button class="top-header__icon-btn" on:click=logout title="Sign out">
                    {icon("logout")}
                </button>
            </div>
        </div>
    }
}
