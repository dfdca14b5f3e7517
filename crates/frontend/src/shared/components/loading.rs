use leptos::prelude::*;
use thaw::*;

use crate::shared::fetch_state::{FetchStatus, LoadKind};

/// Skeleton blocks shown before anything has been loaded.
#[component]
pub fn Skeleton(#[prop(optional)] rows: Option<usize>) -> impl IntoView {
    let rows = rows.unwrap_or(3);
    view! {
        <div class="skeleton" aria-busy="true">
            {(0..rows).map(|_| view! { <div class="skeleton__block"></div> }).collect_view()}
        </div>
    }
}

/// Placeholder for the current fetch status.
///
/// A first load renders a skeleton instead of `children`. A refresh keeps
/// `children` on screen under a small spinner.
#[component]
pub fn FetchBoundary(#[prop(into)] status: Signal<FetchStatus>, children: ChildrenFn) -> impl IntoView {
    view! {
        <Show
            when=move || status.get() != FetchStatus::Loading(LoadKind::Initial)
            fallback=|| view! { <Skeleton rows=4 /> }
        >
            <div class="fetch-boundary">
                <Show when=move || status.get() == FetchStatus::Loading(LoadKind::Refresh)>
                    <div class="fetch-boundary__refreshing">
                        <Spinner size=SpinnerSize::Small />
                        <span>"Updating..."</span>
                    </div>
                </Show>
                {children()}
            </div>
        </Show>
    }
}

#[component]
pub fn EmptyState(#[prop(into)] message: String) -> impl IntoView {
    view! { <div class="empty-state">{message}</div> }
}
