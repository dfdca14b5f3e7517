//! Root wrapper of every routed page.
//!
//! Sets `id` and `data-page-category` on the root element so pages can be
//! told apart in the DOM.

use leptos::prelude::*;

pub const PAGE_CAT_DASHBOARD: &str = "dashboard";
pub const PAGE_CAT_SYSTEM: &str = "system";

#[component]
pub fn PageFrame(
    /// e.g. `"d101_performance--dashboard"`
    page_id: &'static str,
    /// One of the `PAGE_CAT_*` constants
    category: &'static str,
    children: Children,
) -> impl IntoView {
    let class = match category {
        PAGE_CAT_DASHBOARD => "page page--dashboard",
        _ => "page",
    };

    view! {
        <div id=page_id class=class data-page-category=category>
            {children()}
        </div>
    }
}
