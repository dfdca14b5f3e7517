pub mod left;
pub mod top_header;

use leptos::prelude::*;
use left::Sidebar;
use top_header::TopHeader;

/// Main application shell.
///
/// ```text
/// +------------------------------------------+
/// |              TopHeader                   |
/// +------------------------------------------+
/// |  Sidebar  |          Content             |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    let sidebar_open = RwSignal::new(true);

    view! {
        <div class="app-layout">
            <TopHeader sidebar_open=sidebar_open />

            <div class="app-body">
                <Show when=move || sidebar_open.get()>
                    <Sidebar />
                </Show>

                <main class="app-main">
                    {children()}
                </main>
            </div>
        </div>
    }
}
