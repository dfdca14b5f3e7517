pub mod d100_overview;
pub mod d101_performance;
pub mod d102_papers;
pub mod d103_students;
pub mod d104_budget;

pub use d100_overview::ui::OverviewDashboard;
pub use d101_performance::ui::PerformanceDashboard;
pub use d102_papers::ui::PapersDashboard;
pub use d103_students::ui::StudentsDashboard;
pub use d104_budget::ui::BudgetDashboard;

use chrono::Local;
use futures::future::LocalBoxFuture;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;
use std::rc::Rc;

use crate::shared::api_client::HttpTransport;
use crate::shared::config::AppConfig;
use crate::shared::fetch_state::{
    AnalyticsDomain, BrowserLocation, Collaborators, ReactiveContainer, SystemClock,
};
use crate::system::auth::context::{use_auth, SessionIdentity};

/// Container for `domain`, wired to the browser and the current session.
///
/// Must be called from the page component so the container is torn down
/// with it.
pub fn use_analytics<D: AnalyticsDomain>(domain: D) -> ReactiveContainer<D> {
    let config = use_context::<AppConfig>().unwrap_or_default();
    let (auth, set_auth) = use_auth();
    let navigate = use_navigate();

    let deps = Collaborators {
        transport: Rc::new(HttpTransport::new(config.clone())),
        identity: Rc::new(SessionIdentity::new(auth, set_auth, config.clone())),
        location: Rc::new(BrowserLocation::with_navigator(move |path: &str| {
            navigate(path, NavigateOptions::default())
        })),
        clock: Rc::new(SystemClock),
        spawner: Rc::new(|future: LocalBoxFuture<'static, ()>| {
            leptos::task::spawn_local(future)
        }),
        entry_path: config.auth.entry_path.clone(),
    };
    let session_loaded = Signal::derive(move || auth.with(|s| s.is_loaded));

    ReactiveContainer::new(domain, deps, session_loaded)
}

/// Payload of the page, recomputed only when it actually changes.
pub fn use_payload<D: AnalyticsDomain>(analytics: ReactiveContainer<D>) -> Memo<D::Payload> {
    let state = analytics.state();
    Memo::new(move |_| state.with(|s| s.fetch.data.clone()))
}

/// Local time of the last successful load.
pub fn last_updated_label<D: AnalyticsDomain>(
    analytics: ReactiveContainer<D>,
) -> Signal<Option<String>> {
    let state = analytics.state();
    Signal::derive(move || {
        state.with(|s| {
            s.fetch
                .last_updated
                .map(|at| at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        })
    })
}

/// `(value, label)` options for a select, keeping `current` selectable
/// even when the latest payload no longer contains it.
pub fn options_with_current(
    mut values: Vec<String>,
    current: Option<String>,
) -> Vec<(String, String)> {
    if let Some(current) = current {
        if !values.contains(&current) {
            values.push(current);
        }
    }
    values.into_iter().map(|v| (v.clone(), v)).collect()
}
