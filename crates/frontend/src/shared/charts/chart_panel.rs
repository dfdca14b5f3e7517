use leptos::prelude::*;

use super::chart_canvas::ChartCanvas;
use super::dataset::{ChartDataset, ChartKind};
use crate::shared::components::loading::EmptyState;

/// Titled chart card; an empty dataset renders a placeholder instead.
#[component]
pub fn ChartPanel(
    #[prop(into)] title: String,
    #[prop(into)] data: Signal<ChartDataset>,
    kind: ChartKind,
    #[prop(optional)] horizontal: bool,
) -> impl IntoView {
    view! {
        <div class="chart-panel">
            <h3 class="chart-panel__title">{title}</h3>
            <Show
                when=move || data.with(|d| !d.is_empty())
                fallback=|| view! { <EmptyState message="No data for the selected filters" /> }
            >
                <ChartCanvas kind=kind data=data horizontal=horizontal />
            </Show>
        </div>
    }
}
