use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

/// Collapsible filter panel with an active-filter badge and a reset action.
#[component]
pub fn FilterPanel(
    #[prop(into)]
    is_expanded: RwSignal<bool>,

    /// Number of filters differing from the page defaults
    #[prop(into)]
    active_filters_count: Signal<usize>,

    on_reset: Callback<()>,

    children: ChildrenFn,
) -> impl IntoView {
    let toggle_expanded = move |_| {
        is_expanded.update(|e| *e = !*e);
    };

    view! {
        <div class="filter-panel">
            <div class="filter-panel-header">
                <div
                    class="filter-panel-header__left"
                    on:click=toggle_expanded
                >
                    <svg
                        width="16"
                        height="16"
                        viewBox="0 0 24 24"
                        fill="none"
                        stroke="currentColor"
                        stroke-width="2"
                        stroke-linecap="round"
                        stroke-linejoin="round"
                        class=move || {
                            if is_expanded.get() {
                                "filter-panel__chevron filter-panel__chevron--expanded"
                            } else {
                                "filter-panel__chevron"
                            }
                        }
                    >
                        <polyline points="6 9 12 15 18 9"></polyline>
                    </svg>
                    {icon("filter")}
                    <span class="filter-panel__title">"Filters"</span>
                    {move || {
                        let count = active_filters_count.get();
                        (count > 0).then(|| view! {
                            <span class="badge badge--primary">{count}</span>
                        })
                    }}
                </div>
                <Button
                    size=ButtonSize::Small
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| on_reset.run(())
                >
                    "Reset"
                </Button>
            </div>

            <div class=move || {
                if is_expanded.get() {
                    "filter-panel__collapsible filter-panel__collapsible--expanded"
                } else {
                    "filter-panel__collapsible filter-panel__collapsible--collapsed"
                }
            }>
                <div class="filter-panel-content">
                    {children()}
                </div>
            </div>
        </div>
    }
}

/// Drop-down bound to one filter. The empty option means "all".
#[component]
pub fn SelectFilter(
    #[prop(into)]
    label: String,
    #[prop(into)]
    value: Signal<Option<String>>,
    /// `(value, label)` pairs in display order
    #[prop(into)]
    options: Signal<Vec<(String, String)>>,
    on_change: Callback<Option<String>>,
    #[prop(optional, into)]
    all_label: Option<String>,
) -> impl IntoView {
    let all_label = all_label.unwrap_or_else(|| "All".to_string());

    view! {
        <div class="form-group filter-field">
            <label>{label}</label>
            <select
                prop:value=move || value.get().unwrap_or_default()
                on:change=move |ev| {
                    let selected = event_target_value(&ev);
                    on_change.run((!selected.is_empty()).then_some(selected));
                }
            >
                <option value="">{all_label}</option>
                {move || {
                    let current = value.get().unwrap_or_default();
                    options
                        .get()
                        .into_iter()
                        .map(|(option_value, option_label)| {
                            let selected = option_value == current;
                            view! {
                                <option value=option_value selected=selected>{option_label}</option>
                            }
                        })
                        .collect_view()
                }}
            </select>
        </div>
    }
}
