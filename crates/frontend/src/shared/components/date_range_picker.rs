use chrono::NaiveDate;
use leptos::prelude::*;
use thaw::*;

use crate::shared::date_utils::{one_year_before, to_iso};

/// Start and end date inputs with a "last 12 months" shortcut.
///
/// Emits one side at a time; an empty input clears that side.
#[component]
pub fn DateRangePicker(
    /// `yyyy-mm-dd`, or empty
    #[prop(into)]
    date_from: Signal<String>,

    #[prop(into)]
    date_to: Signal<String>,

    on_from_change: Callback<Option<String>>,

    on_to_change: Callback<Option<String>>,

    /// Anchor of the shortcut, usually today
    today: NaiveDate,

    #[prop(optional)]
    label: Option<String>,
) -> impl IntoView {
    let as_option = |value: String| (!value.is_empty()).then_some(value);

    let on_last_year = move |_| {
        on_from_change.run(Some(to_iso(one_year_before(today))));
        on_to_change.run(Some(to_iso(today)));
    };

    view! {
        <div class="form-group filter-field date-range-picker">
            {label.map(|l| view! { <label>{l}</label> })}
            <Flex gap=FlexGap::Small style="align-items: center;">
                <input
                    type="date"
                    prop:value=date_from
                    prop:max=move || date_to.get()
                    on:change=move |ev| on_from_change.run(as_option(event_target_value(&ev)))
                />
                <span>"~"</span>
                <input
                    type="date"
                    prop:value=date_to
                    prop:min=move || date_from.get()
                    on:change=move |ev| on_to_change.run(as_option(event_target_value(&ev)))
                />
                <Button
                    size=ButtonSize::Small
                    appearance=ButtonAppearance::Subtle
                    on_click=on_last_year
                >
                    "Last 12 months"
                </Button>
            </Flex>
        </div>
    }
}
