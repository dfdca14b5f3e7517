use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardTone {
    #[default]
    Neutral,
    Success,
    Warning,
    Danger,
}

impl CardTone {
    fn class(self) -> &'static str {
        match self {
            CardTone::Neutral => "stat-card",
            CardTone::Success => "stat-card stat-card--success",
            CardTone::Warning => "stat-card stat-card--warning",
            CardTone::Danger => "stat-card stat-card--error",
        }
    }
}

/// KPI tile: icon, label, pre-formatted value and an optional subtitle.
#[component]
pub fn StatCard(
    /// Label displayed above the value
    #[prop(into)]
    label: String,
    /// Icon name from the icon() helper
    #[prop(into)]
    icon_name: String,
    #[prop(into)]
    value: Signal<String>,
    #[prop(into, optional)]
    tone: Signal<CardTone>,
    #[prop(into, optional)]
    subtitle: Signal<Option<String>>,
) -> impl IntoView {
    let subtitle_view = move || {
        subtitle.get().map(|s| {
            view! { <div class="stat-card__subtitle">{s}</div> }
        })
    };

    view! {
        <div class=move || tone.get().class()>
            <div class="stat-card__icon">
                {icon(&icon_name)}
            </div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">{move || value.get()}</div>
                {subtitle_view}
            </div>
        </div>
    }
}
