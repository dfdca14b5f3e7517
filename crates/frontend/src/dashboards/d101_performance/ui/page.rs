use chrono::Local;
use contracts::dashboards::d101_performance::AchievementStatus;
use leptos::prelude::*;
use thaw::*;

use crate::dashboards::d101_performance::domain::{
    achievement_rate, achievement_status, department_names, department_total, PerformanceDomain,
};
use crate::dashboards::{last_updated_label, options_with_current, use_analytics, use_payload};
use crate::shared::charts::{to_bar_series, to_multi_series, ChartKind, ChartPanel, SeriesStyle};
use crate::shared::components::date_range_picker::DateRangePicker;
use crate::shared::components::error_banner::ErrorBanner;
use crate::shared::components::filter_panel::{FilterPanel, SelectFilter};
use crate::shared::components::loading::FetchBoundary;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::stat_card::{CardTone, StatCard};
use crate::shared::fetch_state::FilterKey;
use crate::shared::format::{format_number, format_percentage, or_missing};
use crate::shared::page_frame::{PageFrame, PAGE_CAT_DASHBOARD};

fn status_tone(status: AchievementStatus) -> CardTone {
    match status {
        AchievementStatus::Success => CardTone::Success,
        AchievementStatus::Warning => CardTone::Warning,
        AchievementStatus::Danger => CardTone::Danger,
        AchievementStatus::Unknown => CardTone::Neutral,
    }
}

fn status_label(status: AchievementStatus) -> &'static str {
    match status {
        AchievementStatus::Success => "Target achieved",
        AchievementStatus::Warning => "Close to target",
        AchievementStatus::Danger => "Below target",
        AchievementStatus::Unknown => "No target set",
    }
}

#[component]
pub fn PerformanceDashboard() -> impl IntoView {
    let analytics = use_analytics(PerformanceDomain);
    let state = analytics.state();
    let data = use_payload(analytics);
    let today = Local::now().date_naive();
    let filters_expanded = RwSignal::new(true);

    let department = analytics.filter(FilterKey::Department);
    let project = analytics.filter(FilterKey::Project);
    let set_project = analytics.filter_setter(FilterKey::Project);
    let start_date = analytics.filter(FilterKey::StartDate);
    let end_date = analytics.filter(FilterKey::EndDate);

    let department_options = Signal::derive(move || {
        options_with_current(data.with(department_names), department.get())
    });

    let rate = Signal::derive(move || data.with(achievement_rate));
    let status = Signal::derive(move || data.with(achievement_status));

    let trend_chart = Signal::derive(move || {
        data.with(|d| {
            to_multi_series(&d.trend_data, "date", &["value", "target"], ChartKind::Line)
                .with_series_names(&["Employment rate", "Target"])
        })
    });
    let department_chart = Signal::derive(move || {
        data.with(|d| {
            to_bar_series(
                &d.department_data,
                "department",
                "value",
                &SeriesStyle::labelled("Employment rate (%)"),
            )
        })
    });

    view! {
        <PageFrame page_id="d101_performance--dashboard" category=PAGE_CAT_DASHBOARD>
            <PageHeader
                title="Performance"
                subtitle="Employment performance by period and department".to_string()
                last_updated=last_updated_label(analytics)
            >
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| analytics.refresh()
                    disabled=Signal::derive(move || state.with(|s| s.status().is_loading()))
                >
                    "Refresh"
                </Button>
            </PageHeader>

            <FilterPanel
                is_expanded=filters_expanded
                active_filters_count=analytics.active_filter_count()
                on_reset=Callback::new(move |_| analytics.reset_filters())
            >
                <DateRangePicker
                    date_from=Signal::derive(move || start_date.get().unwrap_or_default())
                    date_to=Signal::derive(move || end_date.get().unwrap_or_default())
                    on_from_change=analytics.filter_setter(FilterKey::StartDate)
                    on_to_change=analytics.filter_setter(FilterKey::EndDate)
                    today=today
                    label="Period".to_string()
                />
                <SelectFilter
                    label="Department"
                    value=department
                    options=department_options
                    on_change=analytics.filter_setter(FilterKey::Department)
                />
                <div class="form-group filter-field">
                    <label>"Project"</label>
                    <input
                        type="text"
                        placeholder="All projects"
                        prop:value=move || project.get().unwrap_or_default()
                        on:change=move |ev| set_project.run(Some(event_target_value(&ev)))
                    />
                </div>
            </FilterPanel>

            <ErrorBanner
                error=Signal::derive(move || state.with(|s| s.error().cloned()))
                on_retry=Callback::new(move |_| analytics.retry())
                on_dismiss=Callback::new(move |_| analytics.clear_error())
            />

            <FetchBoundary status=Signal::derive(move || state.with(|s| s.status()))>
                <div class="stat-card-grid">
                    <StatCard
                        label="Achievement rate"
                        icon_name="performance"
                        value=Signal::derive(move || or_missing(rate.get(), |r| format_percentage(r, 1)))
                        tone=Signal::derive(move || status_tone(status.get()))
                        subtitle=Signal::derive(move || Some(status_label(status.get()).to_string()))
                    />
                    <StatCard
                        label="Actual"
                        icon_name="performance"
                        value=Signal::derive(move || {
                            data.with(|d| or_missing(d.achievement_data.as_ref().map(|a| a.actual), |v| format_percentage(v, 1)))
                        })
                    />
                    <StatCard
                        label="Target"
                        icon_name="performance"
                        value=Signal::derive(move || {
                            data.with(|d| or_missing(d.achievement_data.as_ref().map(|a| a.target), |v| format_percentage(v, 1)))
                        })
                    />
                    <StatCard
                        label="Department total"
                        icon_name="students"
                        value=Signal::derive(move || format_number(data.with(department_total)))
                    />
                </div>

                <div class="chart-grid">
                    <ChartPanel title="Employment trend" data=trend_chart kind=ChartKind::Line />
                    <ChartPanel title="By department" data=department_chart kind=ChartKind::Bar />
                </div>
            </FetchBoundary>
        </PageFrame>
    }
}
