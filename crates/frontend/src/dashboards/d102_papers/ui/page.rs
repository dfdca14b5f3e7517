use chrono::{Datelike, Local};
use leptos::prelude::*;
use thaw::*;

use crate::dashboards::d102_papers::domain::{
    has_data, top_journal_grade, total_publications, PapersDomain, FIELDS, JOURNAL_GRADES,
};
use crate::dashboards::{last_updated_label, use_analytics, use_payload};
use crate::shared::charts::{to_bar_series, to_pie_series, ChartKind, ChartPanel, SeriesStyle};
use crate::shared::components::error_banner::ErrorBanner;
use crate::shared::components::filter_panel::{FilterPanel, SelectFilter};
use crate::shared::components::loading::{EmptyState, FetchBoundary};
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::stat_card::StatCard;
use crate::shared::date_utils::year_options;
use crate::shared::fetch_state::FilterKey;
use crate::shared::format::{format_count, MISSING};
use crate::shared::page_frame::{PageFrame, PAGE_CAT_DASHBOARD};

fn labelled(options: &[(&str, &str)]) -> Vec<(String, String)> {
    options
        .iter()
        .map(|(value, label)| (value.to_string(), label.to_string()))
        .collect()
}

#[component]
pub fn PapersDashboard() -> impl IntoView {
    let analytics = use_analytics(PapersDomain);
    let state = analytics.state();
    let data = use_payload(analytics);
    let this_year = Local::now().year();
    let filters_expanded = RwSignal::new(true);

    let years: Vec<(String, String)> = year_options(2020, this_year)
        .into_iter()
        .map(|y| (y.to_string(), y.to_string()))
        .collect();
    let years = Signal::derive(move || years.clone());
    let journals = Signal::derive(|| labelled(&JOURNAL_GRADES));
    let fields = Signal::derive(|| labelled(&FIELDS));

    let yearly_chart = Signal::derive(move || {
        data.with(|d| to_bar_series(&d.yearly_data, "year", "count", &SeriesStyle::labelled("Publications")))
    });
    let journal_chart =
        Signal::derive(move || data.with(|d| to_pie_series(&d.journal_data, "journal_grade", "count")));
    let field_chart = Signal::derive(move || {
        data.with(|d| {
            to_bar_series(
                &d.field_data,
                "department",
                "count",
                &SeriesStyle::labelled("Publications").color("rgba(54, 162, 235, 0.6)"),
            )
        })
    });

    view! {
        <PageFrame page_id="d102_papers--dashboard" category=PAGE_CAT_DASHBOARD>
            <PageHeader
                title="Papers"
                subtitle="Publications by year, journal grade and field".to_string()
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
                <SelectFilter
                    label="Year"
                    value=analytics.filter(FilterKey::Year)
                    options=years
                    on_change=analytics.filter_setter(FilterKey::Year)
                    all_label="All years"
                />
                <SelectFilter
                    label="Journal grade"
                    value=analytics.filter(FilterKey::Journal)
                    options=journals
                    on_change=analytics.filter_setter(FilterKey::Journal)
                    all_label="All grades"
                />
                <SelectFilter
                    label="Field"
                    value=analytics.filter(FilterKey::Field)
                    options=fields
                    on_change=analytics.filter_setter(FilterKey::Field)
                    all_label="All fields"
                />
            </FilterPanel>

            <ErrorBanner
                error=Signal::derive(move || state.with(|s| s.error().cloned()))
                on_retry=Callback::new(move |_| analytics.retry())
                on_dismiss=Callback::new(move |_| analytics.clear_error())
            />

            <FetchBoundary status=Signal::derive(move || state.with(|s| s.status()))>
                <Show
                    when=move || data.with(has_data)
                    fallback=|| view! { <EmptyState message="No publications match the selected filters" /> }
                >
                    <div class="stat-card-grid">
                        <StatCard
                            label="Total publications"
                            icon_name="papers"
                            value=Signal::derive(move || format_count(data.with(total_publications)))
                        />
                        <StatCard
                            label="Top journal grade"
                            icon_name="papers"
                            value=Signal::derive(move || {
                                data.with(|d| top_journal_grade(d).unwrap_or(MISSING).to_string())
                            })
                        />
                    </div>

                    <div class="chart-grid">
                        <ChartPanel title="Publications per year" data=yearly_chart kind=ChartKind::Bar />
                        <ChartPanel title="By journal grade" data=journal_chart kind=ChartKind::Pie />
                        <div class="chart-grid__wide">
                            <ChartPanel title="By department" data=field_chart kind=ChartKind::Bar horizontal=true />
                        </div>
                    </div>
                </Show>
            </FetchBoundary>
        </PageFrame>
    }
}
