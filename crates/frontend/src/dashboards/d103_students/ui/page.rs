use leptos::prelude::*;
use serde_json::json;
use thaw::*;

use crate::dashboards::d103_students::domain::{
    average_per_department, department_count, department_options, grade_label,
    largest_department, total_students, StudentsDomain, GRADE_OPTIONS, YEAR_OPTIONS,
};
use crate::dashboards::{last_updated_label, options_with_current, use_analytics, use_payload};
use crate::shared::charts::{
    to_bar_series, to_multi_series, to_pie_series, ChartKind, ChartPanel, SeriesStyle,
};
use crate::shared::components::error_banner::ErrorBanner;
use crate::shared::components::filter_panel::{FilterPanel, SelectFilter};
use crate::shared::components::loading::FetchBoundary;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::stat_card::StatCard;
use crate::shared::fetch_state::FilterKey;
use crate::shared::format::{format_count, format_number, MISSING};
use crate::shared::page_frame::{PageFrame, PAGE_CAT_DASHBOARD};

#[component]
pub fn StudentsDashboard() -> impl IntoView {
    let analytics = use_analytics(StudentsDomain);
    let state = analytics.state();
    let data = use_payload(analytics);
    let filters_expanded = RwSignal::new(false);

    let department = analytics.filter(FilterKey::Department);
    let department_choices = Signal::derive(move || {
        options_with_current(data.with(department_options), department.get())
    });
    let grade_choices = Signal::derive(|| {
        GRADE_OPTIONS
            .iter()
            .map(|g| (g.to_string(), grade_label(*g)))
            .collect::<Vec<_>>()
    });
    let year_choices = Signal::derive(|| {
        YEAR_OPTIONS
            .iter()
            .map(|y| (y.to_string(), y.to_string()))
            .collect::<Vec<_>>()
    });

    let department_chart = Signal::derive(move || {
        data.with(|d| {
            to_bar_series(
                &d.department_stats,
                "department",
                "student_count",
                &SeriesStyle::labelled("Students"),
            )
        })
    });
    let grade_chart = Signal::derive(move || {
        data.with(|d| {
            let rows: Vec<serde_json::Value> = d
                .grade_distribution
                .iter()
                .map(|g| json!({ "grade": grade_label(g.grade), "count": g.count }))
                .collect();
            to_pie_series(&rows, "grade", "count")
        })
    });
    let trend_chart = Signal::derive(move || {
        data.with(|d| {
            to_multi_series(
                &d.enrollment_trend,
                "year",
                &["admission_count", "graduation_count"],
                ChartKind::Line,
            )
            .with_series_names(&["Admissions", "Graduations"])
        })
    });

    view! {
        <PageFrame page_id="d103_students--dashboard" category=PAGE_CAT_DASHBOARD>
            <PageHeader
                title="Students"
                subtitle="Enrollment by department, grade and year".to_string()
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
                    label="Department"
                    value=department
                    options=department_choices
                    on_change=analytics.filter_setter(FilterKey::Department)
                    all_label="All departments"
                />
                <SelectFilter
                    label="Grade"
                    value=analytics.filter(FilterKey::Grade)
                    options=grade_choices
                    on_change=analytics.filter_setter(FilterKey::Grade)
                    all_label="All grades"
                />
                <SelectFilter
                    label="Year"
                    value=analytics.filter(FilterKey::Year)
                    options=year_choices
                    on_change=analytics.filter_setter(FilterKey::Year)
                    all_label="All years"
                />
            </FilterPanel>

            <ErrorBanner
                error=Signal::derive(move || state.with(|s| s.error().cloned()))
                on_retry=Callback::new(move |_| analytics.retry())
                on_dismiss=Callback::new(move |_| analytics.clear_error())
            />

            <FetchBoundary status=Signal::derive(move || state.with(|s| s.status()))>
                <div class="stat-card-grid">
                    <StatCard
                        label="Total students"
                        icon_name="students"
                        value=Signal::derive(move || format_count(data.with(total_students)))
                    />
                    <StatCard
                        label="Departments"
                        icon_name="students"
                        value=Signal::derive(move || format_count(data.with(department_count) as i64))
                    />
                    <StatCard
                        label="Average per department"
                        icon_name="students"
                        value=Signal::derive(move || format_number(data.with(average_per_department).round()))
                    />
                    <StatCard
                        label="Largest department"
                        icon_name="students"
                        value=Signal::derive(move || {
                            data.with(|d| largest_department(d).unwrap_or(MISSING).to_string())
                        })
                    />
                </div>

                <div class="chart-grid">
                    <ChartPanel title="Students by department" data=department_chart kind=ChartKind::Bar />
                    <ChartPanel title="Grade distribution" data=grade_chart kind=ChartKind::Doughnut />
                    <div class="chart-grid__wide">
                        <ChartPanel title="Admissions and graduations" data=trend_chart kind=ChartKind::Line />
                    </div>
                </div>
            </FetchBoundary>
        </PageFrame>
    }
}
