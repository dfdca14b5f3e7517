use contracts::dashboards::d100_overview::KpiData;
use leptos::prelude::*;
use thaw::*;

use crate::dashboards::d100_overview::domain::{budget_execution, OverviewDomain};
use crate::dashboards::{use_analytics, use_payload};
use crate::shared::charts::{
    to_bar_series, to_line_series, to_pie_series, ChartKind, ChartPanel, SeriesStyle,
};
use crate::shared::components::error_banner::ErrorBanner;
use crate::shared::components::loading::FetchBoundary;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::stat_card::StatCard;
use crate::shared::date_utils::format_datetime;
use crate::shared::format::{format_count, format_currency, format_percentage, or_missing};
use crate::shared::page_frame::{PageFrame, PAGE_CAT_DASHBOARD};

#[component]
pub fn OverviewDashboard() -> impl IntoView {
    let analytics = use_analytics(OverviewDomain);
    let state = analytics.state();
    let data = use_payload(analytics);

    // the import timestamp reported by the server, not the fetch time
    let last_updated = Signal::derive(move || {
        data.with(|d| d.last_updated.as_deref().map(format_datetime))
    });
    let kpi = move |f: fn(&KpiData) -> String| {
        Signal::derive(move || data.with(|d| or_missing(d.kpi_data.as_ref(), f)))
    };
    let budget = Signal::derive(move || data.with(budget_execution));

    let trend_chart = Signal::derive(move || {
        data.with(|d| to_line_series(&d.trend_data, "year", "value", &SeriesStyle::labelled("Employment rate (%)")))
    });
    let department_chart = Signal::derive(move || {
        data.with(|d| to_bar_series(&d.department_data, "department", "value", &SeriesStyle::labelled("Performance")))
    });
    let budget_chart = Signal::derive(move || {
        data.with(|d| to_pie_series(&d.budget_data, "category", "value"))
    });

    view! {
        <PageFrame page_id="d100_overview--dashboard" category=PAGE_CAT_DASHBOARD>
            <PageHeader title="Dashboard" last_updated=last_updated>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| analytics.refresh()
                    disabled=Signal::derive(move || state.with(|s| s.status().is_loading()))
                >
                    "Refresh"
                </Button>
            </PageHeader>

            <ErrorBanner
                error=Signal::derive(move || state.with(|s| s.error().cloned()))
                on_retry=Callback::new(move |_| analytics.retry())
                on_dismiss=Callback::new(move |_| analytics.clear_error())
            />

            <FetchBoundary status=Signal::derive(move || state.with(|s| s.status()))>
                <div class="stat-card-grid">
                    <StatCard
                        label="Overall performance"
                        icon_name="performance"
                        value=kpi(|k| format_percentage(k.total_performance, 1))
                        subtitle=Signal::derive(|| Some("Average employment rate".to_string()))
                    />
                    <StatCard
                        label="Publications"
                        icon_name="papers"
                        value=kpi(|k| format_count(k.publication_count))
                        subtitle=Signal::derive(|| Some("This year".to_string()))
                    />
                    <StatCard
                        label="Students"
                        icon_name="students"
                        value=kpi(|k| format_count(k.student_count))
                        subtitle=Signal::derive(|| Some("Currently enrolled".to_string()))
                    />
                    <StatCard
                        label="Budget execution"
                        icon_name="budget"
                        value=Signal::derive(move || or_missing(budget.get(), |b| format_percentage(b.rate, 1)))
                        subtitle=Signal::derive(move || {
                            budget.get().map(|b| {
                                format!(
                                    "{} / {}",
                                    format_currency(b.executed as f64),
                                    format_currency(b.total as f64)
                                )
                            })
                        })
                    />
                </div>

                <div class="chart-grid">
                    <ChartPanel title="Performance trend" data=trend_chart kind=ChartKind::Line />
                    <ChartPanel title="By department" data=department_chart kind=ChartKind::Bar />
                    <ChartPanel title="Budget by department" data=budget_chart kind=ChartKind::Doughnut />
                </div>
            </FetchBoundary>
        </PageFrame>
    }
}
