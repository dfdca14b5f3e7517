use chrono::{Datelike, Local};
use contracts::dashboards::d104_budget::ExecutionStatus;
use leptos::prelude::*;
use thaw::*;

use crate::dashboards::d104_budget::domain::{
    departments_with_status, overall_execution_rate, total_budget, total_executed,
    total_remaining, BudgetDomain, BudgetPayload, CATEGORIES, DEPARTMENTS,
};
use crate::dashboards::{last_updated_label, options_with_current, use_analytics, use_payload};
use crate::shared::charts::{to_multi_series, to_pie_series, ChartKind, ChartPanel};
use crate::shared::components::date_range_picker::DateRangePicker;
use crate::shared::components::error_banner::ErrorBanner;
use crate::shared::components::filter_panel::{FilterPanel, SelectFilter};
use crate::shared::components::loading::{EmptyState, FetchBoundary};
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::stat_card::{CardTone, StatCard};
use crate::shared::date_utils::year_options;
use crate::shared::fetch_state::FilterKey;
use crate::shared::format::{format_count, format_currency, format_percentage};
use crate::shared::page_frame::{PageFrame, PAGE_CAT_DASHBOARD};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BudgetView {
    Chart,
    Table,
}

fn status_badge(status: ExecutionStatus) -> (&'static str, &'static str) {
    match status {
        ExecutionStatus::Normal => ("badge badge--success", "Normal"),
        ExecutionStatus::Warning => ("badge badge--warning", "Warning"),
        ExecutionStatus::Critical => ("badge badge--error", "Critical"),
    }
}

fn fixed_options(values: &[&str], current: Option<String>) -> Vec<(String, String)> {
    options_with_current(values.iter().map(|v| v.to_string()).collect(), current)
}

#[component]
pub fn BudgetDashboard() -> impl IntoView {
    let analytics = use_analytics(BudgetDomain);
    let state = analytics.state();
    let data = use_payload(analytics);
    let today = Local::now().date_naive();
    let filters_expanded = RwSignal::new(true);
    let view_mode = RwSignal::new(BudgetView::Chart);

    let department = analytics.filter(FilterKey::Department);
    let year = analytics.filter(FilterKey::Year);
    let category = analytics.filter(FilterKey::Category);
    let start_date = analytics.filter(FilterKey::StartDate);
    let end_date = analytics.filter(FilterKey::EndDate);

    let department_options =
        Signal::derive(move || fixed_options(&DEPARTMENTS, department.get()));
    let category_options = Signal::derive(move || fixed_options(&CATEGORIES, category.get()));
    let year_choices: Vec<(String, String)> = year_options(today.year() - 4, today.year())
        .into_iter()
        .map(|y| (y.to_string(), y.to_string()))
        .collect();
    let year_choices = Signal::derive(move || year_choices.clone());

    let rate = Signal::derive(move || data.with(overall_execution_rate));
    let warning_count =
        Signal::derive(move || data.with(|d| departments_with_status(d, ExecutionStatus::Warning)));
    let critical_count =
        Signal::derive(move || data.with(|d| departments_with_status(d, ExecutionStatus::Critical)));

    let allocation_chart =
        Signal::derive(move || data.with(|d| to_pie_series(&d.allocation, "department", "total_budget")));
    let execution_chart = Signal::derive(move || {
        data.with(|d| {
            to_multi_series(
                &d.execution,
                "department",
                &["total_budget", "executed_amount"],
                ChartKind::Bar,
            )
            .with_series_names(&["Budget", "Executed"])
        })
    });
    let trends_chart = Signal::derive(move || {
        data.with(|d| {
            to_multi_series(
                &d.trends,
                "year",
                &["total_budget", "executed_amount"],
                ChartKind::Line,
            )
            .with_series_names(&["Budget", "Executed"])
        })
    });

    let view_button = move |mode: BudgetView, label: &'static str| {
        view! {
            <Button
                size=ButtonSize::Small
                appearance=Signal::derive(move || {
                    if view_mode.get() == mode {
                        ButtonAppearance::Primary
                    } else {
                        ButtonAppearance::Secondary
                    }
                })
                on_click=move |_| view_mode.set(mode)
            >
                {label}
            </Button>
        }
    };

    view! {
        <PageFrame page_id="d104_budget--dashboard" category=PAGE_CAT_DASHBOARD>
            <PageHeader
                title="Budget"
                subtitle="Allocation, execution status and yearly trends by department".to_string()
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
                    options=department_options
                    on_change=analytics.filter_setter(FilterKey::Department)
                    all_label="All departments"
                />
                <SelectFilter
                    label="Year"
                    value=year
                    options=year_choices
                    on_change=analytics.filter_setter(FilterKey::Year)
                    all_label="All years"
                />
                <SelectFilter
                    label="Category"
                    value=category
                    options=category_options
                    on_change=analytics.filter_setter(FilterKey::Category)
                    all_label="All categories"
                />
                <DateRangePicker
                    date_from=Signal::derive(move || start_date.get().unwrap_or_default())
                    date_to=Signal::derive(move || end_date.get().unwrap_or_default())
                    on_from_change=analytics.filter_setter(FilterKey::StartDate)
                    on_to_change=analytics.filter_setter(FilterKey::EndDate)
                    today=today
                    label="Execution period".to_string()
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
                        label="Total budget"
                        icon_name="budget"
                        value=Signal::derive(move || format_currency(data.with(total_budget) as f64))
                    />
                    <StatCard
                        label="Executed"
                        icon_name="budget"
                        value=Signal::derive(move || format_currency(data.with(total_executed) as f64))
                        subtitle=Signal::derive(move || Some(format!("{} executed", format_percentage(rate.get(), 1))))
                    />
                    <StatCard
                        label="Remaining"
                        icon_name="budget"
                        value=Signal::derive(move || format_currency(data.with(total_remaining) as f64))
                    />
                    <StatCard
                        label="Departments at risk"
                        icon_name="alert"
                        value=Signal::derive(move || format_count((warning_count.get() + critical_count.get()) as i64))
                        tone=Signal::derive(move || {
                            if critical_count.get() > 0 {
                                CardTone::Danger
                            } else if warning_count.get() > 0 {
                                CardTone::Warning
                            } else {
                                CardTone::Success
                            }
                        })
                        subtitle=Signal::derive(move || {
                            Some(format!("{} warning, {} critical", warning_count.get(), critical_count.get()))
                        })
                    />
                </div>

                <div class="view-toggle">
                    <Flex gap=FlexGap::Small>
                        {view_button(BudgetView::Chart, "Charts")}
                        {view_button(BudgetView::Table, "Table")}
                    </Flex>
                </div>

                <Show
                    when=move || view_mode.get() == BudgetView::Chart
                    fallback=move || view! { <ExecutionTable data=data /> }
                >
                    <div class="chart-grid">
                        <ChartPanel title="Allocation by department" data=allocation_chart kind=ChartKind::Pie />
                        <ChartPanel title="Execution status" data=execution_chart kind=ChartKind::Bar />
                        <div class="chart-grid__wide">
                            <ChartPanel title="Yearly trends" data=trends_chart kind=ChartKind::Line />
                        </div>
                    </div>
                </Show>
            </FetchBoundary>
        </PageFrame>
    }
}

#[component]
fn ExecutionTable(data: Memo<BudgetPayload>) -> impl IntoView {
    view! {
        <Show
            when=move || data.with(|d| !d.execution.is_empty())
            fallback=|| view! { <EmptyState message="No execution data for the selected filters" /> }
        >
            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Department"</TableHeaderCell>
                        <TableHeaderCell>"Budget"</TableHeaderCell>
                        <TableHeaderCell>"Executed"</TableHeaderCell>
                        <TableHeaderCell>"Remaining"</TableHeaderCell>
                        <TableHeaderCell>"Rate"</TableHeaderCell>
                        <TableHeaderCell>"Status"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || {
                        data.with(|d| d.execution.clone())
                            .into_iter()
                            .map(|item| {
                                let (badge_class, badge_label) = status_badge(item.status);
                                view! {
                                    <TableRow>
                                        <TableCell>{item.department}</TableCell>
                                        <TableCell>{format_currency(item.total_budget as f64)}</TableCell>
                                        <TableCell>{format_currency(item.executed_amount as f64)}</TableCell>
                                        <TableCell>{format_currency(item.remaining_budget as f64)}</TableCell>
                                        <TableCell>{format_percentage(item.execution_rate, 1)}</TableCell>
                                        <TableCell>
                                            <span class=badge_class>{badge_label}</span>
                                        </TableCell>
                                    </TableRow>
                                }
                            })
                            .collect_view()
                    }}
                </TableBody>
            </Table>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_badges() {
        assert_eq!(status_badge(ExecutionStatus::Normal).0, "badge badge--success");
        assert_eq!(status_badge(ExecutionStatus::Warning).1, "Warning");
        assert_eq!(status_badge(ExecutionStatus::Critical).0, "badge badge--error");
    }
}
