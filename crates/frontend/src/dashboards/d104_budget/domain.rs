use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use contracts::dashboards::d104_budget::{
    BudgetAllocationItem, BudgetListResponse, ExecutionStatus, ExecutionStatusItem,
    ExecutionSummary, YearRange, YearlyTrendItem,
};

use crate::shared::api_client::{get_json, AnalyticsTransport, ApiFailure, QueryParam};
use crate::shared::fetch_state::{AnalyticsDomain, FilterCriteria, FilterKey};

pub const ALLOCATION_PATH: &str = "/budget/allocation/";
pub const EXECUTION_PATH: &str = "/budget/execution/";
pub const TRENDS_PATH: &str = "/budget/trends/";

pub const DEPARTMENTS: [&str; 5] = ["CS", "EE", "ME", "CE", "IE"];
pub const CATEGORIES: [&str; 5] = ["Equipment", "Personnel", "Materials", "Travel", "Other"];

/// The three budget sections, always from the same filter set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetPayload {
    pub allocation: Vec<BudgetAllocationItem>,
    pub execution: Vec<ExecutionStatusItem>,
    pub summary: Option<ExecutionSummary>,
    pub trends: Vec<YearlyTrendItem>,
    pub year_range: Option<YearRange>,
}

pub struct BudgetDomain;

#[async_trait(?Send)]
impl AnalyticsDomain for BudgetDomain {
    type Payload = BudgetPayload;

    const NAME: &'static str = "budget";
    const FILTER_KEYS: &'static [FilterKey] = &[
        FilterKey::Department,
        FilterKey::Year,
        FilterKey::Category,
        FilterKey::StartDate,
        FilterKey::EndDate,
    ];
    const URL_KEYS: &'static [FilterKey] =
        &[FilterKey::Department, FilterKey::Year, FilterKey::Category];

    fn default_filters(&self, today: NaiveDate) -> FilterCriteria {
        FilterCriteria::new().with(FilterKey::Year, today.year().to_string())
    }

    /// All three sections or nothing: one failed call fails the batch.
    async fn fetch(
        &self,
        transport: &dyn AnalyticsTransport,
        query: &[QueryParam],
        token: Option<&str>,
    ) -> Result<BudgetPayload, ApiFailure> {
        let (allocation, execution, trends) = futures::try_join!(
            get_json::<BudgetListResponse<BudgetAllocationItem>>(
                transport,
                ALLOCATION_PATH,
                query,
                token
            ),
            get_json::<BudgetListResponse<ExecutionStatusItem>>(
                transport,
                EXECUTION_PATH,
                query,
                token
            ),
            get_json::<BudgetListResponse<YearlyTrendItem>>(transport, TRENDS_PATH, query, token),
        )?;

        Ok(BudgetPayload {
            allocation: allocation.data,
            execution: execution.data,
            summary: execution.summary,
            trends: trends.data,
            year_range: trends.year_range,
        })
    }
}

pub fn total_budget(data: &BudgetPayload) -> i64 {
    data.allocation.iter().map(|item| item.total_budget).sum()
}

pub fn total_executed(data: &BudgetPayload) -> i64 {
    data.execution.iter().map(|item| item.executed_amount).sum()
}

pub fn total_remaining(data: &BudgetPayload) -> i64 {
    data.execution.iter().map(|item| item.remaining_budget).sum()
}

/// Executed share of the budget in the execution rows, in percent.
pub fn overall_execution_rate(data: &BudgetPayload) -> f64 {
    let budget: i64 = data.execution.iter().map(|item| item.total_budget).sum();
    if budget <= 0 {
        return 0.0;
    }
    total_executed(data) as f64 / budget as f64 * 100.0
}

pub fn departments_with_status(data: &BudgetPayload, status: ExecutionStatus) -> usize {
    data.execution
        .iter()
        .filter(|item| item.status == status)
        .count()
}
