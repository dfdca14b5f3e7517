use async_trait::async_trait;
use chrono::NaiveDate;
use contracts::dashboards::d100_overview::DashboardResponse;

use crate::shared::api_client::{get_json, AnalyticsTransport, ApiFailure, QueryParam};
use crate::shared::fetch_state::{AnalyticsDomain, FilterCriteria, FilterKey};

pub const DASHBOARD_PATH: &str = "/dashboard/dashboard/";

/// Landing page: headline KPIs and three summary charts, no filters.
pub struct OverviewDomain;

#[async_trait(?Send)]
impl AnalyticsDomain for OverviewDomain {
    type Payload = DashboardResponse;

    const NAME: &'static str = "dashboard";
    const FILTER_KEYS: &'static [FilterKey] = &[];
    const URL_KEYS: &'static [FilterKey] = &[];

    fn default_filters(&self, _today: NaiveDate) -> FilterCriteria {
        FilterCriteria::new()
    }

    async fn fetch(
        &self,
        transport: &dyn AnalyticsTransport,
        query: &[QueryParam],
        token: Option<&str>,
    ) -> Result<DashboardResponse, ApiFailure> {
        get_json(transport, DASHBOARD_PATH, query, token).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetExecution {
    pub total: i64,
    pub executed: i64,
    pub remaining: i64,
    /// Percent
    pub rate: f64,
}

/// Budget KPI with the rate recomputed when the server sent none.
pub fn budget_execution(data: &DashboardResponse) -> Option<BudgetExecution> {
    let status = &data.kpi_data.as_ref()?.budget_status;
    let rate = if status.rate > 0.0 || status.total <= 0 {
        status.rate
    } else {
        status.executed as f64 / status.total as f64 * 100.0
    };
    Some(BudgetExecution {
        total: status.total,
        executed: status.executed,
        remaining: status.total - status.executed,
        rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::errors::ErrorKind;
    use crate::shared::fetch_state::testing::Harness;
    use crate::shared::fetch_state::{FetchContainer, FetchStatus, LoadKind};
    use contracts::dashboards::d100_overview::{BudgetStatus, KpiData};
    use serde_json::json;

    fn payload() -> serde_json::Value {
        json!({
            "kpiData": {
                "total_performance": 71.4,
                "publication_count": 120,
                "student_count": 5400,
                "budget_status": {"total": 1000000, "executed": 640000, "rate": 64.0}
            },
            "trendData": [{"year": 2023, "value": 68.2}, {"year": 2024, "value": 71.4}],
            "departmentData": [{"department": "CS", "value": 75.0}],
            "budgetData": [{"category": "CS", "value": 400000}],
            "lastUpdated": "2024-06-14T23:00:00Z"
        })
    }

    #[test]
    fn test_mount_fetches_without_query_or_url() {
        let mut h = Harness::with_query("department=CS");
        h.transport.reply_json(payload());
        let container = FetchContainer::new(OverviewDomain, h.deps.clone());
        container.mount();
        h.run();

        let calls = h.transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].path, DASHBOARD_PATH);
        assert!(calls[0].query.is_empty());
        assert!(container.filters().is_empty());
        assert!(h.location.replaced.borrow().is_empty());

        let state = container.state();
        assert_eq!(state.status(), FetchStatus::Success);
        assert_eq!(state.data().trend_data.len(), 2);
        assert_eq!(
            state.data().last_updated.as_deref(),
            Some("2024-06-14T23:00:00Z")
        );
    }

    #[test]
    fn test_refresh_failure_keeps_rendered_kpis() {
        let mut h = Harness::new();
        h.transport.reply_json(payload());
        let container = FetchContainer::new(OverviewDomain, h.deps.clone());
        container.mount();
        h.run();

        let pending = h.transport.reply_later();
        container.refresh();
        h.run();
        assert_eq!(
            container.state().status(),
            FetchStatus::Loading(LoadKind::Refresh)
        );

        pending
            .send(Err(ApiFailure::Network("offline".to_string())))
            .unwrap();
        h.run();

        let state = container.state();
        assert_eq!(state.status(), FetchStatus::Error);
        assert_eq!(state.error().map(|e| e.kind), Some(ErrorKind::Network));
        assert!(state.data().kpi_data.is_some());
    }

    #[test]
    fn test_filters_are_not_accepted() {
        let h = Harness::new();
        let container = FetchContainer::new(OverviewDomain, h.deps.clone());
        assert!(container
            .set_filter(FilterKey::Year, Some("2024".to_string()))
            .is_err());
    }

    #[test]
    fn test_budget_execution() {
        let data: DashboardResponse = serde_json::from_value(payload()).unwrap();
        assert_eq!(
            budget_execution(&data),
            Some(BudgetExecution {
                total: 1_000_000,
                executed: 640_000,
                remaining: 360_000,
                rate: 64.0,
            })
        );

        let missing_rate = DashboardResponse {
            kpi_data: Some(KpiData {
                budget_status: BudgetStatus {
                    total: 200,
                    executed: 50,
                    rate: 0.0,
                },
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(budget_execution(&missing_rate).map(|b| b.rate), Some(25.0));
        assert_eq!(budget_execution(&DashboardResponse::default()), None);
    }
}
