use async_trait::async_trait;
use chrono::NaiveDate;
use contracts::dashboards::d101_performance::{AchievementStatus, PerformanceResponse};

use crate::shared::api_client::{get_json, AnalyticsTransport, ApiFailure, QueryParam};
use crate::shared::date_utils::{one_year_before, to_iso};
use crate::shared::fetch_state::{AnalyticsDomain, FilterCriteria, FilterKey};

pub const PERFORMANCE_PATH: &str = "/performance/";

/// Employment performance over a date range.
pub struct PerformanceDomain;

#[async_trait(?Send)]
impl AnalyticsDomain for PerformanceDomain {
    type Payload = PerformanceResponse;

    const NAME: &'static str = "performance";
    const FILTER_KEYS: &'static [FilterKey] = &[
        FilterKey::StartDate,
        FilterKey::EndDate,
        FilterKey::Department,
        FilterKey::Project,
    ];
    const URL_KEYS: &'static [FilterKey] = Self::FILTER_KEYS;

    /// The twelve months up to today, all departments and projects.
    fn default_filters(&self, today: NaiveDate) -> FilterCriteria {
        FilterCriteria::new()
            .with(FilterKey::StartDate, to_iso(one_year_before(today)))
            .with(FilterKey::EndDate, to_iso(today))
    }

    async fn fetch(
        &self,
        transport: &dyn AnalyticsTransport,
        query: &[QueryParam],
        token: Option<&str>,
    ) -> Result<PerformanceResponse, ApiFailure> {
        get_json(transport, PERFORMANCE_PATH, query, token).await
    }
}

/// Reported rate, or actual / target when the server left it out.
pub fn achievement_rate(data: &PerformanceResponse) -> Option<f64> {
    let achievement = data.achievement_data.as_ref()?;
    achievement.rate.or_else(|| {
        (achievement.target != 0.0).then(|| achievement.actual * 100.0 / achievement.target)
    })
}

/// Reported status; derived from the rate when missing (100 % success, 80 % warning).
pub fn achievement_status(data: &PerformanceResponse) -> AchievementStatus {
    match data.achievement_data.as_ref().map(|a| a.status) {
        Some(status) if status != AchievementStatus::Unknown => status,
        _ => match achievement_rate(data) {
            Some(rate) if rate >= 100.0 => AchievementStatus::Success,
            Some(rate) if rate >= 80.0 => AchievementStatus::Warning,
            Some(_) => AchievementStatus::Danger,
            None => AchievementStatus::Unknown,
        },
    }
}

pub fn department_total(data: &PerformanceResponse) -> f64 {
    data.department_data.iter().map(|d| d.value).sum()
}

pub fn department_names(data: &PerformanceResponse) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for row in &data.department_data {
        if !names.contains(&row.department) {
            names.push(row.department.clone());
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::fetch_state::testing::{query_value, Harness};
    use crate::shared::fetch_state::{FetchContainer, FetchStatus, LoadKind, PageLocation};
    use contracts::dashboards::d101_performance::AchievementData;
    use serde_json::json;

    fn all_departments() -> serde_json::Value {
        json!({
            "trendData": [
                {"date": "2024-01-01", "value": 61.0, "target": 65.0},
                {"date": "2024-02-01", "value": 63.5, "target": 65.0}
            ],
            "departmentData": [
                {"department": "CS", "value": 40, "percentage": 66.7},
                {"department": "EE", "value": 20, "percentage": 33.3}
            ],
            "achievementData": {"actual": 63.5, "target": 65, "rate": 97.7, "status": "warning"}
        })
    }

    fn cs_only() -> serde_json::Value {
        json!({
            "trendData": [{"date": "2024-02-01", "value": 70.0}],
            "departmentData": [{"department": "CS", "value": 40, "percentage": 100}],
            "achievementData": {"actual": 70, "target": 65, "rate": 107.7, "status": "success"}
        })
    }

    #[test]
    fn test_mount_fetches_last_twelve_months() {
        let mut h = Harness::new();
        h.transport.reply_json(all_departments());
        let container = FetchContainer::new(PerformanceDomain, h.deps.clone());
        container.mount();
        h.run();

        let calls = h.transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].path, PERFORMANCE_PATH);
        assert_eq!(
            calls[0].query,
            vec![
                ("start_date", "2023-06-15".to_string()),
                ("end_date", "2024-06-15".to_string()),
            ]
        );
        assert_eq!(container.state().status(), FetchStatus::Success);
        assert_eq!(container.state().data().department_data.len(), 2);
        // defaults are not mirrored into the URL
        assert!(h.location.replaced.borrow().is_empty());
    }

    #[test]
    fn test_department_filter_refreshes_in_place() {
        let mut h = Harness::new();
        h.transport.reply_json(all_departments());
        let container = FetchContainer::new(PerformanceDomain, h.deps.clone());
        container.mount();
        h.run();

        let pending = h.transport.reply_later();
        container
            .set_filter(FilterKey::Department, Some("CS".to_string()))
            .unwrap();
        h.run();

        let state = container.state();
        assert_eq!(state.status(), FetchStatus::Loading(LoadKind::Refresh));
        assert_eq!(state.data().department_data.len(), 2);
        assert_eq!(h.location.read_query(), "department=CS");

        pending.send(Ok(cs_only())).unwrap();
        h.run();

        let calls = h.transport.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(query_value(&calls[1], "department"), Some("CS"));
        assert_eq!(query_value(&calls[1], "start_date"), Some("2023-06-15"));

        let state = container.state();
        assert_eq!(state.status(), FetchStatus::Success);
        assert!(state
            .data()
            .department_data
            .iter()
            .all(|d| d.department == "CS"));
    }

    #[test]
    fn test_date_range_from_shared_link() {
        let mut h = Harness::with_query("startDate=2024-01-01&endDate=2024-03-31&project=alpha");
        h.transport.reply_json(json!({}));
        let container = FetchContainer::new(PerformanceDomain, h.deps.clone());
        container.mount();
        h.run();

        let calls = h.transport.calls();
        let call = &calls[0];
        assert_eq!(query_value(call, "start_date"), Some("2024-01-01"));
        assert_eq!(query_value(call, "end_date"), Some("2024-03-31"));
        assert_eq!(query_value(call, "project"), Some("alpha"));
        assert_eq!(query_value(call, "department"), None);
    }

    #[test]
    fn test_papers_keys_are_rejected() {
        let h = Harness::new();
        let container = FetchContainer::new(PerformanceDomain, h.deps.clone());
        assert!(container
            .set_filter(FilterKey::Journal, Some("SCI".to_string()))
            .is_err());
    }

    #[test]
    fn test_achievement_selectors() {
        let mut data = PerformanceResponse {
            achievement_data: Some(AchievementData {
                actual: 52.0,
                target: 65.0,
                rate: None,
                status: AchievementStatus::Unknown,
            }),
            ..Default::default()
        };
        assert_eq!(achievement_rate(&data), Some(80.0));
        assert_eq!(achievement_status(&data), AchievementStatus::Warning);

        if let Some(a) = data.achievement_data.as_mut() {
            a.status = AchievementStatus::Danger;
        }
        assert_eq!(achievement_status(&data), AchievementStatus::Danger);

        assert_eq!(achievement_rate(&PerformanceResponse::default()), None);
        assert_eq!(
            achievement_status(&PerformanceResponse::default()),
            AchievementStatus::Unknown
        );
    }

    #[test]
    fn test_department_selectors() {
        let data: PerformanceResponse = serde_json::from_value(all_departments()).unwrap();
        assert_eq!(department_total(&data), 60.0);
        assert_eq!(department_names(&data), vec!["CS", "EE"]);
    }
}
