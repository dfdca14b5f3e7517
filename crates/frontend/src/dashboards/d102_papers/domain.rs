use async_trait::async_trait;
use chrono::NaiveDate;
use contracts::dashboards::d102_papers::{JournalPublications, PapersAnalyticsResponse};

use crate::shared::api_client::{get_json, AnalyticsTransport, ApiFailure, QueryParam};
use crate::shared::fetch_state::{AnalyticsDomain, FilterCriteria, FilterKey};

pub const PAPERS_PATH: &str = "/papers/analytics/";

/// `(value, label)`; values are what the API stores
pub const JOURNAL_GRADES: [(&str, &str); 4] = [
    ("SCI", "SCI"),
    ("KCI", "KCI"),
    ("SCOPUS", "SCOPUS"),
    ("기타", "Other"),
];
pub const FIELDS: [(&str, &str); 4] = [
    ("공학", "Engineering"),
    ("의학", "Medicine"),
    ("자연과학", "Natural sciences"),
    ("인문학", "Humanities"),
];

pub struct PapersDomain;

#[async_trait(?Send)]
impl AnalyticsDomain for PapersDomain {
    type Payload = PapersAnalyticsResponse;

    const NAME: &'static str = "papers";
    const FILTER_KEYS: &'static [FilterKey] =
        &[FilterKey::Year, FilterKey::Journal, FilterKey::Field];
    const URL_KEYS: &'static [FilterKey] = Self::FILTER_KEYS;

    /// Everything, all years.
    fn default_filters(&self, _today: NaiveDate) -> FilterCriteria {
        FilterCriteria::new()
    }

    async fn fetch(
        &self,
        transport: &dyn AnalyticsTransport,
        query: &[QueryParam],
        token: Option<&str>,
    ) -> Result<PapersAnalyticsResponse, ApiFailure> {
        get_json(transport, PAPERS_PATH, query, token).await
    }
}

pub fn total_publications(data: &PapersAnalyticsResponse) -> i64 {
    data.yearly_data.iter().map(|y| y.count).sum()
}

/// Journal grade with the most publications; the first one wins a tie.
pub fn top_journal_grade(data: &PapersAnalyticsResponse) -> Option<&str> {
    data.journal_data
        .iter()
        .fold(None, |best: Option<&JournalPublications>, row| match best {
            Some(b) if b.count >= row.count => Some(b),
            _ => Some(row),
        })
        .map(|row| row.journal_grade.as_str())
}

/// The server says it has rows, or any section is non-empty.
pub fn has_data(data: &PapersAnalyticsResponse) -> bool {
    data.has_data
        || !data.yearly_data.is_empty()
        || !data.journal_data.is_empty()
        || !data.field_data.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::fetch_state::testing::{query_value, Harness};
    use crate::shared::fetch_state::{FetchContainer, FetchStatus, PageLocation};
    use serde_json::json;

    fn payload() -> serde_json::Value {
        json!({
            "yearly_data": [{"year": 2022, "count": 40}, {"year": 2023, "count": 55}],
            "journal_data": [
                {"journal_grade": "KCI", "count": 50},
                {"journal_grade": "SCI", "count": 30},
                {"journal_grade": "SCOPUS", "count": 50}
            ],
            "field_data": [{"department": "CS", "count": 95}],
            "has_data": true
        })
    }

    #[test]
    fn test_mount_without_filters_sends_no_params() {
        let mut h = Harness::new();
        h.transport.reply_json(payload());
        let container = FetchContainer::new(PapersDomain, h.deps.clone());
        container.mount();
        h.run();

        let calls = h.transport.calls();
        assert_eq!(calls[0].path, PAPERS_PATH);
        assert!(calls[0].query.is_empty());
        assert_eq!(container.state().status(), FetchStatus::Success);
    }

    #[test]
    fn test_filters_round_trip_through_url() {
        let mut h = Harness::with_query("year=2023&journal=SCI");
        h.transport.reply_json(payload());
        let container = FetchContainer::new(PapersDomain, h.deps.clone());
        container.mount();
        h.run();

        let calls = h.transport.calls();
        assert_eq!(query_value(&calls[0], "year"), Some("2023"));
        assert_eq!(query_value(&calls[0], "journal"), Some("SCI"));

        h.transport.reply_json(payload());
        container
            .set_filter(FilterKey::Field, Some("공학".to_string()))
            .unwrap();
        h.run();
        let query = h.location.read_query();
        assert!(query.contains("year=2023"));
        assert!(query.contains("journal=SCI"));
        assert!(query.contains("field="));

        h.transport.reply_json(payload());
        container.reset_filters();
        h.run();
        assert_eq!(h.location.read_query(), "");
        assert!(h.transport.calls()[2].query.is_empty());
    }

    #[test]
    fn test_invalid_year_is_rejected() {
        let h = Harness::new();
        let container = FetchContainer::new(PapersDomain, h.deps.clone());
        assert!(container
            .set_filter(FilterKey::Year, Some("1850".to_string()))
            .is_err());
    }

    #[test]
    fn test_selectors() {
        let data: PapersAnalyticsResponse = serde_json::from_value(payload()).unwrap();
        assert_eq!(total_publications(&data), 95);
        assert_eq!(top_journal_grade(&data), Some("KCI"));
        assert!(has_data(&data));

        let empty = PapersAnalyticsResponse::default();
        assert_eq!(total_publications(&empty), 0);
        assert_eq!(top_journal_grade(&empty), None);
        assert!(!has_data(&empty));
    }
}
