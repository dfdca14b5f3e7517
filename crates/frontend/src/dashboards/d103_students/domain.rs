use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use contracts::dashboards::d103_students::StudentsAnalyticsResponse;

use crate::shared::api_client::{get_json, AnalyticsTransport, ApiFailure, QueryParam};
use crate::shared::fetch_state::{AnalyticsDomain, FilterCriteria, FilterKey};

pub const STUDENTS_PATH: &str = "/students/analytics";

/// Undergraduate years first, graduate programs (0) last
pub const GRADE_OPTIONS: [i32; 5] = [1, 2, 3, 4, 0];
pub const YEAR_OPTIONS: [i32; 6] = [2020, 2021, 2022, 2023, 2024, 2025];

pub struct StudentsDomain;

#[async_trait(?Send)]
impl AnalyticsDomain for StudentsDomain {
    type Payload = StudentsAnalyticsResponse;

    const NAME: &'static str = "students";
    const FILTER_KEYS: &'static [FilterKey] =
        &[FilterKey::Department, FilterKey::Grade, FilterKey::Year];
    const URL_KEYS: &'static [FilterKey] = Self::FILTER_KEYS;

    fn default_filters(&self, today: NaiveDate) -> FilterCriteria {
        FilterCriteria::new().with(FilterKey::Year, today.year().to_string())
    }

    async fn fetch(
        &self,
        transport: &dyn AnalyticsTransport,
        query: &[QueryParam],
        token: Option<&str>,
    ) -> Result<StudentsAnalyticsResponse, ApiFailure> {
        get_json(transport, STUDENTS_PATH, query, token).await
    }
}

pub fn grade_label(grade: i32) -> String {
    match grade {
        0 => "Graduate".to_string(),
        n => format!("Year {}", n),
    }
}

pub fn total_students(data: &StudentsAnalyticsResponse) -> i64 {
    data.department_stats.iter().map(|d| d.student_count).sum()
}

pub fn department_count(data: &StudentsAnalyticsResponse) -> usize {
    data.department_stats.len()
}

pub fn average_per_department(data: &StudentsAnalyticsResponse) -> f64 {
    match department_count(data) {
        0 => 0.0,
        count => total_students(data) as f64 / count as f64,
    }
}

/// Department with the most students; the first one wins a tie.
pub fn largest_department(data: &StudentsAnalyticsResponse) -> Option<&str> {
    let mut stats = data.department_stats.iter();
    let first = stats.next()?;
    let largest = stats.fold(first, |max, dept| {
        if dept.student_count > max.student_count {
            dept
        } else {
            max
        }
    });
    Some(largest.department.as_str())
}

/// Departments in first-seen order, without duplicates.
pub fn department_options(data: &StudentsAnalyticsResponse) -> Vec<String> {
    let mut options: Vec<String> = Vec::new();
    for stat in &data.department_stats {
        if !options.contains(&stat.department) {
            options.push(stat.department.clone());
        }
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::errors::ErrorKind;
    use crate::shared::fetch_state::testing::{query_value, Harness};
    use crate::shared::fetch_state::{FetchContainer, FetchStatus};
    use serde_json::json;

    fn payload() -> serde_json::Value {
        json!({
            "department_stats": [
                {"college": "Engineering", "department": "CS", "student_count": 420},
                {"college": "Engineering", "department": "EE", "student_count": 380},
                {"college": "Science", "department": "CS", "student_count": 20},
                {"college": "Science", "department": "Math", "student_count": 420}
            ],
            "grade_distribution": [
                {"program_type": "undergraduate", "grade": 1, "count": 300, "percentage": 24.2}
            ],
            "enrollment_trend": [
                {"year": 2023, "admission_count": 310, "graduation_count": 280}
            ]
        })
    }

    #[test]
    fn test_mount_sends_current_year() {
        let mut h = Harness::new();
        h.transport.reply_json(payload());
        let container = FetchContainer::new(StudentsDomain, h.deps.clone());
        container.mount();
        h.run();

        let calls = h.transport.calls();
        assert_eq!(calls[0].path, STUDENTS_PATH);
        assert_eq!(calls[0].query, vec![("year", "2024".to_string())]);
        assert_eq!(container.state().status(), FetchStatus::Success);
    }

    #[test]
    fn test_graduate_grade_filter() {
        let mut h = Harness::new();
        h.transport.reply_json(payload());
        let container = FetchContainer::new(StudentsDomain, h.deps.clone());
        container.mount();
        h.run();

        h.transport.reply_json(payload());
        container
            .set_filter(FilterKey::Grade, Some("0".to_string()))
            .unwrap();
        h.run();

        let calls = h.transport.calls();
        assert_eq!(query_value(&calls[1], "grade"), Some("0"));
        assert_eq!(query_value(&calls[1], "year"), Some("2024"));
        assert_eq!(h.location.query.borrow().as_str(), "grade=0");

        assert!(container
            .set_filter(FilterKey::Grade, Some("7".to_string()))
            .is_err());
        assert_eq!(h.transport.calls().len(), 2);
    }

    #[test]
    fn test_expired_session_signs_out() {
        let mut h = Harness::new();
        h.transport.reply(Err(ApiFailure::Http {
            status: 401,
            body: None,
        }));
        let container = FetchContainer::new(StudentsDomain, h.deps.clone());
        container.mount();
        h.run();

        assert_eq!(
            container.state().error().map(|e| e.kind),
            Some(ErrorKind::Auth)
        );
        assert_eq!(h.identity.sign_outs.get(), 1);
        assert_eq!(*h.location.redirects.borrow(), vec!["/sign-in".to_string()]);
    }

    #[test]
    fn test_selectors() {
        let data: StudentsAnalyticsResponse = serde_json::from_value(payload()).unwrap();
        assert_eq!(total_students(&data), 1240);
        assert_eq!(department_count(&data), 4);
        assert_eq!(average_per_department(&data), 310.0);
        assert_eq!(largest_department(&data), Some("CS"));
        assert_eq!(department_options(&data), vec!["CS", "EE", "Math"]);
    }

    #[test]
    fn test_selectors_on_empty_payload() {
        let empty = StudentsAnalyticsResponse::default();
        assert_eq!(total_students(&empty), 0);
        assert_eq!(average_per_department(&empty), 0.0);
        assert_eq!(largest_department(&empty), None);
        assert!(department_options(&empty).is_empty());
    }

    #[test]
    fn test_grade_labels() {
        let labels: Vec<String> = GRADE_OPTIONS.iter().map(|g| grade_label(*g)).collect();
        assert_eq!(labels, vec!["Year 1", "Year 2", "Year 3", "Year 4", "Graduate"]);
    }
}
