use serde::{Deserialize, Serialize};

use crate::shared::number::{de_f64_lenient, de_opt_f64_lenient};

/// Response of `GET /performance/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceResponse {
    #[serde(default)]
    pub trend_data: Vec<PerformanceTrendPoint>,
    #[serde(default)]
    pub department_data: Vec<DepartmentPerformance>,
    #[serde(default)]
    pub achievement_data: Option<AchievementData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceTrendPoint {
    /// YYYY-MM-DD
    pub date: String,
    #[serde(default, deserialize_with = "de_f64_lenient")]
    pub value: f64,
    #[serde(default, deserialize_with = "de_opt_f64_lenient")]
    pub target: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DepartmentPerformance {
    pub department: String,
    #[serde(default, deserialize_with = "de_f64_lenient")]
    pub value: f64,
    /// Share of the total, %
    #[serde(default, deserialize_with = "de_opt_f64_lenient")]
    pub percentage: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AchievementData {
    #[serde(default, deserialize_with = "de_f64_lenient")]
    pub actual: f64,
    #[serde(default, deserialize_with = "de_f64_lenient")]
    pub target: f64,
    #[serde(default, deserialize_with = "de_opt_f64_lenient")]
    pub rate: Option<f64>,
    #[serde(default)]
    pub status: AchievementStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementStatus {
    Success,
    Warning,
    Danger,
    #[default]
    #[serde(other)]
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_performance_response() {
        let json = r#"{
            "trendData": [{"date": "2024-01-01", "value": 12.5, "target": null}],
            "departmentData": [{"department": "CS", "value": 40, "percentage": "66.67"}],
            "achievementData": {"actual": 95, "target": 100, "rate": 95.0, "status": "warning"}
        }"#;
        let resp: PerformanceResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.trend_data[0].target, None);
        assert_eq!(resp.department_data[0].percentage, Some(66.67));
        let achievement = resp.achievement_data.unwrap();
        assert_eq!(achievement.status, AchievementStatus::Warning);
        assert_eq!(achievement.rate, Some(95.0));
    }

    #[test]
    fn test_unrecognised_status_is_unknown() {
        let a: AchievementData =
            serde_json::from_str(r#"{"actual": 1, "target": 0, "rate": null, "status": "pending"}"#)
                .unwrap();
        assert_eq!(a.status, AchievementStatus::Unknown);
    }
}
