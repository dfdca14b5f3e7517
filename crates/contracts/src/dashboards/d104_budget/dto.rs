use serde::{Deserialize, Serialize};

use crate::shared::number::de_f64_lenient;

/// Envelope shared by `/budget/allocation/`, `/budget/execution/` and
/// `/budget/trends/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetListResponse<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    /// Row count (allocation only)
    #[serde(default)]
    pub total: Option<i64>,
    /// Aggregates (execution only)
    #[serde(default)]
    pub summary: Option<ExecutionSummary>,
    /// First and last year present (trends only)
    #[serde(default)]
    pub year_range: Option<YearRange>,
}

impl<T> Default for BudgetListResponse<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            total: None,
            summary: None,
            year_range: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetAllocationItem {
    pub department: String,
    #[serde(default)]
    pub total_budget: i64,
    #[serde(default, deserialize_with = "de_f64_lenient")]
    pub percentage: f64,
    #[serde(default)]
    pub project_count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionStatusItem {
    pub department: String,
    #[serde(default)]
    pub total_budget: i64,
    #[serde(default)]
    pub executed_amount: i64,
    #[serde(default, deserialize_with = "de_f64_lenient")]
    pub execution_rate: f64,
    #[serde(default)]
    pub remaining_budget: i64,
    #[serde(default)]
    pub status: ExecutionStatus,
}

/// normal: < 90 %, warning: 90-100 %, critical: > 100 %
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    Warning,
    Critical,
    /// Also any status this client does not know
    #[default]
    #[serde(other)]
    Normal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionSummary {
    #[serde(default)]
    pub total_budget: i64,
    #[serde(default)]
    pub total_executed: i64,
    #[serde(default, deserialize_with = "de_f64_lenient")]
    pub overall_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearRange {
    pub min: Option<i32>,
    pub max: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearlyTrendItem {
    pub year: i32,
    #[serde(default)]
    pub total_budget: i64,
    #[serde(default)]
    pub executed_amount: i64,
    #[serde(default, deserialize_with = "de_f64_lenient")]
    pub execution_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_envelope_with_decimal_strings() {
        let json = r#"{
            "data": [{
                "department": "CS",
                "total_budget": 1000,
                "executed_amount": 950,
                "execution_rate": "95.00",
                "remaining_budget": 50,
                "status": "warning"
            }],
            "summary": {"total_budget": 1000, "total_executed": 950, "overall_rate": "95.00"}
        }"#;
        let resp: BudgetListResponse<ExecutionStatusItem> = serde_json::from_str(json).unwrap();
        assert_eq!(resp.data[0].execution_rate, 95.0);
        assert_eq!(resp.data[0].status, ExecutionStatus::Warning);
        assert_eq!(resp.summary.unwrap().overall_rate, 95.0);
    }

    #[test]
    fn test_missing_data_is_empty() {
        let resp: BudgetListResponse<YearlyTrendItem> =
            serde_json::from_str(r#"{"year_range": {"min": null, "max": null}}"#).unwrap();
        assert!(resp.data.is_empty());
        assert_eq!(resp.year_range, Some(YearRange::default()));
    }

    #[test]
    fn test_unknown_status_reads_as_normal() {
        let item: ExecutionStatusItem =
            serde_json::from_str(r#"{"department": "EE", "status": "bogus"}"#).unwrap();
        assert_eq!(item.status, ExecutionStatus::Normal);

        let item: ExecutionStatusItem =
            serde_json::from_str(r#"{"department": "EE", "status": "critical"}"#).unwrap();
        assert_eq!(item.status, ExecutionStatus::Critical);
    }
}
