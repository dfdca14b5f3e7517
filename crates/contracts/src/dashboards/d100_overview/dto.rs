use serde::{Deserialize, Serialize};

use crate::shared::number::de_f64_lenient;

/// Response of `GET /dashboard/dashboard/`.
///
/// Older deployments answer in camelCase, so every section carries an alias.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    #[serde(default, alias = "kpiData")]
    pub kpi_data: Option<KpiData>,
    #[serde(default, alias = "trendData")]
    pub trend_data: Vec<TrendPoint>,
    #[serde(default, alias = "departmentData")]
    pub department_data: Vec<DepartmentValue>,
    #[serde(default, alias = "budgetData")]
    pub budget_data: Vec<BudgetShare>,
    /// ISO-8601 timestamp of the last data import
    #[serde(default, alias = "lastUpdated")]
    pub last_updated: Option<String>,
}

/// Headline KPI block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiData {
    /// Average employment rate, %
    #[serde(default, deserialize_with = "de_f64_lenient")]
    pub total_performance: f64,
    #[serde(default)]
    pub publication_count: i64,
    /// Currently enrolled students
    #[serde(default)]
    pub student_count: i64,
    #[serde(default)]
    pub budget_status: BudgetStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatus {
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub executed: i64,
    #[serde(default, deserialize_with = "de_f64_lenient")]
    pub rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub year: i32,
    #[serde(default, deserialize_with = "de_f64_lenient")]
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DepartmentValue {
    pub department: String,
    #[serde(default, deserialize_with = "de_f64_lenient")]
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetShare {
    /// Budget category (department name)
    pub category: String,
    #[serde(default)]
    pub value: i64,
}
