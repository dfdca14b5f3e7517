use serde::{Deserialize, Serialize};

use crate::shared::number::de_f64_lenient;

/// Response of `GET /students/analytics`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentsAnalyticsResponse {
    #[serde(default)]
    pub department_stats: Vec<DepartmentStat>,
    #[serde(default)]
    pub grade_distribution: Vec<GradeShare>,
    #[serde(default)]
    pub enrollment_trend: Vec<EnrollmentPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DepartmentStat {
    #[serde(default)]
    pub college: String,
    pub department: String,
    #[serde(default)]
    pub student_count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GradeShare {
    /// Undergraduate / graduate program label
    #[serde(default)]
    pub program_type: String,
    /// 1-4 for undergraduates, 0 for graduate students
    pub grade: i32,
    #[serde(default)]
    pub count: i64,
    #[serde(default, deserialize_with = "de_f64_lenient")]
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentPoint {
    pub year: i32,
    #[serde(default)]
    pub admission_count: i64,
    #[serde(default)]
    pub graduation_count: i64,
}
