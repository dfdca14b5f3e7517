use serde::{Deserialize, Serialize};

/// Response of `GET /papers/analytics/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PapersAnalyticsResponse {
    #[serde(default)]
    pub yearly_data: Vec<YearlyPublications>,
    #[serde(default)]
    pub journal_data: Vec<JournalPublications>,
    #[serde(default)]
    pub field_data: Vec<FieldPublications>,
    #[serde(default)]
    pub has_data: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearlyPublications {
    pub year: i32,
    #[serde(default)]
    pub count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JournalPublications {
    /// SCI, SCOPUS, KCI, ...
    pub journal_grade: String,
    #[serde(default)]
    pub count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldPublications {
    pub department: String,
    #[serde(default)]
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_response_defaults() {
        let resp: PapersAnalyticsResponse = serde_json::from_str("{}").unwrap();
        assert!(!resp.has_data);
        assert!(resp.yearly_data.is_empty());
        assert!(resp.journal_data.is_empty());
        assert!(resp.field_data.is_empty());
    }
}
