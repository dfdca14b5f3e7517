use serde::{Deserialize, Serialize};

/// Response of `POST /dashboard/upload/upload/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub records_processed: i64,
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub duplicates_found: Option<i64>,
    #[serde(default)]
    pub errors: Vec<RowError>,
    /// Present when `success` is false
    #[serde(default)]
    pub error: Option<String>,
}

/// Row-level problem reported by the file parser
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowError {
    #[serde(default)]
    pub row: Option<i64>,
    #[serde(default)]
    pub column: Option<String>,
    pub message: String,
    #[serde(default)]
    pub severity: Option<String>,
}

/// Response of `GET /dashboard/upload/history/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadHistoryResponse {
    #[serde(default, alias = "results")]
    pub items: Vec<UploadHistoryItem>,
    #[serde(default)]
    pub total: Option<i64>,
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadHistoryItem {
    #[serde(default, alias = "file_name")]
    pub filename: Option<String>,
    #[serde(default, alias = "created_at")]
    pub uploaded_at: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default, alias = "records_processed")]
    pub rows_imported: Option<i64>,
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl UploadHistoryItem {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}
