use async_trait::async_trait;

use super::controller::{UploadTransport, HISTORY_PATH, UPLOAD_PATH};
use crate::shared::api_client::{AnalyticsTransport, ApiFailure, HttpTransport};

/// Multipart upload and history over [`HttpTransport`].
pub struct BrowserUploadTransport {
    http: HttpTransport,
}

impl BrowserUploadTransport {
    pub fn new(http: HttpTransport) -> Self {
        Self { http }
    }
}

#[async_trait(?Send)]
impl UploadTransport for BrowserUploadTransport {
    type File = web_sys::File;

    async fn upload(
        &self,
        file: &web_sys::File,
        token: Option<&str>,
    ) -> Result<serde_json::Value, ApiFailure> {
        log::debug!("Uploading {} ({} bytes)", file.name(), file.size());
        self.http.post_file(UPLOAD_PATH, file, token).await
    }

    async fn history(&self, token: Option<&str>) -> Result<serde_json::Value, ApiFailure> {
        self.http.get(HISTORY_PATH, &[], token).await
    }
}
