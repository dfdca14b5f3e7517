//! HTTP access to the analytics API.
//!
//! Pages never talk to `gloo_net` directly: they go through the
//! [`AnalyticsTransport`] seam so the fetch containers can be exercised
//! against in-memory fakes.

use async_trait::async_trait;
use contracts::shared::api_error::ApiErrorBody;
use futures::future::{select, Either};
use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;
use std::future::Future;

use crate::shared::config::AppConfig;

/// One `key=value` pair of an outgoing query string
pub type QueryParam = (&'static str, String);

/// Transport-level failure, before any classification.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiFailure {
    /// The server answered with a non-2xx status
    #[error("HTTP {status}")]
    Http {
        status: u16,
        body: Option<ApiErrorBody>,
    },
    /// No response was received
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out after {0} ms")]
    Timeout(u32),
    /// A 2xx response whose body does not have the expected shape
    #[error("unexpected response payload: {0}")]
    Decode(String),
    /// The request could not be built or sent at all
    #[error("failed to build request: {0}")]
    Request(String),
}

impl ApiFailure {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiFailure::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn server_body(&self) -> Option<&ApiErrorBody> {
        match self {
            ApiFailure::Http { body, .. } => body.as_ref(),
            _ => None,
        }
    }
}

#[async_trait(?Send)]
pub trait AnalyticsTransport {
    /// Issue one authenticated GET and return the raw JSON body.
    async fn get(
        &self,
        path: &str,
        query: &[QueryParam],
        token: Option<&str>,
    ) -> Result<serde_json::Value, ApiFailure>;
}

/// GET `path` and decode the body into `T`.
pub async fn get_json<T: DeserializeOwned>(
    transport: &dyn AnalyticsTransport,
    path: &str,
    query: &[QueryParam],
    token: Option<&str>,
) -> Result<T, ApiFailure> {
    let value = transport.get(path, query, token).await?;
    decode(value)
}

pub fn decode<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, ApiFailure> {
    serde_json::from_value(value).map_err(|e| ApiFailure::Decode(e.to_string()))
}

/// `a=1&b=x%20y`, keeping the order of `query`
pub fn build_query_string(query: &[QueryParam]) -> String {
    query
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

pub fn with_query(path: &str, query: &[QueryParam]) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, build_query_string(query))
    }
}

/// Browser transport backed by `gloo_net`.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    config: AppConfig,
}

impl HttpTransport {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    fn authorize(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    /// POST `body` as JSON and return the raw JSON answer.
    pub async fn post_json<B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<serde_json::Value, ApiFailure> {
        let url = self.config.api_url(path);
        let request = Self::authorize(Request::post(&url), token)
            .json(body)
            .map_err(|e| ApiFailure::Request(e.to_string()))?;

        let response = with_timeout(request.send(), self.config.api.timeout_ms)
            .await?
            .map_err(|e| ApiFailure::Network(e.to_string()))?;
        read_body(response).await
    }

    /// POST a multipart form carrying `file` under the `file` field.
    pub async fn post_file(
        &self,
        path: &str,
        file: &web_sys::File,
        token: Option<&str>,
    ) -> Result<serde_json::Value, ApiFailure> {
        let form = web_sys::FormData::new()
            .map_err(|e| ApiFailure::Request(format!("{:?}", e)))?;
        form.append_with_blob_and_filename("file", file, &file.name())
            .map_err(|e| ApiFailure::Request(format!("{:?}", e)))?;

        let url = self.config.api_url(path);
        let request = Self::authorize(Request::post(&url), token)
            .body(form)
            .map_err(|e| ApiFailure::Request(e.to_string()))?;

        let response = with_timeout(request.send(), self.config.api.timeout_ms)
            .await?
            .map_err(|e| ApiFailure::Network(e.to_string()))?;
        read_body(response).await
    }
}

#[async_trait(?Send)]
impl AnalyticsTransport for HttpTransport {
    async fn get(
        &self,
        path: &str,
        query: &[QueryParam],
        token: Option<&str>,
    ) -> Result<serde_json::Value, ApiFailure> {
        let url = self.config.api_url(&with_query(path, query));
        log::debug!("GET {}", url);

        let builder = Self::authorize(Request::get(&url), token)
            .header("Accept", "application/json");
        let response = with_timeout(builder.send(), self.config.api.timeout_ms)
            .await?
            .map_err(|e| ApiFailure::Network(e.to_string()))?;
        read_body(response).await
    }
}

/// Resolve `future` or fail with [`ApiFailure::Timeout`] after `timeout_ms`.
async fn with_timeout<F: Future>(future: F, timeout_ms: u32) -> Result<F::Output, ApiFailure> {
    let future = Box::pin(future);
    let timer = Box::pin(TimeoutFuture::new(timeout_ms));
    match select(future, timer).await {
        Either::Left((output, _)) => Ok(output),
        Either::Right(_) => Err(ApiFailure::Timeout(timeout_ms)),
    }
}

async fn read_body(response: Response) -> Result<serde_json::Value, ApiFailure> {
    let text = response.text().await.map_err(|e| e.to_string());
    interpret_body(response.status(), response.ok(), text)
}

/// Map a received response to a payload or a failure.
///
/// A non-2xx status always yields [`ApiFailure::Http`], even when the body
/// could not be read, so the status still drives classification.
fn interpret_body(
    status: u16,
    ok: bool,
    text: Result<String, String>,
) -> Result<serde_json::Value, ApiFailure> {
    if !ok {
        let body = match text {
            Ok(text) => {
                log::debug!("HTTP {} body: {}", status, text);
                serde_json::from_str::<ApiErrorBody>(&text).ok()
            }
            Err(e) => {
                log::debug!("HTTP {} body unreadable: {}", status, e);
                None
            }
        };
        return Err(ApiFailure::Http { status, body });
    }

    let text = text.map_err(ApiFailure::Decode)?;
    if text.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_str(&text).map_err(|e| ApiFailure::Decode(e.to_string()))
}
