use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub upload: UploadConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Prefix for every analytics request, without a trailing slash
    pub base_url: String,
    /// Applied to each request individually
    pub timeout_ms: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct UploadConfig {
    pub max_size_mb: u32,
    pub allowed_extensions: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AuthConfig {
    /// Public page users are sent to when the session ends
    pub entry_path: String,
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = "http://localhost:8000/api"
timeout_ms = 10000

[upload]
max_size_mb = 10
allowed_extensions = ["xlsx", "xls", "csv"]

[auth]
entry_path = "/sign-in"
"#;

/// Attribute on `<html>` that overrides the API base URL at deploy time
const API_URL_ATTRIBUTE: &str = "data-api-url";

impl Default for AppConfig {
    fn default() -> Self {
        // The embedded document is covered by a unit test
        parse_config(DEFAULT_CONFIG).unwrap_or_else(|_| Self {
            api: ApiConfig {
                base_url: "http://localhost:8000/api".to_string(),
                timeout_ms: 10_000,
            },
            upload: UploadConfig {
                max_size_mb: 10,
                allowed_extensions: vec!["xlsx".into(), "xls".into(), "csv".into()],
            },
            auth: AuthConfig {
                entry_path: "/sign-in".to_string(),
            },
        })
    }
}

impl AppConfig {
    /// Replace the API base URL, normalising the trailing slash.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        let trimmed = base_url.trim().trim_end_matches('/');
        if !trimmed.is_empty() {
            self.api.base_url = trimmed.to_string();
        }
        self
    }

    pub fn api_url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.api.base_url, path)
        } else {
            format!("{}/{}", self.api.base_url, path)
        }
    }

    pub fn max_upload_bytes(&self) -> u64 {
        u64::from(self.upload.max_size_mb) * 1024 * 1024
    }
}

pub fn parse_config(source: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str(source)
}

/// Load configuration for the running page.
///
/// Starts from the embedded defaults and applies the `data-api-url`
/// attribute of the document root when present.
pub fn load_config() -> AppConfig {
    let config = match parse_config(DEFAULT_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Embedded config is invalid, using built-in values: {}", e);
            AppConfig::default()
        }
    };

    let override_url = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
        .and_then(|root| root.get_attribute(API_URL_ATTRIBUTE));

    match override_url {
        Some(url) if !url.trim().is_empty() => {
            log::info!("Using API base URL from {}: {}", API_URL_ATTRIBUTE, url);
            config.with_base_url(&url)
        }
        _ => config,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
        assert_eq!(config.api.timeout_ms, 10_000);
        assert_eq!(config.upload.allowed_extensions, vec!["xlsx", "xls", "csv"]);
        assert_eq!(config.auth.entry_path, "/sign-in");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_base_url_override_and_join() {
        let config = AppConfig::default().with_base_url("https://uni.example.org/api/");
        assert_eq!(
            config.api_url("/papers/analytics/"),
            "https://uni.example.org/api/papers/analytics/"
        );
        assert_eq!(
            config.api_url("students/analytics"),
            "https://uni.example.org/api/students/analytics"
        );

        let unchanged = AppConfig::default().with_base_url("   ");
        assert_eq!(unchanged.api.base_url, "http://localhost:8000/api");
    }

    #[test]
    fn test_max_upload_bytes() {
        assert_eq!(AppConfig::default().max_upload_bytes(), 10 * 1024 * 1024);
    }
}
