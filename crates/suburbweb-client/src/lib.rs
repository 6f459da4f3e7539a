//! Client for the upstream suburb data API
//!
//! One GET per dashboard request: `{base_url}/{resource}?suburb={suburb}`
//! with a static bearer token. No retries.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use suburbweb_config::ApiConfig;

pub mod error;

pub use error::ClientError;

const MAX_ERROR_BODY_CHARS: usize = 200;

/// Shared client reference
pub type ApiRef = Arc<dyn SuburbApiTrait>;

/// Source of raw suburb data
#[async_trait]
pub trait SuburbApiTrait: Send + Sync {
    /// Fetch `resource` for `suburb` and return the parsed JSON body
    async fn fetch(&self, resource: &str, suburb: &str) -> Result<Value, ClientError>;
}

/// reqwest-backed implementation
pub struct HttpSuburbApi {
    client: reqwest::Client,
    base_url: String,
    token: String,
    timeout_secs: u64,
}

impl HttpSuburbApi {
    pub fn new(base_url: &str, token: &str, timeout_secs: u64) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ClientError::Build { message: e.to_string() })?;

        Ok(Self {
            client,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            token: token.to_string(),
            timeout_secs,
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ClientError> {
        Self::new(&config.base_url, &config.token, config.timeout_secs)
    }

    /// Full URL for a resource, without the query string
    pub fn resource_url(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url, resource)
    }

    fn map_send_error(&self, error: reqwest::Error) -> ClientError {
        if error.is_timeout() {
            ClientError::Timeout { secs: self.timeout_secs }
        } else {
            ClientError::Transport { message: error.to_string() }
        }
    }
}

#[async_trait]
impl SuburbApiTrait for HttpSuburbApi {
    async fn fetch(&self, resource: &str, suburb: &str) -> Result<Value, ClientError> {
        let url = self.resource_url(resource);
        log::debug!("GET {} suburb={}", url, suburb);

        let response = self.client
            .get(&url)
            .query(&[("suburb", suburb)])
            .bearer_auth(&self.token)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!("Data service returned {} for {}", status, url);
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let text = response.text().await.map_err(|e| self.map_send_error(e))?;
        serde_json::from_str(&text).map_err(|e| ClientError::InvalidJson { message: e.to_string() })
    }
}

// ==================== Tests ====================
