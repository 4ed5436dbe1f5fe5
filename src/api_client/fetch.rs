//! HTTP access to the YouTube Data API.
//!
//! All search operations go through the [`Fetch`] trait so they can be
//! exercised against a mock. [`YouTubeClient`] is the real implementation:
//! one GET per call, the API key appended as a query parameter, no retries
//! and no timeout beyond reqwest's defaults.

use crate::api_client::SearchError;
use crate::configuration::ApiSettings;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

/// Issues a single GET against the API and returns the parsed JSON body.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(
        &self,
        endpoint: &str,
        params: Vec<(String, String)>,
    ) -> Result<Value, SearchError>;
}

pub struct YouTubeClient {
    client: Client,
    settings: ApiSettings,
}

impl YouTubeClient {
    pub fn new(settings: ApiSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }
}

#[async_trait]
impl Fetch for YouTubeClient {
    async fn fetch(
        &self,
        endpoint: &str,
        mut params: Vec<(String, String)>,
    ) -> Result<Value, SearchError> {
        let api_key = self.settings.api_key.trim();
        if api_key.is_empty() {
            return Err(SearchError::MissingApiKey);
        }

        params.push(("key".to_string(), api_key.to_string()));
        let url = format!("{}{}", self.settings.api_base_url, endpoint);

        let response = self.client.get(&url).query(&params).send().await?;
        let status = response.status();

        if !status.is_success() {
            let status_text = status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.to_string());
            let body = response.json::<Value>().await.ok();
            return Err(SearchError::ApiError {
                message: error_message(&status_text, body),
            });
        }

        Ok(response.json().await?)
    }
}

/// Extracts a human-readable message from a failed response.
///
/// The API reports failures as `{"error": {"message": ...}}`. A body that
/// parses but carries no such field falls back to the HTTP status text; an
/// unparseable body reports "Unknown error".
fn error_message(status_text: &str, body: Option<Value>) -> String {
    match body {
        Some(body) => body
            .pointer("/error/message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("API request failed: {}", status_text)),
        None => "Unknown error".to_string(),
    }
}
