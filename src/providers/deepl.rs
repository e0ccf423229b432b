use std::time::Duration;

use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::providers::google::retry_with_backoff;
use crate::providers::Translator;

/// Paid-plan API host
const API_ENDPOINT: &str = "https://api.deepl.com";

/// Free-plan API host (keys ending in `:fx`)
const FREE_API_ENDPOINT: &str = "https://api-free.deepl.com";

/// DeepL API client
pub struct DeepL {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// Override endpoint, empty for the plan-appropriate default
    endpoint: String,
    /// Target language code
    target_language: String,
    /// Source language code, `None` lets the service detect it
    source_language: Option<String>,
    /// Retries for transient failures
    retry_count: u32,
    /// Base backoff in milliseconds, doubled per retry
    retry_backoff_ms: u64,
}

impl std::fmt::Debug for DeepL {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeepL")
            .field("endpoint", &self.endpoint)
            .field("target_language", &self.target_language)
            .finish()
    }
}

/// DeepL translate request
#[derive(Debug, Serialize)]
struct DeepLRequest<'a> {
    text: Vec<&'a str>,
    target_lang: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_lang: Option<String>,
}

/// DeepL translate response
#[derive(Debug, Deserialize)]
struct DeepLResponse {
    translations: Vec<DeepLTranslation>,
}

#[derive(Debug, Deserialize)]
struct DeepLTranslation {
    text: String,
}

impl DeepL {
    /// Create a new DeepL client
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        target_language: impl Into<String>,
        source_language: Option<String>,
        timeout_secs: u64,
        retry_count: u32,
        retry_backoff_ms: u64,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            target_language: target_language.into(),
            source_language,
            retry_count,
            retry_backoff_ms,
        }
    }

    /// Resolve the API URL: explicit endpoint, otherwise the free host for
    /// `:fx` keys and the paid host for everything else
    fn api_url(&self) -> String {
        let host = if !self.endpoint.is_empty() {
            self.endpoint.trim_end_matches('/')
        } else if self.api_key.ends_with(":fx") {
            FREE_API_ENDPOINT
        } else {
            API_ENDPOINT
        };
        format!("{}/v2/translate", host)
    }

    async fn translate_once(&self, text: &str) -> Result<String, ProviderError> {
        let request = DeepLRequest {
            text: vec![text],
            // DeepL expects upper-case language codes
            target_lang: self.target_language.to_uppercase(),
            source_lang: self.source_language.as_ref().map(|s| s.to_uppercase()),
        };

        let response = self
            .client
            .post(self.api_url())
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("DeepL API error ({}): {}", status, message);
            return Err(match status.as_u16() {
                401 | 403 => ProviderError::AuthenticationError(message),
                // 456 is DeepL's quota-exceeded status
                429 | 456 => ProviderError::RateLimitExceeded(message),
                code => ProviderError::ApiError { status_code: code, message },
            });
        }

        let parsed = response
            .json::<DeepLResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        parsed
            .translations
            .into_iter()
            .next()
            .map(|t| t.text)
            .ok_or_else(|| ProviderError::ParseError("empty translations array".to_string()))
    }
}

#[async_trait]
impl Translator for DeepL {
    fn name(&self) -> &str {
        "DeepL"
    }

    async fn translate(&self, text: &str) -> Result<String, ProviderError> {
        retry_with_backoff(self.retry_count, self.retry_backoff_ms, || {
            self.translate_once(text)
        })
        .await
    }
}
