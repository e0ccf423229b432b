use std::time::Duration;

use async_trait::async_trait;
use log::{error, warn};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::errors::ProviderError;
use crate::providers::Translator;

/// Cloud Translation v2 endpoint used when an API key is configured
const API_ENDPOINT: &str = "https://translation.googleapis.com/language/translate/v2";

/// Keyless endpoint provided by Google for demo purposes only
const DEMO_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Google Translate client
///
/// With an API key, requests go to the Cloud Translation v2 API. Without one,
/// the client falls back to Google's free demo endpoint, which is rate-limited
/// and not suitable for production use; the CLI warns before enabling it.
pub struct GoogleTranslate {
    /// HTTP client for API requests
    client: Client,
    /// API key; empty selects the demo endpoint
    api_key: String,
    /// Override endpoint, empty for the default
    endpoint: String,
    /// Target language code (ISO 639-1)
    target_language: String,
    /// Source language code, `None` lets the service detect it
    source_language: Option<String>,
    /// Retries for transient failures
    retry_count: u32,
    /// Base backoff in milliseconds, doubled per retry
    retry_backoff_ms: u64,
}

impl std::fmt::Debug for GoogleTranslate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleTranslate")
            .field("endpoint", &self.endpoint)
            .field("target_language", &self.target_language)
            .field("demo", &self.api_key.is_empty())
            .finish()
    }
}

/// Response shape of the Cloud Translation v2 API
#[derive(Debug, Deserialize)]
struct TranslateV2Response {
    data: TranslateV2Data,
}

#[derive(Debug, Deserialize)]
struct TranslateV2Data {
    translations: Vec<TranslateV2Translation>,
}

#[derive(Debug, Deserialize)]
struct TranslateV2Translation {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

impl GoogleTranslate {
    /// Create a new Google Translate client
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

    /// Whether the client will use the keyless demo endpoint
    pub fn is_demo(&self) -> bool {
        self.api_key.is_empty()
    }

    async fn translate_once(&self, text: &str) -> Result<String, ProviderError> {
        if self.is_demo() {
            self.translate_demo(text).await
        } else {
            self.translate_v2(text).await
        }
    }

    /// Cloud Translation v2 call
    async fn translate_v2(&self, text: &str) -> Result<String, ProviderError> {
        let endpoint = if self.endpoint.is_empty() {
            API_ENDPOINT
        } else {
            self.endpoint.as_str()
        };

        let mut body = serde_json::json!({
            "q": text,
            "target": self.target_language,
            "format": "text",
        });
        if let Some(source) = &self.source_language {
            body["source"] = Value::String(source.clone());
        }

        let response = self
            .client
            .post(endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Google Translate API error ({}): {}", status, message);
            return Err(map_status_error(status.as_u16(), message));
        }

        let parsed = response
            .json::<TranslateV2Response>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        parsed
            .data
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .ok_or_else(|| ProviderError::ParseError("empty translations array".to_string()))
    }

    /// Keyless demo endpoint call
    ///
    /// The response is a nested JSON array; the first element holds one entry
    /// per translated sentence segment, whose first element is the text.
    async fn translate_demo(&self, text: &str) -> Result<String, ProviderError> {
        let base = if self.endpoint.is_empty() {
            DEMO_ENDPOINT
        } else {
            self.endpoint.as_str()
        };

        let source = self.source_language.as_deref().unwrap_or("auto");
        let url = Url::parse_with_params(
            base,
            &[
                ("client", "gtx"),
                ("sl", source),
                ("tl", self.target_language.as_str()),
                ("dt", "t"),
                ("q", text),
            ],
        )
        .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            return Err(map_status_error(status.as_u16(), message));
        }

        let parsed = response
            .json::<Value>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        let segments = parsed
            .get(0)
            .and_then(Value::as_array)
            .ok_or_else(|| ProviderError::ParseError("unexpected demo response shape".to_string()))?;

        let mut translated = String::new();
        for segment in segments {
            if let Some(part) = segment.get(0).and_then(Value::as_str) {
                translated.push_str(part);
            }
        }

        if translated.is_empty() {
            return Err(ProviderError::ParseError(
                "demo response contained no translated text".to_string(),
            ));
        }

        Ok(translated)
    }
}

#[async_trait]
impl Translator for GoogleTranslate {
    fn name(&self) -> &str {
        if self.is_demo() {
            "Google Translate (demo)"
        } else {
            "Google Translate"
        }
    }

    async fn translate(&self, text: &str) -> Result<String, ProviderError> {
        retry_with_backoff(self.retry_count, self.retry_backoff_ms, || {
            self.translate_once(text)
        })
        .await
    }
}

/// Map an HTTP error status to the provider error taxonomy
pub(crate) fn map_status_error(status_code: u16, message: String) -> ProviderError {
    match status_code {
        401 | 403 => ProviderError::AuthenticationError(message),
        429 => ProviderError::RateLimitExceeded(message),
        _ => ProviderError::ApiError { status_code, message },
    }
}

/// Retry transient failures with exponential backoff.
///
/// Authentication errors are never retried; rate-limit and server-side errors
/// are, with the backoff doubling on each attempt.
pub(crate) async fn retry_with_backoff<F, Fut>(
    retry_count: u32,
    retry_backoff_ms: u64,
    mut call: F,
) -> Result<String, ProviderError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<String, ProviderError>>,
{
    let mut backoff_ms = retry_backoff_ms.max(1);
    let mut attempt = 0;

    loop {
        match call().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                let retryable = match &e {
                    ProviderError::AuthenticationError(_) => false,
                    ProviderError::ParseError(_) => false,
                    ProviderError::ApiError { status_code, .. } => *status_code >= 500,
                    ProviderError::RateLimitExceeded(_) | ProviderError::RequestFailed(_) => true,
                };
                if !retryable || attempt >= retry_count {
                    return Err(e);
                }
                attempt += 1;
                warn!(
                    "Translation request failed (attempt {}/{}), retrying in {}ms: {}",
                    attempt, retry_count, backoff_ms, e
                );
                tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                backoff_ms = backoff_ms.saturating_mul(2);
            }
        }
    }
}
