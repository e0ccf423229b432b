use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

use crate::inclusion::{InclusionFilter, DEFAULT_PATTERN};
use crate::scanner::ScanOptions;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Target language code (ISO)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Source language code (ISO); None lets the backend detect it
    #[serde(default)]
    pub source_language: Option<String>,

    /// Glob patterns selecting files to process
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,

    /// Glob patterns excluding files from processing
    #[serde(default = "default_excludes")]
    pub excludes: Vec<String>,

    /// Regex matching text that needs translation
    #[serde(default = "default_pattern")]
    pub pattern: String,

    /// Capitalize the first letter of translated text
    #[serde(default = "default_true")]
    pub capitalize: bool,

    /// Conditional-compilation symbols considered active while scanning
    #[serde(default)]
    pub symbols: Vec<String>,

    /// Translate line and block comments
    #[serde(default = "default_true")]
    pub translate_comments: bool,

    /// Translate doc comments
    #[serde(default = "default_true")]
    pub translate_doc_comments: bool,

    /// Translate string literals
    #[serde(default = "default_true")]
    pub translate_strings: bool,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    #[default]
    Google,
    DeepL,
}

impl TranslationProvider {
    /// Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Google => "Google Translate",
            Self::DeepL => "DeepL",
        }
    }

    /// Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Google => "google".to_string(),
            Self::DeepL => "deepl".to_string(),
        }
    }
}

// Implement Display trait for TranslationProvider
impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for TranslationProvider
impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "deepl" => Ok(Self::DeepL),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    /// API key
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service URL override; empty selects the provider default
    #[serde(default = "String::new")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    /// Provider config with defaults for the given provider
    pub fn new(provider_type: TranslationProvider) -> Self {
        Self {
            provider_type: provider_type.to_lowercase_string(),
            api_key: String::new(),
            endpoint: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Available translation providers
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,

    /// Common translation settings
    #[serde(default)]
    pub common: TranslationCommonConfig,
}

/// Common translation settings applicable to all providers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationCommonConfig {
    /// Retry count for failed requests
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Backoff base for retries (in milliseconds)
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

impl Default for TranslationCommonConfig {
    fn default() -> Self {
        Self {
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_target_language() -> String {
    "en".to_string()
}

fn default_includes() -> Vec<String> {
    vec!["**/*.cs".to_string()]
}

fn default_excludes() -> Vec<String> {
    vec!["bin/**".to_string(), "obj/**".to_string()]
}

fn default_pattern() -> String {
    DEFAULT_PATTERN.to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_retry_count() -> u32 {
    3 // Default to 3 retries
}

fn default_retry_backoff_ms() -> u64 {
    1000 // 1 second base backoff time, doubled on each retry
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate languages
        let _target_name = crate::language_utils::get_language_name(&self.target_language)?;
        if let Some(source) = &self.source_language {
            let _source_name = crate::language_utils::get_language_name(source)?;
        }

        // Validate the inclusion pattern compiles
        let _filter = InclusionFilter::new(&self.pattern)?;

        // Validate glob patterns compile
        for pattern in self.includes.iter().chain(self.excludes.iter()) {
            crate::file_utils::compile_glob(pattern)?;
        }

        // DeepL always requires an API key; Google falls back to the demo
        // endpoint without one
        if self.translation.provider == TranslationProvider::DeepL
            && self.translation.get_api_key().is_empty()
        {
            return Err(anyhow!("Translation API key is required for DeepL provider"));
        }

        if !self.translate_comments && !self.translate_doc_comments && !self.translate_strings {
            return Err(anyhow!(
                "Nothing to translate: comments, doc comments, and strings are all disabled"
            ));
        }

        Ok(())
    }

    /// Scanner options derived from this configuration
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            symbols: self.symbols.clone(),
            comments: self.translate_comments,
            doc_comments: self.translate_doc_comments,
            strings: self.translate_strings,
        }
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            target_language: default_target_language(),
            source_language: None,
            includes: default_includes(),
            excludes: default_excludes(),
            pattern: default_pattern(),
            capitalize: true,
            symbols: Vec::new(),
            translate_comments: true,
            translate_doc_comments: true,
            translate_strings: true,
            translation: TranslationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl TranslationConfig {
    /// Get the active provider configuration from the available_providers array
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        let provider_str = self.provider.to_lowercase_string();
        self.available_providers
            .iter()
            .find(|p| p.provider_type == provider_str)
    }

    /// Get the API key for the active provider
    pub fn get_api_key(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.api_key.is_empty() {
                return provider_config.api_key.clone();
            }
        }

        String::new()
    }

    /// Get the endpoint override for the active provider
    pub fn get_endpoint(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.endpoint.is_empty() {
                return provider_config.endpoint.clone();
            }
        }

        String::new()
    }

    /// Get the request timeout for the active provider
    pub fn get_timeout_secs(&self) -> u64 {
        if let Some(provider_config) = self.get_active_provider_config() {
            if provider_config.timeout_secs > 0 {
                return provider_config.timeout_secs;
            }
        }

        default_timeout_secs()
    }

    /// Set the API key on the active provider's entry, creating it if needed
    pub fn set_api_key(&mut self, api_key: &str) {
        let provider_str = self.provider.to_lowercase_string();
        if let Some(provider_config) = self
            .available_providers
            .iter_mut()
            .find(|p| p.provider_type == provider_str)
        {
            provider_config.api_key = api_key.to_string();
        } else {
            let mut provider_config = ProviderConfig::new(self.provider.clone());
            provider_config.api_key = api_key.to_string();
            self.available_providers.push(provider_config);
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        let mut config = Self {
            provider: TranslationProvider::default(),
            available_providers: Vec::new(),
            common: TranslationCommonConfig::default(),
        };

        // Add default providers
        config.available_providers.push(ProviderConfig::new(TranslationProvider::Google));
        config.available_providers.push(ProviderConfig::new(TranslationProvider::DeepL));

        config
    }
}
