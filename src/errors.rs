/*!
 * Error types for the transrc application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to a translation backend
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors raised by the source scanner when a file cannot be classified
#[derive(Error, Debug)]
pub enum ScanError {
    /// A `/*` comment with no matching `*/`
    #[error("unterminated block comment starting at byte {0}")]
    UnterminatedBlockComment(usize),

    /// A string literal with no closing quote
    #[error("unterminated string literal starting at byte {0}")]
    UnterminatedString(usize),

    /// A raw string literal with no matching closing quote run
    #[error("unterminated raw string literal starting at byte {0}")]
    UnterminatedRawString(usize),

    /// A conditional-compilation directive that could not be parsed
    #[error("malformed preprocessor directive on line {line}: {directive}")]
    MalformedDirective {
        /// 1-based line number of the directive
        line: usize,
        /// The offending directive text
        directive: String,
    },

    /// `#elif`/`#else`/`#endif` without a matching `#if`, or `#if` left open
    #[error("unbalanced conditional directive on line {0}")]
    UnbalancedConditional(usize),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed source; the file is skipped and counted as failed
    #[error("Parse error: {0}")]
    Parse(#[from] ScanError),

    /// Translation backend failure; the file is skipped and counted as failed
    #[error("Backend error: {0}")]
    Backend(#[from] ProviderError),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid configuration; surfaced before any file is processed
    #[error("Config error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
