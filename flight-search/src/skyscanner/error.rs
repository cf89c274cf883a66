//! Search API client error types.

use std::fmt;

/// Errors from the search API HTTP client.
#[derive(Debug)]
pub enum ApiError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    Api { status: u16, message: String },

    /// Rate limited by the API
    RateLimited,

    /// Invalid API key or unauthorized
    Unauthorized,
}

impl ApiError {
    /// Whether retrying the same request later might succeed.
    ///
    /// Network failures, rate limiting and server-side errors are transient.
    /// Authorization failures, client errors and undecodable bodies are not.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Http(_) | ApiError::RateLimited => true,
            ApiError::Api { status, .. } => *status >= 500,
            ApiError::Json { .. } | ApiError::Unauthorized => false,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Http(e) => write!(f, "HTTP error: {e}"),
            ApiError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            ApiError::Api { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            ApiError::RateLimited => write!(f, "rate limited by search API"),
            ApiError::Unauthorized => write!(f, "unauthorized (invalid API key)"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Http(err)
    }
}
