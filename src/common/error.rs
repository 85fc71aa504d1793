//! Error types for the auth-smoke CLI
//!
//! Assertion errors carry the step name and an expected-vs-actual
//! diagnostic so a failed run names exactly which part of the contract
//! the service broke.

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the auth-smoke CLI
#[derive(Error, Debug)]
pub enum Error {
    // === HTTP Errors ===
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    // === Assertion Errors ===
    #[error("{step}: expected status {expected}, got {actual}")]
    UnexpectedStatus {
        step: &'static str,
        expected: u16,
        actual: u16,
    },

    #[error("{step}: {detail}")]
    Assertion { step: &'static str, detail: String },

    #[error("{step}: no '{cookie}' cookie in response")]
    MissingCookie {
        step: &'static str,
        cookie: &'static str,
    },

    #[error("{step}: missing '{field}' in response body: {body}")]
    MissingField {
        step: &'static str,
        field: &'static str,
        body: String,
    },

    #[error("Scenario failed after {steps_run}/{steps_total} steps: {detail}")]
    ScenarioFailed {
        steps_run: usize,
        steps_total: usize,
        detail: String,
    },

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),
}

impl Error {
    /// Create an assertion error for a named scenario step
    pub fn assertion(step: &'static str, detail: impl Into<String>) -> Self {
        Self::Assertion {
            step,
            detail: detail.into(),
        }
    }

    /// Create a status mismatch error for a named scenario step
    pub fn unexpected_status(
        step: &'static str,
        expected: reqwest::StatusCode,
        actual: reqwest::StatusCode,
    ) -> Self {
        Self::UnexpectedStatus {
            step,
            expected: expected.as_u16(),
            actual: actual.as_u16(),
        }
    }

}
