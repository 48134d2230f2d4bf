use std::fmt;

use thiserror::Error;

/// Reason attached to a failed connectivity probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeFailure {
    BadRequest,
    Unauthorized,
    Unknown,
}

impl ProbeFailure {
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => ProbeFailure::BadRequest,
            401 => ProbeFailure::Unauthorized,
            _ => ProbeFailure::Unknown,
        }
    }
}

impl fmt::Display for ProbeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            ProbeFailure::BadRequest => "Bad request",
            ProbeFailure::Unauthorized => "Unauthorized",
            ProbeFailure::Unknown => "Unknown",
        };
        f.write_str(reason)
    }
}

#[derive(Error, Debug)]
pub enum JiraError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{message} (HTTP {status}): {body}")]
    Http {
        message: String,
        status: u16,
        body: String,
    },

    #[error("{0}")]
    NotFound(String),

    #[error("Reporting failed: {0}")]
    Reporting(String),

    #[error("HTTP response code {status}, reason {reason}")]
    Connectivity { status: u16, reason: ProbeFailure },

    #[error("URL is not valid: {0}")]
    InvalidUrl(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl JiraError {
    /// Unexpected HTTP status, keeping the raw body for diagnostics.
    pub fn http(message: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        JiraError::Http {
            message: message.into(),
            status,
            body: body.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            JiraError::Http { status, .. } | JiraError::Connectivity { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

pub type JiraResult<T> = Result<T, JiraError>;

pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> JiraResult<T>;
    fn with_context<F>(self, f: F) -> JiraResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error + 'static,
{
    fn context(self, msg: &str) -> JiraResult<T> {
        self.map_err(|e| JiraError::Unknown(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> JiraResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| JiraError::Unknown(format!("{}: {}", f(), e)))
    }
}
