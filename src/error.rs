//! Engine error taxonomy.
//!
//! Only genuine caller mistakes surface as errors. Data-level conditions
//! (nothing to group, unknown alias, placement search exhausted) come back as
//! ordinary result fields instead.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use uuid::Uuid;

/// Grepable error code for callers that forward failures to clients.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SpatialError {
    #[error("cannot frame an empty selection")]
    EmptySelection,
    #[error("unknown grouping strategy: {0}")]
    UnknownStrategy(String),
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    #[error("invalid tool input: {0}")]
    InvalidInput(String),
    #[error("session not found: {0}")]
    SessionNotFound(Uuid),
}

impl ErrorCode for SpatialError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptySelection => "E_EMPTY_SELECTION",
            Self::UnknownStrategy(_) => "E_UNKNOWN_STRATEGY",
            Self::UnknownTool(_) => "E_UNKNOWN_TOOL",
            Self::InvalidInput(_) => "E_INVALID_INPUT",
            Self::SessionNotFound(_) => "E_SESSION_NOT_FOUND",
        }
    }
}

impl From<serde_json::Error> for SpatialError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidInput(e.to_string())
    }
}
