//! Structured error handling for the analytics engine.
//!
//! Errors carry a machine-readable code, a human-readable message and
//! key/value context, and can be flattened into a serializable body for
//! whatever transport the request layer speaks.
//!
//! Two conditions are deliberately *not* errors: an empty result set for a
//! range degrades to zero/empty aggregates, and a cache problem degrades to
//! recomputation.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ledger::LedgerError;

/// Error codes for the analytics engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Non-positive price or quantity, or otherwise malformed input.
    InvalidInput,
    /// Range query with start after end.
    InvalidRange,
    /// The ledger collaborator could not serve the fetch; transient.
    LedgerUnavailable,
    /// Unexpected internal fault (serialization bugs and the like).
    InternalError,
}

impl ErrorCode {
    /// Get the error reason string for boundary payloads.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidInput => "INVALID_INPUT",
            Self::InvalidRange => "INVALID_RANGE",
            Self::LedgerUnavailable => "LEDGER_UNAVAILABLE",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Whether the caller may retry the same request later.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::LedgerUnavailable)
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

/// A rich error with context for the analytics engine.
#[derive(Debug, Error)]
pub struct AnalyticsError {
    /// Error code.
    code: ErrorCode,
    /// Human-readable message.
    message: String,
    /// Additional context (key-value pairs).
    context: Vec<(String, String)>,
}

impl AnalyticsError {
    /// Create a new error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: Vec::new(),
        }
    }

    /// Add context to the error.
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.push((key.into(), value.into()));
        self
    }

    /// Get the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the context.
    #[must_use]
    pub fn context(&self) -> &[(String, String)] {
        &self.context
    }

    /// Flatten into a serializable boundary body.
    #[must_use]
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            code: self.code.reason().to_string(),
            message: self.message.clone(),
            transient: self.code.is_transient(),
            details: self.context.iter().cloned().collect(),
        }
    }
}

impl std::fmt::Display for AnalyticsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.reason(), self.message)
    }
}

/// Serializable error body handed to the request layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Error code string.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Whether the caller may retry.
    pub transient: bool,
    /// Additional details.
    pub details: HashMap<String, String>,
}

/// Convenience constructors for common errors.
impl AnalyticsError {
    /// Malformed input value.
    #[must_use]
    pub fn invalid_input(field: &str, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message).with_context("field", field)
    }

    /// Range with start after end.
    #[must_use]
    pub fn invalid_range(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(
            ErrorCode::InvalidRange,
            format!("range start {start} is after end {end}"),
        )
        .with_context("start", start.to_string())
        .with_context("end", end.to_string())
    }

    /// Internal fault.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl From<LedgerError> for AnalyticsError {
    fn from(err: LedgerError) -> Self {
        Self::new(ErrorCode::LedgerUnavailable, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AnalyticsError::invalid_input("quantity", "quantity must be positive");
        assert_eq!(err.to_string(), "[INVALID_INPUT] quantity must be positive");
    }

    #[test]
    fn test_context_accumulates() {
        let err = AnalyticsError::internal("boom")
            .with_context("op", "dashboard")
            .with_context("user_id", "u-1");
        assert_eq!(err.context().len(), 2);
    }

    #[test]
    fn test_ledger_error_maps_to_transient() {
        let err: AnalyticsError = LedgerError::Unavailable {
            message: "connection refused".to_string(),
        }
        .into();
        assert_eq!(err.code(), ErrorCode::LedgerUnavailable);
        assert!(err.code().is_transient());
    }

    #[test]
    fn test_to_body() {
        let err = AnalyticsError::invalid_range(
            NaiveDate::from_ymd_opt(2026, 7, 2).unwrap(),
            NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
        );
        let body = err.to_body();
        assert_eq!(body.code, "INVALID_RANGE");
        assert!(!body.transient);
        assert!(body.details.contains_key("start"));
    }
}
