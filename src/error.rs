use std::fmt;

use rusqlite;
use serde_json::Value as JsonValue;
use thiserror::Error;
use tracing::{error, warn};

pub type AppResult<T> = Result<T, AppError>;

/// User-facing message for every inference failure. The caller retries the
/// whole flow; the specific cause only reaches the logs.
pub const ANALYSIS_FAILED_MESSAGE: &str = "Failed to analyze image. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisErrorCode {
    HttpTimeout,
    InferenceUnavailable,
    InvalidResponse,
    InvalidRequest,
    Unknown,
}

impl AnalysisErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            AnalysisErrorCode::HttpTimeout => "HTTP_TIMEOUT",
            AnalysisErrorCode::InferenceUnavailable => "INFERENCE_UNAVAILABLE",
            AnalysisErrorCode::InvalidResponse => "INVALID_RESPONSE",
            AnalysisErrorCode::InvalidRequest => "INVALID_REQUEST",
            AnalysisErrorCode::Unknown => "ANALYSIS_FAILED",
        }
    }
}

impl fmt::Display for AnalysisErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("database error: {message}")]
    Database { message: String },

    #[error("record not found")]
    NotFound,

    #[error("record conflict: {message}")]
    Conflict { message: String },

    #[error("validation failed: {message}")]
    Validation {
        message: String,
        details: Option<JsonValue>,
    },

    #[error("{message}")]
    Analysis {
        code: AnalysisErrorCode,
        message: String,
        correlation_id: Option<String>,
        details: Option<JsonValue>,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!(target: "app::validation", %message, "validation error");
        AppError::Validation {
            message,
            details: None,
        }
    }

    pub fn validation_with_details(message: impl Into<String>, details: JsonValue) -> Self {
        let message = message.into();
        warn!(target: "app::validation", %message, details = %details, "validation error with details");
        AppError::Validation {
            message,
            details: Some(details),
        }
    }

    /// Inference failure. `cause` is logged and kept in `details`; the
    /// displayed message is always [`ANALYSIS_FAILED_MESSAGE`].
    pub fn analysis_with_details(
        code: AnalysisErrorCode,
        cause: impl Into<String>,
        correlation_id: Option<&str>,
        details: Option<JsonValue>,
    ) -> Self {
        let cause = cause.into();
        let correlation = correlation_id.map(|value| value.to_string());
        match &correlation {
            Some(id) => {
                warn!(
                    target: "app::analysis::error",
                    code = %code,
                    correlation_id = %id,
                    %cause
                );
            }
            None => {
                warn!(target: "app::analysis::error", code = %code, %cause);
            }
        }

        let mut merged = match details {
            Some(JsonValue::Object(map)) => map,
            Some(other) => {
                let mut map = serde_json::Map::new();
                map.insert("info".to_string(), other);
                map
            }
            None => serde_json::Map::new(),
        };
        merged.insert("cause".to_string(), JsonValue::String(cause));

        AppError::Analysis {
            code,
            message: ANALYSIS_FAILED_MESSAGE.to_string(),
            correlation_id: correlation,
            details: Some(JsonValue::Object(merged)),
        }
    }

    pub fn analysis_code(&self) -> Option<AnalysisErrorCode> {
        match self {
            AppError::Analysis { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn analysis_correlation_id(&self) -> Option<&str> {
        match self {
            AppError::Analysis { correlation_id, .. } => correlation_id.as_deref(),
            _ => None,
        }
    }

    pub fn analysis_details(&self) -> Option<&JsonValue> {
        match self {
            AppError::Analysis { details, .. } => details.as_ref(),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation { .. })
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!(target: "app::conflict", %message, "conflict error");
        AppError::Conflict { message }
    }

    pub fn not_found() -> Self {
        warn!(target: "app::database", "resource not found");
        AppError::NotFound
    }

    pub fn database(message: impl Into<String>) -> Self {
        let message = message.into();
        error!(target: "app::database", %message, "database error");
        AppError::Database { message }
    }

    pub fn other(message: impl Into<String>) -> Self {
        let message = message.into();
        error!(target: "app::other", %message, "other error");
        AppError::Other(message)
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(error: rusqlite::Error) -> Self {
        use rusqlite::Error::{QueryReturnedNoRows, SqliteFailure};
        use rusqlite::ErrorCode;

        match &error {
            QueryReturnedNoRows => AppError::not_found(),
            SqliteFailure(err, _) if err.code == ErrorCode::ConstraintViolation => {
                AppError::conflict("unique or check constraint violated")
            }
            _ => {
                error!(target: "app::database", error = ?error, "sqlite error");
                AppError::database(error.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_errors_hide_cause_behind_generic_message() {
        let error = AppError::analysis_with_details(
            AnalysisErrorCode::InferenceUnavailable,
            "connection refused",
            Some("corr-1"),
            Some(serde_json::json!({ "status": 503 })),
        );

        assert_eq!(error.to_string(), ANALYSIS_FAILED_MESSAGE);
        assert_eq!(
            error.analysis_code(),
            Some(AnalysisErrorCode::InferenceUnavailable)
        );
        assert_eq!(error.analysis_correlation_id(), Some("corr-1"));

        let details = error.analysis_details().expect("details present");
        assert_eq!(details["cause"], "connection refused");
        assert_eq!(details["status"], 503);
    }

    #[test]
    fn validation_errors_are_flagged() {
        let error = AppError::validation("Please select an image file");
        assert!(error.is_validation());
        assert_eq!(
            error.to_string(),
            "validation failed: Please select an image file"
        );
    }
}
