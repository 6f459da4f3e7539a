//! Error types for suburbweb-core
//!
//! Every failure a dashboard request can hit maps to one `CoreError`.
//! Its `Display` text is the message shown to the user in place of data.

use serde::{Deserialize, Serialize};
use suburbweb_client::ClientError;
use thiserror::Error;

use crate::endpoint::Endpoint;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Endpoint key is not known
    UnknownEndpoint,
    /// Suburb input rejected
    InvalidSuburb,
    /// Data service unreachable
    Transport,
    /// Data service did not answer in time
    UpstreamTimeout,
    /// Data service answered with a non-success status
    UpstreamStatus,
    /// Body was not JSON or had an unexpected shape
    MalformedResponse,
    /// No rows to summarise
    EmptyResult,
    /// Startup configuration error
    ConfigError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::UnknownEndpoint => write!(f, "UNKNOWN_ENDPOINT"),
            ErrorCode::InvalidSuburb => write!(f, "INVALID_SUBURB"),
            ErrorCode::Transport => write!(f, "TRANSPORT"),
            ErrorCode::UpstreamTimeout => write!(f, "UPSTREAM_TIMEOUT"),
            ErrorCode::UpstreamStatus => write!(f, "UPSTREAM_STATUS"),
            ErrorCode::MalformedResponse => write!(f, "MALFORMED_RESPONSE"),
            ErrorCode::EmptyResult => write!(f, "EMPTY_RESULT"),
            ErrorCode::ConfigError => write!(f, "CONFIG_ERROR"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    /// Add detail information
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Expected outcome, e.g. a suburb with no listings
    Info,
    /// Caller supplied bad input
    Warning,
    /// The request failed
    Error,
    /// The application cannot start
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Main error type for suburbweb-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Unknown endpoint: '{key}'")]
    UnknownEndpoint { key: String },

    #[error("Invalid suburb: {reason}")]
    InvalidSuburb { reason: String },

    #[error("Error fetching data: {source}")]
    Fetch {
        #[from]
        source: ClientError,
    },

    #[error("Error fetching data: unexpected response shape ({message})")]
    MalformedResponse { message: String },

    #[error("{message}")]
    EmptyResult { endpoint: Endpoint, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

impl CoreError {
    /// The "nothing found" error for an endpoint
    pub fn empty(endpoint: Endpoint) -> Self {
        CoreError::EmptyResult {
            endpoint,
            message: endpoint.empty_message().to_string(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        CoreError::MalformedResponse { message: message.into() }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::UnknownEndpoint { .. } => ErrorCode::UnknownEndpoint,
            CoreError::InvalidSuburb { .. } => ErrorCode::InvalidSuburb,
            CoreError::Fetch { source } => match source {
                ClientError::Timeout { .. } => ErrorCode::UpstreamTimeout,
                ClientError::Status { .. } => ErrorCode::UpstreamStatus,
                ClientError::InvalidJson { .. } => ErrorCode::MalformedResponse,
                ClientError::Transport { .. } | ClientError::Build { .. } => ErrorCode::Transport,
            },
            CoreError::MalformedResponse { .. } => ErrorCode::MalformedResponse,
            CoreError::EmptyResult { .. } => ErrorCode::EmptyResult,
            CoreError::ConfigError { .. } => ErrorCode::ConfigError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self.code() {
            ErrorCode::EmptyResult => ErrorSeverity::Info,
            ErrorCode::UnknownEndpoint | ErrorCode::InvalidSuburb => ErrorSeverity::Warning,
            ErrorCode::ConfigError => ErrorSeverity::Critical,
            _ => ErrorSeverity::Error,
        }
    }

    /// Rejected before any remote call was made
    pub fn is_validation(&self) -> bool {
        matches!(self, CoreError::UnknownEndpoint { .. } | CoreError::InvalidSuburb { .. })
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::UnknownEndpoint { key } => {
                details = details.with_detail(serde_json::json!({
                    "key": key,
                    "known": Endpoint::ALL.iter().map(|e| e.key()).collect::<Vec<_>>(),
                }));
                details = details.with_suggestion(
                    "Use the /api/endpoints endpoint to list the accepted keys.".to_string()
                );
            }
            CoreError::InvalidSuburb { .. } => {
                details = details.with_suggestion(
                    "Enter a suburb name such as 'Belmont North'.".to_string()
                );
            }
            CoreError::Fetch { source: ClientError::Status { status, body } } => {
                details = details.with_detail(serde_json::json!({
                    "status": status,
                    "body": body,
                }));
            }
            CoreError::Fetch { source: ClientError::Timeout { .. } } => {
                details = details.with_suggestion(
                    "The data service is slow; try again shortly.".to_string()
                );
            }
            CoreError::EmptyResult { .. } => {
                details = details.with_suggestion(
                    "Check the suburb spelling or try another category.".to_string()
                );
            }
            _ => {}
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

/// Error context for reporting
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// Operation being performed
    pub operation: String,
    /// Additional context data
    pub data: serde_json::Value,
}

impl ErrorContext {
    /// Create a new error context
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            data: serde_json::json!({}),
        }
    }

    /// Add context data
    pub fn with_data(mut self, key: &str, value: serde_json::Value) -> Self {
        self.data[key] = value;
        self
    }
}

/// Error logger trait
pub trait ErrorLogger: Send + Sync {
    /// Log an error
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Debug, Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        let level = match error.severity() {
            ErrorSeverity::Info => log::Level::Info,
            ErrorSeverity::Warning => log::Level::Warn,
            ErrorSeverity::Error | ErrorSeverity::Critical => log::Level::Error,
        };
        log::log!(
            target: "suburbweb::error",
            level,
            "[{}] {} - Operation: {} - Context: {}",
            error.code(),
            error,
            context.operation,
            context.data
        );
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::UnknownEndpoint.to_string(), "UNKNOWN_ENDPOINT");
        assert_eq!(ErrorCode::UpstreamTimeout.to_string(), "UPSTREAM_TIMEOUT");
        assert_eq!(ErrorCode::EmptyResult.to_string(), "EMPTY_RESULT");
    }

    #[test]
    fn test_empty_result_message_is_literal() {
        let error = CoreError::empty(Endpoint::Properties);
        assert_eq!(error.to_string(), "No properties found.");
        assert_eq!(error.code(), ErrorCode::EmptyResult);
        assert_eq!(error.severity(), ErrorSeverity::Info);
    }

    #[test]
    fn test_fetch_errors_are_prefixed() {
        let error = CoreError::from(ClientError::Timeout { secs: 10 });
        assert_eq!(error.to_string(), "Error fetching data: request timed out after 10s");
        assert_eq!(error.code(), ErrorCode::UpstreamTimeout);

        let error = CoreError::from(ClientError::Status { status: 503, body: String::new() });
        assert_eq!(error.code(), ErrorCode::UpstreamStatus);
        assert!(error.to_string().starts_with("Error fetching data:"));
    }

    #[test]
    fn test_validation_errors() {
        let error = CoreError::UnknownEndpoint { key: "weather".to_string() };
        assert!(error.is_validation());
        assert_eq!(error.severity(), ErrorSeverity::Warning);

        let details = error.to_details();
        assert!(details.details.is_some());
        assert!(!details.suggestions.is_empty());

        assert!(!CoreError::empty(Endpoint::Schools).is_validation());
    }

    #[test]
    fn test_status_details_carry_body() {
        let error = CoreError::from(ClientError::Status { status: 401, body: "bad token".to_string() });
        let details = error.to_details();
        assert_eq!(details.details.unwrap()["status"], 401);
    }

    #[test]
    fn test_error_context() {
        let context = ErrorContext::new("dashboard.run")
            .with_data("suburb", serde_json::json!("Belmont North"));
        assert_eq!(context.operation, "dashboard.run");
        assert_eq!(context.data["suburb"], "Belmont North");
    }
}
