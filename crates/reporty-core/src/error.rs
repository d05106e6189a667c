//! Error types for reporty-core
//!
//! Errors carry a stable code and a severity so the HTTP layer can map them
//! to status codes and decide how loudly to log them.

use thiserror::Error;
use serde::Serialize;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No report registered under the requested key
    UnknownReport,
    /// A report was run without a filter it needs
    MissingFilter,
    /// Query or connection failure
    DatabaseError,
    /// Internal error
    InternalError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::UnknownReport => write!(f, "UNKNOWN_REPORT"),
            ErrorCode::MissingFilter => write!(f, "MISSING_FILTER"),
            ErrorCode::DatabaseError => write!(f, "DATABASE_ERROR"),
            ErrorCode::InternalError => write!(f, "INTERNAL_ERROR"),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Informational, the caller asked for something that does not exist
    Info,
    /// Warning - operation may be affected
    Warning,
    /// Error - operation failed
    Error,
    /// Critical - application may be unstable
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

/// Detailed error information
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            suggestions: vec![],
        }
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Main error type for reporty-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Unknown report type: {report_type}")]
    UnknownReport { report_type: String },

    #[error("Missing report filter: {name}")]
    MissingFilter { name: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::UnknownReport { .. } => ErrorCode::UnknownReport,
            CoreError::MissingFilter { .. } => ErrorCode::MissingFilter,
            CoreError::Database(_) => ErrorCode::DatabaseError,
            CoreError::InternalError { .. } => ErrorCode::InternalError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::UnknownReport { .. } => ErrorSeverity::Info,
            CoreError::MissingFilter { .. } => ErrorSeverity::Warning,
            CoreError::Database(_) => ErrorSeverity::Error,
            CoreError::InternalError { .. } => ErrorSeverity::Critical,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::UnknownReport { .. } => details
                .with_suggestion("Pick a report from the /admin/reports/ menu.".to_string()),
            CoreError::MissingFilter { name } => details.with_suggestion(format!(
                "Set reports.filters.{} in the configuration file.",
                name
            )),
            CoreError::Database(_) => details
                .with_suggestion("Check database.url and that the auth tables exist.".to_string()),
            CoreError::InternalError { .. } => details,
        }
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation being performed
    pub operation: String,
    /// Request path, when the error happened while serving HTTP
    pub path: Option<String>,
    /// Signed in user, if any
    pub user: Option<String>,
}

impl ErrorContext {
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            ..Default::default()
        }
    }

    pub fn with_path(mut self, path: &str) -> Self {
        self.path = Some(path.to_string());
        self
    }

    pub fn with_user(mut self, user: &str) -> Self {
        self.user = Some(user.to_string());
        self
    }
}

/// Error logger trait
pub trait ErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
}

/// Default error logger using log crate, level picked from the severity
#[derive(Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        let level = match error.severity() {
            ErrorSeverity::Info => log::Level::Info,
            ErrorSeverity::Warning => log::Level::Warn,
            ErrorSeverity::Error | ErrorSeverity::Critical => log::Level::Error,
        };
        log::log!(
            target: "reporty::error",
            level,
            "[{}] {} - Operation: {} - Path: {:?} - User: {:?}",
            error.code(),
            error,
            context.operation,
            context.path,
            context.user
        );
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::UnknownReport.to_string(), "UNKNOWN_REPORT");
        assert_eq!(ErrorCode::MissingFilter.to_string(), "MISSING_FILTER");
        assert_eq!(ErrorCode::DatabaseError.to_string(), "DATABASE_ERROR");
    }

    #[test]
    fn test_core_error_code_and_severity() {
        let error = CoreError::UnknownReport { report_type: "sales".to_string() };
        assert_eq!(error.code(), ErrorCode::UnknownReport);
        assert_eq!(error.severity(), ErrorSeverity::Info);

        let error = CoreError::Database(sqlx::Error::RowNotFound);
        assert_eq!(error.code(), ErrorCode::DatabaseError);
        assert_eq!(error.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_missing_filter_details() {
        let error = CoreError::MissingFilter { name: "email".to_string() };
        let details = error.to_details();

        assert_eq!(details.code, ErrorCode::MissingFilter);
        assert!(details.message.contains("email"));
        assert!(details.suggestions[0].contains("reports.filters.email"));
    }

    #[test]
    fn test_error_context() {
        let context = ErrorContext::new("show_report")
            .with_path("/admin/reports/email/")
            .with_user("admin");

        assert_eq!(context.operation, "show_report");
        assert_eq!(context.path.as_deref(), Some("/admin/reports/email/"));
        assert_eq!(context.user.as_deref(), Some("admin"));
    }
}
