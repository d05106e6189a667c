//! Error types for reporty-api

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use reporty_core::{CoreError, DefaultErrorLogger, ErrorContext, ErrorLogger};
use thiserror::Error;

use crate::templates::render_error_page;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Internal server error")]
    InternalError,
}

impl ApiError {
    /// Log a core failure with its request context and map it to an HTTP error
    pub fn from_core(error: CoreError, context: &ErrorContext) -> Self {
        DefaultErrorLogger.log_error(&error, context);

        match error {
            CoreError::UnknownReport { report_type } => ApiError::NotFound {
                resource: format!("report type '{}'", report_type),
            },
            CoreError::MissingFilter { name } => ApiError::BadRequest {
                message: format!("the '{}' filter is not configured", name),
            },
            CoreError::Database(_) | CoreError::InternalError { .. } => ApiError::InternalError,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        ApiError::from_core(error, &ErrorContext::new("request"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Html(render_error_page(status, &self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_to_status() {
        let context = ErrorContext::new("test");

        let err = ApiError::from_core(CoreError::UnknownReport { report_type: "sales".to_string() }, &context);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert!(err.to_string().contains("sales"));

        let err = ApiError::from_core(CoreError::MissingFilter { name: "email".to_string() }, &context);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = ApiError::from(CoreError::Database(sqlx::Error::PoolTimedOut));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_internal_error_hides_cause() {
        let err = ApiError::from(CoreError::InternalError { message: "secret detail".to_string() });
        let body = err.to_string();
        assert!(!body.contains("secret detail"));
    }
}
