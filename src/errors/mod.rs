//! Error handling utilities for the undertone backend.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.
//!
//! The HTTP status mapping lives here too, next to the taxonomy it describes:
//! validation failures map to 400, unknown ids to 404, and store failures to
//! 500. Analysis errors have no `AppError` variant: they are recovered inside
//! the entry service (the entry is saved with null analysis fields) and never
//! surface as a request failure.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Represents specific error cases that can occur during mood analysis.
///
/// This enum provides detailed, contextual error information for different
/// failure modes when calling the text-generation service and interpreting
/// its reply. The variants split the two layers the caller may care about:
/// reaching the service (`Offline`, `ModelNotFound`, `InvalidResponse`) and
/// making sense of what it said (`MalformedAnalysis`).
///
/// # Examples
///
/// ```
/// use undertone::errors::AnalysisError;
///
/// let error = AnalysisError::ModelNotFound("llama3.2:3b".to_string());
/// assert!(format!("{}", error).contains("llama3.2:3b"));
/// ```
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The Ollama API is not reachable, or the request timed out.
    #[error("Ollama API error: {0}. Is Ollama running? Try: ollama serve")]
    Offline(#[source] reqwest::Error),

    /// The requested model is not available on the service.
    #[error("Model not found: {0}. Try: ollama pull {0}")]
    ModelNotFound(String),

    /// The service answered, but not with a usable chat response.
    #[error("Invalid response from Ollama: {0}")]
    InvalidResponse(String),

    /// The model replied, but the reply did not contain the expected
    /// `{"mood_score", "mood_emotion", "summary"}` JSON object.
    #[error("Malformed analysis reply: {0}")]
    MalformedAnalysis(String),
}

/// Represents specific error cases that can occur during store operations.
///
/// # Examples
///
/// ```
/// use undertone::errors::StoreError;
///
/// let error = StoreError::Corrupt("bad tags column".to_string());
/// assert!(format!("{}", error).contains("bad tags column"));
/// ```
#[derive(Debug, Error)]
pub enum StoreError {
    /// SQLite database error.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error.
    #[error("Failed to get connection from pool: {0}")]
    Pool(#[from] r2d2::Error),

    /// A stored row could not be decoded back into an entry.
    #[error("Corrupt entry data: {0}")]
    Corrupt(String),
}

/// Represents all possible errors that can occur in the undertone backend.
///
/// This enum is the central error type used across the application, with
/// variants for different error categories. It uses `thiserror` for deriving
/// the `Error` trait implementation and formatted error messages.
///
/// # Examples
///
/// Creating a validation error:
/// ```
/// use undertone::errors::AppError;
///
/// let error = AppError::Validation("title must not be empty".to_string());
/// assert_eq!(
///     format!("{}", error),
///     "Validation error: title must not be empty"
/// );
/// ```
///
/// Converting from an IO error:
/// ```
/// use undertone::errors::AppError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::AddrInUse, "address in use");
/// let app_error: AppError = io_error.into();
///
/// match app_error {
///     AppError::Io(inner) => assert_eq!(inner.kind(), ErrorKind::AddrInUse),
///     _ => panic!("Expected Io variant"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// A request carried missing, empty, or malformed input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The requested entry does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors related to store operations.
    ///
    /// This variant uses a dedicated StoreError type to provide detailed
    /// information about what went wrong with the database.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Input/output errors, e.g. binding the listen socket.
    ///
    /// This variant automatically converts from `std::io::Error` through the
    /// `From` trait.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// The HTTP status code this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Config(_) | AppError::Store(_) | AppError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // Internal failure details stay in the logs, not in the response body.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
            "internal server error".to_string()
        } else {
            self.to_string()
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// This type alias is used throughout the application to represent operations
/// that may fail with an `AppError`.
///
/// # Examples
///
/// ```
/// use undertone::errors::{AppError, AppResult};
///
/// fn might_fail() -> AppResult<String> {
///     if false {
///         return Err(AppError::Validation("empty input".to_string()));
///     }
///     Ok("operation succeeded".to_string())
/// }
/// ```
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::io;

    #[test]
    fn test_app_error_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::AddrInUse, "address in use");

        let app_error: AppError = io_error.into();

        match app_error {
            AppError::Io(inner) => {
                assert_eq!(inner.kind(), io::ErrorKind::AddrInUse);
            }
            _ => panic!("Expected AppError::Io variant"),
        }
    }

    #[test]
    fn test_app_error_display() {
        let validation_error = AppError::Validation("content must not be empty".to_string());
        assert_eq!(
            format!("{}", validation_error),
            "Validation error: content must not be empty"
        );

        let not_found = AppError::NotFound("entry 42".to_string());
        assert_eq!(format!("{}", not_found), "Not found: entry 42");

        let config_error = AppError::Config("invalid bind address".to_string());
        assert_eq!(
            format!("{}", config_error),
            "Configuration error: invalid bind address"
        );
    }

    #[test]
    fn test_store_error_conversion_to_app_error() {
        let store_error = StoreError::Corrupt("tags column is not JSON".to_string());

        let app_error: AppError = store_error.into();

        match app_error {
            AppError::Store(StoreError::Corrupt(message)) => {
                assert_eq!(message, "tags column is not JSON");
            }
            _ => panic!("Expected AppError::Store(StoreError::Corrupt) variant"),
        }
    }

    #[test]
    fn test_store_error_source_chaining() {
        let sqlite_error = rusqlite::Error::QueryReturnedNoRows;
        let store_error = StoreError::Sqlite(sqlite_error);
        let app_error = AppError::Store(store_error);

        // AppError -> StoreError -> rusqlite::Error
        let first = app_error
            .source()
            .expect("AppError::Store should have a source");
        let store_source = first
            .downcast_ref::<StoreError>()
            .expect("First source should be StoreError");
        assert!(store_source.source().is_some());
    }

    #[test]
    fn test_analysis_error_display() {
        let error = AnalysisError::ModelNotFound("llama3.2:3b".to_string());
        let message = format!("{}", error);
        assert!(message.contains("llama3.2:3b"));
        assert!(message.contains("ollama pull"));

        let error = AnalysisError::MalformedAnalysis("no JSON object in reply".to_string());
        assert!(format!("{}", error).contains("no JSON object in reply"));

        let error = AnalysisError::InvalidResponse("HTTP 500: boom".to_string());
        assert!(format!("{}", error).contains("HTTP 500"));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Store(StoreError::Corrupt("x".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Config("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_errors_redacted_in_response() {
        let response =
            AppError::Store(StoreError::Corrupt("secret path /var/db".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = AppError::NotFound("entry abc".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
