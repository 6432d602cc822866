//! Unified error types for the lab record service.

use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Startup and runtime errors outside of request handling.
#[derive(Error, Debug)]
pub enum LabError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Data file could not be read.
    #[error("failed to read data file {path}: {source}")]
    DataSource {
        /// Path of the data file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Data file is not a valid lab record document.
    #[error("failed to parse data file {path}: {source}")]
    DataFormat {
        /// Path of the data file.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Errors returned by query operations. Each maps to a client-error response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// A required query parameter was absent or empty.
    #[error("missing required query parameter '{0}'")]
    MissingParameter(&'static str),

    /// No route matched the request path.
    #[error("no route for {0}")]
    NotFound(String),
}

impl QueryError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            QueryError::MissingParameter(_) => StatusCode::BAD_REQUEST,
            QueryError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Stable machine-readable kind.
    pub fn kind(&self) -> &'static str {
        match self {
            QueryError::MissingParameter(_) => "missing_parameter",
            QueryError::NotFound(_) => "not_found",
        }
    }
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Error kind.
    pub error: &'static str,
    /// Human-readable message.
    pub message: String,
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.kind(),
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, LabError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_parameter_is_bad_request() {
        let err = QueryError::MissingParameter("LabName");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.kind(), "missing_parameter");
        assert_eq!(err.to_string(), "missing required query parameter 'LabName'");
    }

    #[test]
    fn not_found_is_404() {
        let err = QueryError::NotFound("/Foo".to_string());
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
