//! Gateway error definitions and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::gateway::resolver::PathRejection;

/// Errors a gateway request can end in.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No `Content-Length`, or a zero one.
    #[error("empty body: a JSON body is required")]
    EmptyBody,

    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("cannot read request body: {0}")]
    BodyRead(String),

    #[error("malformed body: {0}")]
    MalformedBody(String),

    #[error("invalid path: {0}")]
    InvalidPath(#[from] PathRejection),

    #[error("missing yaml field: 'yaml' must be a string")]
    MissingYaml,

    /// The filesystem refused the write. Carries the OS error text.
    #[error("write failed for {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            GatewayError::Write { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::EmptyBody
            | GatewayError::BodyRead(_)
            | GatewayError::MalformedBody(_)
            | GatewayError::InvalidPath(_)
            | GatewayError::MissingYaml => StatusCode::BAD_REQUEST,
        }
    }

    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::EmptyBody => "empty_body",
            GatewayError::PayloadTooLarge { .. } => "too_large",
            GatewayError::BodyRead(_) => "body_read",
            GatewayError::MalformedBody(_) => "malformed_body",
            GatewayError::InvalidPath(_) => "invalid_path",
            GatewayError::MissingYaml => "missing_yaml",
            GatewayError::Write { .. } => "write_failed",
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}
