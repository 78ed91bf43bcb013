//! Request body limits.
//!
//! # Responsibilities
//! - Read the declared body size before touching the body
//! - Enforce the configured maximum body size
//!
//! # Design Decisions
//! - Bodies without a usable `Content-Length` are treated as empty
//! - Oversized bodies are refused from the header alone (413)

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap};

use crate::gateway::GatewayError;

/// Declared `Content-Length`, if present and numeric.
pub fn declared_content_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

/// Buffer a request body that declared a positive length of at most `limit` bytes.
pub async fn read_declared_body(
    headers: &HeaderMap,
    body: Body,
    limit: usize,
) -> Result<Bytes, GatewayError> {
    let declared = declared_content_length(headers)
        .filter(|len| *len > 0)
        .ok_or(GatewayError::EmptyBody)?;

    if declared > limit as u64 {
        return Err(GatewayError::PayloadTooLarge { limit });
    }

    axum::body::to_bytes(body, limit)
        .await
        .map_err(|e| GatewayError::BodyRead(e.to_string()))
}
