//! Gateway route handlers.

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::gateway::Gateway;
use crate::observability::metrics;

/// `GET /api/yaml-files`
pub async fn list_yaml_files(gateway: &Gateway, request_id: &str) -> Response {
    let listing = gateway.list_files().await;
    tracing::debug!(request_id = %request_id, count = listing.files.len(), "Listed YAML files");

    ([(header::CACHE_CONTROL, "no-store")], Json(listing)).into_response()
}

/// `POST /api/save-yaml`
pub async fn save_yaml(gateway: &Gateway, request_id: &str, request: Request<Body>) -> Response {
    let (parts, body) = request.into_parts();

    match gateway.save(&parts.headers, body).await {
        Ok(outcome) => {
            tracing::info!(request_id = %request_id, saved = %outcome.saved, "YAML saved");
            metrics::record_save("ok");
            Json(outcome).into_response()
        }
        Err(e) => {
            if e.status_code().is_server_error() {
                tracing::error!(request_id = %request_id, error = %e, "YAML save failed");
            } else {
                tracing::warn!(request_id = %request_id, error = %e, "YAML save rejected");
            }
            metrics::record_save(e.kind());
            e.into_response()
        }
    }
}
