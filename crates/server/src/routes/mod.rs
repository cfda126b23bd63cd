//! API route handlers
//!
//! - `files`: collection listings and single-file streaming
//! - `health`: liveness probe

pub mod files;
pub mod health;

use crate::error::ServerError;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// Service name, version and routes. `GET /`
pub async fn api_info() -> impl IntoResponse {
    Json(json!({
        "name": "docshelf",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/allFiles",
            "/file/Norms/{fileName}",
            "/allKnowledgeBaseFiles",
            "/file/KnowledgeBase/{fileName}",
            "/health"
        ]
    }))
}

/// 404 Not Found handler
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
