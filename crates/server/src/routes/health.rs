use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use docshelf::Collection;
use serde_json::{json, Map, Value};
use std::sync::Arc;

/// Health check endpoint (liveness)
///
/// Always 200 while the process is serving. `collections` reports whether
/// each bound directory currently exists; an unbound collection reports
/// `false`.
pub async fn health_check(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let mut collections = Map::new();
    for collection in Collection::ALL {
        let present = match state.collections.directory(collection) {
            Some(dir) => tokio::fs::metadata(dir)
                .await
                .map(|meta| meta.is_dir())
                .unwrap_or(false),
            None => false,
        };
        collections.insert(collection.tag().to_string(), Value::Bool(present));
    }

    Json(json!({
        "status": "healthy",
        "service": "docshelf-server",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": state.uptime_seconds(),
        "collections": collections,
    }))
}
