//! Server initialization and routing
//!
//! This module handles the Axum server setup including:
//! - Router configuration for the collection endpoints
//! - Middleware stack (request IDs, logging, CORS)
//! - Access-log directory bootstrap
//! - Graceful shutdown handling

use crate::config::ServerConfig;
use crate::middleware::{log_requests, request_id};
use crate::routes::{api_info, files, health, not_found};
use crate::state::ServerState;
use axum::middleware::from_fn;
use axum::routing::get;
use axum::Router;
use docshelf::{Collection, FileAccessLogger};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the Axum router with all routes and middleware
///
/// Middleware stack (outermost first):
/// 1. HTTP tracing
/// 2. Request ID tracking
/// 3. Request logging
/// 4. CORS
pub fn build_router(state: Arc<ServerState>) -> Router {
    let cors = if state.config.enable_cors {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
    };

    Router::new()
        .route("/", get(api_info))
        .route("/health", get(health::health_check))
        // Norms
        .route("/allFiles", get(files::list_norms))
        .route("/file/Norms/{file_name}", get(files::serve_norms_file))
        // Knowledge base
        .route("/allKnowledgeBaseFiles", get(files::list_knowledge_base))
        .route(
            "/file/KnowledgeBase/{file_name}",
            get(files::serve_knowledge_base_file),
        )
        .fallback(not_found)
        .layer(cors)
        .layer(from_fn(log_requests))
        .layer(from_fn(request_id))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Install the global tracing subscriber
pub fn init_tracing(config: &ServerConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(config.log_level.as_str())
        .with_target(false);

    if config.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Start the docshelf HTTP server
///
/// Creates the access-log directory, binds the configured address and
/// serves until SIGTERM or Ctrl+C. Tracing must already be initialized.
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    let access_log = FileAccessLogger::new(config.collections.log_dir.clone());
    access_log.ensure_dir().await?;

    let addr: SocketAddr = config.socket_addr()?;

    for collection in Collection::ALL {
        match config.collections.directory(collection) {
            Some(dir) => tracing::info!(
                collection = %collection,
                directory = %dir.display(),
                "collection bound"
            ),
            None => tracing::warn!(collection = %collection, "collection has no directory"),
        }
    }
    tracing::info!(
        "Access logs: {}, CORS: {}",
        access_log.log_dir().display(),
        config.enable_cors
    );

    let state = Arc::new(ServerState::new(config));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server is running on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Shutdown signal handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to install SIGTERM handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
