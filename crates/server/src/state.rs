use crate::config::ServerConfig;
use docshelf::{AccessLogger, CollectionsConfig, FileAccessLogger, FileStreamer};
use std::sync::Arc;
use std::time::Instant;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Collection bindings, shared with the streamer
    pub collections: Arc<CollectionsConfig>,

    /// Resolves and opens files, recording each access
    pub streamer: FileStreamer,

    /// Process start, for uptime reporting
    pub started_at: Instant,
}

impl ServerState {
    /// Create new server state with a file-backed access logger
    pub fn new(config: ServerConfig) -> Self {
        let logger = Arc::new(FileAccessLogger::new(config.collections.log_dir.clone()));
        Self::with_logger(config, logger)
    }

    /// Create server state around a custom access logger
    pub fn with_logger(config: ServerConfig, logger: Arc<dyn AccessLogger>) -> Self {
        let collections = Arc::new(config.collections.clone());
        let streamer = FileStreamer::new(collections.clone(), logger);

        Self {
            config: Arc::new(config),
            collections,
            streamer,
            started_at: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
