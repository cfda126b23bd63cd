//! docshelf server - HTTP access to the Norms and KnowledgeBase collections
//!
//! Exposes the `docshelf` core over four read-only routes plus a health
//! probe. CORS is open to every origin by default.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::init_tracing(&config);
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /allFiles` - list the Norms collection
//! - `GET /file/Norms/{fileName}` - stream one Norms file
//! - `GET /allKnowledgeBaseFiles` - list the KnowledgeBase collection
//! - `GET /file/KnowledgeBase/{fileName}` - stream one KnowledgeBase file
//! - `GET /health` - liveness probe
//! - `GET /` - service information
//!
//! Listings answer `{"files": [FileEntry]}`. Failures answer 400 with a
//! plain-text body when a collection has no directory or the file name is
//! rejected, and 500 with `{"error", "details"}` on any filesystem error,
//! including a missing file.

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, init_tracing, start_server};
pub use state::ServerState;
