//! Core of the docshelf document server.
//!
//! Two read-only collections, `NORMS` and `KnowledgeBase`, are each bound to
//! a directory at start-up. This crate lists those directories, resolves and
//! opens individual files for streaming, and appends an access record for
//! every fetch. It knows nothing about HTTP; the `docshelf-server` crate maps
//! these operations onto routes.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use docshelf::{Collection, CollectionsConfig, FileAccessLogger, FileStreamer};
//!
//! # async fn demo() -> Result<(), docshelf::ShelfError> {
//! let config = Arc::new(CollectionsConfig::new("Norms", "KnowledgeBase", "logs"));
//! let files = docshelf::list_collection(&config, Collection::Norms).await?;
//! println!("{} norms", files.len());
//!
//! let logger = Arc::new(FileAccessLogger::new(config.log_dir.clone()));
//! let streamer = FileStreamer::new(config, logger);
//! let opened = streamer.open(Collection::Norms, "policy-A.pdf", "127.0.0.1").await?;
//! println!("{}", opened.content_type);
//! # Ok(())
//! # }
//! ```

pub mod access_log;
pub mod collection;
pub mod config;
pub mod error;
pub mod lister;
pub mod streamer;

pub use access_log::{AccessLogger, FileAccessLogger};
pub use collection::{Collection, FileEntry};
pub use config::CollectionsConfig;
pub use error::{AccessLogError, ShelfError, ShelfResult};
pub use lister::{list_collection, list_directory};
pub use streamer::{
    FileStreamer, OpenedFile, content_disposition, content_type_for, decode_file_name,
    resolve_path, sanitize_file_name,
};
