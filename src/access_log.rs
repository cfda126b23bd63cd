//! Per-file access records.
//!
//! Each fetch appends one `<timestamp> - IP: <address>` line to
//! `<collection tag>_<file name>_log.txt`. Records are write-only; nothing
//! in this crate reads them back.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Local;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::collection::Collection;
use crate::error::AccessLogError;

/// Sink for access records.
///
/// Callers are expected to discard the result after reporting it: a failed
/// record must never change the outcome of the request that produced it.
#[async_trait]
pub trait AccessLogger: Send + Sync {
    async fn record(
        &self,
        collection: Collection,
        file_name: &str,
        client_addr: &str,
    ) -> Result<(), AccessLogError>;
}

/// Appends records to plain-text files under one directory.
#[derive(Debug, Clone)]
pub struct FileAccessLogger {
    log_dir: PathBuf,
}

impl FileAccessLogger {
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
        }
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Create the log directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.log_dir).await
    }

    /// Path of the log for `(collection, file_name)`.
    ///
    /// `file_name` is the raw, still percent-encoded path segment, so it
    /// never carries a separator.
    pub fn log_path(&self, collection: Collection, file_name: &str) -> PathBuf {
        self.log_dir
            .join(format!("{}_{}_log.txt", collection.tag(), file_name))
    }
}

#[async_trait]
impl AccessLogger for FileAccessLogger {
    async fn record(
        &self,
        collection: Collection,
        file_name: &str,
        client_addr: &str,
    ) -> Result<(), AccessLogError> {
        let path = self.log_path(collection, file_name);
        let line = format_record(&timestamp(), client_addr);

        let result = async {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .await?;
            // Single write so concurrent appends do not interleave within a line.
            file.write_all(line.as_bytes()).await?;
            file.flush().await
        }
        .await;

        result.map_err(|source| AccessLogError { path, source })
    }
}

fn timestamp() -> String {
    Local::now().format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

fn format_record(timestamp: &str, client_addr: &str) -> String {
    format!("{timestamp} - IP: {client_addr}\n")
}
