use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::collection::Collection;

/// Errors raised while listing or resolving files inside a collection.
#[derive(Debug, Error)]
pub enum ShelfError {
    /// The collection has no directory bound to it.
    #[error("no directory configured for collection {0}")]
    CollectionUnconfigured(Collection),

    /// The requested name is empty, not valid percent-encoded UTF-8, or
    /// names something other than a direct child of the collection.
    #[error("invalid file name {0:?}")]
    InvalidFileName(String),

    /// The resolved path escapes the collection directory.
    #[error("{} is outside collection {collection}", path.display())]
    OutsideCollection {
        collection: Collection,
        path: PathBuf,
    },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl ShelfError {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        ShelfError::Io {
            context: context.into(),
            source,
        }
    }

    /// The bare message of the underlying I/O failure, if this is one.
    pub fn io_message(&self) -> Option<String> {
        match self {
            ShelfError::Io { source, .. } => Some(source.to_string()),
            _ => None,
        }
    }
}

pub type ShelfResult<T> = Result<T, ShelfError>;

/// Failure to append an access record. Never surfaced to HTTP clients.
#[derive(Debug, Error)]
#[error("failed to append access record to {path}: {source}")]
pub struct AccessLogError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}
