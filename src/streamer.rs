//! File resolution for single-file fetches.
//!
//! A fetch walks `record → decode → resolve → stat → open`. The access
//! record is written first and unconditionally; every later step can end
//! the fetch with an error before any byte reaches the client.

use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use tokio::fs::{self, File};

use crate::access_log::AccessLogger;
use crate::collection::{Collection, FileEntry};
use crate::config::CollectionsConfig;
use crate::error::{ShelfError, ShelfResult};
use crate::lister::epoch_millis;

pub const CONTENT_TYPE_PDF: &str = "application/pdf";
pub const CONTENT_TYPE_TEXT: &str = "text/plain";

/// Characters `encodeURIComponent` leaves untouched.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A file that resolved, passed validation and is open for reading.
#[derive(Debug)]
pub struct OpenedFile {
    pub entry: FileEntry,
    pub content_type: &'static str,
    pub content_disposition: String,
    pub file: File,
}

/// Resolves and opens collection files, recording every attempt.
#[derive(Clone)]
pub struct FileStreamer {
    config: Arc<CollectionsConfig>,
    logger: Arc<dyn AccessLogger>,
}

impl FileStreamer {
    pub fn new(config: Arc<CollectionsConfig>, logger: Arc<dyn AccessLogger>) -> Self {
        Self { config, logger }
    }

    /// Open `raw_name` (still percent-encoded) inside `collection`.
    ///
    /// The access record for `(collection, raw_name)` is written before any
    /// validation. Its failure is reported through `tracing` and otherwise
    /// ignored.
    pub async fn open(
        &self,
        collection: Collection,
        raw_name: &str,
        client_addr: &str,
    ) -> ShelfResult<OpenedFile> {
        if let Err(err) = self.logger.record(collection, raw_name, client_addr).await {
            tracing::warn!(
                collection = %collection,
                file = raw_name,
                error = %err,
                "failed to record file access"
            );
        }

        let directory = self.config.require_directory(collection)?;
        let file_name = decode_file_name(raw_name)?;
        let full_path = resolve_path(directory, collection, &file_name)?;

        let metadata = fs::metadata(&full_path)
            .await
            .map_err(|err| ShelfError::io(format!("failed to stat {}", full_path.display()), err))?;
        let modified = metadata.modified().map_err(|err| {
            ShelfError::io(
                format!("failed to read modification time of {}", full_path.display()),
                err,
            )
        })?;

        let entry = FileEntry {
            folder: collection,
            file_name,
            full_path,
            modification_time: epoch_millis(modified),
        };
        tracing::info!(
            collection = %collection,
            file = %entry.file_name,
            path = %entry.full_path.display(),
            modification_time = entry.modification_time,
            "attempting to serve file"
        );

        if metadata.is_dir() {
            return Err(ShelfError::io(
                format!("failed to open {}", entry.full_path.display()),
                io::Error::new(
                    io::ErrorKind::IsADirectory,
                    "EISDIR: illegal operation on a directory, read",
                ),
            ));
        }

        let file = File::open(&entry.full_path).await.map_err(|err| {
            ShelfError::io(format!("failed to open {}", entry.full_path.display()), err)
        })?;

        Ok(OpenedFile {
            content_type: content_type_for(&entry.full_path),
            content_disposition: content_disposition(&entry.file_name),
            entry,
            file,
        })
    }
}

/// Percent-decode a raw path segment into a UTF-8 file name.
pub fn decode_file_name(raw: &str) -> ShelfResult<String> {
    percent_decode_str(raw)
        .decode_utf8()
        .map(|name| name.into_owned())
        .map_err(|_| ShelfError::InvalidFileName(raw.to_string()))
}

/// Join `file_name` onto `directory`, refusing anything but a direct child.
pub fn resolve_path(directory: &Path, collection: Collection, file_name: &str) -> ShelfResult<PathBuf> {
    if file_name.is_empty() || file_name.contains(['\0', '\\']) {
        return Err(ShelfError::InvalidFileName(file_name.to_string()));
    }

    let mut components = Path::new(file_name).components();
    match (components.next(), components.next()) {
        // `Path` drops a trailing separator; the name itself must not carry one.
        (Some(Component::Normal(_)), None) if !file_name.contains('/') => {}
        (Some(Component::ParentDir | Component::RootDir | Component::Prefix(_)), _) => {
            return Err(ShelfError::OutsideCollection {
                collection,
                path: directory.join(file_name),
            });
        }
        _ => return Err(ShelfError::InvalidFileName(file_name.to_string())),
    }

    let full_path = directory.join(file_name);
    if full_path.parent() != Some(directory) {
        return Err(ShelfError::OutsideCollection {
            collection,
            path: full_path,
        });
    }
    Ok(full_path)
}

/// `application/pdf` for a `.pdf` extension, `text/plain` for everything else.
pub fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("pdf") => CONTENT_TYPE_PDF,
        _ => CONTENT_TYPE_TEXT,
    }
}

/// Replace every character outside `[A-Za-z0-9_.-]` with a space.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                c
            } else {
                ' '
            }
        })
        .collect()
}

pub fn content_disposition(file_name: &str) -> String {
    let sanitized = sanitize_file_name(file_name);
    format!(
        "inline; filename={}",
        utf8_percent_encode(&sanitized, URI_COMPONENT)
    )
}
