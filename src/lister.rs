//! Collection listing.
//!
//! Every entry of the directory is reported, regular file or not, in the
//! order the filesystem yields them. A stat failure on any entry fails the
//! whole listing.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::fs;

use crate::collection::{Collection, FileEntry};
use crate::config::CollectionsConfig;
use crate::error::{ShelfError, ShelfResult};

/// List the collection bound in `config`.
///
/// Fails with [`ShelfError::CollectionUnconfigured`] before touching the
/// filesystem when the collection has no directory.
pub async fn list_collection(
    config: &CollectionsConfig,
    collection: Collection,
) -> ShelfResult<Vec<FileEntry>> {
    let directory = config.require_directory(collection)?;
    list_directory(directory, collection).await
}

/// List every entry of `directory`, tagging each with `collection`.
pub async fn list_directory(directory: &Path, collection: Collection) -> ShelfResult<Vec<FileEntry>> {
    let mut entries = fs::read_dir(directory).await.map_err(|err| {
        ShelfError::io(format!("failed to read directory {}", directory.display()), err)
    })?;

    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(|err| {
        ShelfError::io(format!("failed to read directory {}", directory.display()), err)
    })? {
        // The lossy name is for display only; stat goes through the real path.
        let file_name = entry.file_name().to_string_lossy().into_owned();
        let full_path = entry.path();
        // Follows symlinks, matching what a later fetch of the same name sees.
        let metadata = fs::metadata(&full_path).await.map_err(|err| {
            ShelfError::io(format!("failed to stat {}", full_path.display()), err)
        })?;
        let modified = metadata.modified().map_err(|err| {
            ShelfError::io(
                format!("failed to read modification time of {}", full_path.display()),
                err,
            )
        })?;

        files.push(FileEntry {
            folder: collection,
            file_name,
            full_path,
            modification_time: epoch_millis(modified),
        });
    }

    tracing::debug!(
        collection = %collection,
        directory = %directory.display(),
        count = files.len(),
        "listed collection"
    );

    Ok(files)
}

/// Milliseconds since the Unix epoch, negative for pre-epoch timestamps.
pub fn epoch_millis(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => i64::try_from(after.as_millis()).unwrap_or(i64::MAX),
        Err(before) => -i64::try_from(before.duration().as_millis()).unwrap_or(i64::MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn epoch_millis_handles_both_sides_of_epoch() {
        assert_eq!(epoch_millis(UNIX_EPOCH + Duration::from_millis(1_500)), 1_500);
        assert_eq!(epoch_millis(UNIX_EPOCH - Duration::from_millis(250)), -250);
    }

    #[tokio::test]
    async fn empty_directory_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let files = list_directory(dir.path(), Collection::Norms).await.unwrap();
        assert!(files.is_empty());
    }

    #[tokio::test]
    async fn unbound_collection_is_rejected() {
        let mut cfg = CollectionsConfig::default();
        cfg.knowledge_base_dir = None;
        let err = list_collection(&cfg, Collection::KnowledgeBase)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ShelfError::CollectionUnconfigured(Collection::KnowledgeBase)
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn dangling_entry_fails_whole_listing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ok.txt"), b"ok").unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("dangling")).unwrap();

        let err = list_directory(dir.path(), Collection::Norms)
            .await
            .unwrap_err();
        match err {
            ShelfError::Io { context, source } => {
                assert!(context.ends_with("dangling"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn non_utf8_names_are_listed() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let raw = OsStr::from_bytes(b"report-\xff.txt");
        std::fs::write(dir.path().join(raw), b"bytes").unwrap();

        let files = list_directory(dir.path(), Collection::Norms).await.unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_name, "report-\u{fffd}.txt");
        assert_eq!(files[0].full_path, dir.path().join(raw));
    }

    #[tokio::test]
    async fn missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = list_directory(&dir.path().join("absent"), Collection::Norms)
            .await
            .unwrap_err();
        assert!(err.io_message().is_some());
    }
}
