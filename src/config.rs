//! Collection bindings.
//!
//! Each collection is bound to at most one directory when the process
//! starts. The binding never changes afterwards; handlers receive it
//! through shared immutable state.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use crate::collection::Collection;
use crate::error::{ShelfError, ShelfResult};

/// Directory bindings for both collections plus the access-log directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionsConfig {
    /// Backing directory for `NORMS`. An empty value leaves it unbound.
    #[serde(default = "default_norms_dir", deserialize_with = "empty_as_none")]
    pub norms_dir: Option<PathBuf>,

    /// Backing directory for `KnowledgeBase`. An empty value leaves it unbound.
    #[serde(
        default = "default_knowledge_base_dir",
        deserialize_with = "empty_as_none"
    )]
    pub knowledge_base_dir: Option<PathBuf>,

    /// Where per-file access logs are appended.
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
}

impl Default for CollectionsConfig {
    fn default() -> Self {
        Self {
            norms_dir: default_norms_dir(),
            knowledge_base_dir: default_knowledge_base_dir(),
            log_dir: default_log_dir(),
        }
    }
}

impl CollectionsConfig {
    pub fn new(
        norms_dir: impl Into<PathBuf>,
        knowledge_base_dir: impl Into<PathBuf>,
        log_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            norms_dir: Some(norms_dir.into()),
            knowledge_base_dir: Some(knowledge_base_dir.into()),
            log_dir: log_dir.into(),
        }
    }

    /// Directory bound to `collection`, if any.
    pub fn directory(&self, collection: Collection) -> Option<&Path> {
        match collection {
            Collection::Norms => self.norms_dir.as_deref(),
            Collection::KnowledgeBase => self.knowledge_base_dir.as_deref(),
        }
    }

    /// Like [`directory`](Self::directory), but an unbound collection is an error.
    pub fn require_directory(&self, collection: Collection) -> ShelfResult<&Path> {
        self.directory(collection)
            .ok_or(ShelfError::CollectionUnconfigured(collection))
    }
}

fn default_norms_dir() -> Option<PathBuf> {
    Some(PathBuf::from("Norms"))
}

fn default_knowledge_base_dir() -> Option<PathBuf> {
    Some(PathBuf::from("KnowledgeBase"))
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_both_collections() {
        let cfg = CollectionsConfig::default();
        assert_eq!(cfg.directory(Collection::Norms), Some(Path::new("Norms")));
        assert_eq!(
            cfg.directory(Collection::KnowledgeBase),
            Some(Path::new("KnowledgeBase"))
        );
        assert_eq!(cfg.log_dir, PathBuf::from("logs"));
    }

    #[test]
    fn empty_directory_unbinds_collection() {
        let cfg: CollectionsConfig =
            serde_json::from_str(r#"{"norms_dir": "", "knowledge_base_dir": "/srv/kb"}"#)
                .unwrap();
        assert_eq!(cfg.directory(Collection::Norms), None);
        assert!(matches!(
            cfg.require_directory(Collection::Norms),
            Err(ShelfError::CollectionUnconfigured(Collection::Norms))
        ));
        assert_eq!(
            cfg.require_directory(Collection::KnowledgeBase).unwrap(),
            Path::new("/srv/kb")
        );
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: CollectionsConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, CollectionsConfig::default());
    }
}
