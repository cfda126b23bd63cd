use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One of the two read-only document sets exposed by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Collection {
    #[serde(rename = "NORMS")]
    Norms,
    #[serde(rename = "KnowledgeBase")]
    KnowledgeBase,
}

impl Collection {
    pub const ALL: [Collection; 2] = [Collection::Norms, Collection::KnowledgeBase];

    /// Logical tag reported in `FileEntry::folder` and used to name access logs.
    pub fn tag(self) -> &'static str {
        match self {
            Collection::Norms => "NORMS",
            Collection::KnowledgeBase => "KnowledgeBase",
        }
    }

    /// Human-readable name used in error messages.
    pub fn display_name(self) -> &'static str {
        match self {
            Collection::Norms => "norms",
            Collection::KnowledgeBase => "knowledge base",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Metadata for one entry of a collection directory.
///
/// Built per response and never persisted. `full_path` is always the
/// collection directory joined with `file_name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub folder: Collection,
    pub file_name: String,
    pub full_path: PathBuf,
    /// Last modification time in milliseconds since the Unix epoch.
    pub modification_time: i64,
}
