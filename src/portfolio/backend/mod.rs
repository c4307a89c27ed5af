//! Manifest backends
//!
//! A backend stores one manifest (an ordered list of projects) in one remote
//! document. The repository backend versions the document by its content
//! SHA; the gist backend has no version and always overwrites.

pub mod contents;
pub mod gist;

pub use contents::ContentsBackend;
pub use gist::GistBackend;

use crate::core::FolioResult;
use crate::portfolio::project::Project;
use async_trait::async_trait;

/// A manifest as read, with the version the store reported at read time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManifestSnapshot {
    pub projects: Vec<Project>,
    /// SHA of the manifest document; `None` when it does not exist yet or
    /// the backend is unversioned
    pub version: Option<String>,
}

#[async_trait]
pub trait ManifestBackend: Send + Sync {
    /// Read the manifest; a missing document reads as empty
    async fn load(&self) -> FolioResult<ManifestSnapshot>;

    /// Write the whole manifest, presenting `version` from the matching `load`
    async fn store(
        &self,
        projects: &[Project],
        version: Option<&str>,
        message: &str,
    ) -> FolioResult<()>;

    /// Where the manifest lives, for logs and CLI output
    fn describe(&self) -> String;
}
