use super::{ManifestBackend, ManifestSnapshot};
use crate::core::FolioResult;
use crate::di::traits::GitHubProvider;
use crate::portfolio::project::{decode_manifest, encode_manifest, Project};
use async_trait::async_trait;
use std::sync::Arc;

/// Manifest stored as one file of a gist
///
/// Gists take no version on update, so every store is last-write-wins.
pub struct GistBackend {
    github: Arc<dyn GitHubProvider>,
    gist_id: String,
    file_name: String,
}

impl GistBackend {
    pub fn new(github: Arc<dyn GitHubProvider>, gist_id: &str, file_name: &str) -> Self {
        Self {
            github,
            gist_id: gist_id.to_string(),
            file_name: file_name.to_string(),
        }
    }
}

#[async_trait]
impl ManifestBackend for GistBackend {
    async fn load(&self) -> FolioResult<ManifestSnapshot> {
        match self
            .github
            .get_gist_file(&self.gist_id, &self.file_name)
            .await
        {
            Ok(content) => Ok(ManifestSnapshot {
                projects: decode_manifest(content.as_bytes())?,
                version: None,
            }),
            Err(e) if e.is_not_found() => {
                tracing::debug!(gist = %self.gist_id, file = %self.file_name, "Gist file not found, starting empty");
                Ok(ManifestSnapshot::default())
            }
            Err(e) => Err(e),
        }
    }

    async fn store(
        &self,
        projects: &[Project],
        _version: Option<&str>,
        message: &str,
    ) -> FolioResult<()> {
        tracing::debug!(gist = %self.gist_id, reason = message, "Updating gist file");
        self.github
            .update_gist_file(&self.gist_id, &self.file_name, encode_manifest(projects)?)
            .await
    }

    fn describe(&self) -> String {
        format!("gist {}:{}", self.gist_id, self.file_name)
    }
}
