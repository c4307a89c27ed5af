use super::{ManifestBackend, ManifestSnapshot};
use crate::core::FolioResult;
use crate::di::traits::{ConfigProvider, GitHubProvider};
use crate::github::types::PutContentsRequest;
use crate::portfolio::project::{decode_manifest, encode_manifest, Project};
use async_trait::async_trait;
use base64::Engine;
use std::sync::Arc;

/// Manifest stored as a JSON file in the repository (`projects.json`)
pub struct ContentsBackend {
    config: Arc<dyn ConfigProvider>,
    github: Arc<dyn GitHubProvider>,
}

impl ContentsBackend {
    pub fn new(config: Arc<dyn ConfigProvider>, github: Arc<dyn GitHubProvider>) -> Self {
        Self { config, github }
    }
}

#[async_trait]
impl ManifestBackend for ContentsBackend {
    async fn load(&self) -> FolioResult<ManifestSnapshot> {
        let cfg = self.config.as_ref();
        match self
            .github
            .get_contents(cfg.owner(), cfg.repo(), cfg.manifest_path(), cfg.branch())
            .await
        {
            Ok(file) => Ok(ManifestSnapshot {
                projects: decode_manifest(&file.bytes)?,
                version: Some(file.sha),
            }),
            Err(e) if e.is_not_found() => {
                tracing::debug!(path = cfg.manifest_path(), "Manifest not found, starting empty");
                Ok(ManifestSnapshot::default())
            }
            Err(e) => Err(e),
        }
    }

    async fn store(
        &self,
        projects: &[Project],
        version: Option<&str>,
        message: &str,
    ) -> FolioResult<()> {
        let cfg = self.config.as_ref();
        let body = PutContentsRequest {
            message: message.to_string(),
            content: base64::engine::general_purpose::STANDARD.encode(encode_manifest(projects)?),
            branch: cfg.branch().to_string(),
            sha: version.map(str::to_string),
        };

        self.github
            .put_contents(cfg.owner(), cfg.repo(), cfg.manifest_path(), &body)
            .await?;
        Ok(())
    }

    fn describe(&self) -> String {
        let cfg = self.config.as_ref();
        format!(
            "{}/{}@{}:{}",
            cfg.owner(),
            cfg.repo(),
            cfg.branch(),
            cfg.manifest_path()
        )
    }
}
