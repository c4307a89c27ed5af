//! Service container for dependency injection

use super::traits::{ConfigProvider, GitHubProvider};
use crate::config::Config;
use crate::core::FolioResult;
use crate::github::client::GitHubClient;
use crate::portfolio::backend::{ContentsBackend, GistBackend};
use crate::portfolio::store::ManifestStore;
use crate::portfolio::uploader::Uploader;
use std::sync::Arc;

/// Service container for dependency injection
///
/// Holds the configuration and the remote store client as trait objects,
/// and builds the portfolio services on top of them. Tests swap in the
/// in-memory mocks.
///
/// # Example (Testing)
///
/// ```
/// use folio::di::{ServiceContainer, mocks::*};
/// use std::sync::Arc;
///
/// let config = Arc::new(MockConfigProvider::default());
/// let github = Arc::new(MockGitHubProvider::new());
///
/// let container = ServiceContainer::with_providers(config, github);
/// let uploader = container.uploader();
/// ```
#[derive(Clone)]
pub struct ServiceContainer {
    pub config: Arc<dyn ConfigProvider>,
    pub github: Arc<dyn GitHubProvider>,
}

impl ServiceContainer {
    /// Create a container from a loaded config with the real GitHub client
    ///
    /// # Errors
    ///
    /// Returns an error if owner or repository are missing, or the HTTP
    /// client cannot be built from the resolved token.
    pub fn new(config: Config) -> FolioResult<Self> {
        config.validate_repository()?;
        let client = GitHubClient::new(&config)?;
        if !client.is_authenticated() {
            tracing::warn!("No GitHub token found; writes will be rejected");
        }

        Ok(Self {
            config: Arc::new(config),
            github: Arc::new(client),
        })
    }

    /// Create a container for the gist list only (no repository required)
    pub fn for_gist(config: Config) -> FolioResult<Self> {
        config.require_gist_id()?;
        let client = GitHubClient::new(&config)?;

        Ok(Self {
            config: Arc::new(config),
            github: Arc::new(client),
        })
    }

    /// Create a service container with custom provider implementations
    pub fn with_providers(
        config: Arc<dyn ConfigProvider>,
        github: Arc<dyn GitHubProvider>,
    ) -> Self {
        Self { config, github }
    }

    /// Get the configuration provider
    pub fn config(&self) -> &dyn ConfigProvider {
        self.config.as_ref()
    }

    /// Get the GitHub provider
    pub fn github(&self) -> &dyn GitHubProvider {
        self.github.as_ref()
    }

    /// Uploader over the configured repository
    pub fn uploader(&self) -> Uploader {
        Uploader::new(self.config.clone(), self.github.clone())
    }

    /// Manifest store for `projects.json` in the repository
    pub fn project_store(&self) -> ManifestStore {
        ManifestStore::new(
            Arc::new(ContentsBackend::new(self.config.clone(), self.github.clone())),
            self.config.manifest_title_field(),
        )
    }

    /// Manifest store for the gist list
    pub fn gist_store(&self) -> FolioResult<ManifestStore> {
        let gist_id = self.config.gist_id().ok_or_else(|| {
            crate::core::FolioError::Config("gist.id is not set".to_string())
        })?;

        Ok(ManifestStore::new(
            Arc::new(GistBackend::new(
                self.github.clone(),
                gist_id,
                self.config.gist_file_name(),
            )),
            self.config.gist_title_field(),
        ))
    }
}
