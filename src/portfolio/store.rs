//! Read-modify-write operations on a manifest

use crate::core::FolioResult;
use crate::portfolio::backend::ManifestBackend;
use crate::portfolio::project::Project;
use std::sync::Arc;

/// Change applied to a manifest by [`ManifestStore::update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestAction {
    /// Push the project at the end
    Append,
    /// Drop every entry whose title equals the project's title
    Remove,
}

/// Backend-agnostic project list
///
/// Every write loads the manifest once and stores it with the version from
/// that same load, so a concurrent change in between is rejected by the
/// store instead of being overwritten (on versioned backends).
#[derive(Clone)]
pub struct ManifestStore {
    backend: Arc<dyn ManifestBackend>,
    title_field: String,
}

impl ManifestStore {
    pub fn new(backend: Arc<dyn ManifestBackend>, title_field: &str) -> Self {
        Self {
            backend,
            title_field: title_field.to_string(),
        }
    }

    pub fn title_field(&self) -> &str {
        &self.title_field
    }

    pub fn describe(&self) -> String {
        self.backend.describe()
    }

    /// Current projects, in manifest order; empty when no manifest exists
    pub async fn list(&self) -> FolioResult<Vec<Project>> {
        Ok(self.backend.load().await?.projects)
    }

    /// Append a project
    pub async fn append(&self, project: Project) -> FolioResult<()> {
        self.update(&project, ManifestAction::Append).await?;
        Ok(())
    }

    /// Remove every project titled `title`, returning how many were removed
    pub async fn remove_by_title(&self, title: &str) -> FolioResult<usize> {
        let project = Project::with_title(&self.title_field, title);
        self.update(&project, ManifestAction::Remove).await
    }

    /// Apply `action` and write the manifest back; returns the number of
    /// entries added or removed
    pub async fn update(&self, project: &Project, action: ManifestAction) -> FolioResult<usize> {
        let snapshot = self.backend.load().await?;
        let title = project.title(&self.title_field).unwrap_or("untitled");
        let mut projects = snapshot.projects;

        let (changed, message) = match action {
            ManifestAction::Append => {
                projects.push(project.clone());
                (1, format!("Add project {}", title))
            }
            ManifestAction::Remove => {
                let before = projects.len();
                // Compare raw values so non-string titles only match themselves
                let target = project.get(&self.title_field);
                projects.retain(|p| p.get(&self.title_field) != target);
                (before - projects.len(), format!("Remove project {}", title))
            }
        };

        if changed == 0 {
            tracing::debug!(manifest = %self.backend.describe(), title, "No matching project, manifest left as is");
            return Ok(0);
        }

        if let Err(e) = self
            .backend
            .store(&projects, snapshot.version.as_deref(), &message)
            .await
        {
            tracing::warn!(manifest = %self.backend.describe(), error = %e, "Manifest write failed");
            return Err(e);
        }

        tracing::debug!(manifest = %self.backend.describe(), commit = %message, len = projects.len(), "Manifest written");
        Ok(changed)
    }
}
