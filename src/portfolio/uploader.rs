//! Document store adapter over the repository Contents API

use crate::core::path::remote_path;
use crate::core::{FolioError, FolioResult};
use crate::di::traits::{ConfigProvider, GitHubProvider};
use crate::github::types::{ContentItem, ContentType, DeleteContentsRequest, PutContentsRequest};
use crate::portfolio::backend::ContentsBackend;
use crate::portfolio::delete::{DeletePlan, DeleteReport, DeleteStep, StepStatus};
use crate::portfolio::project::{sanitize_name, FileContent, Project};
use crate::portfolio::store::{ManifestAction, ManifestStore};
use serde::Serialize;
use std::sync::Arc;

pub const IMAGE_CONTENT_TYPE: &str = "image/jpeg";
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// A file written to the repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedFile {
    /// Public download URL
    pub url: Option<String>,
    pub path: String,
    /// SHA the store assigned to this write
    pub sha: String,
    pub content_type: String,
}

/// Uploads files and maintains `projects.json` in one repository
pub struct Uploader {
    config: Arc<dyn ConfigProvider>,
    github: Arc<dyn GitHubProvider>,
    projects: ManifestStore,
}

impl Uploader {
    pub fn new(config: Arc<dyn ConfigProvider>, github: Arc<dyn GitHubProvider>) -> Self {
        let backend = ContentsBackend::new(config.clone(), github.clone());
        let projects = ManifestStore::new(Arc::new(backend), config.manifest_title_field());
        Self {
            config,
            github,
            projects,
        }
    }

    /// The repository manifest this uploader maintains
    pub fn projects(&self) -> &ManifestStore {
        &self.projects
    }

    /// Write `content` to `folder/name`
    ///
    /// The first upload creates the file without a SHA. If the file already
    /// exists its current SHA is fetched once and sent, replacing it.
    pub async fn upload_file(
        &self,
        name: &str,
        content: &FileContent,
        content_type: &str,
        folder: &str,
    ) -> FolioResult<UploadedFile> {
        let cfg = self.config.as_ref();
        let path = remote_path(folder, name);
        let encoded = content.to_base64()?;

        let sha = match self
            .github
            .get_metadata(cfg.owner(), cfg.repo(), &path, cfg.branch())
            .await
        {
            Ok(existing) => Some(existing.sha),
            Err(e) if e.is_not_found() => None,
            Err(e) => return Err(e),
        };

        let body = PutContentsRequest {
            message: format!("Upload {}", name),
            content: encoded,
            branch: cfg.branch().to_string(),
            sha,
        };

        let commit = self
            .github
            .put_contents(cfg.owner(), cfg.repo(), &path, &body)
            .await
            .inspect_err(|e| tracing::warn!(%path, error = %e, "Upload failed"))?;

        tracing::info!(%path, content_type, sha = %commit.content.sha, "Uploaded file");
        Ok(UploadedFile {
            url: commit.content.download_url,
            path,
            sha: commit.content.sha,
            content_type: content_type.to_string(),
        })
    }

    /// Upload a project image as `<images>/<sanitized>_image.jpg`
    pub async fn upload_image(
        &self,
        content: &FileContent,
        project_name: &str,
    ) -> FolioResult<UploadedFile> {
        let name = format!("{}_image.jpg", sanitize_name(project_name));
        self.upload_file(&name, content, IMAGE_CONTENT_TYPE, self.config.images_folder())
            .await
    }

    /// Upload a project PDF as `<pdfs>/<sanitized>.pdf`
    pub async fn upload_pdf(
        &self,
        content: &FileContent,
        project_name: &str,
    ) -> FolioResult<UploadedFile> {
        let name = format!("{}.pdf", sanitize_name(project_name));
        self.upload_file(&name, content, PDF_CONTENT_TYPE, self.config.pdfs_folder())
            .await
    }

    /// Append a project to the manifest
    pub async fn save_project_data(&self, project: Project) -> FolioResult<()> {
        self.projects.append(project).await
    }

    /// All projects; empty when the manifest does not exist yet
    pub async fn get_projects(&self) -> FolioResult<Vec<Project>> {
        self.projects.list().await
    }

    /// Apply a manifest action for `project`; returns the number of entries changed
    pub async fn update_projects_list(
        &self,
        project: &Project,
        action: ManifestAction,
    ) -> FolioResult<usize> {
        self.projects.update(project, action).await
    }

    /// Delete a project's PDF, image and manifest entry
    pub async fn delete_project(&self, project: &Project) -> DeleteReport {
        let plan = DeletePlan::for_project(project, self.projects.title_field());
        self.run_plan(&plan).await
    }

    /// Run every step of `plan` in order, recording each outcome
    pub async fn run_plan(&self, plan: &DeletePlan) -> DeleteReport {
        let mut report = DeleteReport::default();

        for step in plan.steps() {
            let status = match step {
                DeleteStep::RemoveFile { path, .. } => match self.delete_file_by_path(path).await {
                    Ok(()) => StepStatus::Done,
                    Err(e) if e.is_not_found() => StepStatus::AlreadyAbsent,
                    Err(e) => StepStatus::Failed(e),
                },
                DeleteStep::RemoveFromManifest { title } => {
                    match self.projects.remove_by_title(title).await {
                        Ok(0) => StepStatus::AlreadyAbsent,
                        Ok(_) => StepStatus::Done,
                        Err(e) => StepStatus::Failed(e),
                    }
                }
            };

            if let StepStatus::Failed(ref e) = status {
                tracing::warn!(step = %step, error = %e, "Delete step failed");
            }
            report.push(step.clone(), status);
        }

        report
    }

    /// Delete a file, looking up its current SHA first
    ///
    /// Fails with `NotFound` when the file does not exist.
    pub async fn delete_file_by_path(&self, path: &str) -> FolioResult<()> {
        let cfg = self.config.as_ref();
        let existing = self
            .github
            .get_metadata(cfg.owner(), cfg.repo(), path, cfg.branch())
            .await?;

        let body = DeleteContentsRequest {
            message: format!("Delete {}", path),
            sha: existing.sha,
            branch: cfg.branch().to_string(),
        };

        self.github
            .delete_contents(cfg.owner(), cfg.repo(), path, &body)
            .await?;

        tracing::info!(path, "Deleted file");
        Ok(())
    }

    /// PDF files in the PDF folder; empty when the folder does not exist
    pub async fn get_pdf_files(&self) -> FolioResult<Vec<ContentItem>> {
        let cfg = self.config.as_ref();
        let entries = match self
            .github
            .list_directory(cfg.owner(), cfg.repo(), cfg.pdfs_folder(), cfg.branch())
            .await
        {
            Ok(entries) => entries,
            Err(e) if e.is_not_found() => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        Ok(entries
            .into_iter()
            .filter(|e| e.kind == ContentType::File && e.name.ends_with(".pdf"))
            .collect())
    }

    /// Delete `name` from the PDF folder
    pub async fn delete_file(&self, name: &str) -> FolioResult<()> {
        if name.contains('/') {
            return Err(FolioError::Path(format!(
                "'{}' must be a file name inside the PDF folder",
                name
            )));
        }
        let path = remote_path(self.config.pdfs_folder(), name);
        self.delete_file_by_path(&path).await
    }
}
