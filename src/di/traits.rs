//! Trait definitions for dependency injection

use crate::core::FolioResult;
use crate::github::types::{
    ContentCommit, ContentFile, ContentItem, DeleteContentsRequest, PutContentsRequest,
};
use async_trait::async_trait;

/// Trait for configuration access
///
/// Provides read-only access to the store coordinates.
/// Implementations should be thread-safe (Send + Sync).
pub trait ConfigProvider: Send + Sync {
    /// GitHub REST API base URL
    fn api_url(&self) -> &str;

    /// Repository owner
    fn owner(&self) -> &str;

    /// Repository name
    fn repo(&self) -> &str;

    /// Branch all reads and writes target
    fn branch(&self) -> &str;

    /// Repository path of the projects manifest
    fn manifest_path(&self) -> &str;

    /// Field that identifies a project in the manifest
    fn manifest_title_field(&self) -> &str;

    /// Folder for uploaded images
    fn images_folder(&self) -> &str;

    /// Folder for uploaded PDFs
    fn pdfs_folder(&self) -> &str;

    /// Gist holding the secondary list, if configured
    fn gist_id(&self) -> Option<&str>;

    /// File name inside the gist
    fn gist_file_name(&self) -> &str;

    /// Field that identifies an entry in the gist list
    fn gist_title_field(&self) -> &str;
}

/// Trait for the remote store operations
///
/// Covers the Contents API calls the uploader and the repository manifest
/// need, plus the two Gist calls. Every call is one round trip.
#[async_trait]
pub trait GitHubProvider: Send + Sync {
    /// Fetch and decode a file
    async fn get_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        ref_: &str,
    ) -> FolioResult<ContentFile>;

    /// Fetch a file's metadata (SHA, size, URLs) without its body
    async fn get_metadata(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        ref_: &str,
    ) -> FolioResult<ContentItem>;

    /// List a directory
    async fn list_directory(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        ref_: &str,
    ) -> FolioResult<Vec<ContentItem>>;

    /// Create or replace a file
    async fn put_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        body: &PutContentsRequest,
    ) -> FolioResult<ContentCommit>;

    /// Delete a file
    async fn delete_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        body: &DeleteContentsRequest,
    ) -> FolioResult<()>;

    /// Read one gist file
    async fn get_gist_file(&self, gist_id: &str, file_name: &str) -> FolioResult<String>;

    /// Replace one gist file
    async fn update_gist_file(
        &self,
        gist_id: &str,
        file_name: &str,
        content: String,
    ) -> FolioResult<()>;
}
