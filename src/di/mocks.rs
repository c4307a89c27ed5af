//! Mock implementations of service traits for testing

use super::traits::{ConfigProvider, GitHubProvider};
use crate::core::{FolioError, FolioResult};
use crate::github::client::decode_base64;
use crate::github::types::{
    CommitInfo, ContentCommit, ContentFile, ContentItem, ContentType, DeleteContentsRequest,
    PutContentsRequest,
};
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Mock configuration provider for testing
///
/// # Example
///
/// ```
/// use folio::di::mocks::MockConfigProvider;
/// use folio::di::ConfigProvider;
///
/// let mut config = MockConfigProvider::default();
/// config.manifest_path = "data/projects.json".to_string();
///
/// assert_eq!(config.manifest_path(), "data/projects.json");
/// ```
#[derive(Clone)]
pub struct MockConfigProvider {
    pub api_url: String,
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub manifest_path: String,
    pub manifest_title_field: String,
    pub images_folder: String,
    pub pdfs_folder: String,
    pub gist_id: Option<String>,
    pub gist_file_name: String,
    pub gist_title_field: String,
}

impl Default for MockConfigProvider {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            owner: "octocat".to_string(),
            repo: "portfolio".to_string(),
            branch: "main".to_string(),
            manifest_path: "projects.json".to_string(),
            manifest_title_field: "titulo".to_string(),
            images_folder: "images".to_string(),
            pdfs_folder: "pdfs".to_string(),
            gist_id: Some("gist-1".to_string()),
            gist_file_name: "actividades.json".to_string(),
            gist_title_field: "name".to_string(),
        }
    }
}

impl ConfigProvider for MockConfigProvider {
    fn api_url(&self) -> &str {
        &self.api_url
    }

    fn owner(&self) -> &str {
        &self.owner
    }

    fn repo(&self) -> &str {
        &self.repo
    }

    fn branch(&self) -> &str {
        &self.branch
    }

    fn manifest_path(&self) -> &str {
        &self.manifest_path
    }

    fn manifest_title_field(&self) -> &str {
        &self.manifest_title_field
    }

    fn images_folder(&self) -> &str {
        &self.images_folder
    }

    fn pdfs_folder(&self) -> &str {
        &self.pdfs_folder
    }

    fn gist_id(&self) -> Option<&str> {
        self.gist_id.as_deref()
    }

    fn gist_file_name(&self) -> &str {
        &self.gist_file_name
    }

    fn gist_title_field(&self) -> &str {
        &self.gist_title_field
    }
}

/// Mock GitHub provider for testing
///
/// An in-memory Contents and Gist store. Every write assigns a new SHA and
/// a write or delete presenting a stale SHA fails with `Conflict`, the way
/// GitHub does. Owner, repository and branch are ignored.
///
/// # Example
///
/// ```
/// use folio::di::mocks::MockGitHubProvider;
///
/// let github = MockGitHubProvider::new();
/// github.add_file("projects.json", b"[]".to_vec());
///
/// assert!(github.sha_of("projects.json").is_some());
/// ```
#[derive(Clone, Default)]
pub struct MockGitHubProvider {
    files: Arc<Mutex<BTreeMap<String, StoredFile>>>,
    gists: Arc<Mutex<HashMap<(String, String), String>>>,
    failing_paths: Arc<Mutex<HashSet<String>>>,
    calls: Arc<Mutex<Vec<String>>>,
    revision: Arc<Mutex<u64>>,
}

#[derive(Clone)]
struct StoredFile {
    sha: String,
    bytes: Vec<u8>,
}

impl MockGitHubProvider {
    /// Create an empty mock store
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, assigning it a fresh SHA
    pub fn add_file(&self, path: &str, bytes: Vec<u8>) {
        let sha = self.next_sha(&bytes);
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), StoredFile { sha, bytes });
    }

    /// Current bytes of a file
    pub fn file(&self, path: &str) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(path).map(|f| f.bytes.clone())
    }

    /// Current SHA of a file
    pub fn sha_of(&self, path: &str) -> Option<String> {
        self.files.lock().unwrap().get(path).map(|f| f.sha.clone())
    }

    /// All stored paths, sorted
    pub fn paths(&self) -> Vec<String> {
        self.files.lock().unwrap().keys().cloned().collect()
    }

    /// Seed or replace a gist file
    pub fn set_gist_file(&self, gist_id: &str, file_name: &str, content: &str) {
        self.gists.lock().unwrap().insert(
            (gist_id.to_string(), file_name.to_string()),
            content.to_string(),
        );
    }

    /// Current content of a gist file
    pub fn gist_file(&self, gist_id: &str, file_name: &str) -> Option<String> {
        self.gists
            .lock()
            .unwrap()
            .get(&(gist_id.to_string(), file_name.to_string()))
            .cloned()
    }

    /// Make every write or delete of `path` fail with a rejection
    pub fn fail_writes_to(&self, path: &str) {
        self.failing_paths.lock().unwrap().insert(path.to_string());
    }

    /// Let writes to `path` succeed again
    pub fn clear_failure(&self, path: &str) {
        self.failing_paths.lock().unwrap().remove(path);
    }

    /// Operations performed so far, as `"<OP> <target>"`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded operations starting with `prefix`
    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn next_sha(&self, bytes: &[u8]) -> String {
        let mut revision = self.revision.lock().unwrap();
        *revision += 1;
        let mut hasher = Sha256::new();
        hasher.update(revision.to_be_bytes());
        hasher.update(bytes);
        hex::encode(&hasher.finalize()[..20])
    }

    fn check_failure(&self, path: &str) -> FolioResult<()> {
        if self.failing_paths.lock().unwrap().contains(path) {
            return Err(FolioError::Rejected {
                status: 500,
                message: format!("Simulated failure for {}", path),
            });
        }
        Ok(())
    }

    fn raw_url(owner: &str, repo: &str, branch: &str, path: &str) -> String {
        format!(
            "https://raw.githubusercontent.com/{}/{}/{}/{}",
            owner, repo, branch, path
        )
    }
}

fn file_name(path: &str) -> String {
    path.rsplit('/').next().unwrap_or(path).to_string()
}

#[async_trait]
impl GitHubProvider for MockGitHubProvider {
    async fn get_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        ref_: &str,
    ) -> FolioResult<ContentFile> {
        self.record(format!("GET {}", path));
        let files = self.files.lock().unwrap();
        let stored = files
            .get(path)
            .ok_or_else(|| FolioError::NotFound(path.to_string()))?;

        Ok(ContentFile {
            path: path.to_string(),
            sha: stored.sha.clone(),
            download_url: Some(Self::raw_url(owner, repo, ref_, path)),
            bytes: stored.bytes.clone(),
        })
    }

    async fn get_metadata(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        ref_: &str,
    ) -> FolioResult<ContentItem> {
        self.record(format!("META {}", path));
        let files = self.files.lock().unwrap();
        let stored = files
            .get(path)
            .ok_or_else(|| FolioError::NotFound(path.to_string()))?;

        Ok(ContentItem {
            name: file_name(path),
            path: path.to_string(),
            sha: stored.sha.clone(),
            size: stored.bytes.len() as u64,
            kind: ContentType::File,
            download_url: Some(Self::raw_url(owner, repo, ref_, path)),
            html_url: None,
            content: None,
            encoding: None,
        })
    }

    async fn list_directory(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        ref_: &str,
    ) -> FolioResult<Vec<ContentItem>> {
        self.record(format!("LIST {}", path));
        let prefix = format!("{}/", path.trim_matches('/'));
        let files = self.files.lock().unwrap();
        let entries: Vec<ContentItem> = files
            .iter()
            .filter(|(p, _)| p.starts_with(&prefix) && !p[prefix.len()..].contains('/'))
            .map(|(p, f)| ContentItem {
                name: file_name(p),
                path: p.clone(),
                sha: f.sha.clone(),
                size: f.bytes.len() as u64,
                kind: ContentType::File,
                download_url: Some(Self::raw_url(owner, repo, ref_, p)),
                html_url: None,
                content: None,
                encoding: None,
            })
            .collect();

        if entries.is_empty() {
            return Err(FolioError::NotFound(path.to_string()));
        }
        Ok(entries)
    }

    async fn put_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        body: &PutContentsRequest,
    ) -> FolioResult<ContentCommit> {
        self.record(format!("PUT {}", path));
        self.check_failure(path)?;
        let bytes = decode_base64(&body.content)?;

        let current = self.sha_of(path);
        match (&current, &body.sha) {
            (Some(_), None) => {
                return Err(FolioError::Conflict(format!(
                    "{}: \"sha\" wasn't supplied.",
                    path
                )))
            }
            (Some(current), Some(given)) if current != given => {
                return Err(FolioError::Conflict(format!(
                    "{}: {} does not match {}",
                    path, path, given
                )))
            }
            _ => {}
        }

        let sha = self.next_sha(&bytes);
        let size = bytes.len() as u64;
        self.files.lock().unwrap().insert(
            path.to_string(),
            StoredFile {
                sha: sha.clone(),
                bytes,
            },
        );

        Ok(ContentCommit {
            content: ContentItem {
                name: file_name(path),
                path: path.to_string(),
                sha,
                size,
                kind: ContentType::File,
                download_url: Some(Self::raw_url(owner, repo, &body.branch, path)),
                html_url: None,
                content: None,
                encoding: None,
            },
            commit: Some(CommitInfo {
                sha: self.next_sha(body.message.as_bytes()),
                message: Some(body.message.clone()),
            }),
        })
    }

    async fn delete_contents(
        &self,
        _owner: &str,
        _repo: &str,
        path: &str,
        body: &DeleteContentsRequest,
    ) -> FolioResult<()> {
        self.record(format!("DELETE {}", path));
        self.check_failure(path)?;

        let mut files = self.files.lock().unwrap();
        let stored = files
            .get(path)
            .ok_or_else(|| FolioError::NotFound(path.to_string()))?;
        if stored.sha != body.sha {
            return Err(FolioError::Conflict(format!(
                "{}: {} does not match {}",
                path, path, body.sha
            )));
        }
        files.remove(path);
        Ok(())
    }

    async fn get_gist_file(&self, gist_id: &str, file_name: &str) -> FolioResult<String> {
        self.record(format!("GET gist {}/{}", gist_id, file_name));
        self.gist_file(gist_id, file_name)
            .ok_or_else(|| FolioError::NotFound(format!("{} in gist {}", file_name, gist_id)))
    }

    async fn update_gist_file(
        &self,
        gist_id: &str,
        file_name: &str,
        content: String,
    ) -> FolioResult<()> {
        self.record(format!("PATCH gist {}/{}", gist_id, file_name));
        self.check_failure(&format!("gist:{}/{}", gist_id, file_name))?;
        self.set_gist_file(gist_id, file_name, &content);
        Ok(())
    }
}
