//! GitHub API type definitions

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Kind of entry returned by the Contents API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    File,
    Dir,
    Symlink,
    Submodule,
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentType::File => write!(f, "file"),
            ContentType::Dir => write!(f, "dir"),
            ContentType::Symlink => write!(f, "symlink"),
            ContentType::Submodule => write!(f, "submodule"),
        }
    }
}

/// One entry of `GET /repos/{owner}/{repo}/contents/{path}`
///
/// For a file, `content` and `encoding` are set; for a directory listing
/// each element omits them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub name: String,
    pub path: String,
    pub sha: String,
    #[serde(default)]
    pub size: u64,
    #[serde(rename = "type")]
    pub kind: ContentType,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub encoding: Option<String>,
}

/// A file fetched from the Contents API with its body decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentFile {
    pub path: String,
    pub sha: String,
    pub download_url: Option<String>,
    pub bytes: Vec<u8>,
}

/// Body of `PUT /repos/{owner}/{repo}/contents/{path}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PutContentsRequest {
    pub message: String,
    /// Base64-encoded file content
    pub content: String,
    pub branch: String,
    /// Required when replacing an existing file, absent on first creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}

/// Body of `DELETE /repos/{owner}/{repo}/contents/{path}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteContentsRequest {
    pub message: String,
    pub sha: String,
    pub branch: String,
}

/// Response of a successful contents write
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentCommit {
    pub content: ContentItem,
    #[serde(default)]
    pub commit: Option<CommitInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitInfo {
    pub sha: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// `GET /gists/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gist {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub files: HashMap<String, GistFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GistFile {
    pub filename: String,
    #[serde(default)]
    pub content: Option<String>,
    /// Set when `content` was cut off; the full body is at `raw_url`
    #[serde(default)]
    pub truncated: bool,
    #[serde(default)]
    pub raw_url: Option<String>,
}

/// Body of `PATCH /gists/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GistUpdateRequest {
    pub files: BTreeMap<String, GistFileUpdate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GistFileUpdate {
    pub content: String,
}

impl GistUpdateRequest {
    /// Replace one file's content
    pub fn single(file_name: &str, content: String) -> Self {
        let mut files = BTreeMap::new();
        files.insert(file_name.to_string(), GistFileUpdate { content });
        Self { files }
    }
}

/// Error body GitHub returns on non-success responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
    #[serde(default)]
    pub documentation_url: Option<String>,
}

/// GitHub API rate limit information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub reset: u64,
}
