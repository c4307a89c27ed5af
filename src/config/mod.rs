use crate::core::path::{config_file, ensure_dir};
use crate::core::{CredentialStore, FolioError, FolioResult};
use crate::di::ConfigProvider;
use folio_core::core::credentials::GITHUB_TOKEN_KEY;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable checked first when resolving the GitHub token
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Repository that holds uploaded files and the projects manifest
    #[serde(default)]
    pub github: GitHubConfig,

    /// Gist that holds the secondary activities list
    #[serde(default)]
    pub gist: GistConfig,

    /// Location and identity field of the repository manifest
    #[serde(default)]
    pub manifest: ManifestConfig,

    /// Repository folders for uploaded images and PDFs
    #[serde(default)]
    pub folders: FoldersConfig,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// REST API base URL (override for GitHub Enterprise or tests)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Repository owner (user or organisation)
    #[serde(default)]
    pub owner: String,

    /// Repository name
    #[serde(default)]
    pub repo: String,

    /// Branch every read and write targets
    #[serde(default = "default_branch")]
    pub branch: String,

    /// Personal access token.
    ///
    /// Prefer `folio login` (OS keychain) or `GITHUB_TOKEN`; a token written
    /// here is stored in plain text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GistConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default = "default_gist_file_name")]
    pub file_name: String,

    /// Field that identifies an entry in the gist list
    #[serde(default = "default_gist_title_field")]
    pub title_field: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestConfig {
    #[serde(default = "default_manifest_path")]
    pub path: String,

    /// Field that identifies a project; deletion matches on it
    #[serde(default = "default_manifest_title_field")]
    pub title_field: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoldersConfig {
    #[serde(default = "default_images_folder")]
    pub images: String,

    #[serde(default = "default_pdfs_folder")]
    pub pdfs: String,
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_gist_file_name() -> String {
    "actividades.json".to_string()
}

fn default_gist_title_field() -> String {
    "name".to_string()
}

fn default_manifest_path() -> String {
    "projects.json".to_string()
}

fn default_manifest_title_field() -> String {
    "titulo".to_string()
}

fn default_images_folder() -> String {
    "images".to_string()
}

fn default_pdfs_folder() -> String {
    "pdfs".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            owner: String::new(),
            repo: String::new(),
            branch: default_branch(),
            token: None,
        }
    }
}

impl Default for GistConfig {
    fn default() -> Self {
        Self {
            id: None,
            file_name: default_gist_file_name(),
            title_field: default_gist_title_field(),
        }
    }
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            path: default_manifest_path(),
            title_field: default_manifest_title_field(),
        }
    }
}

impl Default for FoldersConfig {
    fn default() -> Self {
        Self {
            images: default_images_folder(),
            pdfs: default_pdfs_folder(),
        }
    }
}

impl Config {
    /// Load config from `FOLIO_CONFIG` or the platform-specific config directory
    ///
    /// Config locations:
    /// - Windows: %APPDATA%\folio\config.yaml
    /// - Linux: ~/.config/folio/config.yaml
    /// - macOS: ~/Library/Application Support/folio/config.yaml
    pub fn load() -> FolioResult<Self> {
        Self::load_from(&config_file()?)
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> FolioResult<Self> {
        if !path.exists() {
            return Err(FolioError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| FolioError::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Save config to `FOLIO_CONFIG` or the platform-specific config directory
    pub fn save(&self) -> FolioResult<()> {
        self.save_to(&config_file()?)
    }

    /// Save config to an explicit path, creating parent directories
    pub fn save_to(&self, path: &Path) -> FolioResult<()> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                ensure_dir(dir)?;
            }
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| FolioError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)?;
        Ok(())
    }

    /// Fail unless owner and repository are set
    pub fn validate_repository(&self) -> FolioResult<()> {
        if self.github.owner.trim().is_empty() {
            return Err(FolioError::Config("github.owner is not set".to_string()));
        }
        if self.github.repo.trim().is_empty() {
            return Err(FolioError::Config("github.repo is not set".to_string()));
        }
        Ok(())
    }

    /// Gist id, or a config error when none is set
    pub fn require_gist_id(&self) -> FolioResult<&str> {
        self.gist
            .id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| FolioError::Config("gist.id is not set".to_string()))
    }

    /// Resolve the GitHub token: `GITHUB_TOKEN`, then the OS keychain, then the config file
    pub fn resolve_token(&self) -> Option<String> {
        std::env::var(TOKEN_ENV_VAR)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| CredentialStore::retrieve(GITHUB_TOKEN_KEY).ok())
            .or_else(|| self.github.token.clone())
    }
}

// Implement ConfigProvider trait
impl ConfigProvider for Config {
    fn api_url(&self) -> &str {
        &self.github.api_url
    }

    fn owner(&self) -> &str {
        &self.github.owner
    }

    fn repo(&self) -> &str {
        &self.github.repo
    }

    fn branch(&self) -> &str {
        &self.github.branch
    }

    fn manifest_path(&self) -> &str {
        &self.manifest.path
    }

    fn manifest_title_field(&self) -> &str {
        &self.manifest.title_field
    }

    fn images_folder(&self) -> &str {
        &self.folders.images
    }

    fn pdfs_folder(&self) -> &str {
        &self.folders.pdfs
    }

    fn gist_id(&self) -> Option<&str> {
        self.gist.id.as_deref()
    }

    fn gist_file_name(&self) -> &str {
        &self.gist.file_name
    }

    fn gist_title_field(&self) -> &str {
        &self.gist.title_field
    }
}
