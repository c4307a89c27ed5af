use serde::Serialize;
use thiserror::Error;

pub type FolioResult<T> = Result<T, FolioError>;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote store has no document at this path.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The write carried a SHA that no longer matches the stored document.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("GitHub API rate limit exceeded: {0}")]
    RateLimited(String),

    /// Any other non-success response, with the message the store reported.
    #[error("GitHub rejected the request (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Path error: {0}")]
    Path(String),

    #[error("Credential error: {0}")]
    Credential(String),
}

/// Reason code attached to every failure result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorReason {
    NotFound,
    Conflict,
    Rejected,
    Unauthorized,
    RateLimited,
    Transport,
    Decode,
    Config,
    Local,
}

impl std::fmt::Display for ErrorReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            ErrorReason::NotFound => "not_found",
            ErrorReason::Conflict => "conflict",
            ErrorReason::Rejected => "rejected",
            ErrorReason::Unauthorized => "unauthorized",
            ErrorReason::RateLimited => "rate_limited",
            ErrorReason::Transport => "transport",
            ErrorReason::Decode => "decode",
            ErrorReason::Config => "config",
            ErrorReason::Local => "local",
        };
        f.write_str(code)
    }
}

impl FolioError {
    pub fn reason(&self) -> ErrorReason {
        match self {
            FolioError::NotFound(_) => ErrorReason::NotFound,
            FolioError::Conflict(_) => ErrorReason::Conflict,
            FolioError::Rejected { .. } => ErrorReason::Rejected,
            FolioError::Unauthorized(_) => ErrorReason::Unauthorized,
            FolioError::RateLimited(_) => ErrorReason::RateLimited,
            FolioError::Http(_) => ErrorReason::Transport,
            FolioError::Decode(_) | FolioError::Json(_) => ErrorReason::Decode,
            FolioError::Config(_) | FolioError::Yaml(_) | FolioError::Credential(_) => {
                ErrorReason::Config
            }
            FolioError::Io(_) | FolioError::Path(_) => ErrorReason::Local,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FolioError::NotFound(_))
    }
}
