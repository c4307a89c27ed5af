//! Human-readable help attached to errors shown by the CLI

use crate::core::error::FolioError;

/// Remediation hints for an error
pub trait ErrorHelp {
    /// Suggestions the user can act on, if any
    fn help(&self) -> Option<String>;
}

impl ErrorHelp for FolioError {
    fn help(&self) -> Option<String> {
        match self {
            FolioError::Unauthorized(_) => Some(
                "Run 'folio login' to store a GitHub token, or set GITHUB_TOKEN.\n  \
                 The token needs 'contents' write access (and 'gist' for the gist list)."
                    .to_string(),
            ),
            FolioError::Conflict(_) => Some(
                "The document changed since it was read. Run the command again to \
                 pick up the latest version."
                    .to_string(),
            ),
            FolioError::RateLimited(_) => Some(
                "Wait for the rate limit window to reset, or authenticate to raise the limit."
                    .to_string(),
            ),
            FolioError::NotFound(path) => Some(format!(
                "Check that '{}' exists on the configured branch.",
                path
            )),
            FolioError::Config(_) | FolioError::Yaml(_) => Some(
                "Check your config file (run 'folio init' to create one).".to_string(),
            ),
            FolioError::Http(_) => {
                Some("Check your network connection and the configured api_url.".to_string())
            }
            _ => None,
        }
    }
}

/// Format an error with its reason code and any help text
pub fn format_error_with_help(error: &FolioError) -> String {
    let mut out = format!("error[{}]: {}", error.reason(), error);
    if let Some(help) = error.help() {
        out.push_str("\n\nhelp: ");
        out.push_str(&help);
    }
    out
}
