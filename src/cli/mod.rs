pub mod files;
pub mod gist;
pub mod init;
pub mod login;
pub mod projects;
pub mod upload;

use folio::config::Config;
use folio::core::{FolioError, FolioResult};
use folio::portfolio::{FileContent, Project};
use std::path::{Path, PathBuf};

/// Load the config from `--config`, `FOLIO_CONFIG` or the platform location
pub fn load_config(path: Option<&Path>) -> FolioResult<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Resolve where `init`/`login` should write the config
pub fn config_path(path: Option<&Path>) -> FolioResult<PathBuf> {
    match path {
        Some(path) => Ok(path.to_path_buf()),
        None => folio::core::path::config_file(),
    }
}

/// Read a local file to upload; a text file holding a `data:` URI is sent as such
pub fn read_upload(path: &Path) -> FolioResult<FileContent> {
    let bytes = std::fs::read(path)
        .map_err(|e| FolioError::Path(format!("Failed to read {}: {}", path.display(), e)))?;

    if !bytes.starts_with(b"data:") {
        return Ok(FileContent::Bytes(bytes));
    }
    match String::from_utf8(bytes) {
        Ok(text) => Ok(FileContent::DataUri(text.trim_end().to_string())),
        Err(e) => Ok(FileContent::Bytes(e.into_bytes())),
    }
}

/// Render one project the way the portfolio page lists it
pub fn render_project(project: &Project, title_field: &str) -> String {
    let mut out = format!("• {}", project.title(title_field).unwrap_or("(untitled)"));
    for (key, value) in project.fields() {
        if key == title_field {
            continue;
        }
        let value = match value.as_str() {
            Some(s) => s.to_string(),
            None => value.to_string(),
        };
        out.push_str(&format!("\n    {}: {}", key, value));
    }
    out
}

/// Print a list of projects, or pretty JSON with `json`
pub fn print_projects(projects: &[Project], title_field: &str, json: bool) -> FolioResult<()> {
    if json {
        println!("{}", folio::portfolio::project::encode_manifest(projects)?);
        return Ok(());
    }

    if projects.is_empty() {
        println!("No projects yet.");
        return Ok(());
    }

    for project in projects {
        println!("{}", render_project(project, title_field));
    }
    Ok(())
}

/// Parse `key=value` pairs given with `--field`
pub fn parse_fields(fields: &[String]) -> FolioResult<Vec<(String, String)>> {
    fields
        .iter()
        .map(|pair| {
            pair.split_once('=')
                .filter(|(k, _)| !k.trim().is_empty())
                .map(|(k, v)| (k.trim().to_string(), v.to_string()))
                .ok_or_else(|| {
                    FolioError::Config(format!("Invalid --field '{}', expected key=value", pair))
                })
        })
        .collect()
}
