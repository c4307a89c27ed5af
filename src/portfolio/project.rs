//! Project records, manifest encoding and upload payloads

use crate::core::{FolioError, FolioResult};
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field holding the repository path of a project's PDF
pub const PDF_PATH_FIELD: &str = "pdfPath";

/// Field holding the repository path of a project's image
pub const IMAGE_PATH_FIELD: &str = "imagePath";

/// A project entry: a flat JSON object with no declared schema
///
/// Identity is the string value of a title field chosen by the manifest
/// (`titulo` in the repository, `name` in the gist). Field order is kept as
/// read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Project(Map<String, Value>);

impl Project {
    pub fn new() -> Self {
        Self::default()
    }

    /// A project with only its title set
    pub fn with_title(title_field: &str, title: &str) -> Self {
        let mut project = Self::new();
        project.set(title_field, title);
        project
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn title(&self, title_field: &str) -> Option<&str> {
        self.get_str(title_field)
    }

    pub fn pdf_path(&self) -> Option<&str> {
        self.get_str(PDF_PATH_FIELD).filter(|p| !p.is_empty())
    }

    pub fn image_path(&self) -> Option<&str> {
        self.get_str(IMAGE_PATH_FIELD).filter(|p| !p.is_empty())
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Project {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Serialize a manifest as pretty-printed JSON with two-space indentation
pub fn encode_manifest(projects: &[Project]) -> FolioResult<String> {
    Ok(serde_json::to_string_pretty(projects)?)
}

/// Parse a manifest body; an empty body is an empty manifest
pub fn decode_manifest(bytes: &[u8]) -> FolioResult<Vec<Project>> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| FolioError::Decode(format!("Manifest is not valid UTF-8: {}", e)))?;
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(text)
        .map_err(|e| FolioError::Decode(format!("Manifest is not a JSON array of objects: {}", e)))
}

/// Replace every character outside `[A-Za-z0-9]` with `_`
pub fn sanitize_name(project_name: &str) -> String {
    project_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Body of a file to upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// Raw bytes, base64-encoded on upload
    Bytes(Vec<u8>),
    /// A `data:` URI; a base64 payload is sent as-is
    DataUri(String),
}

impl FileContent {
    /// Treat text starting with `data:` as a data URI, anything else as bytes
    pub fn from_text(text: String) -> Self {
        if text.starts_with("data:") {
            FileContent::DataUri(text)
        } else {
            FileContent::Bytes(text.into_bytes())
        }
    }

    /// Base64 body for the Contents API
    pub fn to_base64(&self) -> FolioResult<String> {
        let engine = &base64::engine::general_purpose::STANDARD;
        match self {
            FileContent::Bytes(bytes) => Ok(engine.encode(bytes)),
            FileContent::DataUri(uri) => {
                let (header, payload) = uri.split_once(',').ok_or_else(|| {
                    FolioError::Decode("Data URI has no ',' separator".to_string())
                })?;
                if header.ends_with(";base64") {
                    Ok(payload.to_string())
                } else {
                    let raw = urlencoding::decode_binary(payload.as_bytes());
                    Ok(engine.encode(raw))
                }
            }
        }
    }
}

impl From<Vec<u8>> for FileContent {
    fn from(bytes: Vec<u8>) -> Self {
        FileContent::Bytes(bytes)
    }
}

impl From<&[u8]> for FileContent {
    fn from(bytes: &[u8]) -> Self {
        FileContent::Bytes(bytes.to_vec())
    }
}

impl From<String> for FileContent {
    fn from(text: String) -> Self {
        FileContent::from_text(text)
    }
}
