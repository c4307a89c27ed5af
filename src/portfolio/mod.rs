//! Portfolio content stored on GitHub
//!
//! - [`project`]: schemaless project records and manifest encoding
//! - [`backend`]: where a manifest lives (repository file or gist file)
//! - [`store`]: read-modify-write of a manifest
//! - [`uploader`]: file uploads and project maintenance in the repository
//! - [`delete`]: the step-by-step project delete

pub mod backend;
pub mod delete;
pub mod project;
pub mod store;
pub mod uploader;

pub use backend::{ContentsBackend, GistBackend, ManifestBackend, ManifestSnapshot};
pub use delete::{DeletePlan, DeleteReport, DeleteStep, FileKind, StepOutcome, StepStatus};
pub use project::{sanitize_name, FileContent, Project};
pub use store::{ManifestAction, ManifestStore};
pub use uploader::{UploadedFile, Uploader};
