//! GitHub integration for the content store
//!
//! This module wraps the two GitHub endpoints the portfolio uses as storage:
//! - the Contents API (read, create, replace, delete repository files)
//! - the Gist API (read and replace a single gist file)

pub mod client;
pub mod types;

pub use client::GitHubClient;
pub use types::{ContentFile, ContentItem, ContentType, PutContentsRequest};
