//! Folio: a portfolio content store backed by GitHub
//!
//! Files (images, PDFs) and a `projects.json` manifest live in a repository
//! and are managed through the Contents API; a secondary list lives in a
//! gist. This crate re-exports the error and credential types from
//! `folio-core` and organises the client, the portfolio services and the
//! dependency injection seams.

pub use folio_core::{
    format_error_with_help, CredentialStore, ErrorHelp, ErrorReason, FolioError, FolioResult,
};

/// Core module re-exported from folio-core.
pub mod core {
    pub use folio_core::core::*;

    /// Path module re-exported from folio-core.
    pub mod path {
        pub use folio_core::core::path::*;
    }
}

/// Configuration management.
pub mod config;

/// GitHub Contents and Gist API client.
pub mod github;

/// Dependency injection infrastructure.
pub mod di;

/// Projects, manifests, uploads and deletes.
pub mod portfolio;
