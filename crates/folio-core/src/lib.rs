//! Core utilities shared by the `folio` crate: the error type and its reason
//! codes, CLI error help, platform paths and keychain credentials.

pub mod core;

pub use crate::core::{
    format_error_with_help, CredentialStore, ErrorHelp, ErrorReason, FolioError, FolioResult,
};
