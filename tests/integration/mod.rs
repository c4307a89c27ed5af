//! Integration tests module
//!
//! Every test runs the real `folio` binary or the real HTTP client against a
//! local mock of the GitHub API.

pub mod common;
pub mod files;
pub mod gist;
pub mod projects;
pub mod store;
