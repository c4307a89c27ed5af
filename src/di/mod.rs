//! Dependency injection infrastructure for Folio
//!
//! Trait-based seams between the portfolio services and the remote store,
//! so the read-modify-write logic can be exercised against an in-memory
//! store.
//!
//! # Example (Testing)
//! ```
//! use folio::di::{ServiceContainer, mocks::*};
//! use std::sync::Arc;
//!
//! let config = Arc::new(MockConfigProvider::default());
//! let github = Arc::new(MockGitHubProvider::new());
//!
//! let container = ServiceContainer::with_providers(config, github);
//! ```

pub mod container;
pub mod mocks;
pub mod traits;

// Re-export key types
pub use container::ServiceContainer;
pub use traits::{ConfigProvider, GitHubProvider};
