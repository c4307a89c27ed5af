use crate::core::{FolioError, FolioResult};
use keyring::Entry;

/// Service name for keyring entries
const KEYRING_SERVICE: &str = "folio";

/// Keyring key holding the GitHub personal access token
pub const GITHUB_TOKEN_KEY: &str = "github_token";

/// Manages credential storage using OS keychain
///
/// Platform support:
/// - macOS: Keychain
/// - Windows: Credential Manager
/// - Linux: Secret Service (libsecret)
pub struct CredentialStore;

impl CredentialStore {
    /// Store a credential in the OS keychain
    pub fn store(key: &str, value: &str) -> FolioResult<()> {
        let entry = Entry::new(KEYRING_SERVICE, key)
            .map_err(|e| FolioError::Credential(format!("Failed to create keyring entry: {}", e)))?;

        entry.set_password(value).map_err(|e| {
            FolioError::Credential(format!("Failed to store credential in keychain: {}", e))
        })?;

        Ok(())
    }

    /// Retrieve a credential from the OS keychain
    pub fn retrieve(key: &str) -> FolioResult<String> {
        let entry = Entry::new(KEYRING_SERVICE, key)
            .map_err(|e| FolioError::Credential(format!("Failed to create keyring entry: {}", e)))?;

        entry.get_password().map_err(|e| {
            FolioError::Credential(format!(
                "Failed to retrieve credential from keychain: {}",
                e
            ))
        })
    }

    /// Delete a credential from the OS keychain
    pub fn delete(key: &str) -> FolioResult<()> {
        let entry = Entry::new(KEYRING_SERVICE, key)
            .map_err(|e| FolioError::Credential(format!("Failed to create keyring entry: {}", e)))?;

        entry.delete_credential().map_err(|e| {
            FolioError::Credential(format!("Failed to delete credential from keychain: {}", e))
        })?;

        Ok(())
    }

    /// Check if a credential exists in the keychain
    pub fn exists(key: &str) -> bool {
        Self::retrieve(key).is_ok()
    }
}
