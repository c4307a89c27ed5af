use dialoguer::Password;
use folio::core::credentials::GITHUB_TOKEN_KEY;
use folio::core::{CredentialStore, FolioError, FolioResult};

pub fn run(token: Option<String>) -> FolioResult<()> {
    let token = match token {
        Some(token) => token,
        None => {
            println!("GitHub Login");
            println!("Create a token with 'contents' write access (and 'gist' for the gist list).");
            println!();
            Password::new()
                .with_prompt("Token")
                .interact()
                .map_err(|e| FolioError::Credential(format!("Failed to read token: {}", e)))?
        }
    };

    let token = token.trim();
    if token.is_empty() {
        return Err(FolioError::Credential("Token cannot be empty".to_string()));
    }

    CredentialStore::store(GITHUB_TOKEN_KEY, token)?;

    println!("✓ Token stored securely");
    Ok(())
}

pub fn logout() -> FolioResult<()> {
    if !CredentialStore::exists(GITHUB_TOKEN_KEY) {
        println!("No stored token.");
        return Ok(());
    }

    CredentialStore::delete(GITHUB_TOKEN_KEY)?;
    println!("✓ Token removed");
    Ok(())
}
