use folio::config::Config;
use folio::core::{FolioError, FolioResult};
use std::path::Path;

pub struct InitOptions {
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub branch: Option<String>,
    pub gist_id: Option<String>,
    pub force: bool,
}

pub fn run(config_path: Option<&Path>, options: InitOptions) -> FolioResult<()> {
    let path = super::config_path(config_path)?;

    if path.exists() && !options.force {
        return Err(FolioError::Config(format!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        )));
    }

    let mut config = Config::default();
    if let Some(owner) = options.owner {
        config.github.owner = owner;
    }
    if let Some(repo) = options.repo {
        config.github.repo = repo;
    }
    if let Some(branch) = options.branch {
        config.github.branch = branch;
    }
    config.gist.id = options.gist_id;

    config.save_to(&path)?;

    println!("✓ Wrote config to {}", path.display());
    if config.validate_repository().is_err() {
        println!("  Set github.owner and github.repo before uploading.");
    }
    println!("  Run 'folio login' to store a GitHub token.");

    Ok(())
}
