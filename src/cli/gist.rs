use folio::config::Config;
use folio::core::FolioResult;
use folio::di::ServiceContainer;
use folio::portfolio::Project;

pub async fn list(config: Config, json: bool) -> FolioResult<()> {
    let container = ServiceContainer::for_gist(config)?;
    let store = container.gist_store()?;
    let entries = store.list().await?;
    super::print_projects(&entries, store.title_field(), json)
}

/// Append an entry to the gist list
pub async fn add(config: Config, name: &str, description: &str, url: &str) -> FolioResult<()> {
    let container = ServiceContainer::for_gist(config)?;
    let store = container.gist_store()?;

    let mut entry = Project::with_title(store.title_field(), name);
    entry.set("description", description);
    entry.set("url", url);

    store.append(entry).await?;
    println!("✓ Added '{}' to {}", name, store.describe());
    Ok(())
}
