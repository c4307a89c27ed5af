use folio::config::Config;
use folio::core::FolioResult;
use folio::di::ServiceContainer;

pub async fn pdfs(config: Config) -> FolioResult<()> {
    let container = ServiceContainer::new(config)?;
    let files = container.uploader().get_pdf_files().await?;

    if files.is_empty() {
        println!("No PDF files.");
        return Ok(());
    }

    for file in &files {
        println!("{} ({} bytes)", file.path, file.size);
        if let Some(url) = &file.download_url {
            println!("    {}", url);
        }
    }
    Ok(())
}

pub async fn delete(config: Config, path: &str) -> FolioResult<()> {
    let container = ServiceContainer::new(config)?;
    container.uploader().delete_file_by_path(path).await?;
    println!("✓ Deleted {}", path);
    Ok(())
}
