use folio::config::Config;
use folio::core::{FolioError, FolioResult};
use folio::di::ServiceContainer;
use folio::portfolio::UploadedFile;
use std::path::Path;

pub enum UploadTarget {
    Image { project: String },
    Pdf { project: String },
    File {
        folder: Option<String>,
        name: Option<String>,
        content_type: Option<String>,
    },
}

pub async fn run(config: Config, file: &Path, target: UploadTarget) -> FolioResult<()> {
    let content = super::read_upload(file)?;
    let container = ServiceContainer::new(config)?;
    let uploader = container.uploader();

    let uploaded = match target {
        UploadTarget::Image { project } => uploader.upload_image(&content, &project).await?,
        UploadTarget::Pdf { project } => uploader.upload_pdf(&content, &project).await?,
        UploadTarget::File {
            folder,
            name,
            content_type,
        } => {
            let name = match name {
                Some(name) => name,
                None => file
                    .file_name()
                    .and_then(|n| n.to_str())
                    .map(str::to_string)
                    .ok_or_else(|| {
                        FolioError::Path(format!("No file name in {}", file.display()))
                    })?,
            };
            let folder = folder.unwrap_or_default();
            let content_type = content_type.unwrap_or_else(|| guess_content_type(&name).to_string());
            uploader
                .upload_file(&name, &content, &content_type, &folder)
                .await?
        }
    };

    print_uploaded(&uploaded);
    Ok(())
}

pub fn print_uploaded(uploaded: &UploadedFile) {
    println!("✓ Uploaded {}", uploaded.path);
    if let Some(url) = &uploaded.url {
        println!("  url: {}", url);
    }
    println!("  sha: {}", uploaded.sha);
}

/// Content type for the few formats a portfolio stores
fn guess_content_type(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "json" => "application/json",
        "md" | "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}
