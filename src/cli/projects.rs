use super::upload::print_uploaded;
use folio::config::Config;
use folio::core::{FolioError, FolioResult};
use folio::di::ServiceContainer;
use folio::portfolio::project::{IMAGE_PATH_FIELD, PDF_PATH_FIELD};
use folio::portfolio::{DeleteReport, Project, StepStatus};
use std::path::PathBuf;

pub struct AddOptions {
    pub title: String,
    pub fields: Vec<String>,
    pub image: Option<PathBuf>,
    pub pdf: Option<PathBuf>,
}

pub async fn list(config: Config, json: bool) -> FolioResult<()> {
    let container = ServiceContainer::new(config)?;
    let store = container.project_store();
    let projects = store.list().await?;
    super::print_projects(&projects, store.title_field(), json)
}

/// Upload the project's files, then append it to the manifest
pub async fn add(config: Config, options: AddOptions) -> FolioResult<()> {
    let fields = super::parse_fields(&options.fields)?;
    let mut project = build_project(&config.manifest.title_field, &options.title, fields)?;
    // Read local files before touching the repository
    let image = options.image.as_deref().map(super::read_upload).transpose()?;
    let pdf = options.pdf.as_deref().map(super::read_upload).transpose()?;

    let container = ServiceContainer::new(config)?;
    let uploader = container.uploader();

    if let Some(content) = image {
        let uploaded = uploader.upload_image(&content, &options.title).await?;
        print_uploaded(&uploaded);
        project.set(IMAGE_PATH_FIELD, uploaded.path);
    }
    if let Some(content) = pdf {
        let uploaded = uploader.upload_pdf(&content, &options.title).await?;
        print_uploaded(&uploaded);
        project.set(PDF_PATH_FIELD, uploaded.path);
    }

    uploader.save_project_data(project).await?;
    println!("✓ Added project '{}'", options.title);
    Ok(())
}

/// Delete a project's files and manifest entry
pub async fn remove(config: Config, title: &str) -> FolioResult<()> {
    let container = ServiceContainer::new(config)?;
    let uploader = container.uploader();
    let title_field = uploader.projects().title_field().to_string();

    let project = uploader
        .get_projects()
        .await?
        .into_iter()
        .find(|p| p.title(&title_field) == Some(title))
        .unwrap_or_else(|| Project::with_title(&title_field, title));

    let report = uploader.delete_project(&project).await;
    print_report(&report);

    if report.is_success() {
        println!("✓ Removed project '{}'", title);
    } else {
        println!(
            "{} of {} steps failed; run the command again to retry them",
            report.failures().count(),
            report.outcomes().len()
        );
    }
    report.into_result()
}

/// The title comes from `--title` only; `--field` may not set it
fn build_project(
    title_field: &str,
    title: &str,
    fields: Vec<(String, String)>,
) -> FolioResult<Project> {
    let mut project = Project::with_title(title_field, title);
    for (key, value) in fields {
        if key == title_field {
            return Err(FolioError::Config(format!(
                "'{}' is the title field; set it with --title",
                key
            )));
        }
        project.set(&key, value);
    }
    Ok(project)
}

fn print_report(report: &DeleteReport) {
    for outcome in report.outcomes() {
        match &outcome.status {
            StepStatus::Done => println!("  ✓ {}", outcome.step),
            StepStatus::AlreadyAbsent => println!("  - {} (already absent)", outcome.step),
            StepStatus::Failed(e) => println!("  ✗ {}: {}", outcome.step, e),
        }
    }
}
