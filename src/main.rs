use clap::{Parser, Subcommand};
use folio::core::FolioResult;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Manage a portfolio stored in a GitHub repository and gist")]
#[command(version)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, env = "FOLIO_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file
    Init {
        /// Repository owner
        #[arg(long)]
        owner: Option<String>,
        /// Repository name
        #[arg(long)]
        repo: Option<String>,
        /// Branch to read and write
        #[arg(long)]
        branch: Option<String>,
        /// Gist holding the secondary list
        #[arg(long)]
        gist_id: Option<String>,
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },
    /// Store a GitHub token in the system keychain
    Login {
        /// Token to store (prompts when omitted)
        #[arg(long)]
        token: Option<String>,
    },
    /// Remove the stored GitHub token
    Logout,
    /// Upload a file to the repository
    #[command(subcommand)]
    Upload(UploadCommands),
    /// Manage the projects manifest
    #[command(subcommand)]
    Projects(ProjectsCommands),
    /// Inspect and delete repository files
    #[command(subcommand)]
    Files(FilesCommands),
    /// Manage the gist list
    #[command(subcommand)]
    Gist(GistCommands),
}

#[derive(Subcommand)]
enum UploadCommands {
    /// Upload a project image to the images folder
    Image {
        file: PathBuf,
        /// Project the image belongs to
        #[arg(short, long)]
        project: String,
    },
    /// Upload a project PDF to the PDF folder
    Pdf {
        file: PathBuf,
        /// Project the PDF belongs to
        #[arg(short, long)]
        project: String,
    },
    /// Upload any file
    File {
        file: PathBuf,
        /// Destination folder (repository root when omitted)
        #[arg(long)]
        folder: Option<String>,
        /// Content type reported for the upload
        #[arg(long)]
        content_type: Option<String>,
        /// Destination file name (defaults to the local name)
        #[arg(long)]
        name: Option<String>,
    },
}

#[derive(Subcommand)]
enum ProjectsCommands {
    /// List projects
    List {
        /// Print the manifest as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a project, uploading its image and PDF first
    Add {
        #[arg(short, long)]
        title: String,
        /// Extra field as key=value (repeatable)
        #[arg(short, long = "field")]
        fields: Vec<String>,
        #[arg(long)]
        image: Option<PathBuf>,
        #[arg(long)]
        pdf: Option<PathBuf>,
    },
    /// Remove a project with its PDF and image
    Remove {
        #[arg(short, long)]
        title: String,
    },
}

#[derive(Subcommand)]
enum FilesCommands {
    /// List PDF files
    Pdfs,
    /// Delete a file by repository path
    Delete { path: String },
}

#[derive(Subcommand)]
enum GistCommands {
    /// List gist entries
    List {
        #[arg(long)]
        json: bool,
    },
    /// Append an entry
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        url: String,
    },
}

async fn dispatch(config_path: Option<&Path>, command: Commands) -> FolioResult<()> {
    let load = || cli::load_config(config_path);

    match command {
        Commands::Init {
            owner,
            repo,
            branch,
            gist_id,
            force,
        } => cli::init::run(
            config_path,
            cli::init::InitOptions {
                owner,
                repo,
                branch,
                gist_id,
                force,
            },
        ),
        Commands::Login { token } => cli::login::run(token),
        Commands::Logout => cli::login::logout(),
        Commands::Upload(cmd) => {
            let (file, target) = match cmd {
                UploadCommands::Image { file, project } => {
                    (file, cli::upload::UploadTarget::Image { project })
                }
                UploadCommands::Pdf { file, project } => {
                    (file, cli::upload::UploadTarget::Pdf { project })
                }
                UploadCommands::File {
                    file,
                    folder,
                    content_type,
                    name,
                } => (
                    file,
                    cli::upload::UploadTarget::File {
                        folder,
                        name,
                        content_type,
                    },
                ),
            };
            cli::upload::run(load()?, &file, target).await
        }
        Commands::Projects(cmd) => match cmd {
            ProjectsCommands::List { json } => cli::projects::list(load()?, json).await,
            ProjectsCommands::Add {
                title,
                fields,
                image,
                pdf,
            } => {
                cli::projects::add(
                    load()?,
                    cli::projects::AddOptions {
                        title,
                        fields,
                        image,
                        pdf,
                    },
                )
                .await
            }
            ProjectsCommands::Remove { title } => cli::projects::remove(load()?, &title).await,
        },
        Commands::Files(cmd) => match cmd {
            FilesCommands::Pdfs => cli::files::pdfs(load()?).await,
            FilesCommands::Delete { path } => cli::files::delete(load()?, &path).await,
        },
        Commands::Gist(cmd) => match cmd {
            GistCommands::List { json } => cli::gist::list(load()?, json).await,
            GistCommands::Add {
                name,
                description,
                url,
            } => cli::gist::add(load()?, &name, &description, &url).await,
        },
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so `--json` output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match dispatch(cli.config.as_deref(), cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\n{}", folio::format_error_with_help(&e));
            ExitCode::FAILURE
        }
    }
}
