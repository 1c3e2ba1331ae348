mod cli;
mod commands;
mod output;
mod store;

use clap::Parser;
use comicstore::UserKind;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::output::OutputFormat;
use crate::store::Workspace;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so --json output stays parseable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("comicstore=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::from_flag(cli.json);
    let workspace = Workspace::open(&cli).await?;
    tracing::debug!("Opened {}", workspace.db_path().display());

    match &cli.command {
        Commands::RegisterArtist(args) => {
            commands::user::register(&workspace, UserKind::Artist, args, format).await
        }
        Commands::RegisterViewer(args) => {
            commands::user::register(&workspace, UserKind::Viewer, args, format).await
        }
        Commands::Login(args) => commands::user::login(&workspace, args, format).await,
        Commands::ShowUser(args) => commands::user::show(&workspace, args, format).await,
        Commands::CreateComic(args) => commands::comic::create(&workspace, args, format).await,
        Commands::AddPage(args) => commands::comic::add_page(&workspace, args, format).await,
        Commands::InsertPanel(args) => {
            commands::comic::insert_panel(&workspace, args, format).await
        }
        Commands::Grant(args) => commands::comic::grant(&workspace, args, format).await,
        Commands::ShowComic(args) => commands::comic::show(&workspace, args, format).await,
    }
}
