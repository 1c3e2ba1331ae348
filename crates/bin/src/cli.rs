//! CLI argument definitions for the comicstore binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Manage artists, viewers and their comics
#[derive(Parser, Debug)]
#[command(name = "comicstore")]
#[command(about = "comicstore: users and serialized comics in a local document store")]
#[command(version)]
pub struct Cli {
    /// Data directory holding comicstore.json
    #[arg(short = 'D', long, global = true, env = "COMICSTORE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Gateway configuration file (JSON). Defaults apply when absent.
    #[arg(short, long, global = true, env = "COMICSTORE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register a new artist
    RegisterArtist(RegisterArgs),
    /// Register a new viewer
    RegisterViewer(RegisterArgs),
    /// Check a username and password
    Login(LoginArgs),
    /// Show a stored user
    ShowUser(ShowUserArgs),
    /// Create a comic owned by an artist
    CreateComic(CreateComicArgs),
    /// Append an empty page to a comic
    AddPage(ComicArgs),
    /// Append a panel to a page
    InsertPanel(InsertPanelArgs),
    /// Add a user to one of a comic's access lists
    Grant(GrantArgs),
    /// Show a comic with its pages and panels
    ShowComic(ComicArgs),
}

#[derive(clap::Args, Debug)]
pub struct RegisterArgs {
    pub username: String,

    /// Password; read from COMICSTORE_PASSWORD when omitted
    #[arg(short, long, env = "COMICSTORE_PASSWORD", hide_env_values = true)]
    pub password: String,

    #[arg(short, long, default_value = "")]
    pub email: String,
}

#[derive(clap::Args, Debug)]
pub struct LoginArgs {
    pub username: String,

    #[arg(short, long, env = "COMICSTORE_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(clap::Args, Debug)]
pub struct ShowUserArgs {
    pub username: String,
}

#[derive(clap::Args, Debug)]
pub struct CreateComicArgs {
    /// Display name; the uri is derived from it
    pub name: String,

    /// Username of the owning artist
    #[arg(long)]
    pub creator: String,

    #[arg(short, long, default_value = "")]
    pub description: String,
}

/// Identifies one comic
#[derive(clap::Args, Debug)]
pub struct ComicArgs {
    /// Username of the owning artist
    #[arg(long)]
    pub creator: String,

    /// Comic uri, in any formatting of its canonical form
    pub uri: String,
}

#[derive(clap::Args, Debug)]
pub struct InsertPanelArgs {
    #[command(flatten)]
    pub comic: ComicArgs,

    /// Page number, counting from 1
    #[arg(long)]
    pub page: usize,

    /// Image locator for the panel
    pub locator: String,
}

/// Access level to grant
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AccessLevel {
    View,
    Edit,
    Admin,
}

impl From<AccessLevel> for comicstore::Access {
    fn from(level: AccessLevel) -> Self {
        match level {
            AccessLevel::View => Self::View,
            AccessLevel::Edit => Self::Edit,
            AccessLevel::Admin => Self::Admin,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct GrantArgs {
    #[command(flatten)]
    pub comic: ComicArgs,

    #[arg(long, value_enum)]
    pub access: AccessLevel,

    /// User receiving access
    pub username: String,
}
