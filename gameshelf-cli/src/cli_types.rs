//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use gameshelf_core::MediaKind;
use gameshelf_store::Format;

#[derive(Parser)]
#[command(name = "gameshelf")]
#[command(about = "Catalog games and DLCs and track what each user owns", long_about = None)]
#[command(version)]
pub(crate) struct Cli {
    /// Data file (defaults to $GAMESHELF_DATA, the saved setting, or ./gameshelf.txt)
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,

    /// Data file format: text or json (defaults to the saved setting, then the file extension)
    #[arg(short, long, global = true)]
    pub format: Option<Format>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Interactive menu over the whole catalog
    Shell,

    /// Manage base games
    Game {
        #[command(subcommand)]
        action: GameAction,
    },

    /// Manage DLCs
    Dlc {
        #[command(subcommand)]
        action: DlcAction,
    },

    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage the media a user owns
    Library {
        #[command(subcommand)]
        action: LibraryAction,
    },

    /// Show or change settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Fields shared by games and DLCs when adding.
#[derive(Args, Clone)]
pub(crate) struct MediaFields {
    /// Release year (0 or omitted for unknown)
    #[arg(short, long)]
    pub year: Option<u16>,

    /// Price (0 or omitted for free)
    #[arg(short, long)]
    pub price: Option<f64>,

    /// Rating from 0 to 10
    #[arg(short, long)]
    pub rating: Option<f64>,

    /// Genres (repeat or comma-separate)
    #[arg(short, long = "genre", value_delimiter = ',')]
    pub genres: Vec<String>,

    /// Platforms (repeat or comma-separate)
    #[arg(long = "platform", value_delimiter = ',')]
    pub platforms: Vec<String>,
}

/// Edits shared by games and DLCs.
#[derive(Args, Clone)]
pub(crate) struct MediaEdits {
    /// New release year
    #[arg(short, long)]
    pub year: Option<u16>,

    /// New price
    #[arg(short, long)]
    pub price: Option<f64>,

    /// New rating from 0 to 10
    #[arg(short, long)]
    pub rating: Option<f64>,

    /// Genres to append
    #[arg(long = "add-genre", value_delimiter = ',')]
    pub add_genres: Vec<String>,

    /// Platforms to append
    #[arg(long = "add-platform", value_delimiter = ',')]
    pub add_platforms: Vec<String>,
}

#[derive(Subcommand)]
pub(crate) enum GameAction {
    /// Add a game to the catalog
    Add {
        title: String,

        #[command(flatten)]
        fields: MediaFields,

        /// Developer or studio
        #[arg(long)]
        developer: Option<String>,

        /// The game supports multiplayer
        #[arg(short, long)]
        multiplayer: bool,
    },

    /// List every game
    List,

    /// Show one game in detail
    Show { title: String },

    /// Remove a game and purge it from every library
    Remove { title: String },

    /// Change fields of a game
    Edit {
        title: String,

        #[command(flatten)]
        edits: MediaEdits,

        /// New developer
        #[arg(long)]
        developer: Option<String>,

        /// Multiplayer support (true or false)
        #[arg(long)]
        multiplayer: Option<bool>,

        /// Replace the whole genre list
        #[arg(long, value_delimiter = ',', conflicts_with = "add_genres")]
        genres: Option<Vec<String>>,

        /// Replace the whole platform list
        #[arg(long, value_delimiter = ',', conflicts_with = "add_platforms")]
        platforms: Option<Vec<String>>,
    },
}

#[derive(Subcommand)]
pub(crate) enum DlcAction {
    /// Add a DLC, linking it to its base game when that game exists
    Add {
        title: String,

        /// Title of the base game
        #[arg(short, long)]
        base: String,

        #[command(flatten)]
        fields: MediaFields,

        /// The DLC is a full expansion
        #[arg(short, long)]
        expansion: bool,
    },

    /// List every DLC
    List,

    /// Show one DLC in detail
    Show { title: String },

    /// Remove a DLC, detach it from its base game and purge it from every library
    Remove { title: String },

    /// Change fields of a DLC
    Edit {
        title: String,

        #[command(flatten)]
        edits: MediaEdits,
    },

    /// List DLCs whose base game is not in the catalog
    Dangling,
}

#[derive(Subcommand)]
pub(crate) enum UserAction {
    /// Register a user
    Add { name: String, email: String },

    /// List every user
    List,

    /// Show one user and their library
    Show { email: String },

    /// Remove a user
    Remove { email: String },

    /// Rename a user or change their email
    Edit {
        email: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New email
        #[arg(long = "new-email")]
        new_email: Option<String>,
    },
}

#[derive(Subcommand)]
pub(crate) enum LibraryAction {
    /// Copy a catalog entry into a user's library
    Add {
        email: String,
        title: String,

        /// Kind of media: game or dlc
        #[arg(short, long, default_value = "game")]
        kind: MediaKind,
    },

    /// List a user's library
    List { email: String },

    /// Show one owned entry in detail
    Show { email: String, title: String },

    /// Remove an entry from a user's library
    Remove { email: String, title: String },

    /// Rate a user's copy (0 to 10); the catalog entry is unchanged
    Rate {
        email: String,
        title: String,
        rating: f64,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the current settings and the resolved data file
    Show,

    /// Print the settings file path
    Path,

    /// Save the data file to use by default (with --format, save that too)
    SetData { path: PathBuf },
}
