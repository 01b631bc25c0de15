use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::domain::episode::AssetKind;
use crate::workflows::status::StatusFilter;

/// Seasons of the show being catalogued.
pub const DEFAULT_SEASON_COUNT: u32 = 14;

#[derive(Parser)]
#[command(name = "episode-assets")]
#[command(about = "Prepare episode metadata, video names and season directories for the assets folder")]
pub struct Cli {
    /// Root of the assets directory
    #[arg(long, global = true, default_value = "assets")]
    pub assets: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Turn scraped "Season N | Episode M | Title" records into structured episodes
    Normalize {
        /// Scraped records (default: <assets>/youtube-links.json)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Normalized output (default: <assets>/episodes.json)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Drop and report malformed records instead of failing the batch
        #[arg(long)]
        skip_malformed: bool,
    },

    /// Fetch every season's episode list from the OMDb API
    Fetch {
        /// Show title to look up
        #[arg(long, default_value = "Forensic Files")]
        title: String,

        /// Number of seasons to fetch
        #[arg(long, default_value_t = DEFAULT_SEASON_COUNT)]
        seasons: u32,

        /// OMDb API key (falls back to OMDB_API_KEY, then the config file)
        #[arg(long)]
        api_key: Option<String>,

        /// Output file (default: <assets>/episodes.json)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Create season-1 .. season-N directories under <assets>/<parent>
    Scaffold {
        /// Directory name inside the assets folder
        #[arg(default_value = "recognitions")]
        parent: String,

        #[arg(long, default_value_t = DEFAULT_SEASON_COUNT)]
        seasons: u32,
    },

    /// Rename downloaded videos to the "NN-lower-hyphenated" scheme
    RenameVideos {
        /// Videos directory (default: <assets>/videos)
        #[arg(long)]
        dir: Option<PathBuf>,

        #[arg(long, default_value_t = DEFAULT_SEASON_COUNT)]
        seasons: u32,

        /// Skip confirmation prompts
        #[arg(long)]
        no_confirm: bool,
    },

    /// Report which episodes have asset files on disk
    Status {
        /// Normalized episodes file (default: <assets>/episodes.json)
        #[arg(long)]
        episodes: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "video")]
        asset: AssetArg,

        /// Only report this season
        #[arg(long)]
        season: Option<u32>,

        #[arg(long, value_enum, default_value = "all")]
        filter: FilterArg,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum AssetArg {
    Video,
    Audio,
}

impl From<AssetArg> for AssetKind {
    fn from(arg: AssetArg) -> Self {
        match arg {
            AssetArg::Video => AssetKind::Video,
            AssetArg::Audio => AssetKind::Audio,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum FilterArg {
    All,
    Present,
    Missing,
}

impl From<FilterArg> for StatusFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => StatusFilter::All,
            FilterArg::Present => StatusFilter::Present,
            FilterArg::Missing => StatusFilter::Missing,
        }
    }
}
