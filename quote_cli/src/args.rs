//! Command-line arguments

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "moldquote", version, about = "Injection molding quote calculator")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Catalog TOML file replacing the built-in materials and presses
    #[arg(long, global = true, env = "MOLDQUOTE_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Quote history file
    #[arg(long, global = true, env = "MOLDQUOTE_HISTORY")]
    pub history: Option<PathBuf>,

    /// User recorded in the history lock file
    #[arg(long, global = true, env = "MOLDQUOTE_USER")]
    pub user: Option<String>,

    /// Print JSON instead of a formatted report
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Price a part
    Quote(QuoteArgs),

    /// List catalog materials
    Materials,

    /// List press tiers
    Machines,

    /// Print the active catalog as TOML
    Catalog,

    /// Saved quotes
    #[command(subcommand)]
    History(HistoryCommand),
}

#[derive(Debug, Args)]
pub struct QuoteArgs {
    /// CAD file name; analyzed by the blueprint analyzer when no geometry is given
    #[arg(long)]
    pub file: Option<String>,

    /// Part volume (cm³)
    #[arg(long)]
    pub volume: Option<f64>,

    /// Bounding-box length (mm)
    #[arg(long)]
    pub length: Option<f64>,

    /// Bounding-box width (mm)
    #[arg(long)]
    pub width: Option<f64>,

    /// Bounding-box height (mm)
    #[arg(long)]
    pub height: Option<f64>,

    /// Nominal wall thickness (mm)
    #[arg(long)]
    pub wall: Option<f64>,

    /// Material name (unknown names quote with the first catalog material)
    #[arg(short, long)]
    pub material: Option<String>,

    /// Production quantity
    #[arg(short, long, default_value_t = 1000)]
    pub quantity: u32,

    /// Cavities per mold
    #[arg(short, long, default_value_t = 1)]
    pub cavities: u32,

    /// Part color: natural, black or custom
    #[arg(long, default_value = "natural")]
    pub color: String,

    /// Prompt for any geometry value not given on the command line
    #[arg(short, long)]
    pub interactive: bool,

    /// Save the quote to history
    #[arg(long)]
    pub save: bool,
}

#[derive(Debug, Subcommand)]
pub enum HistoryCommand {
    /// List saved quotes, newest first
    List,

    /// Show one saved quote
    Show {
        /// Quote id or unique id prefix
        id: String,
    },

    /// Delete a saved quote
    Delete {
        /// Quote id or unique id prefix
        id: String,
    },
}
