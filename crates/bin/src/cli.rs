//! CLI argument definitions for the harvest binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

/// Harvest: versioned baskets of accumulating form data
#[derive(Parser, Debug)]
#[command(name = "harvest")]
#[command(about = "Harvest: store multi-step baskets as chains of deltas")]
#[command(version)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Human, env = "HARVEST_FORMAT")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Walk through creating, saving and branching a basket in memory
    Simulate,
    /// Create a new basket file from an initial JSON view
    Create(CreateArgs),
    /// Save a JSON view under an existing tag
    Save(SaveArgs),
    /// Start a new tag from an existing version and move head to it
    Branch(BranchArgs),
    /// Print the reconstructed view of a tag
    Show(ShowArgs),
}

/// Location of the stored basket, shared by every file-backed command
#[derive(clap::Args, Debug, Clone)]
pub struct BasketFileArgs {
    /// Path of the stored basket JSON file
    #[arg(short, long, default_value = "basket.json", env = "HARVEST_BASKET_FILE")]
    pub file: PathBuf,
}

/// Arguments for the create command
#[derive(clap::Args, Debug)]
pub struct CreateArgs {
    #[command(flatten)]
    pub basket: BasketFileArgs,

    /// Tag to create as an empty child of the initial version
    #[arg(short, long)]
    pub tag: Option<String>,

    /// External identifier to attach. A random UUID is used when omitted.
    #[arg(long)]
    pub id: Option<String>,

    /// Overwrite an existing basket file
    #[arg(long)]
    pub force: bool,

    /// Initial view as a JSON object
    pub data: String,
}

/// Arguments for the save command
#[derive(clap::Args, Debug)]
pub struct SaveArgs {
    #[command(flatten)]
    pub basket: BasketFileArgs,

    /// Tag whose delta is recomputed
    #[arg(short, long)]
    pub tag: String,

    /// New view as a JSON object
    pub data: String,
}

/// Arguments for the branch command
#[derive(clap::Args, Debug)]
pub struct BranchArgs {
    #[command(flatten)]
    pub basket: BasketFileArgs,

    /// Tag for the new version
    #[arg(short, long)]
    pub tag: String,

    /// Parent version key. Defaults to the version behind head.
    #[arg(long)]
    pub from: Option<String>,
}

/// Arguments for the show command
#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub basket: BasketFileArgs,

    /// Tag to reconstruct. Defaults to head.
    #[arg(short, long)]
    pub tag: Option<String>,
}
