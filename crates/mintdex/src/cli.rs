use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Query tagged token mints against local token metadata.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// JSONL file of token metadata, one token object per line.
    #[arg(long, env = "MINTDEX_METADATA")]
    pub metadata: PathBuf,

    /// Mintlist JSON files to register (repeatable). Each mint is tagged
    /// with the list's name.
    #[arg(long)]
    pub mintlist: Vec<PathBuf>,

    /// Directories of mintlist JSON files to register (repeatable).
    #[arg(long, env = "MINTDEX_MINTLIST_DIR")]
    pub mintlist_dir: Vec<PathBuf>,

    /// Extra tags applied to every registered mintlist (repeatable).
    #[arg(long)]
    pub tag: Vec<String>,

    /// Mintlist JSON files whose mints are excluded from results (repeatable).
    #[arg(long)]
    pub exclude_mintlist: Vec<PathBuf>,

    /// Individual mints excluded from results (repeatable).
    #[arg(long)]
    pub exclude: Vec<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print every registered, non-excluded token.
    All,

    /// Print a single token; prints `null` when the mint is excluded.
    Get { mint: String },

    /// Print the tokens for several mints in one batch.
    Many {
        #[arg(required = true)]
        mints: Vec<String>,
    },

    /// Print every token carrying a tag.
    Tag { tag: String },

    /// Print all known tags with their mint counts.
    Tags,
}
