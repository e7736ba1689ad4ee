use std::path::PathBuf;

use clap::{
    Parser,
    Subcommand,
};

/// Builds the front and back templates of a code card note type
#[derive(Parser)]
#[command(name = "codecards")]
#[command(version, long_about = None)]
pub struct Cli {
    /// Project directory holding templates/ and snippets/
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Build config (defaults to <root>/cards.hjson when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compose both sides and write them to the output directory
    Build,

    /// Compose both sides without writing, reporting any problem
    Check,
}
