use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "towel-compare", version, about = "Paper-towel cost comparison against the reference product")]
pub struct Cli {
    /// JSON configuration file (built-in defaults when omitted)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Usage data CSV, overrides `engine.data_path`
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}
