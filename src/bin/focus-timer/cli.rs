use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Arguments {
    /// Path to a custom configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Path to the profile file that collects earned points
    #[arg(short, long, conflicts_with = "guest")]
    pub profile: Option<PathBuf>,
    /// Run without a profile, so no points are kept
    #[arg(short, long)]
    pub guest: bool,
    /// Maximum logging level the subscriber should use
    #[arg(short, long, default_value_t = Level::WARN)]
    pub verbosity: Level,
}
