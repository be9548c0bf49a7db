//! News feed CLI commands.

use clap::{Parser, Subcommand};

/// News feed commands.
#[derive(Debug, Parser)]
pub struct FeedsCommand {
    #[command(subcommand)]
    pub action: FeedsAction,
}

/// Available feed actions.
#[derive(Debug, Subcommand)]
pub enum FeedsAction {
    /// List the configured sources.
    List,
    /// Show the articles of a source.
    Show {
        /// Source name, defaults to the first source.
        name: Option<String>,
        /// Drop any cached copy and fetch again.
        #[arg(long)]
        force: bool,
        /// Also fetch the other sources in the background.
        #[arg(long)]
        prewarm: bool,
        /// Maximum number of articles to print.
        #[arg(long, default_value = "10")]
        limit: usize,
    },
}
