//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - run() function to execute the command

use clap::Subcommand;

pub mod config;
pub mod corpus;
pub mod embed;
pub mod matching;

use crate::app::AppContext;
use crate::error::Result;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Embed text and show its hash buckets
    Embed(embed::EmbedArgs),

    /// Find the closest corpus topic for one or more texts
    Match(matching::MatchArgs),

    /// Build, check and list topic corpora
    Corpus(corpus::CorpusArgs),

    /// Show the effective configuration
    Config(config::ConfigArgs),
}

impl Commands {
    /// Name reported in the robot envelope.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Embed(_) => "embed",
            Self::Match(_) => "match",
            Self::Corpus(args) => args.command.name(),
            Self::Config(_) => "config",
        }
    }
}

/// Dispatch a command to its handler
pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Embed(args) => embed::run(ctx, args),
        Commands::Match(args) => matching::run(ctx, args),
        Commands::Corpus(args) => corpus::run(ctx, args),
        Commands::Config(args) => config::run(ctx, args),
    }
}
