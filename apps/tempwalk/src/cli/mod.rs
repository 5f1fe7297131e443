//! # tempwalk CLI Module
//!
//! This module implements the CLI interface for tempwalk.
//!
//! ## Available Commands
//!
//! - `stats` - Show index sizes for a dataset
//! - `sample` - Sample cyclic walks for a relation
//! - `acyclic` - Sample acyclic walks for a relation

mod commands;

use crate::config::{AppConfig, Overrides};
use crate::dataset::InverseSource;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tempwalk_core::{RelationId, TransitionDistribution, WalkError};

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// tempwalk - temporal random walk sampler
///
/// Samples cyclic and acyclic walks over a temporal knowledge graph.
#[derive(Parser, Debug)]
#[command(name = "tempwalk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (one object per line)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Transition distribution: "unif" or "exp"
    #[arg(long, global = true)]
    pub distribution: Option<TransitionDistribution>,

    /// Time tolerance added to the current timestamp in temporal filters
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub delta: Option<i64>,

    /// RNG seed for a reproducible run
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Engine calls allowed per requested walk
    #[arg(long, global = true)]
    pub attempts: Option<usize>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Dataset location shared by every command.
#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// Quadruple file: `head relation tail timestamp` per line
    #[arg(short, long)]
    pub data: PathBuf,

    /// Generate inverse edges with the `r + n` offset convention
    #[arg(long, conflicts_with = "inverse")]
    pub add_inverse: bool,

    /// Inverse-relation pair file: `relation inverse` per line
    #[arg(short, long, required_unless_present = "add_inverse")]
    pub inverse: Option<PathBuf>,
}

impl DataArgs {
    /// Where the inverse map comes from.
    pub fn inverse_source(&self) -> Result<InverseSource, WalkError> {
        match (&self.inverse, self.add_inverse) {
            (Some(path), false) => Ok(InverseSource::PairFile(path.clone())),
            (None, true) => Ok(InverseSource::Offset),
            _ => Err(WalkError::ConfigError(
                "use exactly one of --add-inverse or --inverse".to_string(),
            )),
        }
    }
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show index sizes for a dataset
    Stats {
        #[command(flatten)]
        data: DataArgs,
    },

    /// Sample cyclic walks
    Sample {
        #[command(flatten)]
        data: DataArgs,

        /// Target relation id
        #[arg(short, long)]
        relation: u64,

        /// Walk length in edges
        #[arg(short, long, default_value = "2")]
        length: usize,

        /// Number of walks to sample
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,
    },

    /// Sample acyclic walks of length 3
    Acyclic {
        #[command(flatten)]
        data: DataArgs,

        /// Target relation id
        #[arg(short, long)]
        relation: u64,

        /// Number of walks to sample
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,
    },
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            distribution: self.distribution,
            delta: self.delta,
            seed: self.seed,
            attempts: self.attempts,
        }
    }
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), WalkError> {
    let config = AppConfig::load(cli.config.as_deref())?.apply(&cli.overrides())?;
    let json_mode = cli.json_mode;

    match cli.command {
        Commands::Stats { data } => cmd_stats(&data, json_mode),
        Commands::Sample {
            data,
            relation,
            length,
            count,
        } => cmd_sample(
            &data,
            &config,
            json_mode,
            RelationId(relation),
            length,
            count,
        ),
        Commands::Acyclic {
            data,
            relation,
            count,
        } => cmd_acyclic(&data, &config, json_mode, RelationId(relation), count),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_sample_with_global_overrides() {
        let cli = Cli::try_parse_from([
            "tempwalk",
            "sample",
            "--data",
            "quads.txt",
            "--add-inverse",
            "--relation",
            "2",
            "--length",
            "3",
            "--distribution",
            "unif",
            "--delta",
            "-1",
            "--seed",
            "7",
        ])
        .expect("parse");

        let overrides = cli.overrides();
        assert_eq!(overrides.distribution, Some(TransitionDistribution::Uniform));
        assert_eq!(overrides.delta, Some(-1));
        assert_eq!(overrides.seed, Some(7));
        assert_eq!(overrides.attempts, None);

        let Commands::Sample {
            data,
            relation,
            length,
            count,
        } = cli.command
        else {
            unreachable!("parsed a different subcommand");
        };
        assert_eq!(relation, 2);
        assert_eq!(length, 3);
        assert_eq!(count, 10);
        assert_eq!(data.inverse_source().expect("source"), InverseSource::Offset);
    }

    #[test]
    fn delta_help_describes_tolerance() {
        let command = Cli::command();
        let delta = command
            .get_arguments()
            .find(|arg| arg.get_id() == "delta")
            .expect("delta flag");

        let help = delta.get_help().map(ToString::to_string).unwrap_or_default();
        assert!(help.contains("tolerance"));
    }

    #[test]
    fn inverse_flags_conflict() {
        let result = Cli::try_parse_from([
            "tempwalk",
            "stats",
            "--data",
            "quads.txt",
            "--add-inverse",
            "--inverse",
            "pairs.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn inverse_source_is_required() {
        let result = Cli::try_parse_from(["tempwalk", "stats", "--data", "quads.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn pair_file_source() {
        let cli = Cli::try_parse_from([
            "tempwalk",
            "acyclic",
            "-d",
            "quads.txt",
            "-i",
            "pairs.txt",
            "-r",
            "0",
        ])
        .expect("parse");

        let Commands::Acyclic { data, .. } = cli.command else {
            unreachable!("parsed a different subcommand");
        };
        assert_eq!(
            data.inverse_source().expect("source"),
            InverseSource::PairFile(PathBuf::from("pairs.txt"))
        );
    }
}
