use clap::{Parser, Subcommand};

use std::path::PathBuf;

use super::constants::{
    ENV_BIND, ENV_CONFIG, ENV_MAX_DEPTH, ENV_MAX_FILTERS, ENV_MAX_JSON_BYTES,
};

#[derive(Parser)]
#[command(name = "sqlpred")]
#[command(version, about = "Compile filter predicates into SQL WHERE fragments", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Render literals as ? placeholders and print the bound values
    #[arg(long, short = 'b', global = true, env = ENV_BIND)]
    pub bind: bool,

    /// Maximum size of the filter document in bytes
    #[arg(long, global = true, env = ENV_MAX_JSON_BYTES)]
    pub max_json_bytes: Option<usize>,

    /// Maximum number of top-level filters
    #[arg(long, global = true, env = ENV_MAX_FILTERS)]
    pub max_filters: Option<usize>,

    /// Maximum nesting depth of filter groups
    #[arg(long, global = true, env = ENV_MAX_DEPTH)]
    pub max_depth: Option<usize>,
}

#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Render filter JSON as a SQL WHERE fragment
    Render {
        /// Filter JSON file (reads stdin when omitted or "-")
        input: Option<PathBuf>,
    },
    /// Validate filter JSON without printing SQL
    Check {
        /// Filter JSON file (reads stdin when omitted or "-")
        input: Option<PathBuf>,
    },
}

impl Commands {
    pub fn input(&self) -> Option<&PathBuf> {
        match self {
            Commands::Render { input } | Commands::Check { input } => input.as_ref(),
        }
    }
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub config: Option<PathBuf>,
    pub bind: bool,
    pub max_json_bytes: Option<usize>,
    pub max_filters: Option<usize>,
    pub max_depth: Option<usize>,
}

impl Cli {
    /// Split parsed arguments into config and command
    pub fn into_parts(self) -> (CliConfig, Commands) {
        let config = CliConfig {
            config: self.config,
            bind: self.bind,
            max_json_bytes: self.max_json_bytes,
            max_filters: self.max_filters,
            max_depth: self.max_depth,
        };
        (config, self.command)
    }
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Commands) {
    Cli::parse().into_parts()
}
