//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use parlance::Dialect;
use std::path::PathBuf;

/// Parlance - author conversational rules and stories as DSL text
#[derive(Parser, Debug)]
#[command(name = "parlance")]
#[command(about = "Generate, parse and validate rule and story definitions", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file to use instead of the default search path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a declaration TOML file as DSL text
    Generate {
        /// Path to the declaration TOML file
        declaration: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Parse DSL text into steps, resolving names in a catalog
    Parse {
        /// Path to the DSL text file
        definition: PathBuf,

        /// Catalog TOML file with `[[entries]]`
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Check step ordering; exits non-zero when errors are found
    Validate {
        /// Path to the DSL text file
        definition: PathBuf,

        /// Dialect to validate against, overriding the header line
        #[arg(long)]
        dialect: Option<Dialect>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Rename the declaration on the header line, leaving other lines untouched
    Rename {
        /// Path to the DSL text file
        definition: PathBuf,

        /// New title; normalized before writing
        title: String,

        /// Rewrite the file instead of printing the result
        #[arg(long)]
        in_place: bool,
    },

    /// Show the entity tags of an intent example sentence
    Tags {
        /// Example sentence, e.g. "fly to [Paris]([city])"
        sentence: String,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable format
    #[default]
    Text,
    /// JSON format
    Json,
}
