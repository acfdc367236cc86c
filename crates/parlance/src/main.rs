//! Parlance CLI binary.
//!
//! This binary provides command-line access to the DSL engine:
//! - Render declaration TOML files as rule or story text
//! - Parse and validate hand-written definitions
//! - Rename a definition without touching its other lines
//! - Inspect entity tags in intent examples

use clap::Parser;
use parlance::{ParlanceConfig, init_logging};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, generate, parse, rename, show_tags, validate};

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ParlanceConfig::from_file(path)?,
        None => ParlanceConfig::load()?,
    };

    // Initialize tracing
    let mut logging = config.logging().clone();
    if cli.verbose {
        logging = logging.with_level("debug");
    }
    init_logging(&logging)?;

    // Execute the requested command
    let success = match cli.command {
        Commands::Generate {
            declaration,
            format,
        } => {
            generate(&declaration, format)?;
            true
        }

        Commands::Parse {
            definition,
            catalog,
            format,
        } => {
            parse(&definition, catalog.as_deref(), format, &config).await?;
            true
        }

        Commands::Validate {
            definition,
            dialect,
            format,
        } => validate(&definition, dialect, format)?,

        Commands::Rename {
            definition,
            title,
            in_place,
        } => rename(&definition, &title, in_place)?,

        Commands::Tags { sentence, format } => {
            show_tags(&sentence, format)?;
            true
        }
    };

    if !success {
        std::process::exit(1);
    }
    Ok(())
}
