//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the parlance binary.

mod commands;
mod definition;
mod tags;

pub use commands::{Cli, Commands, OutputFormat};
pub use definition::{generate, parse, rename, validate};
pub use tags::show_tags;

use parlance::{JsonError, ParlanceResult};
use serde::Serialize;

fn print_json<T: Serialize>(value: &T) -> ParlanceResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| JsonError::new(e.to_string()))?;
    println!("{}", json);
    Ok(())
}
