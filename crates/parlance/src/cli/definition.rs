//! Handlers for commands working on declarations and DSL text.

use super::{OutputFormat, print_json};
use parlance::{
    CatalogFile, Declaration, DeclarationFile, DefinitionParser, Dialect, FileError,
    InMemoryCatalog, NameSource, ParlanceConfig, ParlanceResult, StepKind, parse_header,
    read_text,
};
use serde::Serialize;
use std::path::Path;
use tracing::{info, instrument, warn};

#[derive(Serialize)]
struct GeneratedDefinition<'a> {
    name: &'a str,
    dialect: Dialect,
    define: &'a str,
}

#[derive(Serialize)]
struct ParsedRow<'a> {
    id: &'a str,
    kind: StepKind,
    name: &'a str,
    source: String,
}

/// Render a declaration file as DSL text.
#[instrument(skip(path), fields(path = %path.display()))]
pub fn generate(path: &Path, format: OutputFormat) -> ParlanceResult<()> {
    let declaration = DeclarationFile::load(path)?.into_declaration()?;
    let report = declaration.validate();
    if !report.is_valid() {
        warn!(errors = report.errors().len(), "Declaration has validation errors");
    }

    let text = declaration.raw_text();
    match format {
        OutputFormat::Json => print_json(&GeneratedDefinition {
            name: declaration.name().as_str(),
            dialect: *declaration.dialect(),
            define: &text,
        }),
        OutputFormat::Text => {
            println!("{}", text);
            Ok(())
        }
    }
}

/// Parse a DSL file, resolving names in an optional catalog file.
#[instrument(skip(path, catalog, config), fields(path = %path.display()))]
pub async fn parse(
    path: &Path,
    catalog: Option<&Path>,
    format: OutputFormat,
    config: &ParlanceConfig,
) -> ParlanceResult<()> {
    let text = read_text(path)?;
    let catalog = match catalog {
        Some(catalog) => CatalogFile::load(catalog)?.into_catalog()?,
        None => InMemoryCatalog::new(),
    };

    let parsed = DefinitionParser::new(&catalog)
        .with_config(config.parser().clone())
        .parse(&text)
        .await;
    let rows: Vec<ParsedRow<'_>> = parsed
        .iter()
        .map(|parsed| ParsedRow {
            id: parsed.step().id(),
            kind: *parsed.step().kind(),
            name: parsed.step().label(),
            source: parsed.source().to_string(),
        })
        .collect();

    match format {
        OutputFormat::Json => print_json(&rows),
        OutputFormat::Text => {
            for (index, row) in rows.iter().enumerate() {
                println!(
                    "{:>3}. {:<8} {:<24} {} [{}]",
                    index + 1,
                    row.kind.as_ref(),
                    row.name,
                    row.id,
                    row.source
                );
            }
            let placeholders = parsed
                .iter()
                .filter(|parsed| matches!(parsed.source(), NameSource::Placeholder(_)))
                .count();
            println!("{} step(s), {} unresolved", rows.len(), placeholders);
            Ok(())
        }
    }
}

/// Validate a DSL file. Returns whether it is free of errors.
#[instrument(skip(path), fields(path = %path.display()))]
pub fn validate(
    path: &Path,
    dialect: Option<Dialect>,
    format: OutputFormat,
) -> ParlanceResult<bool> {
    let text = read_text(path)?;
    let (header_dialect, title) = parse_header(&text).unwrap_or_default();
    let dialect = dialect.unwrap_or(header_dialect);

    let report = Declaration::from_text(&title, dialect, text).validate();
    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => {
            for issue in report.errors() {
                println!("error: {}", issue);
            }
            for issue in report.warnings() {
                println!("warning: {}", issue);
            }
            println!(
                "{} {}: {} error(s), {} warning(s)",
                dialect,
                path.display(),
                report.errors().len(),
                report.warnings().len()
            );
        }
    }
    Ok(report.is_valid())
}

/// Rename the declaration in a DSL file. Returns whether a header line was found.
#[instrument(skip(path), fields(path = %path.display()))]
pub fn rename(path: &Path, title: &str, in_place: bool) -> ParlanceResult<bool> {
    let text = read_text(path)?;
    let Some((dialect, current)) = parse_header(&text) else {
        eprintln!("{}: no rule or story header line found", path.display());
        return Ok(false);
    };

    let mut declaration = Declaration::from_text(&current, dialect, text);
    declaration.rename(title);
    let renamed = declaration.raw_text();

    if in_place {
        std::fs::write(path, renamed.as_bytes()).map_err(|e| {
            FileError::new(format!("Failed to write {}: {}", path.display(), e))
        })?;
        info!(name = %declaration.name(), "Renamed declaration in place");
    } else {
        print!("{}", renamed);
    }
    Ok(true)
}
