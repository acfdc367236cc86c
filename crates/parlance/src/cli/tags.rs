//! Entity tag inspection.

use super::{OutputFormat, print_json};
use parlance::{ParlanceResult, decode_entity_tags, strip_entity_tags};
use serde::Serialize;

#[derive(Serialize)]
struct TagReport<'a> {
    plain: String,
    tags: Vec<TagRow<'a>>,
}

#[derive(Serialize)]
struct TagRow<'a> {
    value: &'a str,
    entity_id: &'a str,
}

/// Print the tags of `sentence` and the sentence with tags removed.
pub fn show_tags(sentence: &str, format: OutputFormat) -> ParlanceResult<()> {
    let tags = decode_entity_tags(sentence);
    let plain = strip_entity_tags(sentence);

    match format {
        OutputFormat::Json => print_json(&TagReport {
            plain,
            tags: tags
                .iter()
                .map(|tag| TagRow {
                    value: tag.value(),
                    entity_id: tag.entity_id(),
                })
                .collect(),
        }),
        OutputFormat::Text => {
            for tag in &tags {
                println!("{} -> {}", tag.value(), tag.entity_id());
            }
            println!("plain: {}", plain);
            Ok(())
        }
    }
}
