//! DSL text generation from an ordered step list.

use crate::{encode_reference, strip_comment};
use parlance_core::{DeclarationName, Dialect, Step};
use tracing::{debug, instrument, warn};

/// Second line of every generated definition.
pub const STEPS_LINE: &str = "  steps:";

/// Indentation of step lines.
pub const STEP_INDENT: &str = "    ";

/// The header line, e.g. `- rule: greet_user`.
pub fn header_line(dialect: Dialect, name: &str) -> String {
    format!("{} {}", dialect.header_token(), name)
}

/// A single step line, e.g. `    - intent: [6f1c2a]`.
pub fn step_line(step: &Step) -> String {
    format!(
        "{}- {}: {}",
        STEP_INDENT,
        step.kind().marker(),
        encode_reference(step.id())
    )
}

/// Serialize a declaration into DSL text.
///
/// Output is deterministic. A story without steps generates an empty string, which
/// callers treat as "not yet defined". Lines are joined with `\n` and there is no
/// trailing newline.
///
/// # Examples
///
/// ```
/// use parlance_core::{DeclarationName, Dialect, Step};
/// use parlance_dsl::generate;
///
/// let name = DeclarationName::from_title("Greet User");
/// let text = generate(&name, Dialect::Rule, &[Step::intent("i1"), Step::response("r1")]);
/// assert_eq!(text, "- rule: greet_user\n  steps:\n    - intent: [i1]\n    - action: [r1]");
/// ```
#[instrument(skip(name, steps), fields(name = %name, step_count = steps.len()))]
pub fn generate(name: &DeclarationName, dialect: Dialect, steps: &[Step]) -> String {
    if steps.is_empty() && dialect == Dialect::Story {
        debug!("Story has no steps, nothing to generate");
        return String::new();
    }

    let mut lines = Vec::with_capacity(steps.len() + 2);
    lines.push(header_line(dialect, name.as_str()));
    lines.push(STEPS_LINE.to_string());
    lines.extend(steps.iter().map(step_line));
    lines.join("\n")
}

/// Rewrite only the declaration name on the header line of hand-authored text.
///
/// The first line whose trimmed content starts with the dialect's header token has the
/// name between the token and any trailing `#` comment replaced. Indentation, the
/// spacing around the name, the comment and the line ending are kept, and all other
/// lines are returned byte-identical. Returns `None` when the text has no header line
/// for this dialect.
///
/// # Examples
///
/// ```
/// use parlance_core::{DeclarationName, Dialect};
/// use parlance_dsl::rename_header;
///
/// let text = "# greeting flow\n- story: old   # owner: support\n  steps:   # keep me\n";
/// let renamed = rename_header(text, Dialect::Story, &DeclarationName::from_title("New Name"));
/// assert_eq!(
///     renamed.as_deref(),
///     Some("# greeting flow\n- story: new_name   # owner: support\n  steps:   # keep me\n")
/// );
/// ```
#[instrument(skip(raw_text, name), fields(name = %name, len = raw_text.len()))]
pub fn rename_header(raw_text: &str, dialect: Dialect, name: &DeclarationName) -> Option<String> {
    let token = dialect.header_token();
    let mut renamed = String::with_capacity(raw_text.len() + name.as_str().len());
    let mut replaced = false;

    for line in raw_text.split_inclusive('\n') {
        let trimmed = line.trim_start();
        match trimmed.strip_prefix(&token) {
            Some(rest) if !replaced => {
                let indent = &line[..line.len() - trimmed.len()];
                renamed.push_str(indent);
                renamed.push_str(&token);
                push_renamed_suffix(&mut renamed, rest, name.as_str());
                replaced = true;
            }
            _ => renamed.push_str(line),
        }
    }

    if replaced {
        debug!("Header line renamed in place");
        Some(renamed)
    } else {
        warn!(%dialect, "No header line found, text left untouched");
        None
    }
}

/// Write the part of a header line after its token with the name swapped out.
fn push_renamed_suffix(out: &mut String, rest: &str, name: &str) {
    let ending = if rest.ends_with("\r\n") {
        "\r\n"
    } else if rest.ends_with('\n') {
        "\n"
    } else {
        ""
    };
    let body = &rest[..rest.len() - ending.len()];

    let code = strip_comment(body);
    let name_start = code.len() - code.trim_start().len();
    let name_end = code.trim_end().len().max(name_start);
    let lead = &body[..name_start];
    let tail = &body[name_end..];

    out.push_str(if lead.is_empty() { " " } else { lead });
    out.push_str(name);
    if !tail.is_empty() && !tail.starts_with(char::is_whitespace) {
        out.push(' ');
    }
    out.push_str(tail);
    out.push_str(ending);
}
