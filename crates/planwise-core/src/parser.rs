//! Extraction of the audience/tech suggestion from free model text
//!
//! Generated text is unreliable: the block markers may be missing, the labels
//! may be absent, and the values may name something outside the allowed
//! options. Every path here ends in a fully populated [`Suggestion`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{AudienceType, Suggestion, TechRequirement};

/// Marker bounding the structured answer block
pub const BLOCK_MARKER: &str = "---";

const AUDIENCE_LABEL: &str = "audiencetype";
const TECH_LABEL: &str = "techrequirement";

/// Model text split into what the user sees and what the planner uses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedResponse {
    /// Structured block (or the whole trimmed text when no block is present)
    pub message: String,
    pub suggestion: Suggestion,
}

/// Select the region of `text` the labels are read from.
///
/// With at least two markers this is the text between the first and second
/// one; otherwise it is the whole text. The region is trimmed.
pub fn extract_block(text: &str) -> &str {
    if text.matches(BLOCK_MARKER).count() >= 2 {
        text.split(BLOCK_MARKER).nth(1).unwrap_or(text).trim()
    } else {
        text.trim()
    }
}

/// Parse a model response into a suggestion, falling back to defaults
pub fn parse(text: &str) -> Suggestion {
    parse_block(extract_block(text))
}

/// Parse a model response, keeping the structured block for display
pub fn parse_response(text: &str) -> ParsedResponse {
    let block = extract_block(text);
    ParsedResponse {
        message: block.to_string(),
        suggestion: parse_block(block),
    }
}

fn parse_block(block: &str) -> Suggestion {
    let mut suggestion = Suggestion::default();

    for line in block.lines() {
        let Some((label, value)) = line.split_once(':') else {
            continue;
        };
        let value = clean_value(value);

        match normalize(label).as_str() {
            AUDIENCE_LABEL => match AudienceType::from_label(value) {
                Some(audience) => suggestion.audience_type = audience,
                None => debug!(value, "ignoring unrecognised audience type"),
            },
            TECH_LABEL => match TechRequirement::from_label(value) {
                Some(tech) => suggestion.tech_requirement = tech,
                None => debug!(value, "ignoring unrecognised tech requirement"),
            },
            _ => {}
        }
    }

    suggestion
}

fn normalize(label: &str) -> String {
    label
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Trim whitespace, emphasis/quote wrapping and sentence punctuation
fn clean_value(value: &str) -> &str {
    value
        .trim()
        .trim_matches(|c: char| matches!(c, '*' | '"' | '\'' | '`' | '.' | ',' | ';' | '!'))
        .trim()
}
