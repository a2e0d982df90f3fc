//! Response Normalizer: turns raw completion text into a curation document.
//!
//! One fence-stripping pass, then strict JSON decoding. The top level must be a
//! non-empty JSON object; nested fields are filled leniently by the model types.

use serde_json::Value;
use thiserror::Error;

use crate::models::curation::CurationResult;

const FENCE: &str = "```";

#[derive(Debug, Error)]
pub enum ParseFailure {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON object at the top level, found {0}")]
    NotAnObject(&'static str),

    #[error("the model returned an empty JSON object")]
    EmptyObject,
}

/// A successfully decoded reply: the typed document plus the JSON exactly as
/// the model returned it (used for export, so unmodelled fields survive).
#[derive(Debug, Clone)]
pub struct DecodedCuration {
    pub document: CurationResult,
    pub raw: Value,
}

/// Removes one Markdown code fence wrapping the whole text, if present.
///
/// The opening fence may carry a language tag. The closing fence must be the
/// last non-empty line. Inner fences are left alone.
pub fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    if !text.starts_with(FENCE) {
        return text;
    }

    let (Some(first_newline), Some(last_newline)) = (text.find('\n'), text.rfind('\n')) else {
        return text;
    };

    let last_line = &text[last_newline + 1..];
    if !last_line.trim_start().starts_with(FENCE) {
        return text;
    }

    if first_newline == last_newline {
        return "";
    }
    text[first_newline + 1..last_newline].trim()
}

/// Decodes raw completion text into a curation document.
/// Never panics; every failure comes back as a `ParseFailure`.
pub fn normalize_response(raw_text: &str) -> Result<DecodedCuration, ParseFailure> {
    let cleaned = strip_code_fence(raw_text);
    let raw: Value = serde_json::from_str(cleaned)?;

    if !raw.is_object() {
        return Err(ParseFailure::NotAnObject(json_kind(&raw)));
    }
    if raw.as_object().is_some_and(|fields| fields.is_empty()) {
        return Err(ParseFailure::EmptyObject);
    }

    let document: CurationResult = serde_json::from_value(raw.clone())?;
    Ok(DecodedCuration { document, raw })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
