//! Parse the fetched remote value into records.
//!
//! Line-splitting is a documented approximation: the service's output
//! schema is unspecified, so each non-blank line becomes one record. A
//! body without a textual `text_value` yields zero records rather than a
//! hard failure.

use serde_json::Value;
use tracing::warn;

use crate::types::record::ExtractedRecord;

/// Field of the fetch response body holding the transformed text.
pub const TEXT_VALUE_FIELD: &str = "text_value";

/// Parse a fetch response body into records.
pub fn parse_fetched_body(body: &Value) -> Vec<ExtractedRecord> {
    match body.get(TEXT_VALUE_FIELD).and_then(Value::as_str) {
        Some(text) => parse_text_value(text),
        None => {
            warn!("fetch response carried no textual text_value, producing no records");
            Vec::new()
        }
    }
}

/// Split `text` into one record per non-blank line.
///
/// Ids are 1-based and sequential in line order; content is trimmed;
/// timestamps are assigned at parse time.
pub fn parse_text_value(text: &str) -> Vec<ExtractedRecord> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(i, line)| ExtractedRecord::new(i as u32 + 1, line))
        .collect()
}
