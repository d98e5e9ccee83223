//! Extracted records - the pipeline's structured output.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tag carried by every record produced by the parsing stage.
pub const RECORD_KIND: &str = "extracted";

/// One structured record parsed from the transformed remote value.
///
/// Immutable once produced; owned by the caller for display and export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    /// 1-based position in the parsed output
    pub id: u32,

    /// Trimmed line text, never empty
    pub content: String,

    /// Fixed record tag, `"extracted"`
    #[serde(rename = "type")]
    pub kind: String,

    /// When the record was parsed (not when the remote call was made)
    pub timestamp: DateTime<Utc>,
}

impl ExtractedRecord {
    /// Create a record stamped with the current instant.
    pub fn new(id: u32, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            kind: RECORD_KIND.to_string(),
            timestamp: Utc::now(),
        }
    }
}
