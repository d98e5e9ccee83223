//! Extraction pipeline - the core of the library.
//!
//! The pipeline sequences:
//! - Reading (local file decode, progress 0-50)
//! - Creating (commit decoded texts as a remote input object, progress 75)
//! - Transforming (apply the extraction prompt to the input object)
//! - Fetching (retrieve the transformed value, progress 100)
//! - Parsing (line-split the value into records)

pub mod orchestrator;
pub mod parse;
pub mod prompts;

pub use orchestrator::{Orchestrator, PipelineConfig};
pub use parse::{parse_fetched_body, parse_text_value, TEXT_VALUE_FIELD};
pub use prompts::EXTRACT_PROMPT;
