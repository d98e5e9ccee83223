//! Prompt templates sent to the object service.

/// Instruction applied to the committed upload data. The service
/// substitutes `{input_data}` with the combined input object value.
pub const EXTRACT_PROMPT: &str = "Extract key information from this data: {input_data}";
