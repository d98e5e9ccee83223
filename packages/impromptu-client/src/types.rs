use serde::Serialize;
use serde_json::Value;

/// The only data type the pipeline commits: a list of UTF-8 strings.
pub const DATA_TYPE_STRINGS: &str = "strings";

/// Processing mode that folds all entries of an input object into a single
/// logical unit before the prompt runs.
pub const PROCESSING_MODE_COMBINE: &str = "combine_events";

/// Body for `POST /input_data`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateInputRequest {
    pub created_object_name: String,
    pub data_type: String,
    pub input_data: Vec<String>,
}

impl CreateInputRequest {
    /// Create a strings-typed input object request.
    pub fn strings(name: impl Into<String>, input_data: Vec<String>) -> Self {
        Self {
            created_object_name: name.into(),
            data_type: DATA_TYPE_STRINGS.to_string(),
            input_data,
        }
    }
}

/// One input reference inside an apply-prompt request.
#[derive(Debug, Clone, Serialize)]
pub struct PromptInput {
    pub object_name: String,
    pub processing_mode: String,
}

impl PromptInput {
    /// Reference an object with `combine_events` processing.
    pub fn combined(object_name: impl Into<String>) -> Self {
        Self {
            object_name: object_name.into(),
            processing_mode: PROCESSING_MODE_COMBINE.to_string(),
        }
    }
}

/// Body for `POST /apply_prompt`.
#[derive(Debug, Clone, Serialize)]
pub struct ApplyPromptRequest {
    pub created_object_names: Vec<String>,
    pub prompt_string: String,
    pub inputs: Vec<PromptInput>,
}

impl ApplyPromptRequest {
    /// Request one output object produced by running `prompt_string` over a
    /// single combined input object.
    pub fn combined(
        output_name: impl Into<String>,
        prompt_string: impl Into<String>,
        input_name: impl Into<String>,
    ) -> Self {
        Self {
            created_object_names: vec![output_name.into()],
            prompt_string: prompt_string.into(),
            inputs: vec![PromptInput::combined(input_name)],
        }
    }
}

/// A decoded API response: the HTTP status and the JSON body.
///
/// The service's response shapes are not pinned down, so the body is kept
/// raw for callers (and their call logs) to interpret.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_input_request_wire_shape() {
        let req = CreateInputRequest::strings("uploaded_files_1", vec!["a".into(), "b".into()]);
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "created_object_name": "uploaded_files_1",
                "data_type": "strings",
                "input_data": ["a", "b"],
            })
        );
    }

    #[test]
    fn apply_prompt_request_wire_shape() {
        let req = ApplyPromptRequest::combined("out_1", "Extract: {input_data}", "in_1");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "created_object_names": ["out_1"],
                "prompt_string": "Extract: {input_data}",
                "inputs": [{"object_name": "in_1", "processing_mode": "combine_events"}],
            })
        );
    }
}
