//! Pure Impromptu API tools REST client.
//!
//! A minimal client for the Impromptu object service. Supports creating
//! input objects from string data, applying prompts to produce derived
//! objects, fetching object values, and deleting objects.
//!
//! # Example
//!
//! ```rust,ignore
//! use impromptu_client::{CreateInputRequest, ImpromptuClient};
//!
//! let client = ImpromptuClient::new("your-api-token".into());
//!
//! let req = CreateInputRequest::strings("uploaded_files_1", vec!["hello".into()]);
//! let resp = client.create_input(&req).await?;
//! println!("created with status {}", resp.status);
//! ```

pub mod error;
pub mod types;

pub use error::{ImpromptuError, Result};
pub use types::{
    ApiResponse, ApplyPromptRequest, CreateInputRequest, PromptInput, DATA_TYPE_STRINGS,
    PROCESSING_MODE_COMBINE,
};

use serde::Serialize;
use serde_json::Value;

const BASE_URL: &str = "https://staging.impromptu-labs.com/api_tools";

pub struct ImpromptuClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

impl ImpromptuClient {
    pub fn new(token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            token,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the client at a different deployment of the service.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Create an input object from string data. The chosen
    /// `created_object_name` becomes the object's handle.
    pub async fn create_input(&self, req: &CreateInputRequest) -> Result<ApiResponse> {
        tracing::info!(
            object = %req.created_object_name,
            items = req.input_data.len(),
            "Creating input object"
        );
        self.post("/input_data", req).await
    }

    /// Apply a prompt to existing objects, producing the requested output
    /// objects on the service side.
    pub async fn apply_prompt(&self, req: &ApplyPromptRequest) -> Result<ApiResponse> {
        tracing::info!(
            outputs = ?req.created_object_names,
            "Applying prompt"
        );
        self.post("/apply_prompt", req).await
    }

    /// Fetch the value of an object.
    pub async fn return_data(&self, object_name: &str) -> Result<ApiResponse> {
        let url = format!("{}/return_data/{}", self.base_url, object_name);
        let resp = self.client.get(&url).bearer_auth(&self.token).send().await?;
        Self::decode(resp).await
    }

    /// Delete an object. The response body is plain text; it is kept as a
    /// JSON string so callers can log it alongside the other operations.
    pub async fn delete_object(&self, object_name: &str) -> Result<ApiResponse> {
        tracing::info!(object = %object_name, "Deleting object");
        let url = format!("{}/objects/{}", self.base_url, object_name);
        let resp = self
            .client
            .delete(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ImpromptuError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp.text().await.unwrap_or_default();
        Ok(ApiResponse {
            status: status.as_u16(),
            body: Value::String(body),
        })
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn decode(resp: reqwest::Response) -> Result<ApiResponse> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ImpromptuError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body: Value = resp.json().await?;
        Ok(ApiResponse {
            status: status.as_u16(),
            body,
        })
    }
}
