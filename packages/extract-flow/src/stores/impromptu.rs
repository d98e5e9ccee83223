//! Object store backed by the Impromptu API tools service.

use async_trait::async_trait;
use impromptu_client::{
    ApiResponse, ApplyPromptRequest, CreateInputRequest, ImpromptuClient, ImpromptuError,
};

use crate::error::{StoreError, StoreResult};
use crate::traits::store::{ObjectStore, StoreResponse};

/// [`ObjectStore`] over the real REST service.
pub struct ImpromptuStore {
    client: ImpromptuClient,
}

impl ImpromptuStore {
    pub fn new(client: ImpromptuClient) -> Self {
        Self { client }
    }
}

impl From<ImpromptuError> for StoreError {
    fn from(e: ImpromptuError) -> Self {
        match e {
            ImpromptuError::Api { status, message } => StoreError::Api { status, message },
            ImpromptuError::Http(e) => StoreError::Transport(Box::new(e)),
        }
    }
}

fn into_store_response(resp: ApiResponse) -> StoreResponse {
    StoreResponse {
        status: resp.status,
        body: resp.body,
    }
}

#[async_trait]
impl ObjectStore for ImpromptuStore {
    async fn create_object(&self, name: &str, texts: &[String]) -> StoreResult<StoreResponse> {
        let req = CreateInputRequest::strings(name, texts.to_vec());
        let resp = self.client.create_input(&req).await?;
        Ok(into_store_response(resp))
    }

    async fn apply_prompt(
        &self,
        output: &str,
        prompt: &str,
        input: &str,
    ) -> StoreResult<StoreResponse> {
        let req = ApplyPromptRequest::combined(output, prompt, input);
        let resp = self.client.apply_prompt(&req).await?;
        Ok(into_store_response(resp))
    }

    async fn fetch_value(&self, handle: &str) -> StoreResult<StoreResponse> {
        let resp = self.client.return_data(handle).await?;
        Ok(into_store_response(resp))
    }

    async fn delete_object(&self, handle: &str) -> StoreResult<StoreResponse> {
        let resp = self.client.delete_object(handle).await?;
        Ok(into_store_response(resp))
    }
}
