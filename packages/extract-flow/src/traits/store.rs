//! Object store trait - the remote object service seam.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreResult;

/// A response from the object service: HTTP status plus raw JSON body.
///
/// The service's response shapes are not pinned down, so bodies stay raw
/// and callers (the orchestrator, the call ledger) interpret them.
#[derive(Debug, Clone)]
pub struct StoreResponse {
    pub status: u16,
    pub body: Value,
}

/// Remote object service operations consumed by the orchestrator.
///
/// Implemented over the real REST service by [`crate::stores::ImpromptuStore`]
/// and in memory by [`crate::testing::MockObjectStore`].
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Create an object named `name` holding the given texts. The chosen
    /// name becomes the object's handle.
    async fn create_object(&self, name: &str, texts: &[String]) -> StoreResult<StoreResponse>;

    /// Run `prompt` over the object named `input`, materializing the result
    /// as a new object named `output`. The input's entries are combined into
    /// a single logical unit, not processed one by one.
    async fn apply_prompt(
        &self,
        output: &str,
        prompt: &str,
        input: &str,
    ) -> StoreResult<StoreResponse>;

    /// Fetch the value of the object named `handle`.
    async fn fetch_value(&self, handle: &str) -> StoreResult<StoreResponse>;

    /// Delete the object named `handle`.
    async fn delete_object(&self, handle: &str) -> StoreResult<StoreResponse>;
}
