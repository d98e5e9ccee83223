//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the pipeline
//! without making real network calls or touching the filesystem.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::{StoreError, StoreResult};
use crate::traits::source::FileSource;
use crate::traits::store::{ObjectStore, StoreResponse};

/// A mock object store for testing.
///
/// Returns deterministic, configurable responses for all four remote
/// operations, with optional failure injection and artificial latency.
#[derive(Default)]
pub struct MockObjectStore {
    /// Predefined fetch bodies by handle
    values: Arc<RwLock<HashMap<String, Value>>>,

    /// Operations that should fail
    failures: Arc<RwLock<Vec<FailRule>>>,

    /// Artificial latency applied to every operation
    latency: Arc<RwLock<Option<Duration>>>,

    /// Call tracking for assertions
    calls: Arc<RwLock<Vec<MockStoreCall>>>,
}

/// Record of a call made to the mock store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockStoreCall {
    Create { name: String, texts: usize },
    ApplyPrompt { output: String, input: String },
    Fetch { handle: String },
    Delete { handle: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FailRule {
    Create,
    ApplyPrompt,
    Fetch,
    Delete(String),
}

impl MockObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Predefine the `text_value` returned when `handle` is fetched.
    pub fn with_text_value(self, handle: impl Into<String>, text: impl Into<String>) -> Self {
        self.values
            .write()
            .unwrap()
            .insert(handle.into(), json!({ "text_value": text.into() }));
        self
    }

    /// Predefine a raw fetch body for `handle`.
    pub fn with_fetch_body(self, handle: impl Into<String>, body: Value) -> Self {
        self.values.write().unwrap().insert(handle.into(), body);
        self
    }

    /// Make every create call fail.
    pub fn fail_create(self) -> Self {
        self.failures.write().unwrap().push(FailRule::Create);
        self
    }

    /// Make every apply-prompt call fail.
    pub fn fail_apply_prompt(self) -> Self {
        self.failures.write().unwrap().push(FailRule::ApplyPrompt);
        self
    }

    /// Make every fetch call fail.
    pub fn fail_fetch(self) -> Self {
        self.failures.write().unwrap().push(FailRule::Fetch);
        self
    }

    /// Make delete calls for `handle` fail.
    pub fn fail_delete(self, handle: impl Into<String>) -> Self {
        self.failures
            .write()
            .unwrap()
            .push(FailRule::Delete(handle.into()));
        self
    }

    /// Delay every operation, so tests can observe in-flight calls.
    pub fn with_latency(self, latency: Duration) -> Self {
        *self.latency.write().unwrap() = Some(latency);
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockStoreCall> {
        self.calls.read().unwrap().clone()
    }

    async fn simulate_latency(&self) {
        let latency = *self.latency.read().unwrap();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn should_fail(&self, rule: &FailRule) -> bool {
        self.failures.read().unwrap().contains(rule)
    }

    fn failure(op: &str) -> StoreError {
        StoreError::Api {
            status: 500,
            message: format!("mock {op} failure"),
        }
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    async fn create_object(&self, name: &str, texts: &[String]) -> StoreResult<StoreResponse> {
        self.calls.write().unwrap().push(MockStoreCall::Create {
            name: name.to_string(),
            texts: texts.len(),
        });
        self.simulate_latency().await;

        if self.should_fail(&FailRule::Create) {
            return Err(Self::failure("create"));
        }
        Ok(StoreResponse {
            status: 200,
            body: json!({ "object_name": name, "status": "created" }),
        })
    }

    async fn apply_prompt(
        &self,
        output: &str,
        _prompt: &str,
        input: &str,
    ) -> StoreResult<StoreResponse> {
        self.calls.write().unwrap().push(MockStoreCall::ApplyPrompt {
            output: output.to_string(),
            input: input.to_string(),
        });
        self.simulate_latency().await;

        if self.should_fail(&FailRule::ApplyPrompt) {
            return Err(Self::failure("apply_prompt"));
        }
        Ok(StoreResponse {
            status: 200,
            body: json!({ "object_name": output, "status": "transformed" }),
        })
    }

    async fn fetch_value(&self, handle: &str) -> StoreResult<StoreResponse> {
        self.calls.write().unwrap().push(MockStoreCall::Fetch {
            handle: handle.to_string(),
        });
        self.simulate_latency().await;

        if self.should_fail(&FailRule::Fetch) {
            return Err(Self::failure("fetch"));
        }

        let body = self
            .values
            .read()
            .unwrap()
            .get(handle)
            .cloned()
            .unwrap_or_else(|| json!({ "text_value": format!("Extracted summary for {handle}") }));
        Ok(StoreResponse { status: 200, body })
    }

    async fn delete_object(&self, handle: &str) -> StoreResult<StoreResponse> {
        self.calls.write().unwrap().push(MockStoreCall::Delete {
            handle: handle.to_string(),
        });
        self.simulate_latency().await;

        if self.should_fail(&FailRule::Delete(handle.to_string())) {
            return Err(Self::failure("delete"));
        }
        Ok(StoreResponse {
            status: 200,
            body: Value::String("deleted".to_string()),
        })
    }
}

/// A mock file source returning in-memory contents.
#[derive(Default)]
pub struct MockFileSource {
    files: Arc<RwLock<HashMap<PathBuf, String>>>,
    fail_paths: Arc<RwLock<Vec<PathBuf>>>,
}

impl MockFileSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an in-memory file.
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files
            .write()
            .unwrap()
            .insert(path.into(), content.into());
        self
    }

    /// Mark a path as failing to read.
    pub fn fail_path(self, path: impl Into<PathBuf>) -> Self {
        self.fail_paths.write().unwrap().push(path.into());
        self
    }
}

#[async_trait]
impl FileSource for MockFileSource {
    async fn read_text(&self, path: &Path) -> io::Result<String> {
        if self.fail_paths.read().unwrap().iter().any(|p| p == path) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "mock decode failure",
            ));
        }

        self.files.read().unwrap().get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no mock file at {}", path.display()),
            )
        })
    }
}
