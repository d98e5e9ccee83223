//! Created-object registry - handles pending explicit release.

use std::sync::{Arc, RwLock};
use tracing::{info, warn};

use crate::error::StoreError;
use crate::ledger::{CallLedger, CallStatus};
use crate::traits::store::ObjectStore;

/// Ordered set of remote object handles created by the pipeline.
///
/// Insertion order is creation order. The registry outlives individual
/// runs; a handle stays registered until a delete call for it succeeds.
/// Cheap to clone; clones observe the same handles.
#[derive(Clone, Default)]
pub struct CreatedObjectRegistry {
    handles: Arc<RwLock<Vec<String>>>,
}

impl CreatedObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handle. Re-registering an existing handle is a no-op.
    pub fn register(&self, handle: impl Into<String>) {
        let handle = handle.into();
        let mut handles = self.handles.write().unwrap();
        if !handles.contains(&handle) {
            handles.push(handle);
        }
    }

    /// All registered handles in creation order.
    pub fn all(&self) -> Vec<String> {
        self.handles.read().unwrap().clone()
    }

    pub fn contains(&self, handle: &str) -> bool {
        self.handles.read().unwrap().iter().any(|h| h == handle)
    }

    pub fn len(&self) -> usize {
        self.handles.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Delete every registered object, one call per handle.
    ///
    /// Deletes are independent: a failure on one handle is reported and the
    /// remaining handles are still attempted. Confirmed deletions leave the
    /// registry; failed handles stay registered for a future retry.
    pub async fn release_all<S: ObjectStore>(
        &self,
        store: &S,
        ledger: &CallLedger,
    ) -> ReleaseReport {
        let handles = self.all();
        let mut outcomes = Vec::with_capacity(handles.len());

        for handle in handles {
            let endpoint = format!("/objects/{}", handle);
            let entry = ledger.append("DELETE", endpoint, None);

            match store.delete_object(&handle).await {
                Ok(resp) => {
                    ledger.settle(entry, Some(resp.body), CallStatus::Completed(resp.status));
                    info!(handle = %handle, "Released object");
                    outcomes.push(ReleaseOutcome {
                        handle,
                        error: None,
                    });
                }
                Err(e) => {
                    ledger.settle(entry, None, CallStatus::Failed(e.to_string()));
                    warn!(handle = %handle, error = %e, "Failed to release object");
                    outcomes.push(ReleaseOutcome {
                        handle,
                        error: Some(e),
                    });
                }
            }
        }

        {
            let mut handles = self.handles.write().unwrap();
            handles.retain(|h| {
                outcomes
                    .iter()
                    .find(|o| &o.handle == h)
                    .map_or(true, |o| !o.released())
            });
        }

        ReleaseReport { outcomes }
    }
}

/// Result of one delete attempt during a bulk release.
#[derive(Debug)]
pub struct ReleaseOutcome {
    pub handle: String,
    /// `None` when the object was deleted.
    pub error: Option<StoreError>,
}

impl ReleaseOutcome {
    pub fn released(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-handle outcomes of a bulk release.
///
/// Partial failure is an expected, actionable result, not an error: the
/// caller inspects `failed()` and retries later.
#[derive(Debug, Default)]
pub struct ReleaseReport {
    pub outcomes: Vec<ReleaseOutcome>,
}

impl ReleaseReport {
    /// Handles confirmed deleted, in attempt order.
    pub fn released(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| o.released())
            .map(|o| o.handle.as_str())
            .collect()
    }

    /// Handles whose delete call failed, in attempt order.
    pub fn failed(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| !o.released())
            .map(|o| o.handle.as_str())
            .collect()
    }

    /// True when every registered handle was deleted.
    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(|o| o.released())
    }
}
