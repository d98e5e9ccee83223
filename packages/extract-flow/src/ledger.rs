//! Call ledger - append-only record of remote call attempts.
//!
//! Every remote call the pipeline issues lands here: appended as `Pending`
//! at issuance, settled in place once the call resolves. Entries are never
//! reordered or removed except by an explicit `clear()`, so any number of
//! readers can observe the ledger while calls are still in flight —
//! partially filled entries are valid, displayable states.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::sync::{Arc, RwLock};

/// Outcome of a ledgered call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "detail")]
pub enum CallStatus {
    /// Issued, not yet resolved.
    Pending,
    /// Resolved with this HTTP status.
    Completed(u16),
    /// Failed before producing a usable response.
    Failed(String),
}

/// One remote call attempt.
#[derive(Debug, Clone, Serialize)]
pub struct CallLogEntry {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub method: String,
    pub endpoint: String,
    /// Request payload as sent, if the call carried a body.
    pub request: Option<Value>,
    /// Response body, filled in once the call settles.
    pub response: Option<Value>,
    pub status: CallStatus,
}

#[derive(Default)]
struct LedgerInner {
    entries: Vec<CallLogEntry>,
    next_id: u64,
}

/// Shared, process-lifetime log of remote calls.
///
/// Cheap to clone; clones observe the same entries.
#[derive(Clone, Default)]
pub struct CallLedger {
    inner: Arc<RwLock<LedgerInner>>,
}

impl CallLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a call at issuance. Returns the entry id used to settle it.
    pub fn append(
        &self,
        method: impl Into<String>,
        endpoint: impl Into<String>,
        request: Option<Value>,
    ) -> u64 {
        let mut inner = self.inner.write().unwrap();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.entries.push(CallLogEntry {
            id,
            timestamp: Utc::now(),
            method: method.into(),
            endpoint: endpoint.into(),
            request,
            response: None,
            status: CallStatus::Pending,
        });
        id
    }

    /// Fill in a call's response and status once it settles. Ids that are
    /// no longer present (cleared mid-flight) are ignored.
    pub fn settle(&self, id: u64, response: Option<Value>, status: CallStatus) {
        let mut inner = self.inner.write().unwrap();
        if let Some(entry) = inner.entries.iter_mut().find(|e| e.id == id) {
            entry.response = response;
            entry.status = status;
        }
    }

    /// All entries, most recent first.
    pub fn all(&self) -> Vec<CallLogEntry> {
        self.inner.read().unwrap().entries.iter().rev().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Discard every entry.
    pub fn clear(&self) {
        self.inner.write().unwrap().entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn entries_are_most_recent_first() {
        let ledger = CallLedger::new();
        ledger.append("POST", "/input_data", Some(json!({"a": 1})));
        ledger.append("GET", "/return_data/x", None);

        let all = ledger.all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].endpoint, "/return_data/x");
        assert_eq!(all[1].endpoint, "/input_data");
    }

    #[test]
    fn settle_fills_entry_in_place() {
        let ledger = CallLedger::new();
        let first = ledger.append("POST", "/input_data", None);
        let second = ledger.append("POST", "/apply_prompt", None);

        ledger.settle(first, Some(json!({"ok": true})), CallStatus::Completed(200));

        let all = ledger.all();
        // Order is untouched; only the matching entry changed.
        assert_eq!(all[1].id, first);
        assert_eq!(all[1].status, CallStatus::Completed(200));
        assert_eq!(all[1].response, Some(json!({"ok": true})));
        assert_eq!(all[0].id, second);
        assert_eq!(all[0].status, CallStatus::Pending);
    }

    #[test]
    fn pending_entries_are_observable() {
        let ledger = CallLedger::new();
        ledger.append("DELETE", "/objects/x", None);

        let entry = &ledger.all()[0];
        assert_eq!(entry.status, CallStatus::Pending);
        assert!(entry.response.is_none());
    }

    #[test]
    fn clear_discards_everything() {
        let ledger = CallLedger::new();
        let id = ledger.append("GET", "/return_data/x", None);
        ledger.clear();
        assert!(ledger.is_empty());

        // Settling a cleared id is a no-op.
        ledger.settle(id, None, CallStatus::Completed(200));
        assert!(ledger.is_empty());
    }
}
