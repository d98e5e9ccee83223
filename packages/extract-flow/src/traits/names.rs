//! Unique-name generation for remote objects.
//!
//! Injectable so pipeline runs stay deterministic under test.

use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Produces unique object names for a given prefix.
pub trait NameSource: Send + Sync {
    /// A name unique across runs, of the form `{prefix}_{unique}`.
    fn object_name(&self, prefix: &str) -> String;
}

/// Default name source: random UUID suffixes.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidNames;

impl NameSource for UuidNames {
    fn object_name(&self, prefix: &str) -> String {
        format!("{}_{}", prefix, Uuid::new_v4().simple())
    }
}

/// Counter-based name source. Deterministic, for tests and replays.
#[derive(Debug, Default)]
pub struct SequentialNames {
    counter: AtomicU64,
}

impl SequentialNames {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NameSource for SequentialNames {
    fn object_name(&self, prefix: &str) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}_{}", prefix, n)
    }
}
