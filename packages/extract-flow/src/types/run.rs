//! Pipeline run state.

use serde::{Deserialize, Serialize};

use crate::types::batch::UploadBatch;
use crate::types::record::ExtractedRecord;

/// One named phase of an extraction run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Idle,
    Reading,
    Creating,
    Transforming,
    Fetching,
    Parsing,
    Done,
    Cancelled,
    Failed,
}

impl Stage {
    /// Terminal stages only leave through `reset()`.
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Done | Stage::Cancelled | Stage::Failed)
    }

    /// A run is active from `Reading` until it reaches a terminal stage.
    pub fn is_active(self) -> bool {
        self != Stage::Idle && !self.is_terminal()
    }
}

/// A point-in-time view of a run, published to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSnapshot {
    pub stage: Stage,
    pub progress: u8,
}

impl RunSnapshot {
    pub fn idle() -> Self {
        Self {
            stage: Stage::Idle,
            progress: 0,
        }
    }
}

/// The live state of one extraction attempt.
///
/// Owned by the orchestrator; observers see it through [`RunSnapshot`]s.
#[derive(Debug, Default)]
pub struct PipelineRun {
    pub(crate) stage: Stage,
    pub(crate) progress: u8,
    pub(crate) batch: Option<UploadBatch>,
    pub(crate) handles: Vec<String>,
    pub(crate) records: Vec<ExtractedRecord>,
}

impl PipelineRun {
    /// A fresh idle run with nothing attached.
    pub fn new() -> Self {
        Self::default()
    }

    /// The state a run enters the moment a batch is accepted.
    pub(crate) fn started(batch: UploadBatch) -> Self {
        Self {
            stage: Stage::Reading,
            batch: Some(batch),
            ..Self::default()
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn batch(&self) -> Option<&UploadBatch> {
        self.batch.as_ref()
    }

    /// Handles created by this run, in creation order.
    pub fn handles(&self) -> &[String] {
        &self.handles
    }

    pub fn records(&self) -> &[ExtractedRecord] {
        &self.records
    }

    pub fn snapshot(&self) -> RunSnapshot {
        RunSnapshot {
            stage: self.stage,
            progress: self.progress,
        }
    }

    /// Raise progress; within a run it never decreases.
    pub(crate) fn advance_progress(&mut self, to: u8) {
        self.progress = self.progress.max(to.min(100));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_classification() {
        assert!(!Stage::Idle.is_active());
        assert!(!Stage::Idle.is_terminal());
        assert!(Stage::Reading.is_active());
        assert!(Stage::Parsing.is_active());
        assert!(Stage::Done.is_terminal());
        assert!(Stage::Cancelled.is_terminal());
        assert!(Stage::Failed.is_terminal());
    }

    #[test]
    fn progress_never_decreases() {
        let mut run = PipelineRun::started(UploadBatch::new());
        run.advance_progress(50);
        run.advance_progress(25);
        assert_eq!(run.progress(), 50);
        run.advance_progress(200);
        assert_eq!(run.progress(), 100);
    }
}
