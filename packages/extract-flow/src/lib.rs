//! Upload-to-records extraction pipeline.
//!
//! Turns a batch of local files into structured records by driving a
//! three-stage remote extraction service: commit the decoded texts as a
//! remote input object, apply an extraction prompt over it, then fetch and
//! parse the transformed value. Every remote call lands in an append-only
//! ledger, and every created remote object stays registered until it is
//! explicitly released.
//!
//! # Usage
//!
//! ```rust,ignore
//! use extract_flow::{FsFileSource, ImpromptuStore, Orchestrator, UploadBatch};
//! use impromptu_client::ImpromptuClient;
//!
//! let store = ImpromptuStore::new(ImpromptuClient::new(token));
//! let orchestrator = Orchestrator::new(store, FsFileSource::new());
//!
//! let batch = UploadBatch::from_paths(["notes.txt", "report.txt"]);
//! let records = orchestrator.run(batch).await?;
//!
//! // Remote objects stay registered (and retained service-side) until
//! // explicitly released.
//! let report = orchestrator.release_all().await;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (ObjectStore, FileSource, NameSource)
//! - [`types`] - Batch, run, and record types
//! - [`pipeline`] - The orchestrator state machine and response parsing
//! - [`ledger`] - Append-only log of remote call attempts
//! - [`registry`] - Created-object registry with bulk release
//! - [`sources`] - File source implementations
//! - [`stores`] - Object store implementations
//! - [`export`] - CSV projection of extracted records
//! - [`testing`] - Mock implementations for testing

pub mod error;
pub mod export;
pub mod ledger;
pub mod pipeline;
pub mod registry;
pub mod sources;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{ExtractError, Result, StoreError, StoreResult};
pub use ledger::{CallLedger, CallLogEntry, CallStatus};
pub use pipeline::{
    parse_fetched_body, parse_text_value, Orchestrator, PipelineConfig, EXTRACT_PROMPT,
    TEXT_VALUE_FIELD,
};
pub use registry::{CreatedObjectRegistry, ReleaseOutcome, ReleaseReport};
pub use traits::{
    names::{NameSource, SequentialNames, UuidNames},
    source::FileSource,
    store::{ObjectStore, StoreResponse},
};
pub use types::{
    batch::UploadBatch,
    record::{ExtractedRecord, RECORD_KIND},
    run::{PipelineRun, RunSnapshot, Stage},
};

// Re-export implementations
pub use sources::FsFileSource;
pub use stores::ImpromptuStore;

// Re-export testing utilities
pub use testing::{MockFileSource, MockObjectStore};
