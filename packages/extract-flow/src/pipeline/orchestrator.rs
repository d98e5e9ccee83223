//! The pipeline orchestrator - sequences reading, remote calls, and parsing.
//!
//! One logical task drives a run; remote calls are strictly sequential
//! because each stage's request depends on the previous stage's handle.
//! `cancel()` may race an in-flight call: state mutations are guarded by
//! the run's cancellation token, so a late response settles its ledger
//! entry and is otherwise discarded.

use std::future::Future;
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::{ExtractError, Result};
use crate::ledger::{CallLedger, CallStatus};
use crate::pipeline::parse::parse_fetched_body;
use crate::pipeline::prompts::EXTRACT_PROMPT;
use crate::registry::{CreatedObjectRegistry, ReleaseReport};
use crate::traits::names::{NameSource, UuidNames};
use crate::traits::source::FileSource;
use crate::traits::store::{ObjectStore, StoreResponse};
use crate::types::batch::UploadBatch;
use crate::types::record::ExtractedRecord;
use crate::types::run::{PipelineRun, RunSnapshot, Stage};

/// Tunables for a pipeline instance.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Instruction template applied to the committed upload data.
    pub prompt: String,

    /// Prefix for input object names.
    pub input_prefix: String,

    /// Prefix for transformed output object names.
    pub output_prefix: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            prompt: EXTRACT_PROMPT.to_string(),
            input_prefix: "uploaded_files".to_string(),
            output_prefix: "extracted_data".to_string(),
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the extraction prompt.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Set the input object name prefix.
    pub fn with_input_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.input_prefix = prefix.into();
        self
    }

    /// Set the output object name prefix.
    pub fn with_output_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.output_prefix = prefix.into();
        self
    }
}

/// Drives one extraction run at a time:
/// read files → create object → apply prompt → fetch value → parse.
///
/// The orchestrator owns its run state; observers watch it through
/// [`subscribe`](Orchestrator::subscribe) snapshots and the cloneable
/// [`ledger`](Orchestrator::ledger) and [`registry`](Orchestrator::registry)
/// handles, none of which lock against the writer.
///
/// # Example
///
/// ```rust,ignore
/// let orchestrator = Orchestrator::new(store, FsFileSource::new());
/// let records = orchestrator.run(UploadBatch::from_paths(["notes.txt"])).await?;
/// ```
pub struct Orchestrator<S, F, N = UuidNames> {
    store: S,
    source: F,
    names: N,
    config: PipelineConfig,
    ledger: CallLedger,
    registry: CreatedObjectRegistry,
    state: Arc<Mutex<PipelineRun>>,
    run_token: Mutex<CancellationToken>,
    snapshot_tx: watch::Sender<RunSnapshot>,
}

impl<S, F> Orchestrator<S, F, UuidNames>
where
    S: ObjectStore,
    F: FileSource,
{
    /// Create an orchestrator with UUID object names and default config.
    pub fn new(store: S, source: F) -> Self {
        Self::with_parts(store, source, UuidNames, PipelineConfig::default())
    }
}

impl<S, F, N> Orchestrator<S, F, N>
where
    S: ObjectStore,
    F: FileSource,
    N: NameSource,
{
    /// Create an orchestrator from explicit parts.
    pub fn with_parts(store: S, source: F, names: N, config: PipelineConfig) -> Self {
        let (snapshot_tx, _) = watch::channel(RunSnapshot::idle());
        Self {
            store,
            source,
            names,
            config,
            ledger: CallLedger::new(),
            registry: CreatedObjectRegistry::new(),
            state: Arc::new(Mutex::new(PipelineRun::new())),
            run_token: Mutex::new(CancellationToken::new()),
            snapshot_tx,
        }
    }

    /// Replace the pipeline configuration.
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// The ledger observing every remote call this orchestrator issues.
    pub fn ledger(&self) -> CallLedger {
        self.ledger.clone()
    }

    /// The registry of every remote object this orchestrator has created.
    pub fn registry(&self) -> CreatedObjectRegistry {
        self.registry.clone()
    }

    /// The current stage and progress.
    pub fn snapshot(&self) -> RunSnapshot {
        self.state.lock().unwrap().snapshot()
    }

    /// Watch stage and progress updates as they are published.
    pub fn subscribe(&self) -> watch::Receiver<RunSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Records produced by the last successful run.
    pub fn records(&self) -> Vec<ExtractedRecord> {
        self.state.lock().unwrap().records().to_vec()
    }

    /// Execute one extraction run over `batch`.
    ///
    /// Fails fast with [`ExtractError::Busy`] while another run is active.
    /// A fresh run may start from idle or from any terminal stage without
    /// manual cleanup; handles created by earlier runs stay registered.
    pub async fn run(&self, batch: UploadBatch) -> Result<Vec<ExtractedRecord>> {
        let token = self.begin(batch.clone())?;
        info!(files = batch.len(), "Extraction run started");

        let result = self.drive(&batch, &token).await;
        match &result {
            Ok(records) => info!(records = records.len(), "Extraction run complete"),
            Err(ExtractError::Cancelled) => info!("Extraction run cancelled"),
            Err(e) => warn!(error = %e, "Extraction run failed"),
        }
        result
    }

    /// Cancel the active run.
    ///
    /// Returns `false` from a terminal stage. Otherwise the run moves to
    /// `Cancelled`, progress resets to 0, and any in-flight call's eventual
    /// resolution is discarded rather than applied.
    pub fn cancel(&self) -> bool {
        let mut state = self.state.lock().unwrap();
        if state.stage().is_terminal() {
            return false;
        }
        self.run_token.lock().unwrap().cancel();
        state.stage = Stage::Cancelled;
        state.progress = 0;
        let snap = state.snapshot();
        drop(state);
        self.snapshot_tx.send_replace(snap);
        true
    }

    /// Return a finished run to `Idle`, clearing its batch, progress, and
    /// records. The registry is untouched; its lifetime spans runs.
    pub fn reset(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.stage().is_active() {
            return Err(ExtractError::Busy);
        }
        *state = PipelineRun::new();
        let snap = state.snapshot();
        drop(state);
        self.snapshot_tx.send_replace(snap);
        Ok(())
    }

    /// Delete every object this orchestrator has created, one call per
    /// handle. See [`CreatedObjectRegistry::release_all`].
    pub async fn release_all(&self) -> ReleaseReport {
        self.registry.release_all(&self.store, &self.ledger).await
    }

    fn begin(&self, batch: UploadBatch) -> Result<CancellationToken> {
        let mut state = self.state.lock().unwrap();
        if state.stage().is_active() {
            return Err(ExtractError::Busy);
        }
        *state = PipelineRun::started(batch);
        let token = CancellationToken::new();
        *self.run_token.lock().unwrap() = token.clone();
        let snap = state.snapshot();
        drop(state);
        self.snapshot_tx.send_replace(snap);
        Ok(token)
    }

    async fn drive(
        &self,
        batch: &UploadBatch,
        token: &CancellationToken,
    ) -> Result<Vec<ExtractedRecord>> {
        let texts = self.read_files(batch, token).await?;

        // Stage 2: commit the decoded texts as one remote input object.
        self.advance_stage(token, Stage::Creating)?;
        let input_name = self.names.object_name(&self.config.input_prefix);
        let payload = json!({
            "created_object_name": &input_name,
            "data_type": "strings",
            "input_data": &texts,
        });
        self.remote_call(
            token,
            "POST",
            "/input_data".to_string(),
            Some(payload),
            self.store.create_object(&input_name, &texts),
        )
        .await?;
        self.registry.register(&input_name);
        self.with_state(token, |run| {
            run.handles.push(input_name.clone());
            run.advance_progress(75);
        })?;

        // Stage 3: transform the input object into a named output object.
        self.advance_stage(token, Stage::Transforming)?;
        let output_name = self.names.object_name(&self.config.output_prefix);
        let payload = json!({
            "created_object_names": [&output_name],
            "prompt_string": &self.config.prompt,
            "inputs": [{
                "object_name": &input_name,
                "processing_mode": "combine_events",
            }],
        });
        self.remote_call(
            token,
            "POST",
            "/apply_prompt".to_string(),
            Some(payload),
            self.store
                .apply_prompt(&output_name, &self.config.prompt, &input_name),
        )
        .await?;
        self.registry.register(&output_name);
        self.with_state(token, |run| run.handles.push(output_name.clone()))?;

        // Stage 4: fetch the transformed value.
        self.advance_stage(token, Stage::Fetching)?;
        let fetched = self
            .remote_call(
                token,
                "GET",
                format!("/return_data/{}", output_name),
                None,
                self.store.fetch_value(&output_name),
            )
            .await?;
        self.with_state(token, |run| run.advance_progress(100))?;

        // Stage 5: parse into records.
        self.advance_stage(token, Stage::Parsing)?;
        let records = parse_fetched_body(&fetched.body);
        self.with_state(token, |run| {
            run.records = records.clone();
            run.stage = Stage::Done;
        })?;

        Ok(records)
    }

    /// Stage 1: decode every file. Progress climbs linearly to 50; only the
    /// last file's completion lets the run leave the reading stage.
    async fn read_files(
        &self,
        batch: &UploadBatch,
        token: &CancellationToken,
    ) -> Result<Vec<String>> {
        let total = batch.len();
        let mut texts = Vec::with_capacity(total);

        for (i, path) in batch.iter().enumerate() {
            self.ensure_live(token)?;
            match self.source.read_text(path).await {
                Ok(text) => texts.push(text),
                Err(e) => {
                    self.ensure_live(token)?;
                    self.fail();
                    return Err(ExtractError::FileRead {
                        path: path.to_path_buf(),
                        source: e,
                    });
                }
            }
            self.with_state(token, |run| {
                run.advance_progress(((i + 1) * 50 / total) as u8);
            })?;
        }

        self.with_state(token, |run| run.advance_progress(50))?;
        Ok(texts)
    }

    /// Issue one remote call with ledger bookkeeping and token guarding.
    ///
    /// The ledger entry settles no matter how the call resolves - the
    /// ledger observes calls, it is not run state. Everything else is
    /// discarded once the token is cancelled.
    async fn remote_call<Fut>(
        &self,
        token: &CancellationToken,
        method: &'static str,
        endpoint: String,
        request: Option<Value>,
        call: Fut,
    ) -> Result<StoreResponse>
    where
        Fut: Future<Output = crate::error::StoreResult<StoreResponse>>,
    {
        let entry = self.ledger.append(method, endpoint.clone(), request);

        match call.await {
            Ok(resp) => {
                self.ledger
                    .settle(entry, Some(resp.body.clone()), CallStatus::Completed(resp.status));
                self.ensure_live(token)?;
                Ok(resp)
            }
            Err(e) => {
                self.ledger.settle(entry, None, CallStatus::Failed(e.to_string()));
                self.ensure_live(token)?;
                self.fail();
                Err(ExtractError::RemoteCall {
                    method,
                    endpoint,
                    source: e,
                })
            }
        }
    }

    fn ensure_live(&self, token: &CancellationToken) -> Result<()> {
        if token.is_cancelled() {
            return Err(ExtractError::Cancelled);
        }
        Ok(())
    }

    fn advance_stage(&self, token: &CancellationToken, stage: Stage) -> Result<()> {
        self.with_state(token, |run| run.stage = stage)
    }

    fn with_state(
        &self,
        token: &CancellationToken,
        f: impl FnOnce(&mut PipelineRun),
    ) -> Result<()> {
        self.ensure_live(token)?;
        let mut state = self.state.lock().unwrap();
        f(&mut state);
        let snap = state.snapshot();
        drop(state);
        self.snapshot_tx.send_replace(snap);
        Ok(())
    }

    fn fail(&self) {
        let mut state = self.state.lock().unwrap();
        state.stage = Stage::Failed;
        let snap = state.snapshot();
        drop(state);
        self.snapshot_tx.send_replace(snap);
    }
}
