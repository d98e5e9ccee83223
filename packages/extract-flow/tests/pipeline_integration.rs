//! Integration tests for the full upload-to-records flow.
//!
//! These tests drive the public surface the way an application would:
//! 1. Run a batch through all five stages
//! 2. Observe ledger and registry state
//! 3. Release the created objects

use extract_flow::{
    export::to_csv,
    testing::{MockFileSource, MockObjectStore},
    traits::names::SequentialNames,
    CallStatus, ExtractError, Orchestrator, PipelineConfig, Stage, UploadBatch,
};

fn orchestrator(
    store: MockObjectStore,
    source: MockFileSource,
) -> Orchestrator<MockObjectStore, MockFileSource, SequentialNames> {
    Orchestrator::with_parts(
        store,
        source,
        SequentialNames::new(),
        PipelineConfig::default(),
    )
}

#[tokio::test]
async fn end_to_end_batch_becomes_records() {
    let store = MockObjectStore::new()
        .with_text_value("extracted_data_2", "Alpha fact\nBeta fact\nGamma fact");
    let source = MockFileSource::new().with_file("notes.txt", "alpha\nbeta\n\ngamma");
    let orch = orchestrator(store, source);

    let records = orch
        .run(UploadBatch::from_paths(["notes.txt"]))
        .await
        .unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(
        records.iter().map(|r| r.content.as_str()).collect::<Vec<_>>(),
        ["Alpha fact", "Beta fact", "Gamma fact"]
    );
    assert_eq!(records.iter().map(|r| r.id).collect::<Vec<_>>(), [1, 2, 3]);
    assert!(records.iter().all(|r| r.kind == "extracted"));

    let snap = orch.snapshot();
    assert_eq!(snap.stage, Stage::Done);
    assert_eq!(snap.progress, 100);

    // Both handles were registered before the run finished, in order.
    assert_eq!(
        orch.registry().all(),
        ["uploaded_files_1", "extracted_data_2"]
    );
}

#[tokio::test]
async fn ledger_settles_every_call() {
    let store = MockObjectStore::new();
    let source = MockFileSource::new()
        .with_file("a.txt", "first")
        .with_file("b.txt", "second");
    let orch = orchestrator(store, source);

    orch.run(UploadBatch::from_paths(["a.txt", "b.txt"]))
        .await
        .unwrap();

    let entries = orch.ledger().all();
    assert_eq!(entries.len(), 3);
    // Most recent first: fetch, transform, create.
    assert_eq!(entries[0].method, "GET");
    assert_eq!(entries[2].method, "POST");
    assert_eq!(entries[2].endpoint, "/input_data");
    assert!(entries.iter().all(|e| e.status != CallStatus::Pending));
    assert!(entries.iter().all(|e| e.response.is_some()));

    // The create payload carried both decoded texts.
    let input_data = &entries[2].request.as_ref().unwrap()["input_data"];
    assert_eq!(input_data.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn transform_failure_keeps_input_handle_registered() {
    let store = MockObjectStore::new().fail_apply_prompt();
    let source = MockFileSource::new().with_file("a.txt", "a");
    let orch = orchestrator(store, source);

    let err = orch
        .run(UploadBatch::from_paths(["a.txt"]))
        .await
        .unwrap_err();
    match err {
        ExtractError::RemoteCall { endpoint, .. } => assert_eq!(endpoint, "/apply_prompt"),
        other => panic!("expected RemoteCall, got {other:?}"),
    }

    // The input object exists remotely; it stays registered for release.
    assert_eq!(orch.registry().all(), ["uploaded_files_1"]);
    assert_eq!(orch.snapshot().stage, Stage::Failed);
}

#[tokio::test]
async fn release_after_run_drains_registry_and_ledgers_deletes() {
    let store = MockObjectStore::new();
    let source = MockFileSource::new().with_file("a.txt", "a");
    let orch = orchestrator(store, source);

    orch.run(UploadBatch::from_paths(["a.txt"])).await.unwrap();
    assert_eq!(orch.registry().len(), 2);

    let report = orch.release_all().await;
    assert!(report.is_complete());
    assert_eq!(report.released(), ["uploaded_files_1", "extracted_data_2"]);
    assert!(orch.registry().is_empty());

    let deletes: Vec<_> = orch
        .ledger()
        .all()
        .into_iter()
        .filter(|e| e.method == "DELETE")
        .collect();
    assert_eq!(deletes.len(), 2);
    assert!(deletes.iter().all(|e| e.status == CallStatus::Completed(200)));
}

#[tokio::test]
async fn unparseable_fetch_body_yields_zero_records_not_failure() {
    let store = MockObjectStore::new()
        .with_fetch_body("extracted_data_2", serde_json::json!({"unexpected": true}));
    let source = MockFileSource::new().with_file("a.txt", "a");
    let orch = orchestrator(store, source);

    let records = orch.run(UploadBatch::from_paths(["a.txt"])).await.unwrap();
    assert!(records.is_empty());
    assert_eq!(orch.snapshot().stage, Stage::Done);
}

#[tokio::test]
async fn records_round_trip_into_csv() {
    let store = MockObjectStore::new()
        .with_text_value("extracted_data_2", "He said \"hi\"\nplain");
    let source = MockFileSource::new().with_file("a.txt", "a");
    let orch = orchestrator(store, source);

    let records = orch.run(UploadBatch::from_paths(["a.txt"])).await.unwrap();
    let csv = to_csv(&records);

    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "ID,Content,Type,Timestamp");
    assert!(lines[1].starts_with(r#"1,"He said ""hi""",extracted,"#));
    assert!(lines[2].starts_with(r#"2,"plain",extracted,"#));
}
