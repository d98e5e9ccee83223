//! Drive the extraction pipeline against the live service.
//!
//! Reads the API token from `IMPROMPTU_API_TOKEN` (a `.env` file works) and
//! takes the files to extract as arguments:
//!
//! ```text
//! cargo run --example upload_extract -- notes.txt report.txt
//! ```

use extract_flow::{export, FsFileSource, ImpromptuStore, Orchestrator, UploadBatch};
use impromptu_client::ImpromptuClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let token = std::env::var("IMPROMPTU_API_TOKEN")?;
    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        eprintln!("usage: upload_extract <file> [file ...]");
        std::process::exit(2);
    }

    let store = ImpromptuStore::new(ImpromptuClient::new(token));
    let orchestrator = Orchestrator::new(store, FsFileSource::new());

    let mut snapshots = orchestrator.subscribe();
    tokio::spawn(async move {
        while snapshots.changed().await.is_ok() {
            let snap = *snapshots.borrow();
            eprintln!("{:?} {}%", snap.stage, snap.progress);
        }
    });

    let records = orchestrator.run(UploadBatch::from_paths(paths)).await?;
    println!("{}", export::to_csv(&records));

    let report = orchestrator.release_all().await;
    eprintln!(
        "released {} of {} objects",
        report.released().len(),
        report.outcomes.len()
    );
    Ok(())
}
