//! `graphmock generate <docs-path> <output-file>` – scan docs, write mocks.

use anyhow::{Context, Result};
use graphmock_core::config::{FailurePolicy, GraphmockConfig};
use graphmock_core::docs::{extract_pairs, markdown_files, RequestResponsePair};
use graphmock_core::mocks::{build_mocks, write_mock_file};
use std::path::Path;

pub fn run_generate(
    cfg: &GraphmockConfig,
    docs_path: &Path,
    output_file: &Path,
    graph_version: Option<String>,
    skip_failures: bool,
) -> Result<()> {
    let graph_version = graph_version.unwrap_or_else(|| cfg.graph_version.clone());
    let on_failure = if skip_failures {
        FailurePolicy::Skip
    } else {
        cfg.on_sanitize_failure
    };

    let files = markdown_files(docs_path)?;
    tracing::info!(
        docs_path = %docs_path.display(),
        files = files.len(),
        "scanning docs directory"
    );

    let mut pairs: Vec<RequestResponsePair> = Vec::new();
    let mut requests_detected = 0usize;
    let mut files_with_errors = 0usize;
    for file in &files {
        match extract_pairs(file) {
            Ok(outcome) => {
                requests_detected += outcome.requests_detected;
                pairs.extend(outcome.pairs);
            }
            Err(err) => {
                files_with_errors += 1;
                tracing::error!(file = %file.display(), "failed to scan: {:#}", err);
            }
        }
    }

    let (mock_file, summary) = build_mocks(pairs, &cfg.graph_origin, &graph_version, on_failure)?;
    write_mock_file(output_file, &mock_file)
        .with_context(|| format!("write output: {}", output_file.display()))?;

    println!("Files scanned:      {}", files.len());
    println!("Requests detected:  {requests_detected}");
    println!("Mocks created:      {}", summary.mocks_created);
    println!("Mocks after dedupe: {}", summary.mocks_after_dedupe);
    if files_with_errors > 0 {
        println!("Files with errors:  {files_with_errors} (see log)");
    }
    println!("Wrote {}", output_file.display());
    Ok(())
}
