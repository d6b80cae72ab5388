//! `legalens analyze <FILE>`: run one document through the pipeline locally.

use std::io;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use legalens_core::{Document, LegalensError};
use legalens_media::detect_mime_type;
use legalens_understanding::DocumentPipeline;
use tokio::sync::watch;

use crate::terminal_output::{note_error, note_warn, render_outcome, write_progress};

/// Exit status when the extraction deadline is reached.
pub const TIMEOUT_EXIT: u8 = 2;

pub async fn run(pipeline: &DocumentPipeline, path: &Path, json: bool) -> Result<ExitCode> {
    let document = read_document(path).await?;
    let request_id = uuid::Uuid::new_v4().to_string();

    let (progress_tx, mut progress_rx) = watch::channel(0u8);
    let reporter = tokio::spawn(async move {
        let mut stderr = io::stderr();
        while progress_rx.changed().await.is_ok() {
            let value = *progress_rx.borrow_and_update();
            let _ = write_progress(&mut stderr, value);
        }
    });

    let result = pipeline.run(&request_id, &document, &progress_tx).await;
    drop(progress_tx);
    let _ = reporter.await;

    match result {
        Ok(outcome) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                if outcome.extraction != legalens_core::ExtractionKind::Success {
                    note_warn("The document text could not be fully extracted");
                }
                print!("{}", render_outcome(&outcome));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err @ LegalensError::Timeout(_)) => {
            note_error(&format!(
                "Processing is taking longer than expected ({err}). \
                 Try a smaller or clearer image, or a text file instead."
            ));
            Ok(ExitCode::from(TIMEOUT_EXIT))
        }
        Err(err) => Err(err.into()),
    }
}

/// Read a file and classify it by extension.
pub async fn read_document(path: &Path) -> Result<Document> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(Document::new(name, detect_mime_type(path), data))
}
