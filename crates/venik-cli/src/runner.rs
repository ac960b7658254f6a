//! Batch extraction over an archive.
//!
//! Documents are read and extracted on the blocking pool with bounded
//! concurrency. A document that cannot be read or parsed is logged and
//! counted; it never stops the rest of the batch.

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use futures::stream::{self, StreamExt};
use venik_core::ProductExtraction;
use venik_extract::Extractor;

use crate::archive::{ArchivedDocument, LocalArchive};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct BatchSummary {
    pub documents: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Field diagnostics across all successful extractions.
    pub warnings: usize,
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "documents={} succeeded={} failed={} warnings={}",
            self.documents, self.succeeded, self.failed, self.warnings
        )
    }
}

/// Successful extractions in storage-key order, plus the run totals.
#[derive(Debug)]
pub(crate) struct BatchReport {
    pub extractions: Vec<ProductExtraction>,
    pub summary: BatchSummary,
}

/// Extracts every document in `archive`.
///
/// # Errors
///
/// Returns an error only if the archive cannot be listed. Per-document
/// failures are logged and reflected in the summary.
pub(crate) async fn run_batch(
    archive: &LocalArchive,
    extractor: Arc<Extractor>,
    max_concurrent: usize,
) -> anyhow::Result<BatchReport> {
    let documents = archive.list_documents()?;
    let document_count = documents.len();
    tracing::info!(
        root = %archive.root().display(),
        documents = document_count,
        max_concurrent,
        "starting batch extraction"
    );

    let mut results: Vec<(String, anyhow::Result<ProductExtraction>)> = stream::iter(documents)
        .map(|document| {
            let extractor = Arc::clone(&extractor);
            async move {
                let key = document.key.clone();
                let result =
                    tokio::task::spawn_blocking(move || extract_document(&extractor, &document))
                        .await
                        .context("extraction task panicked")
                        .and_then(|result| result);
                (key, result)
            }
        })
        .buffer_unordered(max_concurrent.max(1))
        .collect()
        .await;
    results.sort_by(|a, b| a.0.cmp(&b.0));

    let mut summary = BatchSummary {
        documents: document_count,
        ..BatchSummary::default()
    };
    let mut extractions = Vec::with_capacity(results.len());
    for (key, result) in results {
        match result {
            Ok(extraction) => {
                summary.succeeded += 1;
                summary.warnings += extraction.diagnostics.len();
                extractions.push(extraction);
            }
            Err(e) => {
                tracing::error!(source_key = %key, error = %format!("{e:#}"), "document failed");
                summary.failed += 1;
            }
        }
    }

    if summary.failed > 0 {
        tracing::warn!(
            failed = summary.failed,
            documents = summary.documents,
            "some documents failed extraction"
        );
    }

    Ok(BatchReport {
        extractions,
        summary,
    })
}

fn extract_document(
    extractor: &Extractor,
    document: &ArchivedDocument,
) -> anyhow::Result<ProductExtraction> {
    let bytes = document.read()?;
    Ok(extractor.extract(&bytes, &document.key)?)
}

/// Writes one JSON object per line.
///
/// # Errors
///
/// Returns an error if serialization or the underlying writer fails.
pub(crate) fn write_json_lines<W: Write>(
    extractions: &[ProductExtraction],
    mut out: W,
) -> anyhow::Result<()> {
    for extraction in extractions {
        serde_json::to_writer(&mut out, extraction).context("failed to serialize extraction")?;
        out.write_all(b"\n").context("failed to write output")?;
    }
    out.flush().context("failed to flush output")?;
    Ok(())
}
