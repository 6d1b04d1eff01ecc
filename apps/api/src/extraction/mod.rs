//! PDF text extraction for uploaded resumes.
//!
//! `pdf-extract` is CPU-bound and can panic on malformed input, so it runs
//! inside `spawn_blocking`; a panic surfaces as a `JoinError` instead of
//! taking down the worker.

use thiserror::Error;
use tracing::{info, warn};

const PDF_MAGIC: &[u8] = b"%PDF";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Uploaded file is not a PDF")]
    NotPdf,

    #[error("Failed to read PDF: {0}")]
    Pdf(String),

    #[error("PDF contains no extractable text")]
    NoText,

    #[error("Extraction task failed: {0}")]
    Task(String),
}

/// Returns the concatenated text of every page.
pub async fn extract_resume_text(bytes: Vec<u8>) -> Result<String, ExtractionError> {
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(ExtractionError::NotPdf);
    }
    let size = bytes.len();

    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| {
            warn!("PDF extraction task aborted: {e}");
            ExtractionError::Task(e.to_string())
        })?
        .map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(ExtractionError::NoText);
    }

    info!("Extracted {} chars from {} byte PDF", text.len(), size);
    Ok(text)
}
