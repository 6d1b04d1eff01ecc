//! Axum route handlers for the Resume API.

use axum::{
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::extraction::extract_resume_text;
use crate::optimizer::pipeline::{download_file_name, optimize_resume, OptimizedResume};
use crate::optimizer::sections::split_suggestions;
use crate::render::{render_output, OutputMode};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct OptimizeRequest {
    pub resume_text: String,
    pub jd_text: String,
}

#[derive(Debug, Serialize)]
pub struct OptimizeResponse {
    /// Full LLM output. The Markdown export returns it unchanged.
    pub markdown: String,
    /// Resume section only. This is what the PDF export renders.
    pub resume_markdown: String,
    pub suggestions_markdown: Option<String>,
}

impl From<OptimizedResume> for OptimizeResponse {
    fn from(optimized: OptimizedResume) -> Self {
        Self {
            markdown: optimized.markdown,
            resume_markdown: optimized.sections.resume,
            suggestions_markdown: optimized.sections.suggestions,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub markdown: String,
    pub format: OutputMode,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/optimize
///
/// Rewrites a plain-text resume against a job description.
pub async fn handle_optimize(
    State(state): State<AppState>,
    Json(request): Json<OptimizeRequest>,
) -> Result<Json<OptimizeResponse>, AppError> {
    let optimized = optimize_resume(
        state.llm.as_ref(),
        &request.resume_text,
        &request.jd_text,
        &state.config.suggestions_heading,
    )
    .await?;

    Ok(Json(optimized.into()))
}

/// POST /api/v1/resumes/optimize/upload
///
/// Multipart form: `resume` (PDF file) and `jd_text`. The PDF text is
/// extracted first, then the same pipeline as `handle_optimize` runs.
pub async fn handle_optimize_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<OptimizeResponse>, AppError> {
    let mut resume_pdf: Option<Vec<u8>> = None;
    let mut jd_text: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read resume: {e}")))?;
                resume_pdf = Some(bytes.to_vec());
            }
            "jd_text" => {
                jd_text = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::Validation(format!("Failed to read jd_text: {e}")))?,
                );
            }
            _ => {}
        }
    }

    let resume_pdf = resume_pdf
        .ok_or_else(|| AppError::Validation("Missing 'resume' PDF file".to_string()))?;
    let jd_text =
        jd_text.ok_or_else(|| AppError::Validation("Missing 'jd_text' field".to_string()))?;
    if jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }

    let resume_text = extract_resume_text(resume_pdf).await?;
    info!("Uploaded resume extracted: {} chars", resume_text.len());

    let optimized = optimize_resume(
        state.llm.as_ref(),
        &resume_text,
        &jd_text,
        &state.config.suggestions_heading,
    )
    .await?;

    Ok(Json(optimized.into()))
}

/// POST /api/v1/resumes/export
///
/// Markdown: the text is returned byte-for-byte. PDF: the suggestions section
/// is split off and only the resume is rendered. A render failure returns
/// `RENDER_FAILED`; the Markdown export stays available.
pub async fn handle_export(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> Result<Response, AppError> {
    if request.markdown.trim().is_empty() {
        return Err(AppError::Validation("markdown cannot be empty".to_string()));
    }

    let mode = request.format;
    let source = match mode {
        OutputMode::Markdown => request.markdown,
        OutputMode::Pdf => {
            split_suggestions(&request.markdown, &state.config.suggestions_heading).resume
        }
    };

    // Layout and serialization are CPU-bound; keep them off the async executor.
    let page_config = state.page_config.clone();
    let body = tokio::task::spawn_blocking(move || render_output(&source, mode, &page_config))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in export: {e}")))??;

    let file_name = download_file_name(mode, Local::now());
    info!("Exporting {} ({} bytes)", file_name, body.len());

    Ok((
        [
            (header::CONTENT_TYPE, mode.mime_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    )
        .into_response())
}
