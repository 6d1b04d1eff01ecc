//! Resume optimization: validate input, prompt the LLM, split the result.
//!
//! Flow: validate → build_optimizer_prompt → TextGenerator::generate → trim →
//!       split_suggestions → OptimizedResume.
//!
//! No retries here. The LLM client owns its retry policy.

use chrono::{DateTime, Local};
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::optimizer::prompts::build_optimizer_prompt;
use crate::optimizer::sections::{split_suggestions, ResumeSections};
use crate::render::OutputMode;

const DOWNLOAD_STEM: &str = "optimized_resume";

/// The LLM's rewrite, plus the resume/suggestions split of it.
#[derive(Debug, Clone)]
pub struct OptimizedResume {
    /// Full LLM output, trimmed. This is what the Markdown download returns.
    pub markdown: String,
    pub sections: ResumeSections,
}

/// Runs one optimization round-trip against the text generator.
pub async fn optimize_resume(
    llm: &dyn TextGenerator,
    resume: &str,
    job_description: &str,
    suggestions_heading: &str,
) -> Result<OptimizedResume, AppError> {
    if resume.trim().is_empty() {
        return Err(AppError::Validation("resume_text cannot be empty".to_string()));
    }
    if job_description.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }

    let prompt = build_optimizer_prompt(resume, job_description, suggestions_heading);
    info!(
        "Optimizing resume ({} chars) against JD ({} chars) with {}",
        resume.len(),
        job_description.len(),
        llm.model()
    );

    let markdown = llm
        .generate(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Resume optimization failed: {e}")))?
        .trim()
        .to_string();

    if markdown.is_empty() {
        return Err(AppError::Llm("Resume optimization returned no text".to_string()));
    }

    let sections = split_suggestions(&markdown, suggestions_heading);
    info!(
        "Optimized resume: {} chars, suggestions {}",
        markdown.len(),
        if sections.suggestions.is_some() { "present" } else { "missing" }
    );

    Ok(OptimizedResume { markdown, sections })
}

/// `optimized_resume_YYYYmmdd_HHMMSS.<ext>`
pub fn download_file_name(mode: OutputMode, now: DateTime<Local>) -> String {
    format!(
        "{DOWNLOAD_STEM}_{}.{}",
        now.format("%Y%m%d_%H%M%S"),
        mode.extension()
    )
}
