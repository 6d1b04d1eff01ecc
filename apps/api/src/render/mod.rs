// Markdown → paginated PDF renderer.
// inline (span formatter) → blocks (line classification) → pdf backend
// (markup parse, wrap, paginate, serialize). Pure and synchronous; async
// callers run it inside tokio::task::spawn_blocking.

pub mod blocks;
pub mod inline;
pub mod markup;
pub mod metrics;
pub mod pdf;
pub mod styles;
pub mod wrap;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

pub use blocks::layout_markdown;
pub use metrics::{default_page_config, PageConfig};
pub use pdf::{DocumentBackend, LopdfBackend};

/// Document serialization failed. No partial output is ever returned.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF generation error: {0}")]
    Pdf(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document exceeds the {limit}-page limit")]
    PageLimit { limit: usize },
}

impl From<lopdf::Error> for RenderError {
    fn from(err: lopdf::Error) -> Self {
        RenderError::Pdf(err.to_string())
    }
}

/// Requested download format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Markdown,
    Pdf,
}

impl OutputMode {
    pub fn extension(self) -> &'static str {
        match self {
            OutputMode::Markdown => "md",
            OutputMode::Pdf => "pdf",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            OutputMode::Markdown => "text/markdown; charset=utf-8",
            OutputMode::Pdf => "application/pdf",
        }
    }
}

/// Renders Markdown to PDF bytes.
pub fn render_pdf(markdown: &str, page_config: &PageConfig) -> Result<Vec<u8>, RenderError> {
    render_with(markdown, &LopdfBackend::new(page_config.clone()))
}

/// Lays out Markdown and hands the blocks to any document backend.
pub fn render_with(markdown: &str, backend: &dyn DocumentBackend) -> Result<Vec<u8>, RenderError> {
    let blocks = layout_markdown(markdown);
    let bytes = backend.render(&blocks)?;
    info!(
        "Rendered {} layout blocks into {} bytes",
        blocks.len(),
        bytes.len()
    );
    Ok(bytes)
}

/// Produces the download body for a mode. Markdown is passed through unchanged.
pub fn render_output(
    markdown: &str,
    mode: OutputMode,
    page_config: &PageConfig,
) -> Result<Vec<u8>, RenderError> {
    match mode {
        OutputMode::Markdown => Ok(markdown.as_bytes().to_vec()),
        OutputMode::Pdf => render_pdf(markdown, page_config),
    }
}
