//! Block layout engine. Classifies each Markdown line into exactly one
//! `LayoutBlock` and assembles the ordered sequence handed to the backend.
//!
//! Rules are checked top-to-bottom on the trimmed line; first match wins.
//! Prefixes overlap (`# ` / `## ` / `### `, `* ` / `**`), so order matters.
//! Each line is judged on its own: no look-ahead, no paragraph joining.

use crate::render::inline::{bold_wrap, format_inline};
use crate::render::styles::{preset_for, StylePreset};

pub const BULLET_GLYPH: char = '•';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Title,
    SectionHeading,
    SubHeading,
    Bullet,
    BoldStandalone,
    Body,
    Spacer,
}

/// One classified, styled unit of document content.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutBlock {
    pub kind: BlockKind,
    /// Rich-text markup. `None` for spacers.
    pub text: Option<String>,
    pub style: &'static StylePreset,
}

impl LayoutBlock {
    fn new(kind: BlockKind, text: String) -> Self {
        Self {
            kind,
            text: Some(text),
            style: preset_for(kind),
        }
    }

    pub fn spacer() -> Self {
        Self {
            kind: BlockKind::Spacer,
            text: None,
            style: preset_for(BlockKind::Spacer),
        }
    }
}

/// Classifies a single line.
pub fn classify_line(line: &str) -> LayoutBlock {
    let line = line.trim();

    if line.is_empty() {
        return LayoutBlock::spacer();
    }

    if let Some(rest) = line.strip_prefix("# ") {
        return LayoutBlock::new(BlockKind::Title, rest.trim().to_string());
    }
    if let Some(rest) = line.strip_prefix("## ") {
        return LayoutBlock::new(BlockKind::SectionHeading, rest.trim().to_string());
    }
    if let Some(rest) = line.strip_prefix("### ") {
        return LayoutBlock::new(BlockKind::SubHeading, bold_wrap(rest.trim()));
    }
    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        let text = format!("{BULLET_GLYPH} {}", format_inline(rest.trim()));
        return LayoutBlock::new(BlockKind::Bullet, text);
    }
    if line.len() >= 4 && line.starts_with("**") && line.ends_with("**") {
        let inner = &line[2..line.len() - 2];
        return LayoutBlock::new(BlockKind::BoldStandalone, bold_wrap(inner.trim()));
    }

    LayoutBlock::new(BlockKind::Body, format_inline(line))
}

/// Lays out a whole Markdown document. Always ends with one trailing spacer.
pub fn layout_markdown(markdown: &str) -> Vec<LayoutBlock> {
    let mut blocks: Vec<LayoutBlock> = markdown.split('\n').map(classify_line).collect();
    blocks.push(LayoutBlock::spacer());
    blocks
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
