//! PDF document backend built on `lopdf`.
//!
//! Takes the ordered `LayoutBlock` sequence, wraps and paginates it top-down,
//! and serializes a complete document. Fonts are the four standard Helvetica
//! faces with WinAnsi encoding, so nothing is embedded.
//!
//! A document is returned only after every page serialized; any failure
//! discards the whole output.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};
use tracing::{debug, trace};

use crate::render::blocks::LayoutBlock;
use crate::render::markup::parse_markup;
use crate::render::metrics::{FontFace, PageConfig};
use crate::render::styles::{Alignment, Rgb, StylePreset};
use crate::render::wrap::{wrap_runs, WrappedLine};
use crate::render::RenderError;

/// Hard cap on output size. A one-page resume never gets near it.
pub const MAX_PAGES: usize = 50;

const UNDERLINE_OFFSET: f32 = 1.5;
const UNDERLINE_THICKNESS: f32 = 0.5;

/// A paginating document writer: ordered blocks in, document bytes out.
///
/// Vertical spacing that runs past the bottom margin is not carried onto the
/// next page, so a long run of blank lines collapses at a page break.
pub trait DocumentBackend {
    fn render(&self, blocks: &[LayoutBlock]) -> Result<Vec<u8>, RenderError>;
}

pub struct LopdfBackend {
    page_config: PageConfig,
    max_pages: usize,
}

impl LopdfBackend {
    pub fn new(page_config: PageConfig) -> Self {
        Self {
            page_config,
            max_pages: MAX_PAGES,
        }
    }

    #[cfg(test)]
    fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }
}

impl DocumentBackend for LopdfBackend {
    fn render(&self, blocks: &[LayoutBlock]) -> Result<Vec<u8>, RenderError> {
        let mut pages = PageBuilder::new(&self.page_config, self.max_pages);
        for block in blocks {
            pages.place_block(block)?;
        }
        let pages = pages.finish();
        debug!("Paginated {} blocks onto {} page(s)", blocks.len(), pages.len());
        serialize_document(pages, &self.page_config)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pagination
// ────────────────────────────────────────────────────────────────────────────

/// Tracks the vertical cursor and collects content operations per page.
struct PageBuilder<'a> {
    config: &'a PageConfig,
    max_pages: usize,
    finished: Vec<Vec<Operation>>,
    current: Vec<Operation>,
    /// Top of the next line box, in PDF user space (origin bottom-left).
    cursor_y: f32,
}

impl<'a> PageBuilder<'a> {
    fn new(config: &'a PageConfig, max_pages: usize) -> Self {
        Self {
            config,
            max_pages,
            finished: Vec::new(),
            current: Vec::new(),
            cursor_y: config.content_top_pt(),
        }
    }

    fn at_page_top(&self) -> bool {
        self.cursor_y >= self.config.content_top_pt()
    }

    fn new_page(&mut self) -> Result<(), RenderError> {
        if self.finished.len() + 1 >= self.max_pages {
            return Err(RenderError::PageLimit {
                limit: self.max_pages,
            });
        }
        self.finished.push(std::mem::take(&mut self.current));
        self.cursor_y = self.config.content_top_pt();
        Ok(())
    }

    /// Moves the cursor down. Spacing that runs past the bottom margin is
    /// dropped when the next line forces a page break.
    fn advance(&mut self, amount: f32) {
        self.cursor_y -= amount;
    }

    fn place_block(&mut self, block: &LayoutBlock) -> Result<(), RenderError> {
        let style = block.style;
        let Some(markup) = block.text.as_deref() else {
            self.advance(style.space_after);
            return Ok(());
        };

        if !self.at_page_top() {
            self.advance(style.space_before);
        }

        let runs = parse_markup(markup, style.bold);
        let lines = wrap_runs(&runs, style.font_size, self.config.text_width_pt());
        trace!(
            "{:?} block ({}) wrapped into {} line(s)",
            block.kind,
            style.name,
            lines.len()
        );
        for line in &lines {
            if self.cursor_y - style.leading < self.config.margin_bottom_pt && !self.at_page_top() {
                self.new_page()?;
            }
            self.cursor_y -= style.leading;
            let baseline = self.cursor_y + (style.leading - style.font_size);
            self.emit_line(line, style, baseline);
        }

        self.advance(style.space_after);
        Ok(())
    }

    fn emit_line(&mut self, line: &WrappedLine, style: &StylePreset, baseline: f32) {
        let line_x = match style.alignment {
            Alignment::Left => self.config.margin_left_pt,
            Alignment::Center => {
                self.config.margin_left_pt + (self.config.text_width_pt() - line.width).max(0.0) / 2.0
            }
        };
        let Rgb(r, g, b) = style.color;

        for fragment in &line.fragments {
            let x = line_x + fragment.x_offset;
            self.current.extend([
                Operation::new("BT", vec![]),
                Operation::new("rg", vec![r.into(), g.into(), b.into()]),
                Operation::new(
                    "Tf",
                    vec![fragment.face.resource_name().into(), style.font_size.into()],
                ),
                Operation::new("Td", vec![x.into(), baseline.into()]),
                Operation::new(
                    "Tj",
                    vec![Object::String(
                        encode_win_ansi(&fragment.text),
                        StringFormat::Literal,
                    )],
                ),
                Operation::new("ET", vec![]),
            ]);

            if fragment.underline {
                let y = baseline - UNDERLINE_OFFSET;
                let end_x = x + fragment.visible_width(style.font_size);
                self.current.extend([
                    Operation::new("RG", vec![r.into(), g.into(), b.into()]),
                    Operation::new("w", vec![UNDERLINE_THICKNESS.into()]),
                    Operation::new("m", vec![x.into(), y.into()]),
                    Operation::new("l", vec![end_x.into(), y.into()]),
                    Operation::new("S", vec![]),
                ]);
            }
        }
    }

    fn finish(mut self) -> Vec<Vec<Operation>> {
        self.finished.push(self.current);
        self.finished
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Serialization
// ────────────────────────────────────────────────────────────────────────────

fn serialize_document(
    pages: Vec<Vec<Operation>>,
    config: &PageConfig,
) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut font_dict = Dictionary::new();
    for face in FontFace::ALL {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => face.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        font_dict.set(face.resource_name(), font_id);
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => font_dict,
    });

    let media_box: Vec<Object> = vec![
        Object::Integer(0),
        Object::Integer(0),
        config.page_width_pt.into(),
        config.page_height_pt.into(),
    ];
    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => media_box.clone(),
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

/// Encodes text for a WinAnsi (cp1252) simple font. Unmappable chars become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7E}' => c as u8,
            '\t' => b' ',
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            '\u{A0}'..='\u{FF}' => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::blocks::layout_markdown;
    use crate::render::markup::plain_text;
    use crate::render::metrics::default_page_config;

    fn decode_win_ansi(bytes: &[u8]) -> String {
        bytes
            .iter()
            .map(|&b| match b {
                0x95 => '•',
                0x96 => '–',
                0x97 => '—',
                _ => b as char,
            })
            .collect()
    }

    /// Reads back the visible lines of a rendered document, grouped by
    /// (page, baseline) in drawing order.
    fn extract_lines(pdf: &[u8]) -> Vec<String> {
        let doc = Document::load_mem(pdf).unwrap();
        let mut lines: Vec<String> = Vec::new();
        for (_, page_id) in doc.get_pages() {
            let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
            let mut last_y: Option<f32> = None;
            let mut y = 0.0_f32;
            for op in &content.operations {
                match op.operator.as_str() {
                    "Td" => y = op.operands[1].as_float().unwrap(),
                    "Tj" => {
                        let text = decode_win_ansi(op.operands[0].as_str().unwrap());
                        match (last_y, lines.last_mut()) {
                            (Some(prev), Some(line)) if (prev - y).abs() < 0.01 => {
                                line.push_str(&text)
                            }
                            _ => lines.push(text),
                        }
                        last_y = Some(y);
                    }
                    _ => {}
                }
            }
        }
        lines
    }

    fn render(markdown: &str) -> Vec<u8> {
        LopdfBackend::new(default_page_config())
            .render(&layout_markdown(markdown))
            .unwrap()
    }

    fn page_count(pdf: &[u8]) -> usize {
        Document::load_mem(pdf).unwrap().get_pages().len()
    }

    #[test]
    fn test_output_is_a_pdf() {
        let pdf = render("# Jane Doe");
        assert!(pdf.starts_with(b"%PDF-1.7"));
        assert_eq!(page_count(&pdf), 1);
    }

    #[test]
    fn test_empty_document_still_has_one_page() {
        assert_eq!(page_count(&render("")), 1);
    }

    #[test]
    fn test_round_trip_recovers_visible_lines_in_order() {
        let markdown = "# Jane Doe\n\
                        jane@example.com | +1-555-123-4567\n\
                        \n\
                        ## Experience\n\
                        ### Acme Corp\n\
                        **Senior Engineer**\n\
                        - Built **scalable** systems at *Acme*\n\
                        * Led team of 5\n\
                        \n\
                        ## Skills\n\
                        Rust, Go, Kubernetes";

        let expected: Vec<String> = layout_markdown(markdown)
            .iter()
            .filter_map(|b| b.text.as_deref())
            .map(plain_text)
            .collect();
        let non_blank = markdown.lines().filter(|l| !l.trim().is_empty()).count();
        assert_eq!(expected.len(), non_blank);

        let lines = extract_lines(&render(markdown));
        assert_eq!(lines, expected);
        assert_eq!(lines[0], "Jane Doe");
        assert_eq!(lines[5], "• Built scalable systems at Acme");
    }

    #[test]
    fn test_long_document_spills_onto_more_pages() {
        let markdown = "- A bullet line of resume text\n".repeat(100);
        let pdf = render(&markdown);
        assert!(page_count(&pdf) >= 3, "got {} pages", page_count(&pdf));
        assert_eq!(extract_lines(&pdf).len(), 100);
    }

    #[test]
    fn test_blank_runs_do_not_carry_spacing_across_pages() {
        let markdown = format!("{}Skills", "\n".repeat(300));
        let pdf = render(&markdown);
        assert_eq!(page_count(&pdf), 2);
        assert_eq!(extract_lines(&pdf), vec!["Skills".to_string()]);
    }

    #[test]
    fn test_page_limit_fails_whole_render() {
        let markdown = "line\n".repeat(200);
        let result = LopdfBackend::new(default_page_config())
            .with_max_pages(2)
            .render(&layout_markdown(&markdown));
        assert!(matches!(result, Err(RenderError::PageLimit { limit: 2 })));
    }

    #[test]
    fn test_underlined_fragments_draw_a_stroke() {
        let pdf = render("Email a@b.com");
        let doc = Document::load_mem(&pdf).unwrap();
        let page_id = *doc.get_pages().values().next().unwrap();
        let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
        let strokes = content
            .operations
            .iter()
            .filter(|op| op.operator == "S")
            .count();
        assert_eq!(strokes, 1);
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("• A"), vec![0x95, b' ', b'A']);
        assert_eq!(encode_win_ansi("é"), vec![0xE9]);
        assert_eq!(encode_win_ansi("漢"), vec![b'?']);
    }
}
