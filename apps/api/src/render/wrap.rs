//! Greedy word wrap of styled runs into printed lines.
//!
//! Same greedy algorithm as a plain-string wrap, but each word may be made of
//! several differently styled fragments (`Built**scal**able`). Words wider
//! than the line are placed alone and overflow; there is no hyphenation.

use crate::render::markup::{RunStyle, TextRun};
use crate::render::metrics::{get_metrics, FontFace};

/// A piece of text on a printed line, positioned relative to the line start.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedFragment {
    /// May end with the single space separating it from the next word.
    pub text: String,
    pub face: FontFace,
    pub underline: bool,
    pub x_offset: f32,
}

impl PlacedFragment {
    /// Visible width in points, trailing space excluded.
    pub fn visible_width(&self, font_size: f32) -> f32 {
        get_metrics(self.face).measure_pt(self.text.trim_end(), font_size)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WrappedLine {
    pub fragments: Vec<PlacedFragment>,
    pub width: f32,
}

impl WrappedLine {
    #[cfg(test)]
    pub fn text(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }
}

#[derive(Debug, Clone)]
struct WordPiece {
    text: String,
    style: RunStyle,
}

fn face_of(style: RunStyle) -> FontFace {
    FontFace::from_flags(style.bold, style.italic)
}

/// Splits runs on whitespace into words made of styled pieces.
fn split_words(runs: &[TextRun]) -> Vec<Vec<WordPiece>> {
    let mut words: Vec<Vec<WordPiece>> = Vec::new();
    let mut current: Vec<WordPiece> = Vec::new();

    for run in runs {
        for c in run.text.chars() {
            if c.is_whitespace() {
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
                continue;
            }
            match current.last_mut() {
                Some(piece) if piece.style == run.style => piece.text.push(c),
                _ => current.push(WordPiece {
                    text: c.to_string(),
                    style: run.style,
                }),
            }
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn word_width(word: &[WordPiece], font_size: f32) -> f32 {
    word.iter()
        .map(|p| get_metrics(face_of(p.style)).measure_pt(&p.text, font_size))
        .sum()
}

/// Wraps runs into lines no wider than `max_width` points (except single overlong words).
pub fn wrap_runs(runs: &[TextRun], font_size: f32, max_width: f32) -> Vec<WrappedLine> {
    let space_width = get_metrics(FontFace::Regular).space_width * font_size;
    let mut lines: Vec<WrappedLine> = Vec::new();
    let mut line = WrappedLine {
        fragments: Vec::new(),
        width: 0.0,
    };

    for word in split_words(runs) {
        let width = word_width(&word, font_size);
        let first_on_line = line.fragments.is_empty();

        if !first_on_line && line.width + space_width + width > max_width {
            lines.push(std::mem::replace(
                &mut line,
                WrappedLine {
                    fragments: Vec::new(),
                    width: 0.0,
                },
            ));
        }

        if !line.fragments.is_empty() {
            if let Some(last) = line.fragments.last_mut() {
                last.text.push(' ');
            }
            line.width += space_width;
        }

        for piece in word {
            let face = face_of(piece.style);
            match line.fragments.last_mut() {
                Some(last) if last.face == face && last.underline == piece.style.underline => {
                    last.text.push_str(&piece.text);
                }
                _ => line.fragments.push(PlacedFragment {
                    text: piece.text.clone(),
                    face,
                    underline: piece.style.underline,
                    x_offset: line.width,
                }),
            }
            line.width += get_metrics(face).measure_pt(&piece.text, font_size);
        }
    }

    if !line.fragments.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::markup::parse_markup;

    #[test]
    fn test_short_text_is_one_line() {
        let runs = parse_markup("Jane Doe", false);
        let lines = wrap_runs(&runs, 10.0, 468.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text(), "Jane Doe");
        assert_eq!(lines[0].fragments.len(), 1);
    }

    #[test]
    fn test_whitespace_is_collapsed() {
        let runs = parse_markup("a    b\tc", false);
        let lines = wrap_runs(&runs, 10.0, 468.0);
        assert_eq!(lines[0].text(), "a b c");
    }

    #[test]
    fn test_long_text_wraps_without_exceeding_width() {
        let text = "Architected a distributed caching layer using consistent hashing ".repeat(4);
        let runs = parse_markup(&text, false);
        let lines = wrap_runs(&runs, 10.0, 200.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.width <= 200.0, "line too wide: {}", line.width);
        }
        let rejoined: Vec<String> = lines.iter().map(|l| l.text()).collect();
        assert_eq!(rejoined.join(" "), text.trim_end());
    }

    #[test]
    fn test_styled_fragments_keep_positions() {
        let runs = parse_markup("Built <b>scalable</b> systems", false);
        let lines = wrap_runs(&runs, 10.0, 468.0);
        let line = &lines[0];
        assert_eq!(line.text(), "Built scalable systems");
        assert_eq!(line.fragments.len(), 3);
        assert_eq!(line.fragments[1].face, FontFace::Bold);
        assert!(line.fragments[1].x_offset > 0.0);
        assert!(line.fragments[2].x_offset > line.fragments[1].x_offset);
    }

    #[test]
    fn test_mixed_style_word_is_not_split() {
        let runs = parse_markup("x <b>scal</b>able", false);
        let lines = wrap_runs(&runs, 10.0, 468.0);
        assert_eq!(lines[0].text(), "x scalable");
    }

    #[test]
    fn test_overlong_word_gets_own_line() {
        let runs = parse_markup("a Supercalifragilisticexpialidocious b", false);
        let lines = wrap_runs(&runs, 10.0, 50.0);
        let texts: Vec<String> = lines.iter().map(|l| l.text()).collect();
        assert_eq!(texts, vec!["a", "Supercalifragilisticexpialidocious", "b"]);
    }

    #[test]
    fn test_empty_markup_yields_no_lines() {
        assert!(wrap_runs(&parse_markup("<b></b>", false), 10.0, 468.0).is_empty());
    }

    #[test]
    fn test_underline_width_excludes_trailing_space() {
        let runs = parse_markup("<u>a@b.com</u> next", false);
        let lines = wrap_runs(&runs, 10.0, 468.0);
        let underlined = &lines[0].fragments[0];
        assert!(underlined.underline);
        assert_eq!(underlined.text, "a@b.com ");
        let expected = get_metrics(FontFace::Regular).measure_pt("a@b.com", 10.0);
        assert!((underlined.visible_width(10.0) - expected).abs() < 1e-3);
    }
}
