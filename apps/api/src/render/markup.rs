//! Rich-text markup parser: turns `<b>`, `<i>`, `<u>` tagged text into styled runs.
//!
//! Tags are depth counters, not a tree. The inline formatter's sequential
//! passes can produce interleaved tags such as `<u><b>x</u></b>`, which a
//! strict parser would reject. A stray closing tag saturates at zero.
//! Anything that is not one of the six known tags is literal text.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub text: String,
    pub style: RunStyle,
}

#[derive(Default)]
struct TagDepths {
    bold: u32,
    italic: u32,
    underline: u32,
}

impl TagDepths {
    fn style(&self, base_bold: bool) -> RunStyle {
        RunStyle {
            bold: base_bold || self.bold > 0,
            italic: self.italic > 0,
            underline: self.underline > 0,
        }
    }

    /// Applies a tag if `s` starts with one. Returns the tag length consumed.
    fn apply_tag(&mut self, s: &str) -> Option<usize> {
        const TAGS: [&str; 6] = ["<b>", "</b>", "<i>", "</i>", "<u>", "</u>"];
        let tag = TAGS.iter().find(|t| s.starts_with(**t))?;
        let counter = match tag.as_bytes()[tag.len() - 2] {
            b'b' => &mut self.bold,
            b'i' => &mut self.italic,
            _ => &mut self.underline,
        };
        if tag.as_bytes()[1] == b'/' {
            *counter = counter.saturating_sub(1);
        } else {
            *counter += 1;
        }
        Some(tag.len())
    }
}

/// Parses markup into runs. Adjacent text with the same style is merged;
/// empty runs are dropped.
pub fn parse_markup(markup: &str, base_bold: bool) -> Vec<TextRun> {
    let mut runs: Vec<TextRun> = Vec::new();
    let mut depths = TagDepths::default();
    let mut rest = markup;

    while !rest.is_empty() {
        if rest.starts_with('<') {
            if let Some(consumed) = depths.apply_tag(rest) {
                rest = &rest[consumed..];
                continue;
            }
        }

        // Literal text up to the next '<'. The first char is always consumed so
        // an unrecognised '<' cannot stall the loop.
        let first = rest.chars().next().map(char::len_utf8).unwrap_or(1);
        let end = rest[first..]
            .find('<')
            .map(|i| i + first)
            .unwrap_or(rest.len());
        push_text(&mut runs, &rest[..end], depths.style(base_bold));
        rest = &rest[end..];
    }

    runs
}

fn push_text(runs: &mut Vec<TextRun>, text: &str, style: RunStyle) {
    if text.is_empty() {
        return;
    }
    match runs.last_mut() {
        Some(last) if last.style == style => last.text.push_str(text),
        _ => runs.push(TextRun {
            text: text.to_string(),
            style,
        }),
    }
}

/// Visible text with all recognised tags removed.
#[cfg(test)]
pub fn plain_text(markup: &str) -> String {
    parse_markup(markup, false)
        .into_iter()
        .map(|run| run.text)
        .collect()
}
