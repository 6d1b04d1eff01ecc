//! Splits optimized Markdown into the main resume and the suggestions section.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeSections {
    /// Everything before the suggestions heading, trimmed.
    pub resume: String,
    /// The heading plus everything after it, or `None` if the model omitted it.
    pub suggestions: Option<String>,
}

/// Splits at the FIRST occurrence of `heading`. Later occurrences stay in the suggestions.
/// An empty heading never matches.
pub fn split_suggestions(markdown: &str, heading: &str) -> ResumeSections {
    let split = if heading.is_empty() {
        None
    } else {
        markdown.split_once(heading)
    };
    match split {
        Some((resume, rest)) => ResumeSections {
            resume: resume.trim().to_string(),
            suggestions: Some(format!("{heading}\n{}", rest.trim())),
        },
        None => ResumeSections {
            resume: markdown.trim().to_string(),
            suggestions: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADING: &str = "## Additional Suggestions";

    #[test]
    fn test_split_at_heading() {
        let md = "# Jane Doe\n- Rust\n\n## Additional Suggestions\n- Learn Go\n";
        let sections = split_suggestions(md, HEADING);
        assert_eq!(sections.resume, "# Jane Doe\n- Rust");
        assert_eq!(
            sections.suggestions.as_deref(),
            Some("## Additional Suggestions\n- Learn Go")
        );
    }

    #[test]
    fn test_missing_heading_keeps_everything_as_resume() {
        let sections = split_suggestions("  # Jane Doe\n", HEADING);
        assert_eq!(sections.resume, "# Jane Doe");
        assert!(sections.suggestions.is_none());
    }

    #[test]
    fn test_empty_heading_keeps_everything_as_resume() {
        let sections = split_suggestions("# Jane Doe\n- Rust", "");
        assert_eq!(sections.resume, "# Jane Doe\n- Rust");
        assert!(sections.suggestions.is_none());
    }

    #[test]
    fn test_splits_only_at_first_occurrence() {
        let md = "A\n## Additional Suggestions\nB\n## Additional Suggestions\nC";
        let sections = split_suggestions(md, HEADING);
        assert_eq!(sections.resume, "A");
        assert_eq!(
            sections.suggestions.as_deref(),
            Some("## Additional Suggestions\nB\n## Additional Suggestions\nC")
        );
    }
}
