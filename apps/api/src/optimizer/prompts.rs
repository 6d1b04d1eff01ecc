// LLM prompt constants for the resume optimizer.

/// Resume rewrite prompt template.
/// Replace: {suggestions_heading}, {resume}, {job_description}
pub const OPTIMIZE_PROMPT_TEMPLATE: &str = r#"You are an expert resume writer. Rewrite the following resume to match the job description.

**Instructions:**
- Use strong action verbs and job-specific keywords.
- Focus on relevance (cut non-matching roles).
- Return resume in clean Markdown format (max one page).
- Use `# ` for the candidate name, `## ` for sections, `### ` for employers, `- ` for bullets.
- Add a section at the end titled "{suggestions_heading}" with:
  - Extra skills to learn
  - Certifications to pursue
  - Project ideas

**Resume:**
{resume}

**Job Description:**
{job_description}
"#;

/// Fills the optimizer prompt. Inputs are inserted verbatim.
pub fn build_optimizer_prompt(
    resume: &str,
    job_description: &str,
    suggestions_heading: &str,
) -> String {
    OPTIMIZE_PROMPT_TEMPLATE
        .replace("{suggestions_heading}", suggestions_heading)
        .replace("{resume}", resume)
        .replace("{job_description}", job_description)
}
