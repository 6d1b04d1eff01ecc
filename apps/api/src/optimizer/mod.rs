// Resume optimization: prompt the LLM to tailor a resume to a job description,
// split off the suggestions section, and export Markdown or PDF downloads.
// All LLM calls go through llm_client.

pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod sections;
