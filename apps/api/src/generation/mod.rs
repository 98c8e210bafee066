// Generation API: resume, cover letter, study guide (.docx downloads) and
// interview questions (JSON). All LLM calls go through llm_client.

pub mod generator;
pub mod handlers;
pub mod metadata;
pub mod prompts;
pub mod questions;
