// All LLM prompt templates for the Generation module.
// Placeholders in `{braces}` are replaced with request fields before sending.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([a-z_]+)\}").expect("placeholder pattern is valid"));

/// Resume tailoring prompt.
/// Replace: {base_resume}, {job_description}
///
/// The trailing metadata block is split off by `metadata::split_metadata`
/// and used to name the download.
pub const RESUME_PROMPT_TEMPLATE: &str = r#"Tailor this resume to this job.

BASE RESUME:
{base_resume}

JOB DESCRIPTION:
{job_description}

Create complete tailored resume. Extract keywords and rewrite all sections. Keep dates/companies exact.

At end add:
---METADATA---
JOB_TITLE: [job title]
COMPANY_NAME: [company name]

Output only resume."#;

/// Cover letter prompt.
/// Replace: {base_resume}, {job_description}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Create professional cover letter.

RESUME: {base_resume}
JOB: {job_description}

Write 3-4 paragraph cover letter."#;

/// Interview question prompt. Output is parsed line by line, so numbering matters.
/// Replace: {job_role}
pub const QUESTIONS_PROMPT_TEMPLATE: &str = r#"Generate 20 interview questions for {job_role}.
5 behavioral, 5 technical, 5 situational, 5 general. Number 1-20."#;

/// Interview study guide prompt.
/// Replace: {job_title}, {company}
pub const STUDY_GUIDE_PROMPT_TEMPLATE: &str = r#"Create interview study guide for {job_title} at {company}.

Include: role overview, technical skills, 15 questions, STAR examples, company research, topics to study, questions to ask, checklist."#;

/// Company placeholder when a study-guide request names none.
pub const DEFAULT_COMPANY: &str = "company";

/// Substitutes every known `{name}` in one pass over the template, so braces
/// inside the substituted values are left alone. Unknown names are kept.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures| {
            values
                .iter()
                .find(|(name, _)| *name == &caps[1])
                .map_or_else(|| caps[0].to_string(), |(_, value)| value.to_string())
        })
        .into_owned()
}

pub fn resume_prompt(base_resume: &str, job_description: &str) -> String {
    fill(
        RESUME_PROMPT_TEMPLATE,
        &[("base_resume", base_resume), ("job_description", job_description)],
    )
}

pub fn cover_letter_prompt(base_resume: &str, job_description: &str) -> String {
    fill(
        COVER_LETTER_PROMPT_TEMPLATE,
        &[("base_resume", base_resume), ("job_description", job_description)],
    )
}

pub fn questions_prompt(job_role: &str) -> String {
    fill(QUESTIONS_PROMPT_TEMPLATE, &[("job_role", job_role)])
}

pub fn study_guide_prompt(job_title: &str, company: Option<&str>) -> String {
    fill(
        STUDY_GUIDE_PROMPT_TEMPLATE,
        &[
            ("job_title", job_title),
            ("company", company.unwrap_or(DEFAULT_COMPANY)),
        ],
    )
}
