//! Resume metadata: the `---METADATA---` trailer the resume prompt asks for,
//! and download filenames derived from request and metadata fields.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

pub const METADATA_MARKER: &str = "---METADATA---";

const DEFAULT_JOB_TITLE: &str = "Resume";
const DEFAULT_COMPANY_NAME: &str = "Company";

static JOB_TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"JOB_TITLE:\s*(.+)").expect("JOB_TITLE pattern is valid"));
static COMPANY_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"COMPANY_NAME:\s*(.+)").expect("COMPANY_NAME pattern is valid"));

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeMetadata {
    pub job_title: String,
    pub company_name: String,
}

impl Default for ResumeMetadata {
    fn default() -> Self {
        Self {
            job_title: DEFAULT_JOB_TITLE.to_string(),
            company_name: DEFAULT_COMPANY_NAME.to_string(),
        }
    }
}

/// Splits generated resume text into the document body and its metadata.
///
/// Without a marker the text is returned untouched with default metadata.
/// With one, the body is everything before the first marker (trimmed) and
/// fields are read from the segment after it.
pub fn split_metadata(text: &str) -> (String, ResumeMetadata) {
    let mut parts = text.split(METADATA_MARKER);
    let body = parts.next().unwrap_or_default();
    let Some(trailer) = parts.next() else {
        return (text.to_string(), ResumeMetadata::default());
    };

    let defaults = ResumeMetadata::default();
    let metadata = ResumeMetadata {
        job_title: capture(&JOB_TITLE_RE, trailer).unwrap_or(defaults.job_title),
        company_name: capture(&COMPANY_NAME_RE, trailer).unwrap_or(defaults.company_name),
    };

    (body.trim().to_string(), metadata)
}

fn capture(pattern: &Regex, haystack: &str) -> Option<String> {
    pattern
        .captures(haystack)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Filenames
// ────────────────────────────────────────────────────────────────────────────

fn underscored(s: &str) -> String {
    s.replace(' ', "_")
}

/// `{prefix}_{job_title}_{company}.docx`
pub fn resume_filename(prefix: &str, metadata: &ResumeMetadata) -> String {
    format!(
        "{prefix}_{}_{}.docx",
        underscored(&metadata.job_title),
        underscored(&metadata.company_name)
    )
}

/// `{prefix}_Cover_Letter.docx`
pub fn cover_letter_filename(prefix: &str) -> String {
    format!("{prefix}_Cover_Letter.docx")
}

/// `{prefix}_Study_Guide_{job_title}.docx`
pub fn study_guide_filename(prefix: &str, job_title: &str) -> String {
    format!("{prefix}_Study_Guide_{}.docx", underscored(job_title))
}
