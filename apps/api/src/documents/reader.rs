//! Plain-text extraction from uploaded resumes (`.docx`, `.txt`, `.pdf`).

use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};
use serde::Serialize;

use crate::documents::DocumentError;

/// Upload formats accepted for resume text extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Docx,
    Text,
    Pdf,
}

impl SourceFormat {
    /// Detects the format from the file extension (case-insensitive).
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, extension) = filename.rsplit_once('.')?;
        match extension.to_ascii_lowercase().as_str() {
            "docx" => Some(Self::Docx),
            "txt" => Some(Self::Text),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }
}

/// Extracts the plain text of an uploaded file.
pub fn extract_text(filename: &str, bytes: &[u8]) -> Result<String, DocumentError> {
    let format = SourceFormat::from_filename(filename)
        .ok_or_else(|| DocumentError::UnsupportedFormat(filename.to_string()))?;

    match format {
        SourceFormat::Docx => Ok(paragraph_texts(bytes)?.join("\n")),
        SourceFormat::Text => String::from_utf8(bytes.to_vec()).map_err(|_| DocumentError::Encoding),
        SourceFormat::Pdf => {
            pdf_extract::extract_text_from_mem(bytes).map_err(|e| DocumentError::Pdf(e.to_string()))
        }
    }
}

/// Text of every top-level paragraph in a `.docx`, in document order.
/// Tables and other non-paragraph content are skipped.
pub fn paragraph_texts(bytes: &[u8]) -> Result<Vec<String>, DocumentError> {
    let docx = read_docx(bytes).map_err(|e| DocumentError::Read(e.to_string()))?;

    Ok(docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(paragraph) => {
                let mut text = String::new();
                collect_text(&paragraph.children, &mut text);
                Some(text)
            }
            _ => None,
        })
        .collect())
}

fn collect_text(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    match run_child {
                        RunChild::Text(t) => out.push_str(&t.text),
                        RunChild::Tab(_) => out.push('\t'),
                        _ => {}
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => collect_text(&link.children, out),
            _ => {}
        }
    }
}
