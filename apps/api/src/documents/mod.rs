// Document pipeline: generated text → classified blocks → .docx bytes,
// plus plain-text extraction from uploaded resumes.

pub mod download;
pub mod formatter;
pub mod handlers;
pub mod reader;
pub mod style;
pub mod writer;

use thiserror::Error;

pub use download::DocxFile;
pub use style::DocumentStyle;
pub use writer::DOCX_MIME;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to write document: {0}")]
    Write(String),

    #[error("Failed to read document: {0}")]
    Read(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to extract PDF text: {0}")]
    Pdf(String),

    #[error("File is not valid UTF-8 text")]
    Encoding,
}

/// Formats `text` line by line and serializes the result as a `.docx`.
pub fn build_docx(text: &str, style: &DocumentStyle) -> Result<Vec<u8>, DocumentError> {
    let blocks = formatter::format_blocks(text, style);
    writer::render_docx(&blocks, style)
}
