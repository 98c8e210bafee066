//! File-download response for generated documents.

use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::documents::DOCX_MIME;

/// RFC 5987 `attr-char`: alphanumerics plus these marks go through unescaped.
const ATTR_CHAR: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'^')
    .remove(b'_')
    .remove(b'`')
    .remove(b'|')
    .remove(b'~');

/// A `.docx` returned as an attachment. `filename` is kept as generated,
/// Unicode included.
#[derive(Debug, Clone)]
pub struct DocxFile {
    pub filename: String,
    pub bytes: Bytes,
}

impl DocxFile {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes: Bytes::from(bytes),
        }
    }

    /// `attachment; filename="..."`, plus `filename*=UTF-8''...` when the
    /// quoted ASCII form had to replace characters.
    fn content_disposition(&self) -> String {
        let fallback = header_safe_filename(&self.filename);
        if fallback == self.filename {
            return format!("attachment; filename=\"{fallback}\"");
        }
        format!(
            "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
            utf8_percent_encode(&self.filename, ATTR_CHAR)
        )
    }
}

impl IntoResponse for DocxFile {
    fn into_response(self) -> Response {
        let disposition = self.content_disposition();
        (
            [
                (header::CONTENT_TYPE, DOCX_MIME.to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            self.bytes,
        )
            .into_response()
    }
}

/// Replaces anything that cannot sit inside a quoted header parameter.
/// Header values only accept visible ASCII, and LLM-extracted company
/// names routinely carry accents or quotes.
fn header_safe_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect()
}
