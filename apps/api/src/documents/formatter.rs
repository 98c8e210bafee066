//! Line-classification formatter: turns unstructured generated text into
//! styled document blocks.
//!
//! Each line is classified independently, in order, by a fixed priority chain:
//! blank → all-caps heading → title → bullet → body. The only state carried
//! between lines is the line index (line 0 is the title candidate).
//! One block is emitted per input line; nothing is dropped or merged.

use serde::Serialize;

use crate::documents::style::DocumentStyle;

/// Minimum character count (exclusive) for an all-caps line to count as a heading.
const HEADING_MIN_CHARS: usize = 3;

const BULLET_MARKERS: [char; 2] = ['-', '•'];

// ────────────────────────────────────────────────────────────────────────────
// Block model
// ────────────────────────────────────────────────────────────────────────────

/// A styled paragraph. `size_pt == None` means the document default size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledParagraph {
    pub text: String,
    pub bold: bool,
    pub centered: bool,
    pub size_pt: Option<f32>,
}

impl StyledParagraph {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            bold: false,
            centered: false,
            size_pt: None,
        }
    }
}

/// One formatted line of the output document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Block {
    Paragraph(StyledParagraph),
    Bullet(String),
    Blank,
}

// ────────────────────────────────────────────────────────────────────────────
// Classification
// ────────────────────────────────────────────────────────────────────────────

/// Splits `text` on `'\n'` and classifies every line.
///
/// Total: any input (including `""`) yields `text.split('\n').count()` blocks.
pub fn format_blocks(text: &str, style: &DocumentStyle) -> Vec<Block> {
    text.split('\n')
        .enumerate()
        .map(|(index, line)| classify_line(index, line, style))
        .collect()
}

/// Classifies a single line at position `index`.
pub fn classify_line(index: usize, raw: &str, style: &DocumentStyle) -> Block {
    let line = raw.trim();

    if line.is_empty() {
        return Block::Blank;
    }

    if is_heading(line) {
        return Block::Paragraph(StyledParagraph {
            bold: true,
            ..StyledParagraph::plain(line)
        });
    }

    if index == 0 || style.is_marked_title(line) {
        return Block::Paragraph(StyledParagraph {
            bold: true,
            centered: true,
            size_pt: Some(style.title_size_pt),
            ..StyledParagraph::plain(line)
        });
    }

    if let Some(rest) = line.strip_prefix(&BULLET_MARKERS[..]) {
        return Block::Bullet(rest.trim().to_string());
    }

    Block::Paragraph(StyledParagraph::plain(line))
}

/// All-caps heading: longer than three characters, has at least one cased
/// character, and no lowercase characters.
fn is_heading(line: &str) -> bool {
    line.chars().count() > HEADING_MIN_CHARS && is_uppercase(line)
}

fn is_uppercase(line: &str) -> bool {
    let mut has_cased = false;
    for c in line.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}
