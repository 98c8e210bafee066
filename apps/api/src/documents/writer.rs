//! `.docx` serialization of formatted blocks via `docx-rs`.

use std::io::Cursor;

use docx_rs::{
    AbstractNumbering, AlignmentType, Docx, IndentLevel, Level, LevelJc, LevelText, NumberFormat,
    Numbering, NumberingId, PageMargin, Paragraph, Run, RunFonts, SpecialIndentType, Start,
};

use crate::documents::formatter::{Block, StyledParagraph};
use crate::documents::style::{half_points, twips, DocumentStyle};
use crate::documents::DocumentError;

/// MIME type of a WordprocessingML document.
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Numbering instance used for bullet items. Kept clear of id 1, which
/// docx-rs may reserve for its own default list.
const BULLET_NUMBERING_ID: usize = 2;

/// Bullet indentation in twips: 0.5" left, 0.25" hanging.
const BULLET_INDENT_LEFT: i32 = 720;
const BULLET_INDENT_HANGING: i32 = 360;

/// US Letter in twips.
const PAGE_WIDTH: u32 = 12240;
const PAGE_HEIGHT: u32 = 15840;

/// Serializes `blocks` into a `.docx` byte buffer.
pub fn render_docx(blocks: &[Block], style: &DocumentStyle) -> Result<Vec<u8>, DocumentError> {
    let mut buffer = Cursor::new(Vec::new());
    build_document(blocks, style)
        .build()
        .pack(&mut buffer)
        .map_err(|e| DocumentError::Write(e.to_string()))?;

    Ok(buffer.into_inner())
}

fn build_document(blocks: &[Block], style: &DocumentStyle) -> Docx {
    blocks.iter().fold(base_document(style), |docx, block| {
        docx.add_paragraph(paragraph_for(block))
    })
}

/// Empty document carrying default font, size, margins, and the bullet list definition.
fn base_document(style: &DocumentStyle) -> Docx {
    let fonts = RunFonts::new()
        .ascii(&style.font_family)
        .hi_ansi(&style.font_family)
        .cs(&style.font_family);

    let margins = PageMargin::new()
        .top(twips(style.margin_top_in))
        .bottom(twips(style.margin_bottom_in))
        .left(twips(style.margin_left_in))
        .right(twips(style.margin_right_in));

    let bullet_level = Level::new(
        0,
        Start::new(1),
        NumberFormat::new("bullet"),
        LevelText::new("•"),
        LevelJc::new("left"),
    )
    .indent(
        Some(BULLET_INDENT_LEFT),
        Some(SpecialIndentType::Hanging(BULLET_INDENT_HANGING)),
        None,
        None,
    );

    Docx::new()
        .default_fonts(fonts)
        .default_size(half_points(style.base_size_pt))
        .page_size(PAGE_WIDTH, PAGE_HEIGHT)
        .page_margin(margins)
        .add_abstract_numbering(AbstractNumbering::new(BULLET_NUMBERING_ID).add_level(bullet_level))
        .add_numbering(Numbering::new(BULLET_NUMBERING_ID, BULLET_NUMBERING_ID))
}

fn paragraph_for(block: &Block) -> Paragraph {
    match block {
        Block::Blank => Paragraph::new(),
        Block::Bullet(text) => Paragraph::new()
            .add_run(Run::new().add_text(xml_text(text)))
            .numbering(NumberingId::new(BULLET_NUMBERING_ID), IndentLevel::new(0)),
        Block::Paragraph(p) => styled_paragraph(p),
    }
}

fn styled_paragraph(p: &StyledParagraph) -> Paragraph {
    let mut run = Run::new().add_text(xml_text(&p.text));
    if p.bold {
        run = run.bold();
    }
    if let Some(size) = p.size_pt {
        run = run.size(half_points(size));
    }

    let paragraph = Paragraph::new().add_run(run);
    if p.centered {
        paragraph.align(AlignmentType::Center)
    } else {
        paragraph
    }
}

/// Drops characters XML 1.0 cannot carry. Escaping of `<`, `&` and quotes
/// is left to docx-rs.
fn xml_text(text: &str) -> String {
    text.chars().filter(|&c| is_xml_char(c)).collect()
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && c != '\u{FFFE}' && c != '\u{FFFF}')
}
