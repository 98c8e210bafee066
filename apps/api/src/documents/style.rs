//! Fixed styling applied to every generated document.
//!
//! Word measures font sizes in half-points and page geometry in twips
//! (1/20 pt, 1440 per inch). Conversions live here so the writer never
//! deals with raw unit arithmetic.

use serde::{Deserialize, Serialize};

const TWIPS_PER_INCH: f32 = 1440.0;

/// Page and font settings for a generated `.docx`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentStyle {
    /// Document-default font family for every run.
    pub font_family: String,
    /// Body text size in points.
    pub base_size_pt: f32,
    /// Size of the centered title line in points.
    pub title_size_pt: f32,
    pub margin_top_in: f32,
    pub margin_bottom_in: f32,
    pub margin_left_in: f32,
    pub margin_right_in: f32,
    /// Substring that forces the title style on any line, not only the first.
    /// Unset by default; the first line is always the title.
    pub title_marker: Option<String>,
}

impl Default for DocumentStyle {
    /// Calibri 11pt body, 16pt title, 0.75" margins on every side.
    fn default() -> Self {
        Self {
            font_family: "Calibri".to_string(),
            base_size_pt: 11.0,
            title_size_pt: 16.0,
            margin_top_in: 0.75,
            margin_bottom_in: 0.75,
            margin_left_in: 0.75,
            margin_right_in: 0.75,
            title_marker: None,
        }
    }
}

impl DocumentStyle {
    pub fn with_title_marker(mut self, marker: Option<String>) -> Self {
        self.title_marker = marker.filter(|m| !m.trim().is_empty());
        self
    }

    /// True when `line` contains the configured title marker.
    pub fn is_marked_title(&self, line: &str) -> bool {
        self.title_marker
            .as_deref()
            .is_some_and(|marker| line.contains(marker))
    }
}

/// Points → Word half-points (`w:sz`).
pub fn half_points(pt: f32) -> usize {
    (pt * 2.0).round().max(0.0) as usize
}

/// Inches → twips (`w:pgMar`).
pub fn twips(inches: f32) -> i32 {
    (inches * TWIPS_PER_INCH).round() as i32
}
