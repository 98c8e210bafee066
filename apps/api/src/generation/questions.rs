//! Interview question parsing: one question per non-blank generated line.

use serde::Serialize;

/// Question category, assigned by position in the generated list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QuestionCategory {
    Behavioral,
    Technical,
    Situational,
    General,
}

impl QuestionCategory {
    /// Five questions per category, in prompt order. `line_index` is the raw
    /// line position, blank lines included.
    pub fn for_line(line_index: usize) -> Self {
        match line_index {
            0..=4 => Self::Behavioral,
            5..=9 => Self::Technical,
            10..=14 => Self::Situational,
            _ => Self::General,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterviewQuestion {
    /// Raw line index in the generated text.
    pub id: usize,
    pub question: String,
    pub category: QuestionCategory,
}

/// Parses numbered question lines. Leading digits, dots and spaces are
/// stripped from each line; blank lines are skipped but still count toward
/// ids and categories.
pub fn parse_questions(text: &str) -> Vec<InterviewQuestion> {
    text.split('\n')
        .enumerate()
        .filter_map(|(index, line)| {
            let line = line.trim();
            if line.is_empty() {
                return None;
            }
            Some(InterviewQuestion {
                id: index,
                question: strip_numbering(line).to_string(),
                category: QuestionCategory::for_line(index),
            })
        })
        .collect()
}

fn strip_numbering(line: &str) -> &str {
    line.trim_start_matches(|c: char| c.is_ascii_digit() || c == '.' || c == ' ')
}
