//! Core data model types for quizrun.
//!
//! These are the canonical, normalized question types every session is built
//! from, plus the letter labels used to address options.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Option labels, in order. Index `i` is addressed as `LETTERS[i]`.
pub const LETTERS: [char; 26] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Map an option index to its letter label.
///
/// Indices past `Z` have no letter and render as `"(n)"`.
pub fn index_to_letter(index: usize) -> String {
    match LETTERS.get(index) {
        Some(letter) => letter.to_string(),
        None => format!("({index})"),
    }
}

/// Map a letter label (e.g. `"c"`, `" A "`) to its option index.
///
/// Anything that is not exactly one letter `A..Z` after trimming is "not
/// found" and yields `None`.
pub fn letter_to_index(label: &str) -> Option<usize> {
    let mut chars = label.trim().chars();
    let letter = chars.next()?.to_ascii_uppercase();
    if chars.next().is_some() {
        return None;
    }
    LETTERS.iter().position(|&l| l == letter)
}

/// Join the letters of a set of option indices, e.g. `"A, C"`.
pub fn letters_of(indices: &[usize]) -> String {
    indices
        .iter()
        .map(|&i| index_to_letter(i))
        .collect::<Vec<_>>()
        .join(", ")
}

/// One answer choice of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    /// Text shown for this choice.
    pub text: String,
    /// Whether this choice belongs to the correct set.
    pub correct: bool,
}

/// Single- or multi-select, derived from the number of correct labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Single,
    Multi,
}

impl QuestionKind {
    /// Classify from the size of a question's correct-index set.
    pub fn from_correct_count(count: usize) -> Self {
        if count > 1 {
            QuestionKind::Multi
        } else {
            QuestionKind::Single
        }
    }

    /// Instruction shown above the options.
    pub fn prompt(self) -> &'static str {
        match self {
            QuestionKind::Single => "Select one option",
            QuestionKind::Multi => "Select all that apply",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::Single => write!(f, "single"),
            QuestionKind::Multi => write!(f, "multi"),
        }
    }
}

/// A normalized question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Identifier from the source record, or `q-<index>` when absent.
    pub id: String,
    /// The question text.
    pub text: String,
    /// Choices in their current order.
    pub options: Vec<AnswerOption>,
    /// Explanation shown when the answer is revealed.
    #[serde(default)]
    pub explanation: String,
    /// Single or multi select.
    pub kind: QuestionKind,
    /// Free-form metadata carried over from the source record.
    #[serde(default)]
    pub meta: serde_json::Map<String, serde_json::Value>,
    /// Source page reference, if any.
    #[serde(default)]
    pub page: Option<serde_json::Value>,
}

impl Question {
    /// Indices (in current option order) of the options marked correct.
    pub fn correct_indices(&self) -> Vec<usize> {
        self.options
            .iter()
            .enumerate()
            .filter(|(_, o)| o.correct)
            .map(|(i, _)| i)
            .collect()
    }

    /// Letters of the correct options, e.g. `"A, C"`.
    pub fn correct_letters(&self) -> String {
        letters_of(&self.correct_indices())
    }
}
