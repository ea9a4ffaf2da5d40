//! Exact-match grading and aggregate scoring.
//!
//! A question is correct only when the sorted selection equals the sorted
//! correct-option indices. There is no partial credit.

use serde::{Deserialize, Serialize};

use crate::answers::AnswerMap;
use crate::model::Question;
use crate::timer::Countdown;

/// Grading outcome for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOutcome {
    /// Position in the working set.
    pub index: usize,
    pub is_correct: bool,
    /// Selected option indices, ascending.
    pub selected: Vec<usize>,
    /// Correct option indices, ascending.
    pub correct: Vec<usize>,
}

/// Aggregate result of a graded session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    pub per_question: Vec<QuestionOutcome>,
    pub correct_count: usize,
    pub wrong_count: usize,
    pub answered_count: usize,
    /// Rounded percentage of correct questions, 0 for an empty session.
    pub score_pct: u32,
    pub used_secs: u32,
    pub remaining_secs: u32,
    pub total_secs: u32,
    /// Whether grading was forced by the countdown reaching zero.
    pub timed_out: bool,
}

impl SessionResult {
    pub fn question_count(&self) -> usize {
        self.per_question.len()
    }

    /// Whether the question at `index` was graded correct.
    pub fn is_correct(&self, index: usize) -> Option<bool> {
        self.per_question.get(index).map(|o| o.is_correct)
    }
}

/// Grade one question against its selection.
pub fn grade_question(index: usize, question: &Question, answers: &AnswerMap) -> QuestionOutcome {
    let selected = answers.selection(index);
    let correct = question.correct_indices();
    QuestionOutcome {
        index,
        is_correct: selected == correct,
        selected,
        correct,
    }
}

/// Grade a whole working set.
///
/// Pure: calling it again on unchanged inputs yields an equal result.
pub fn grade(questions: &[Question], answers: &AnswerMap, countdown: &Countdown) -> SessionResult {
    let per_question: Vec<QuestionOutcome> = questions
        .iter()
        .enumerate()
        .map(|(i, q)| grade_question(i, q, answers))
        .collect();

    let n = per_question.len();
    let correct_count = per_question.iter().filter(|o| o.is_correct).count();
    let answered_count = per_question
        .iter()
        .filter(|o| !o.selected.is_empty())
        .count();

    SessionResult {
        correct_count,
        wrong_count: n - correct_count,
        answered_count,
        score_pct: score_pct(correct_count, n),
        used_secs: countdown.used_secs(),
        remaining_secs: countdown.remaining_secs(),
        total_secs: countdown.total_secs(),
        timed_out: countdown.expired_by_timeout(),
        per_question,
    }
}

/// `round(correct / total * 100)` with halves rounded up; 0 when `total == 0`.
pub fn score_pct(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let pct = (correct * 200 + total) / (2 * total);
    u32::try_from(pct).unwrap_or(u32::MAX)
}
