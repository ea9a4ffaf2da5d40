//! Read-only view data for rendering layers.
//!
//! Views are snapshots built from a [`Session`]; rendering code never needs to
//! reach into answers, reveal state or grading directly.

use serde::Serialize;

use crate::model::{index_to_letter, QuestionKind};
use crate::session::Session;
use crate::timer::format_clock;

/// Highlight applied to an option when its question is revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionMark {
    None,
    /// A correct option.
    Correct,
    /// A selected option that is not correct.
    Wrong,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionView {
    pub letter: String,
    pub text: String,
    pub selected: bool,
    pub mark: OptionMark,
}

/// Everything needed to draw one question.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub index: usize,
    pub total: usize,
    pub id: String,
    pub text: String,
    pub kind: QuestionKind,
    /// Instruction line ("Select one option" / "Select all that apply").
    pub prompt: &'static str,
    pub options: Vec<OptionView>,
    pub revealed: bool,
    /// Input is disabled once the session is finished.
    pub locked: bool,
    /// Correct letters, only when revealed.
    pub correct_letters: Option<String>,
    /// Explanation, only when revealed and non-empty.
    pub explanation: Option<String>,
    pub has_prev: bool,
    pub has_next: bool,
}

/// One button of the question navigator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigatorEntry {
    pub index: usize,
    pub active: bool,
    pub answered: bool,
    /// Grading verdict, once the session is finished.
    pub verdict: Option<bool>,
}

impl QuestionView {
    /// View of the question at `index`, or `None` if out of range.
    pub fn build(session: &Session, index: usize) -> Option<Self> {
        let question = session.question(index)?;
        let revealed = session.is_revealed(index);
        let options = question
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let selected = session.answers().is_selected(index, i);
                let mark = match (revealed, option.correct, selected) {
                    (false, _, _) => OptionMark::None,
                    (true, true, _) => OptionMark::Correct,
                    (true, false, true) => OptionMark::Wrong,
                    (true, false, false) => OptionMark::None,
                };
                OptionView {
                    letter: index_to_letter(i),
                    text: option.text.clone(),
                    selected,
                    mark,
                }
            })
            .collect();

        let correct_letters = revealed.then(|| {
            let letters = question.correct_letters();
            if letters.is_empty() {
                "-".to_string()
            } else {
                letters
            }
        });
        let explanation = (revealed && !question.explanation.is_empty())
            .then(|| question.explanation.clone());

        Some(Self {
            index,
            total: session.len(),
            id: question.id.clone(),
            text: question.text.clone(),
            kind: question.kind,
            prompt: question.kind.prompt(),
            options,
            revealed,
            locked: session.is_finished(),
            correct_letters,
            explanation,
            has_prev: index > 0,
            has_next: index + 1 < session.len(),
        })
    }

    /// View of the session's current question.
    pub fn current(session: &Session) -> Option<Self> {
        Self::build(session, session.current())
    }

    /// `"Question 3/10"`.
    pub fn position_label(&self) -> String {
        format!("Question {}/{}", self.index + 1, self.total)
    }
}

/// Navigator entries for every question in the session.
pub fn navigator(session: &Session) -> Vec<NavigatorEntry> {
    (0..session.len())
        .map(|i| NavigatorEntry {
            index: i,
            active: i == session.current(),
            answered: session.is_answered(i),
            verdict: session.verdict(i),
        })
        .collect()
}

/// Remaining time of the session as `mm:ss`.
pub fn timer_label(session: &Session) -> String {
    format_clock(session.countdown().remaining_secs())
}
