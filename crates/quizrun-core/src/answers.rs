//! Per-question answer selections.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::model::QuestionKind;

/// Selected option indices keyed by question position.
///
/// A question with no key is unanswered; clearing the last selection removes
/// the key again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerMap {
    selections: BTreeMap<usize, BTreeSet<usize>>,
}

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a check/uncheck event.
    ///
    /// `Single`: checking replaces any previous choice, unchecking removes it.
    /// `Multi`: each option toggles membership on its own.
    pub fn select(&mut self, question: usize, kind: QuestionKind, option: usize, checked: bool) {
        let set = self.selections.entry(question).or_default();
        match kind {
            QuestionKind::Single => {
                if checked {
                    set.clear();
                    set.insert(option);
                } else {
                    set.remove(&option);
                }
            }
            QuestionKind::Multi => {
                if checked {
                    set.insert(option);
                } else {
                    set.remove(&option);
                }
            }
        }
        if set.is_empty() {
            self.selections.remove(&question);
        }
    }

    /// Selected option indices in ascending order (empty if unanswered).
    pub fn selection(&self, question: usize) -> Vec<usize> {
        self.selections
            .get(&question)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn is_selected(&self, question: usize, option: usize) -> bool {
        self.selections
            .get(&question)
            .is_some_and(|set| set.contains(&option))
    }

    pub fn is_answered(&self, question: usize) -> bool {
        self.selections
            .get(&question)
            .is_some_and(|set| !set.is_empty())
    }

    pub fn answered_count(&self) -> usize {
        self.selections.values().filter(|set| !set.is_empty()).count()
    }

    pub fn clear(&mut self) {
        self.selections.clear();
    }
}
