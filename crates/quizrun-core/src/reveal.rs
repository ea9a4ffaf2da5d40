//! Per-question answer reveal before grading.

use std::collections::BTreeSet;

/// Questions whose correct answer and explanation are currently shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevealedSet {
    revealed: BTreeSet<usize>,
}

impl RevealedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the reveal state of one question; returns the new state.
    pub fn toggle(&mut self, question: usize) -> bool {
        if self.revealed.remove(&question) {
            false
        } else {
            self.revealed.insert(question);
            true
        }
    }

    pub fn contains(&self, question: usize) -> bool {
        self.revealed.contains(&question)
    }

    pub fn len(&self) -> usize {
        self.revealed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revealed.is_empty()
    }

    pub fn clear(&mut self) {
        self.revealed.clear();
    }
}
