//! Exam report types with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::SessionConfig;
use crate::grader::SessionResult;
use crate::model::letters_of;
use crate::session::Session;

/// A graded exam, ready to be written out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamReport {
    /// Session identifier.
    pub id: Uuid,
    /// When the session started.
    pub created_at: DateTime<Utc>,
    /// Number of questions in the pool the session was drawn from.
    pub pool_size: usize,
    pub config: SessionConfig,
    pub result: SessionResult,
    /// Per-question review, in working-set order.
    pub review: Vec<ReviewItem>,
}

/// One row of the post-grading review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewItem {
    pub index: usize,
    pub question_id: String,
    pub text: String,
    pub is_correct: bool,
    /// Selected letters, `"-"` when nothing was selected.
    pub selected_letters: String,
    /// Correct letters, `"-"` when no option is correct.
    pub correct_letters: String,
    pub explanation: String,
}

impl ExamReport {
    /// Build a report from a finished session. `None` while still running.
    pub fn from_session(session: &Session, pool_size: usize) -> Option<Self> {
        let result = session.result()?;
        let review = result
            .per_question
            .iter()
            .zip(session.questions())
            .map(|(outcome, question)| ReviewItem {
                index: outcome.index,
                question_id: question.id.clone(),
                text: question.text.clone(),
                is_correct: outcome.is_correct,
                selected_letters: letters_or_dash(&outcome.selected),
                correct_letters: letters_or_dash(&outcome.correct),
                explanation: question.explanation.clone(),
            })
            .collect();

        Some(Self {
            id: session.id(),
            created_at: session.started_at(),
            pool_size,
            config: session.config().clone(),
            result,
            review,
        })
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        serde_json::from_str(&content).context("failed to parse report JSON")
    }

    /// Review rows the candidate got wrong.
    pub fn missed(&self) -> impl Iterator<Item = &ReviewItem> {
        self.review.iter().filter(|item| !item.is_correct)
    }
}

fn letters_or_dash(indices: &[usize]) -> String {
    if indices.is_empty() {
        "-".to_string()
    } else {
        letters_of(indices)
    }
}
