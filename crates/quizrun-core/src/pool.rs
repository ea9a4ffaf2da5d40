//! Question pool normalization.
//!
//! Turns raw JSON records into canonical [`Question`]s, loads pools through a
//! [`PoolSource`], and validates them.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::ExamError;
use crate::model::{letter_to_index, AnswerOption, Question, QuestionKind};
use crate::traits::PoolSource;

/// The full, normalized set of questions. Cheap to clone and never mutated
/// once built; sessions deep-copy the questions they use.
#[derive(Debug, Clone)]
pub struct Pool {
    questions: Arc<[Question]>,
}

impl Pool {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions: Arc::from(questions),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }
}

/// Normalize a decoded pool payload.
///
/// The payload must be a JSON array; everything inside a record is lenient
/// (missing or mistyped fields fall back to defaults, unknown letters are
/// dropped).
pub fn normalize_pool(data: &Value) -> Result<Pool, ExamError> {
    let records = data.as_array().ok_or_else(|| {
        ExamError::InvalidPoolFormat(format!(
            "expected an array of questions, got {}",
            json_kind(data)
        ))
    })?;

    let questions: Vec<Question> = records
        .iter()
        .enumerate()
        .map(|(idx, record)| normalize_record(idx, record))
        .collect();

    tracing::info!(pool_size = questions.len(), "question pool loaded");
    Ok(Pool::new(questions))
}

/// Decode and normalize a JSON string (useful for testing and file sources).
pub fn parse_pool_str(content: &str) -> Result<Pool, ExamError> {
    let data: Value = serde_json::from_str(content)
        .map_err(|e| ExamError::InvalidPoolFormat(format!("not valid JSON: {e}")))?;
    normalize_pool(&data)
}

/// Fetch a pool from a source and normalize it.
pub async fn load_pool(source: &dyn PoolSource) -> Result<Pool, ExamError> {
    tracing::debug!(source = source.name(), "fetching question pool");
    let data = source.fetch().await?;
    normalize_pool(&data)
}

fn normalize_record(idx: usize, record: &Value) -> Question {
    let options: Vec<String> = record
        .get("options")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(scalar_text).collect())
        .unwrap_or_default();

    let mut correct_idx = BTreeSet::new();
    if let Some(labels) = record.get("correct").and_then(Value::as_array) {
        for label in labels {
            let text = scalar_text(label);
            match letter_to_index(&text) {
                Some(i) => {
                    correct_idx.insert(i);
                }
                None => tracing::debug!(record = idx, label = %text, "dropping unknown answer label"),
            }
        }
    }

    let id = match record.get("id") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => format!("q-{idx}"),
    };

    Question {
        id,
        text: string_field(record, "question"),
        options: options
            .into_iter()
            .enumerate()
            .map(|(i, text)| AnswerOption {
                text,
                correct: correct_idx.contains(&i),
            })
            .collect(),
        explanation: string_field(record, "explanation"),
        kind: QuestionKind::from_correct_count(correct_idx.len()),
        meta: record
            .get("meta")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_else(Map::new),
        page: record.get("page").filter(|p| !p.is_null()).cloned(),
    }
}

fn string_field(record: &Value, key: &str) -> String {
    record
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A warning from pool validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a pool for common authoring issues.
pub fn validate_pool(pool: &Pool) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen_ids = HashSet::new();
    for q in pool.questions() {
        if !seen_ids.insert(q.id.as_str()) {
            warnings.push(ValidationWarning {
                question_id: Some(q.id.clone()),
                message: format!("duplicate question ID: {}", q.id),
            });
        }
    }

    for q in pool.questions() {
        if q.text.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(q.id.clone()),
                message: "question text is empty".into(),
            });
        }
        if q.options.len() < 2 {
            warnings.push(ValidationWarning {
                question_id: Some(q.id.clone()),
                message: format!("only {} option(s)", q.options.len()),
            });
        }
        if q.correct_indices().is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(q.id.clone()),
                message: "no correct option; only an empty answer will be graded correct".into(),
            });
        }
    }

    if pool.is_empty() {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "pool has no questions".into(),
        });
    }

    warnings
}
