//! Exam error types.
//!
//! Defined in `quizrun-core` so pool sources, the engine and front ends share
//! one classification of load-time and session-start failures.

use thiserror::Error;

/// Errors that can occur while loading a pool or starting a session.
#[derive(Debug, Error)]
pub enum ExamError {
    /// The pool payload did not decode to a list of records.
    #[error("invalid pool format: {0}")]
    InvalidPoolFormat(String),

    /// The pool could not be fetched (IO, transport or HTTP status).
    #[error("failed to load pool from {origin}: {reason}")]
    PoolFetchFailed { origin: String, reason: String },

    /// A session was requested on a pool with no questions.
    #[error("question pool is empty")]
    EmptyPool,
}

impl ExamError {
    /// Returns `true` if this error came from a pool load attempt.
    ///
    /// Load errors are terminal for that attempt; retrying is a manual reload.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            ExamError::InvalidPoolFormat(_) | ExamError::PoolFetchFailed { .. }
        )
    }

    /// Shorthand for [`ExamError::PoolFetchFailed`].
    pub fn fetch_failed(origin: impl Into<String>, reason: impl ToString) -> Self {
        ExamError::PoolFetchFailed {
            origin: origin.into(),
            reason: reason.to_string(),
        }
    }
}
