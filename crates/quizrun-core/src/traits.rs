//! Core trait definitions for pool sources.
//!
//! Implemented by the `quizrun-sources` crate (file, HTTP and in-memory
//! sources).

use async_trait::async_trait;

use crate::error::ExamError;

/// A one-shot provider of raw pool data.
///
/// `fetch` returns the decoded JSON payload; normalization is left to
/// [`crate::pool::normalize_pool`] so every source shares the same rules.
#[async_trait]
pub trait PoolSource: Send + Sync {
    /// Human-readable description of where the pool comes from.
    fn name(&self) -> &str;

    /// Fetch and decode the pool payload.
    ///
    /// Transport failures map to [`ExamError::PoolFetchFailed`], undecodable
    /// bodies to [`ExamError::InvalidPoolFormat`].
    async fn fetch(&self) -> Result<serde_json::Value, ExamError>;
}
