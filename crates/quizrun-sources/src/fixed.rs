//! In-memory pool source for tests and embedding.

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use quizrun_core::traits::PoolSource;
use quizrun_core::ExamError;

/// Returns the same payload on every fetch and counts how often it was asked.
pub struct FixedSource {
    payload: serde_json::Value,
    fetch_count: AtomicU32,
}

impl FixedSource {
    pub fn new(payload: serde_json::Value) -> Self {
        Self {
            payload,
            fetch_count: AtomicU32::new(0),
        }
    }

    /// Number of fetches served so far.
    pub fn fetch_count(&self) -> u32 {
        self.fetch_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl PoolSource for FixedSource {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn fetch(&self) -> Result<serde_json::Value, ExamError> {
        self.fetch_count.fetch_add(1, Ordering::Relaxed);
        Ok(self.payload.clone())
    }
}
