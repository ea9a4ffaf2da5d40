//! Pool source backed by a local JSON file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::instrument;

use quizrun_core::traits::PoolSource;
use quizrun_core::ExamError;

/// Reads a pool from a JSON file on disk.
pub struct FileSource {
    path: PathBuf,
    name: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PoolSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip(self), fields(path = %self.name))]
    async fn fetch(&self) -> Result<serde_json::Value, ExamError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| ExamError::fetch_failed(&self.name, e))?;
        serde_json::from_str(&content)
            .map_err(|e| ExamError::InvalidPoolFormat(format!("{}: not valid JSON: {e}", self.name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizrun_core::pool::load_pool;

    #[tokio::test]
    async fn reads_and_normalizes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pool.json");
        std::fs::write(
            &path,
            r#"[{"id":"a","question":"Capital of France?","options":["Paris","Lyon"],"correct":["A"]}]"#,
        )
        .unwrap();

        let source = FileSource::new(&path);
        let pool = load_pool(&source).await.unwrap();
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.questions()[0].correct_letters(), "A");
    }

    #[tokio::test]
    async fn missing_file_is_fetch_failure() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("missing.json"));
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, ExamError::PoolFetchFailed { .. }));
        assert!(err.to_string().contains("missing.json"));
    }

    #[tokio::test]
    async fn garbage_is_invalid_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pool.json");
        std::fs::write(&path, "questions: yes").unwrap();

        let err = FileSource::new(&path).fetch().await.unwrap_err();
        assert!(matches!(err, ExamError::InvalidPoolFormat(_)));
    }

    #[tokio::test]
    async fn object_payload_is_rejected_by_normalizer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pool.json");
        std::fs::write(&path, r#"{"questions": []}"#).unwrap();

        let err = load_pool(&FileSource::new(&path)).await.unwrap_err();
        assert!(matches!(err, ExamError::InvalidPoolFormat(_)));
    }
}
