//! quizrun-sources: question pool sources.
//!
//! Implements the `PoolSource` trait for local files, HTTP endpoints and
//! in-memory payloads, plus the `quizrun.toml` configuration layer.

pub mod config;
pub mod file;
pub mod fixed;
pub mod http;

pub use config::{create_source, load_config, source_for_location, PoolSourceConfig, QuizrunConfig};
pub use file::FileSource;
pub use fixed::FixedSource;
pub use http::HttpSource;
