//! quizrun-core: exam session state machine, grading, and timer.
//!
//! This crate defines the question model, pool normalization, session
//! building, answer tracking, countdown, grading and the async engine that
//! the rest of quizrun builds on.

pub mod answers;
pub mod builder;
pub mod config;
pub mod engine;
pub mod error;
pub mod grader;
pub mod model;
pub mod pool;
pub mod report;
pub mod reveal;
pub mod session;
pub mod timer;
pub mod traits;
pub mod view;

pub use error::ExamError;
