pub mod init;
pub mod run;
pub mod validate;

use anyhow::Result;

use quizrun_core::pool::{load_pool, Pool};
use quizrun_sources::{create_source, source_for_location, QuizrunConfig};

/// Load the pool named on the command line, or the configured one.
pub async fn load_pool_from(location: Option<&str>, config: &QuizrunConfig) -> Result<Pool> {
    let source = match location {
        Some(location) => source_for_location(location)?,
        None => create_source(&config.pool)?,
    };
    Ok(load_pool(source.as_ref()).await?)
}
