//! The `quizrun validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizrun_core::pool::validate_pool;
use quizrun_sources::config::load_config_from;

pub async fn execute(pool: Option<String>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let pool = super::load_pool_from(pool.as_deref(), &config).await?;

    let multi = pool
        .questions()
        .iter()
        .filter(|q| q.kind == quizrun_core::model::QuestionKind::Multi)
        .count();
    println!(
        "Pool: {} questions ({} single, {} multi)",
        pool.len(),
        pool.len() - multi,
        multi
    );

    let warnings = validate_pool(&pool);
    for w in &warnings {
        let prefix = w
            .question_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Pool is valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
