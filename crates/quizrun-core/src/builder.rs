//! Working-set selection.
//!
//! Picks and orders the questions for one session. Shuffles are Fisher-Yates
//! (`SliceRandom::shuffle`) over an injected RNG.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::SessionConfig;
use crate::error::ExamError;
use crate::model::Question;
use crate::pool::Pool;

/// Build the ordered working set for a session.
///
/// Returns exactly `config.question_count(pool.len())` deep-copied questions.
/// The pool itself is never touched.
pub fn build_working_set<R: Rng + ?Sized>(
    pool: &Pool,
    config: &SessionConfig,
    rng: &mut R,
) -> Result<Vec<Question>, ExamError> {
    if pool.is_empty() {
        return Err(ExamError::EmptyPool);
    }
    let n = config.question_count(pool.len());

    let mut order: Vec<usize> = (0..pool.len()).collect();
    if config.shuffle_questions {
        order.shuffle(rng);
    }

    let mut selected: Vec<Question> = order
        .into_iter()
        .take(n)
        .filter_map(|i| pool.get(i).cloned())
        .collect();

    if config.shuffle_options {
        for question in &mut selected {
            question.options.shuffle(rng);
        }
    }

    tracing::debug!(
        requested = %config.count,
        selected = selected.len(),
        shuffle_questions = config.shuffle_questions,
        shuffle_options = config.shuffle_options,
        "working set built"
    );
    Ok(selected)
}
