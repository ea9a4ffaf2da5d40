//! The exam session state machine.
//!
//! A [`Session`] exclusively owns its working set, answers, reveal set and
//! countdown. Once finished it is frozen: selections and reveal toggles become
//! no-ops and every question counts as revealed.

use chrono::{DateTime, Utc};
use rand::Rng;
use uuid::Uuid;

use crate::answers::AnswerMap;
use crate::builder::build_working_set;
use crate::config::SessionConfig;
use crate::error::ExamError;
use crate::grader::{grade, SessionResult};
use crate::model::Question;
use crate::pool::Pool;
use crate::reveal::RevealedSet;
use crate::timer::{Countdown, Tick};

/// One running or finished exam.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    started_at: DateTime<Utc>,
    config: SessionConfig,
    questions: Vec<Question>,
    answers: AnswerMap,
    revealed: RevealedSet,
    countdown: Countdown,
    current: usize,
    finished: bool,
}

impl Session {
    /// Build a working set from `pool` and start the countdown.
    pub fn start<R: Rng + ?Sized>(
        pool: &Pool,
        config: &SessionConfig,
        rng: &mut R,
    ) -> Result<Self, ExamError> {
        let questions = build_working_set(pool, config, rng)?;
        Self::with_questions(questions, config.clone())
    }

    /// Start a session over an explicit, already ordered working set.
    pub fn with_questions(questions: Vec<Question>, config: SessionConfig) -> Result<Self, ExamError> {
        if questions.is_empty() {
            return Err(ExamError::EmptyPool);
        }
        let countdown = Countdown::started(config.time_limit_secs());
        let session = Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            config,
            questions,
            answers: AnswerMap::new(),
            revealed: RevealedSet::new(),
            countdown,
            current: 0,
            finished: false,
        };
        tracing::info!(
            session = %session.id,
            questions = session.questions.len(),
            time_limit_secs = session.countdown.total_secs(),
            "exam session started"
        );
        Ok(session)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    // -- answers ------------------------------------------------------------

    /// Check or uncheck an option. Returns whether the event was applied.
    ///
    /// Ignored once finished, and for out-of-range question or option indices.
    pub fn select(&mut self, question: usize, option: usize, checked: bool) -> bool {
        if self.finished {
            tracing::debug!(question, option, "selection ignored: session finished");
            return false;
        }
        let Some(q) = self.questions.get(question) else {
            return false;
        };
        if option >= q.options.len() {
            return false;
        }
        self.answers.select(question, q.kind, option, checked);
        true
    }

    pub fn selection(&self, question: usize) -> Vec<usize> {
        self.answers.selection(question)
    }

    pub fn is_answered(&self, question: usize) -> bool {
        self.answers.is_answered(question)
    }

    // -- navigation ---------------------------------------------------------

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    pub fn next(&mut self) -> bool {
        self.jump(self.current + 1)
    }

    pub fn prev(&mut self) -> bool {
        match self.current.checked_sub(1) {
            Some(i) => self.jump(i),
            None => false,
        }
    }

    /// Move to `index`; out-of-range targets leave the position unchanged.
    pub fn jump(&mut self, index: usize) -> bool {
        if index < self.questions.len() {
            self.current = index;
            true
        } else {
            false
        }
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.questions.len()
    }

    // -- reveal -------------------------------------------------------------

    /// Toggle reveal mode for one question. `None` once finished or when the
    /// index is out of range; otherwise the new state.
    pub fn toggle_reveal(&mut self, question: usize) -> Option<bool> {
        if self.finished || question >= self.questions.len() {
            return None;
        }
        Some(self.revealed.toggle(question))
    }

    pub fn is_revealed(&self, question: usize) -> bool {
        self.finished || self.revealed.contains(question)
    }

    // -- timer and grading --------------------------------------------------

    /// Advance the countdown by one second. Reaching zero grades the session.
    pub fn tick(&mut self) -> Tick {
        let tick = self.countdown.tick();
        if tick == Tick::Expired {
            tracing::info!(session = %self.id, "time limit reached, grading");
            self.finished = true;
        }
        tick
    }

    /// Grade the session, stopping the countdown and freezing answers.
    ///
    /// Re-invoking it recomputes the same result.
    pub fn finalize(&mut self) -> SessionResult {
        self.countdown.stop();
        if !self.finished {
            self.finished = true;
            tracing::info!(session = %self.id, "session finalized");
        }
        self.grade()
    }

    /// Stop the countdown without grading (used when discarding a session).
    pub fn abandon(&mut self) {
        self.countdown.stop();
    }

    /// The graded result, once finished.
    pub fn result(&self) -> Option<SessionResult> {
        self.finished.then(|| self.grade())
    }

    /// Whether a question was graded correct, once finished.
    pub fn verdict(&self, question: usize) -> Option<bool> {
        if !self.finished {
            return None;
        }
        let q = self.questions.get(question)?;
        Some(crate::grader::grade_question(question, q, &self.answers).is_correct)
    }

    fn grade(&self) -> SessionResult {
        grade(&self.questions, &self.answers, &self.countdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnswerOption, QuestionKind};
    use crate::timer::TimerPhase;

    fn question(id: &str, options: &[(&str, bool)]) -> Question {
        let correct = options.iter().filter(|(_, c)| *c).count();
        Question {
            id: id.into(),
            text: format!("Question {id}"),
            options: options
                .iter()
                .map(|(text, correct)| AnswerOption {
                    text: (*text).into(),
                    correct: *correct,
                })
                .collect(),
            explanation: "because".into(),
            kind: QuestionKind::from_correct_count(correct),
            meta: Default::default(),
            page: None,
        }
    }

    fn session(minutes: &str) -> Session {
        Session::with_questions(
            vec![
                question("capital", &[("Paris", true), ("Lyon", false), ("Nice", false)]),
                question("primes", &[("2", true), ("4", false), ("5", true)]),
            ],
            SessionConfig {
                time_limit_minutes: minutes.into(),
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn starts_running_at_first_question() {
        let s = session("1");
        assert_eq!(s.current(), 0);
        assert!(s.countdown().is_running());
        assert_eq!(s.countdown().total_secs(), 60);
        assert!(!s.is_finished());
        assert!(s.result().is_none());
    }

    #[test]
    fn select_respects_question_kind() {
        let mut s = session("5");
        assert!(s.select(0, 1, true));
        assert!(s.select(0, 2, true));
        assert_eq!(s.selection(0), vec![2]);

        assert!(s.select(1, 0, true));
        assert!(s.select(1, 2, true));
        assert_eq!(s.selection(1), vec![0, 2]);
    }

    #[test]
    fn select_ignores_out_of_range() {
        let mut s = session("5");
        assert!(!s.select(7, 0, true));
        assert!(!s.select(0, 3, true));
        assert!(!s.is_answered(0));
    }

    #[test]
    fn navigation_stays_in_bounds() {
        let mut s = session("5");
        assert!(s.is_first());
        assert!(!s.prev());
        assert!(s.next());
        assert!(s.is_last());
        assert!(!s.next());
        assert_eq!(s.current(), 1);
        assert!(!s.jump(2));
        assert!(s.jump(0));
        assert_eq!(s.current_question().id, "capital");
    }

    #[test]
    fn reveal_toggles_until_finished() {
        let mut s = session("5");
        assert_eq!(s.toggle_reveal(1), Some(true));
        assert!(s.is_revealed(1));
        assert!(!s.is_revealed(0));
        assert_eq!(s.toggle_reveal(1), Some(false));
        assert_eq!(s.toggle_reveal(9), None);

        s.finalize();
        assert_eq!(s.toggle_reveal(0), None);
        assert!(s.is_revealed(0));
        assert!(s.is_revealed(1));
    }

    #[test]
    fn finalize_freezes_answers_and_stops_timer() {
        let mut s = session("5");
        s.select(0, 0, true);
        s.tick();
        let result = s.finalize();

        assert_eq!(s.countdown().phase(), TimerPhase::Stopped);
        assert_eq!(result.used_secs, 1);
        assert!(!result.timed_out);
        assert!(!s.select(0, 1, true));
        assert_eq!(s.selection(0), vec![0]);
        assert_eq!(s.tick(), Tick::Ignored);
        assert_eq!(s.verdict(0), Some(true));
        assert_eq!(s.verdict(1), Some(false));
    }

    #[test]
    fn finalize_twice_is_identical() {
        let mut s = session("5");
        s.select(1, 0, true);
        s.select(1, 2, true);
        let first = s.finalize();
        let second = s.finalize();
        assert_eq!(first, second);
        assert_eq!(s.result(), Some(first));
    }

    #[test]
    fn expiry_grades_without_finalize() {
        let mut s = session("1");
        s.select(0, 0, true);
        let mut ticks = 0;
        while s.tick() != Tick::Expired {
            ticks += 1;
        }
        assert_eq!(ticks, 59);
        assert!(s.is_finished());

        let result = s.result().unwrap();
        assert!(result.timed_out);
        assert_eq!(result.used_secs, 60);
        assert_eq!(result.remaining_secs, 0);
        assert_eq!(result.correct_count, 1);
        assert_eq!(result.score_pct, 50);
    }

    #[test]
    fn abandon_stops_countdown() {
        let mut s = session("1");
        s.tick();
        s.abandon();
        assert_eq!(s.tick(), Tick::Ignored);
        assert_eq!(s.countdown().remaining_secs(), 59);
    }

    #[test]
    fn empty_working_set_is_rejected() {
        let err = Session::with_questions(vec![], SessionConfig::default()).unwrap_err();
        assert!(matches!(err, ExamError::EmptyPool));
    }
}
