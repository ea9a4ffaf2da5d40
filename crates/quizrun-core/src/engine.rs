//! Session driver.
//!
//! [`ExamEngine`] owns the shared pool, the current [`Session`] and the tick
//! source of that session. All mutation goes through `&mut self`, so events are
//! applied one at a time; the tick task only signals over a channel.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

use crate::config::SessionConfig;
use crate::error::ExamError;
use crate::grader::SessionResult;
use crate::pool::Pool;
use crate::session::Session;
use crate::timer::Tick;

/// Interval between countdown ticks.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Session lifecycle notifications.
pub trait SessionObserver: Send + Sync {
    fn on_start(&self, session: &Session);
    fn on_tick(&self, session: &Session);
    fn on_graded(&self, session: &Session, result: &SessionResult);
    fn on_reset(&self);
}

/// No-op session observer.
pub struct NoopObserver;

impl SessionObserver for NoopObserver {
    fn on_start(&self, _: &Session) {}
    fn on_tick(&self, _: &Session) {}
    fn on_graded(&self, _: &Session, _: &SessionResult) {}
    fn on_reset(&self) {}
}

/// The tick source of one session.
///
/// Dropping it aborts the task and closes the channel, so a ticker can never
/// deliver into a later session.
struct Ticker {
    task: JoinHandle<()>,
    ticks: mpsc::Receiver<()>,
}

impl Ticker {
    fn spawn(period: Duration) -> Self {
        let (tx, ticks) = mpsc::channel(1);
        let task = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                if tx.send(()).await.is_err() {
                    break;
                }
            }
        });
        Self { task, ticks }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Owns the pool and drives one session at a time.
pub struct ExamEngine {
    pool: Pool,
    session: Option<Session>,
    ticker: Option<Ticker>,
    rng: StdRng,
    tick_period: Duration,
    observer: Arc<dyn SessionObserver>,
}

impl ExamEngine {
    pub fn new(pool: Pool) -> Self {
        Self {
            pool,
            session: None,
            ticker: None,
            rng: StdRng::from_os_rng(),
            tick_period: TICK_PERIOD,
            observer: Arc::new(NoopObserver),
        }
    }

    /// Use a specific RNG (e.g. a seeded one for reproducible shuffles).
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn SessionObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period;
        self
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Whether a countdown is currently delivering ticks.
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    /// Start a new session, discarding the current one first.
    ///
    /// Must be called within a Tokio runtime (the tick task is spawned here).
    pub fn start(&mut self, config: &SessionConfig) -> Result<&Session, ExamError> {
        self.discard();
        let session = Session::start(&self.pool, config, &mut self.rng)?;
        self.ticker = Some(Ticker::spawn(self.tick_period));
        self.observer.on_start(&session);
        Ok(&*self.session.insert(session))
    }

    /// Start a fresh session with the current session's configuration.
    pub fn restart(&mut self) -> Result<&Session, ExamError> {
        let config = self
            .session
            .as_ref()
            .map(|s| s.config().clone())
            .unwrap_or_default();
        self.start(&config)
    }

    /// Discard the current session, keeping the pool.
    pub fn reset(&mut self) {
        self.discard();
        self.observer.on_reset();
    }

    /// Grade the current session (manual finalize).
    pub fn finalize(&mut self) -> Option<SessionResult> {
        self.ticker = None;
        let session = self.session.as_mut()?;
        let first = !session.is_finished();
        let result = session.finalize();
        if first {
            self.observer.on_graded(session, &result);
        }
        Some(result)
    }

    pub fn select(&mut self, question: usize, option: usize, checked: bool) -> bool {
        self.session
            .as_mut()
            .is_some_and(|s| s.select(question, option, checked))
    }

    pub fn next(&mut self) -> bool {
        self.session.as_mut().is_some_and(Session::next)
    }

    pub fn prev(&mut self) -> bool {
        self.session.as_mut().is_some_and(Session::prev)
    }

    pub fn jump(&mut self, index: usize) -> bool {
        self.session.as_mut().is_some_and(|s| s.jump(index))
    }

    pub fn toggle_reveal(&mut self, question: usize) -> Option<bool> {
        self.session.as_mut()?.toggle_reveal(question)
    }

    /// Wait for the next countdown tick and apply it.
    ///
    /// Returns `None` right away when no countdown is running. Cancel-safe:
    /// a tick is either fully applied or left in the channel.
    pub async fn next_tick(&mut self) -> Option<Tick> {
        let ticker = self.ticker.as_mut()?;
        ticker.ticks.recv().await?;

        let session = self.session.as_mut()?;
        let tick = session.tick();
        match tick {
            Tick::Running(remaining) => {
                tracing::debug!(remaining, "tick");
                self.observer.on_tick(session);
            }
            Tick::Expired => {
                self.ticker = None;
                if let Some(result) = session.result() {
                    self.observer.on_graded(session, &result);
                }
            }
            Tick::Ignored => {}
        }
        Some(tick)
    }

    fn discard(&mut self) {
        self.ticker = None;
        if let Some(mut session) = self.session.take() {
            session.abandon();
            tracing::debug!(session = %session.id(), "session discarded");
        }
    }
}
