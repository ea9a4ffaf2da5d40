//! The `quizrun run` command: an interactive, timed exam on stdin/stdout.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::{AsyncBufReadExt, BufReader};

use quizrun_core::config::SessionConfig;
use quizrun_core::engine::{ExamEngine, SessionObserver};
use quizrun_core::grader::SessionResult;
use quizrun_core::model::{index_to_letter, QuestionKind};
use quizrun_core::pool::validate_pool;
use quizrun_core::report::ExamReport;
use quizrun_core::session::Session;
use quizrun_core::timer::{format_clock, Tick};
use quizrun_core::view::{self, QuestionView};
use quizrun_report::{write_reports, ReportFormat};
use quizrun_sources::config::load_config_from;

use crate::input::{parse_command, Command, HELP};
use crate::render;

pub struct RunOptions {
    pub pool: Option<String>,
    pub count: Option<String>,
    pub minutes: Option<String>,
    pub shuffle_questions: bool,
    pub shuffle_options: bool,
    pub seed: Option<u64>,
    pub output: Option<PathBuf>,
    pub format: String,
    pub config: Option<PathBuf>,
}

impl RunOptions {
    /// Command-line values layered over the configured session defaults.
    fn session_config(&self, defaults: &SessionConfig) -> SessionConfig {
        SessionConfig {
            count: self.count.clone().unwrap_or_else(|| defaults.count.clone()),
            time_limit_minutes: self
                .minutes
                .clone()
                .unwrap_or_else(|| defaults.time_limit_minutes.clone()),
            shuffle_questions: self.shuffle_questions && defaults.shuffle_questions,
            shuffle_options: self.shuffle_options && defaults.shuffle_options,
        }
    }
}

/// Logs session lifecycle events.
struct LogObserver;

impl SessionObserver for LogObserver {
    fn on_start(&self, session: &Session) {
        tracing::debug!(session = %session.id(), questions = session.len(), "exam started");
    }

    fn on_tick(&self, _session: &Session) {}

    fn on_graded(&self, session: &Session, result: &SessionResult) {
        tracing::info!(
            session = %session.id(),
            score_pct = result.score_pct,
            timed_out = result.timed_out,
            "exam graded"
        );
    }

    fn on_reset(&self) {
        tracing::debug!("exam discarded");
    }
}

enum Flow {
    Continue,
    Quit,
}

struct Runner {
    engine: ExamEngine,
    config: SessionConfig,
    output: Option<PathBuf>,
    format: ReportFormat,
}

pub async fn execute(opts: RunOptions) -> Result<()> {
    let format: ReportFormat = opts.format.parse()?;
    let config = load_config_from(opts.config.as_deref())?;
    let session_config = opts.session_config(&config.session);

    let pool = super::load_pool_from(opts.pool.as_deref(), &config).await?;
    for w in validate_pool(&pool) {
        tracing::warn!(question = w.question_id.as_deref().unwrap_or("-"), "{}", w.message);
    }

    let rng = match opts.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let engine = ExamEngine::new(pool)
        .with_rng(rng)
        .with_observer(Arc::new(LogObserver));

    let mut runner = Runner {
        engine,
        config: session_config,
        output: opts.output,
        format,
    };
    runner.start()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match parse_command(&line) {
                    Ok(command) => {
                        if let Flow::Quit = runner.handle(command)? {
                            break;
                        }
                    }
                    Err(e) => println!("{e}"),
                }
            }
            Some(tick) = runner.engine.next_tick(), if runner.engine.is_ticking() => {
                runner.on_tick(tick)?;
            }
        }
    }

    Ok(())
}

impl Runner {
    fn start(&mut self) -> Result<()> {
        let session = self.engine.start(&self.config)?;
        let (len, total_secs) = (session.len(), session.countdown().total_secs());
        println!(
            "Exam started: {} of {} questions, time limit {}. Type 'help' for commands.",
            len,
            self.engine.pool().len(),
            format_clock(total_secs)
        );
        self.show();
        Ok(())
    }

    fn handle(&mut self, command: Command) -> Result<Flow> {
        if self.engine.session().is_none()
            && !matches!(
                command,
                Command::New | Command::Help | Command::Quit | Command::Nothing | Command::Reset
            )
        {
            println!("No exam in progress. Type 'new' to start one.");
            return Ok(Flow::Continue);
        }

        match command {
            Command::Next => {
                if self.engine.next() {
                    self.show();
                } else {
                    println!("Already at the last question.");
                }
            }
            Command::Prev => {
                if self.engine.prev() {
                    self.show();
                } else {
                    println!("Already at the first question.");
                }
            }
            Command::Go(index) => {
                if self.engine.jump(index) {
                    self.show();
                } else {
                    println!("No question {}.", index + 1);
                }
            }
            Command::Pick(options) => self.pick(&options, true),
            Command::Unpick(options) => self.pick(&options, false),
            Command::Reveal => {
                let current = self.current();
                match self.engine.toggle_reveal(current) {
                    Some(_) => self.show(),
                    None => println!("The exam is graded; all answers are shown."),
                }
            }
            Command::Show => self.show(),
            Command::List => {
                if let Some(session) = self.engine.session() {
                    print!("{}", render::navigator(&view::navigator(session)));
                }
            }
            Command::Finish => {
                let already = self.engine.session().is_some_and(Session::is_finished);
                if already {
                    println!("The exam is already graded.");
                } else if let Some(result) = self.engine.finalize() {
                    self.graded(&result)?;
                }
            }
            Command::New => self.start()?,
            Command::Reset => {
                self.engine.reset();
                println!("Exam discarded. Type 'new' to start again.");
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => return Ok(Flow::Quit),
            Command::Nothing => {}
        }
        Ok(Flow::Continue)
    }

    fn on_tick(&mut self, tick: Tick) -> Result<()> {
        match tick {
            Tick::Running(remaining) if render::should_warn(remaining) => {
                println!("{} remaining", format_clock(remaining));
            }
            Tick::Expired => {
                println!("\nTime is up!");
                if let Some(result) = self.engine.session().and_then(Session::result) {
                    self.graded(&result)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn pick(&mut self, options: &[usize], checked: bool) {
        let current = self.current();
        let Some(session) = self.engine.session() else {
            return;
        };
        if session.is_finished() {
            println!("The exam is graded; answers are locked.");
            return;
        }
        let Some(question) = session.question(current) else {
            return;
        };
        let kind = question.kind;
        let option_count = question.options.len();

        for &option in options {
            if option >= option_count {
                println!("This question has no option {}.", index_to_letter(option));
                continue;
            }
            // On multi questions `pick` toggles, like clicking a checkbox.
            let check = match (checked, kind) {
                (true, QuestionKind::Multi) => self
                    .engine
                    .session()
                    .is_some_and(|s| !s.answers().is_selected(current, option)),
                (checked, _) => checked,
            };
            self.engine.select(current, option, check);
        }
        self.show();
    }

    fn graded(&self, result: &SessionResult) -> Result<()> {
        let Some(session) = self.engine.session() else {
            return Ok(());
        };
        println!("\n{}", render::result_table(result));

        let Some(report) = ExamReport::from_session(session, self.engine.pool().len()) else {
            return Ok(());
        };
        println!("{}", render::review(&report));
        for item in report.missed().filter(|i| !i.explanation.is_empty()) {
            println!("{}. {}", item.index + 1, item.explanation);
        }

        if let Some(dir) = &self.output {
            for path in write_reports(&report, dir, self.format)? {
                eprintln!("Report saved to: {}", path.display());
            }
        }
        println!("Type 'new' for another exam or 'quit' to leave.");
        Ok(())
    }

    fn current(&self) -> usize {
        self.engine.session().map(Session::current).unwrap_or_default()
    }

    fn show(&self) {
        let Some(session) = self.engine.session() else {
            return;
        };
        if let Some(view) = QuestionView::current(session) {
            print!("{}", render::question(&view, &view::timer_label(session)));
        }
    }
}
