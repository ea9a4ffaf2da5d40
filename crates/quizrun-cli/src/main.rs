//! quizrun CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod input;
mod render;

#[derive(Parser)]
#[command(name = "quizrun", version, about = "Timed multiple-choice exam runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a timed exam drawn from a question pool
    Run {
        /// Pool JSON file or http(s) URL (defaults to the configured pool)
        #[arg(long)]
        pool: Option<String>,

        /// Number of questions (empty or invalid means the whole pool)
        #[arg(long)]
        count: Option<String>,

        /// Time limit in minutes
        #[arg(long)]
        minutes: Option<String>,

        /// Keep the pool's question order
        #[arg(long)]
        no_shuffle_questions: bool,

        /// Keep each question's option order
        #[arg(long)]
        no_shuffle_options: bool,

        /// Seed for reproducible shuffles
        #[arg(long)]
        seed: Option<u64>,

        /// Directory to write reports to after grading
        #[arg(long)]
        output: Option<PathBuf>,

        /// Report format: json, html, all
        #[arg(long, default_value = "json")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check a question pool for problems
    Validate {
        /// Pool JSON file or http(s) URL (defaults to the configured pool)
        #[arg(long)]
        pool: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config and example pool
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(
                    "quizrun=info"
                        .parse()
                        .unwrap_or_else(|_| tracing_subscriber::filter::LevelFilter::INFO.into()),
                )
                .from_env_lossy(),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            pool,
            count,
            minutes,
            no_shuffle_questions,
            no_shuffle_options,
            seed,
            output,
            format,
            config,
        } => {
            commands::run::execute(commands::run::RunOptions {
                pool,
                count,
                minutes,
                shuffle_questions: !no_shuffle_questions,
                shuffle_options: !no_shuffle_options,
                seed,
                output,
                format,
                config,
            })
            .await
        }
        Commands::Validate { pool, config } => commands::validate::execute(pool, config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
