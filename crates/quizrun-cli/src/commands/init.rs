//! The `quizrun init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    if Path::new("quizrun.toml").exists() {
        println!("quizrun.toml already exists, skipping.");
    } else {
        std::fs::write("quizrun.toml", SAMPLE_CONFIG)?;
        println!("Created quizrun.toml");
    }

    std::fs::create_dir_all("pools")?;
    let example_path = Path::new("pools/example.json");
    if example_path.exists() {
        println!("pools/example.json already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_POOL)?;
        println!("Created pools/example.json");
    }

    println!("\nNext steps:");
    println!("  1. Add your questions to pools/example.json");
    println!("  2. Run: quizrun validate");
    println!("  3. Run: quizrun run --count 3 --minutes 5");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizrun configuration

output_dir = "./quizrun-results"

[pool]
type = "file"
path = "pools/example.json"
# type = "http"
# url = "https://example.com/questions.json"
# timeout_secs = 30

[session]
count = ""
time_limit_minutes = "15"
shuffle_questions = true
shuffle_options = true
"#;

const EXAMPLE_POOL: &str = r#"[
  {
    "id": "capital-fr",
    "question": "What is the capital of France?",
    "options": ["Paris", "Lyon", "Nice"],
    "correct": ["A"],
    "explanation": "Paris has been the capital since the 10th century."
  },
  {
    "id": "primes",
    "question": "Which of these numbers are prime?",
    "options": ["2", "4", "5", "9"],
    "correct": ["A", "C"],
    "explanation": "4 = 2 x 2 and 9 = 3 x 3."
  },
  {
    "id": "http-ok",
    "question": "Which HTTP status code means OK?",
    "options": ["200", "301", "404", "500"],
    "correct": ["A"]
  }
]
"#;
