//! End-to-end exam flow through the library crates: source -> pool ->
//! engine -> grading -> report, with the tokio clock paused.

use std::time::Duration;

use quizrun_core::config::SessionConfig;
use quizrun_core::engine::ExamEngine;
use quizrun_core::pool::load_pool;
use quizrun_core::report::ExamReport;
use quizrun_core::timer::Tick;
use quizrun_core::view::{navigator, QuestionView};
use quizrun_report::{write_reports, ReportFormat};
use quizrun_sources::{FileSource, FixedSource};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn sample_payload() -> serde_json::Value {
    serde_json::json!([
        { "id": "fr", "question": "Capital of France?", "options": ["Paris", "Lyon", "Nice"],
          "correct": ["A"], "explanation": "Paris." },
        { "id": "pr", "question": "Primes?", "options": ["2", "4", "5"], "correct": ["A", "C"] },
        { "id": "sq", "question": "Square of 3?", "options": ["6", "9"], "correct": ["B"] },
        { "id": "ev", "question": "Even numbers?", "options": ["1", "2", "3", "4"], "correct": ["B", "D"] },
        { "id": "hx", "question": "0x10 in decimal?", "options": ["10", "16"], "correct": ["b"] }
    ])
}

fn sample_source() -> FixedSource {
    FixedSource::new(sample_payload())
}

fn ordered(count: &str, minutes: &str) -> SessionConfig {
    SessionConfig {
        count: count.into(),
        time_limit_minutes: minutes.into(),
        shuffle_questions: false,
        shuffle_options: false,
    }
}

#[tokio::test(start_paused = true)]
async fn fifteen_minutes_expire_after_nine_hundred_ticks() {
    let source = sample_source();
    let pool = load_pool(&source).await.unwrap();
    let mut engine = ExamEngine::new(pool).with_rng(StdRng::seed_from_u64(1));

    let session = engine.start(&SessionConfig::default()).unwrap();
    assert_eq!(session.countdown().total_secs(), 900);

    let mut ticks = 0u32;
    loop {
        match engine.next_tick().await {
            Some(Tick::Expired) => {
                ticks += 1;
                break;
            }
            Some(_) => ticks += 1,
            None => panic!("countdown stopped early"),
        }
    }
    assert_eq!(ticks, 900);

    let result = engine.session().unwrap().result().unwrap();
    assert!(result.timed_out);
    assert_eq!(result.remaining_secs, 0);
    assert_eq!(result.question_count(), 5);
    assert_eq!(source.fetch_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn answer_navigate_reveal_and_grade() {
    let pool = load_pool(&sample_source()).await.unwrap();
    let mut engine = ExamEngine::new(pool);
    engine.start(&ordered("3", "10")).unwrap();

    // Q1 single: the second pick replaces the first.
    engine.select(0, 1, true);
    engine.select(0, 0, true);
    // Q2 multi: toggling twice restores the prior selection.
    engine.next();
    engine.select(1, 0, true);
    engine.select(1, 2, true);
    engine.select(1, 1, true);
    engine.select(1, 1, false);
    // Q3: reveal, then answer wrong anyway.
    engine.jump(2);
    assert_eq!(engine.toggle_reveal(2), Some(true));
    engine.select(2, 0, true);

    for _ in 0..5 {
        engine.next_tick().await;
    }

    let session = engine.session().unwrap();
    let view = QuestionView::current(session).unwrap();
    assert_eq!(view.correct_letters.as_deref(), Some("B"));
    assert_eq!(session.countdown().remaining_secs(), 595);

    let result = engine.finalize().unwrap();
    assert_eq!(result.correct_count, 2);
    assert_eq!(result.wrong_count, 1);
    assert_eq!(result.score_pct, 67);
    assert_eq!(result.used_secs, 5);
    assert!(!engine.is_ticking());

    let verdicts: Vec<_> = navigator(engine.session().unwrap())
        .into_iter()
        .map(|e| e.verdict)
        .collect();
    assert_eq!(verdicts, vec![Some(true), Some(true), Some(false)]);

    // Time no longer moves once graded.
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(engine.next_tick().await, None);
    assert_eq!(engine.finalize().unwrap(), result);
}

#[tokio::test]
async fn shuffled_sessions_are_permutations() {
    let pool = load_pool(&sample_source()).await.unwrap();
    let mut engine = ExamEngine::new(pool.clone()).with_rng(StdRng::seed_from_u64(99));
    let session = engine.start(&SessionConfig::default()).unwrap();

    let mut ids: Vec<&str> = session.questions().iter().map(|q| q.id.as_str()).collect();
    ids.sort_unstable();
    let mut expected: Vec<&str> = pool.questions().iter().map(|q| q.id.as_str()).collect();
    expected.sort_unstable();
    assert_eq!(ids, expected);

    for question in session.questions() {
        let original = pool.questions().iter().find(|q| q.id == question.id).unwrap();
        let mut texts: Vec<_> = question.options.iter().map(|o| (&o.text, o.correct)).collect();
        let mut original_texts: Vec<_> = original.options.iter().map(|o| (&o.text, o.correct)).collect();
        texts.sort();
        original_texts.sort();
        assert_eq!(texts, original_texts);
    }
}

#[tokio::test]
async fn report_from_file_pool() {
    let dir = tempfile::tempdir().unwrap();
    let pool_path = dir.path().join("pool.json");
    std::fs::write(
        &pool_path,
        serde_json::to_string(&sample_payload()).unwrap(),
    )
    .unwrap();

    let pool = load_pool(&FileSource::new(&pool_path)).await.unwrap();
    let pool_size = pool.len();
    let mut engine = ExamEngine::new(pool);
    engine.start(&ordered("2", "5")).unwrap();
    engine.select(0, 0, true);
    engine.finalize();

    let report = ExamReport::from_session(engine.session().unwrap(), pool_size).unwrap();
    assert_eq!(report.pool_size, 5);
    assert_eq!(report.result.score_pct, 50);

    let written = write_reports(&report, &dir.path().join("out"), ReportFormat::Json).unwrap();
    let loaded = ExamReport::load_json(&written[0]).unwrap();
    assert_eq!(loaded.review[1].selected_letters, "-");
    assert_eq!(loaded.review[1].correct_letters, "A, C");
}
