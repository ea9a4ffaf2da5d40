//! Plain-text rendering of session views.

use std::fmt::Write;

use comfy_table::{Cell, Color, Table};

use quizrun_core::grader::SessionResult;
use quizrun_core::model::QuestionKind;
use quizrun_core::report::ExamReport;
use quizrun_core::timer::format_clock;
use quizrun_core::view::{NavigatorEntry, OptionMark, QuestionView};

pub fn question(view: &QuestionView, clock: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}  [{}]", view.position_label(), clock);
    let _ = writeln!(out, "{}", view.text);
    let _ = writeln!(out, "({})", view.prompt);

    for option in &view.options {
        let check = match (view.kind, option.selected) {
            (QuestionKind::Single, true) => "(*)",
            (QuestionKind::Single, false) => "( )",
            (QuestionKind::Multi, true) => "[x]",
            (QuestionKind::Multi, false) => "[ ]",
        };
        let mark = match option.mark {
            OptionMark::Correct => "  <- correct",
            OptionMark::Wrong => "  <- wrong",
            OptionMark::None => "",
        };
        let _ = writeln!(out, "  {check} {}. {}{mark}", option.letter, option.text);
    }

    if let Some(letters) = &view.correct_letters {
        let _ = writeln!(out, "Answer: {letters}");
    }
    if let Some(explanation) = &view.explanation {
        let _ = writeln!(out, "Explanation: {explanation}");
    }
    if view.locked {
        let _ = writeln!(out, "(graded: answers are locked)");
    }
    out
}

/// One line per question: position, answered state, verdict once graded.
pub fn navigator(entries: &[NavigatorEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let cursor = if entry.active { ">" } else { " " };
        let status = match entry.verdict {
            Some(true) => "correct",
            Some(false) => "wrong",
            None if entry.answered => "answered",
            None => "-",
        };
        let _ = writeln!(out, "{cursor} {:>3}  {status}", entry.index + 1);
    }
    out
}

pub fn result_table(result: &SessionResult) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Correct", "Wrong", "Answered", "Score", "Time"]);

    let time = format!(
        "{} / {}{}",
        format_clock(result.used_secs),
        format_clock(result.total_secs),
        if result.timed_out { " (expired)" } else { "" }
    );
    let score_color = if result.score_pct >= 80 {
        Color::Green
    } else if result.score_pct >= 50 {
        Color::Yellow
    } else {
        Color::Red
    };
    table.add_row(vec![
        Cell::new(result.correct_count),
        Cell::new(result.wrong_count),
        Cell::new(format!("{}/{}", result.answered_count, result.question_count())),
        Cell::new(format!("{}%", result.score_pct)).fg(score_color),
        Cell::new(time),
    ]);
    table.to_string()
}

pub fn review(report: &ExamReport) -> String {
    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Yours", "Correct", ""]);
    for item in &report.review {
        table.add_row(vec![
            Cell::new(item.index + 1),
            Cell::new(&item.text),
            Cell::new(&item.selected_letters),
            Cell::new(&item.correct_letters),
            if item.is_correct {
                Cell::new("ok").fg(Color::Green)
            } else {
                Cell::new("miss").fg(Color::Red)
            },
        ]);
    }
    table.to_string()
}

/// Warn at every full minute and at 30 and 10 seconds.
pub fn should_warn(remaining: u32) -> bool {
    remaining > 0 && (remaining % 60 == 0 || remaining == 30 || remaining == 10)
}
