//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::{Context, Result};
use std::path::Path;

use quizrun_core::report::ExamReport;
use quizrun_core::timer::format_clock;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML report for a graded exam.
pub fn generate_html(report: &ExamReport) -> String {
    let result = &report.result;
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>quizrun report: {}%</title>\n",
        result.score_pct
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    html.push_str("<header>\n");
    html.push_str("<h1>quizrun report</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">{} of {} questions | {}</p>\n",
        result.question_count(),
        report.pool_size,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Summary cards
    let time_label = if result.timed_out {
        "Time expired"
    } else {
        "Time used"
    };
    html.push_str("<section class=\"cards\">\n");
    for (label, value, class) in [
        ("Correct", result.correct_count.to_string(), "pass"),
        ("Wrong", result.wrong_count.to_string(), "fail"),
        ("Score", format!("{}%", result.score_pct), "score"),
        (
            time_label,
            format!(
                "{} / {}",
                format_clock(result.used_secs),
                format_clock(result.total_secs)
            ),
            "time",
        ),
    ] {
        html.push_str(&format!(
            "<div class=\"card {class}\"><div class=\"label\">{}</div><div class=\"value\">{}</div></div>\n",
            html_escape(label),
            html_escape(&value)
        ));
    }
    html.push_str("</section>\n");

    // Per-question review
    html.push_str("<section class=\"review\">\n");
    html.push_str("<h2>Review</h2>\n");
    html.push_str("<label><input type=\"checkbox\" onchange=\"toggleMissed(this.checked)\"> Only missed</label>\n");
    html.push_str("<table class=\"review-table\" id=\"review\">\n");
    html.push_str("<thead><tr><th>#</th><th>Question</th><th>Your answer</th><th>Correct</th><th>Explanation</th></tr></thead>\n");
    html.push_str("<tbody>\n");

    for item in &report.review {
        let class = if item.is_correct { "pass" } else { "fail" };
        html.push_str(&format!(
            "<tr class=\"{class}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            item.index + 1,
            html_escape(&item.text),
            html_escape(&item.selected_letters),
            html_escape(&item.correct_letters),
            html_escape(&item.explanation),
        ));
    }

    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(report).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &ExamReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.cards { display: flex; gap: 1rem; flex-wrap: wrap; }
.card { border: 1px solid var(--border); border-radius: 8px; padding: 1rem 1.5rem; min-width: 8rem; }
.card .label { color: #6b7280; font-size: 0.85rem; }
.card .value { font-size: 1.6rem; font-weight: bold; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; vertical-align: top; }
th { background: var(--border); }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
"#;

const JS: &str = r#"
function toggleMissed(only) {
  const rows = document.querySelectorAll('#review tbody tr');
  rows.forEach(r => { r.style.display = only && r.classList.contains('pass') ? 'none' : ''; });
}
"#;
