//! Session configuration with lenient numeric input.
//!
//! Question count and time limit arrive as raw text from a form or command
//! line. Malformed values are never an error: they clamp or fall back to
//! defaults.

use serde::{Deserialize, Deserializer, Serialize};

/// Time limit used when the configured value is missing, zero or unparsable.
pub const DEFAULT_TIME_LIMIT_MINUTES: u32 = 15;
/// Upper bound for the time limit (one day).
pub const MAX_TIME_LIMIT_MINUTES: u32 = 24 * 60;

/// Parameters for one exam session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Desired number of questions; empty or unparsable means the whole pool.
    #[serde(default, deserialize_with = "int_ish")]
    pub count: String,
    /// Time limit in minutes.
    #[serde(default = "default_minutes", deserialize_with = "int_ish")]
    pub time_limit_minutes: String,
    /// Shuffle question order before selecting.
    #[serde(default = "default_true")]
    pub shuffle_questions: bool,
    /// Shuffle each selected question's options.
    #[serde(default = "default_true")]
    pub shuffle_options: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            count: String::new(),
            time_limit_minutes: default_minutes(),
            shuffle_questions: true,
            shuffle_options: true,
        }
    }
}

impl SessionConfig {
    /// Number of questions for a pool of `pool_size`, see [`resolve_count`].
    pub fn question_count(&self, pool_size: usize) -> usize {
        resolve_count(&self.count, pool_size)
    }

    /// Time limit in seconds, see [`resolve_minutes`].
    pub fn time_limit_secs(&self) -> u32 {
        resolve_minutes(&self.time_limit_minutes) * 60
    }
}

fn default_minutes() -> String {
    DEFAULT_TIME_LIMIT_MINUTES.to_string()
}

fn default_true() -> bool {
    true
}

/// Accept strings, integers or floats for numeric fields.
fn int_ish<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntIsh {
        Int(i64),
        Float(f64),
        Text(String),
    }

    Ok(match IntIsh::deserialize(deserializer)? {
        IntIsh::Int(n) => n.to_string(),
        IntIsh::Float(f) => f.to_string(),
        IntIsh::Text(s) => s,
    })
}

/// Parse the leading integer of `raw`.
///
/// Leading whitespace and one sign are allowed; parsing stops at the first
/// non-digit (`"12abc"` is 12, `"1.9"` is 1). Returns `None` when no digit
/// follows. Values too large for `i64` saturate.
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Resolve the number of questions for a session.
///
/// Zero or unparsable input means the full pool; anything else is clamped to
/// `[1, pool_size]`.
pub fn resolve_count(raw: &str, pool_size: usize) -> usize {
    let max = i64::try_from(pool_size.max(1)).unwrap_or(i64::MAX);
    let requested = match parse_int_prefix(raw) {
        Some(n) if n != 0 => n,
        _ => max,
    };
    // Clamped into [1, max], which always fits in usize.
    requested.clamp(1, max) as usize
}

/// Resolve the time limit in minutes.
///
/// Zero or unparsable input falls back to [`DEFAULT_TIME_LIMIT_MINUTES`];
/// the result is clamped to `[1, MAX_TIME_LIMIT_MINUTES]`.
pub fn resolve_minutes(raw: &str) -> u32 {
    let requested = match parse_int_prefix(raw) {
        Some(n) if n != 0 => n,
        _ => i64::from(DEFAULT_TIME_LIMIT_MINUTES),
    };
    requested.clamp(1, i64::from(MAX_TIME_LIMIT_MINUTES)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_int_prefix_like_a_form_field() {
        assert_eq!(parse_int_prefix("12"), Some(12));
        assert_eq!(parse_int_prefix("  7 questions"), Some(7));
        assert_eq!(parse_int_prefix("12abc"), Some(12));
        assert_eq!(parse_int_prefix("1.9"), Some(1));
        assert_eq!(parse_int_prefix("-3"), Some(-3));
        assert_eq!(parse_int_prefix("+4"), Some(4));
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("-"), None);
        assert_eq!(parse_int_prefix("99999999999999999999999"), Some(i64::MAX));
    }

    #[test]
    fn count_defaults_to_full_pool() {
        assert_eq!(resolve_count("abc", 5), 5);
        assert_eq!(resolve_count("", 5), 5);
        assert_eq!(resolve_count("0", 5), 5);
    }

    #[test]
    fn count_is_clamped_to_pool() {
        assert_eq!(resolve_count("3", 5), 3);
        assert_eq!(resolve_count("50", 5), 5);
        assert_eq!(resolve_count("-2", 5), 1);
        assert_eq!(resolve_count("1", 1), 1);
    }

    #[test]
    fn count_never_below_one() {
        for raw in ["", "abc", "-9", "0", "1", "9"] {
            for pool_size in 0..4 {
                assert!(resolve_count(raw, pool_size) >= 1);
            }
        }
    }

    #[test]
    fn minutes_default_and_clamp() {
        assert_eq!(resolve_minutes("15"), 15);
        assert_eq!(resolve_minutes("xyz"), 15);
        assert_eq!(resolve_minutes("0"), 15);
        assert_eq!(resolve_minutes("-5"), 1);
        assert_eq!(resolve_minutes("100000"), 1440);
    }

    #[test]
    fn fifteen_minutes_is_nine_hundred_seconds() {
        let config = SessionConfig {
            time_limit_minutes: "15".into(),
            ..Default::default()
        };
        assert_eq!(config.time_limit_secs(), 900);
    }

    #[test]
    fn deserialize_accepts_numbers_and_text() {
        let config: SessionConfig =
            serde_json::from_str(r#"{"count": 10, "time_limit_minutes": "20"}"#).unwrap();
        assert_eq!(config.count, "10");
        assert_eq!(config.time_limit_minutes, "20");
        assert!(config.shuffle_questions);

        let config: SessionConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SessionConfig::default());
    }
}
