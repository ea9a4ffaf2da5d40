//! quizrun configuration and pool source factory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizrun_core::config::SessionConfig;
use quizrun_core::traits::PoolSource;

use crate::file::FileSource;
use crate::http::{HttpSource, DEFAULT_TIMEOUT_SECS};

/// Where the question pool comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PoolSourceConfig {
    File {
        path: PathBuf,
    },
    Http {
        url: String,
        #[serde(default = "default_timeout")]
        timeout_secs: u64,
    },
}

impl Default for PoolSourceConfig {
    fn default() -> Self {
        PoolSourceConfig::File {
            path: PathBuf::from("pools/sample.json"),
        }
    }
}

impl PoolSourceConfig {
    /// Interpret a location string: `http://` and `https://` mean a URL,
    /// anything else a file path.
    pub fn from_location(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            PoolSourceConfig::Http {
                url: location.to_string(),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            }
        } else {
            PoolSourceConfig::File {
                path: PathBuf::from(location),
            }
        }
    }
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Top-level quizrun configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizrunConfig {
    #[serde(default)]
    pub pool: PoolSourceConfig,
    /// Defaults for new sessions; command-line flags override them.
    #[serde(default)]
    pub session: SessionConfig,
    /// Where reports are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./quizrun-results")
}

impl Default for QuizrunConfig {
    fn default() -> Self {
        Self {
            pool: PoolSourceConfig::default(),
            session: SessionConfig::default(),
            output_dir: default_output_dir(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let var_name = &result[start + 2..start + end];
        let value = std::env::var(var_name).unwrap_or_default();
        result = format!("{}{}{}", &result[..start], value, &result[start + end + 1..]);
    }
    result
}

fn resolve_pool_config(config: &PoolSourceConfig) -> PoolSourceConfig {
    match config {
        PoolSourceConfig::File { path } => PoolSourceConfig::File {
            path: PathBuf::from(resolve_env_vars(&path.to_string_lossy())),
        },
        PoolSourceConfig::Http { url, timeout_secs } => PoolSourceConfig::Http {
            url: resolve_env_vars(url),
            timeout_secs: *timeout_secs,
        },
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizrun.toml` in the current directory
/// 2. `~/.config/quizrun/config.toml`
///
/// `QUIZRUN_POOL` overrides the pool location.
pub fn load_config() -> Result<QuizrunConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizrunConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("quizrun.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|home| home.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizrunConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizrunConfig::default(),
    };

    if let Ok(location) = std::env::var("QUIZRUN_POOL") {
        if !location.is_empty() {
            config.pool = PoolSourceConfig::from_location(&location);
        }
    }
    config.pool = resolve_pool_config(&config.pool);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizrun"))
}

/// Create a pool source from its configuration.
pub fn create_source(config: &PoolSourceConfig) -> Result<Box<dyn PoolSource>> {
    match config {
        PoolSourceConfig::File { path } => Ok(Box::new(FileSource::new(path))),
        PoolSourceConfig::Http { url, timeout_secs } => {
            let source = HttpSource::new(url, Duration::from_secs(*timeout_secs))?;
            Ok(Box::new(source))
        }
    }
}

/// Create a pool source from a path or URL given on the command line.
pub fn source_for_location(location: &str) -> Result<Box<dyn PoolSource>> {
    create_source(&resolve_pool_config(&PoolSourceConfig::from_location(location)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_QUIZRUN_TEST_VAR", "pools");
        assert_eq!(resolve_env_vars("${_QUIZRUN_TEST_VAR}"), "pools");
        assert_eq!(
            resolve_env_vars("./${_QUIZRUN_TEST_VAR}/sample.json"),
            "./pools/sample.json"
        );
        assert_eq!(resolve_env_vars("${unterminated"), "${unterminated");
        std::env::remove_var("_QUIZRUN_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = QuizrunConfig::default();
        assert_eq!(config.session, SessionConfig::default());
        assert_eq!(config.output_dir, PathBuf::from("./quizrun-results"));
        assert!(matches!(config.pool, PoolSourceConfig::File { .. }));
    }

    #[test]
    fn parse_http_config() {
        let toml_str = r#"
output_dir = "out"

[pool]
type = "http"
url = "https://example.com/questions.json"

[session]
count = 10
time_limit_minutes = "30"
shuffle_options = false
"#;
        let config: QuizrunConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.pool,
            PoolSourceConfig::Http {
                url: "https://example.com/questions.json".into(),
                timeout_secs: 30,
            }
        );
        assert_eq!(config.session.count, "10");
        assert_eq!(config.session.time_limit_secs(), 1800);
        assert!(config.session.shuffle_questions);
        assert!(!config.session.shuffle_options);
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizrun.toml");
        std::fs::write(
            &path,
            "[pool]\ntype = \"file\"\npath = \"bank.json\"\n\n[session]\ntime_limit_minutes = \"5\"\n",
        )
        .unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.session.time_limit_secs(), 300);
        if std::env::var("QUIZRUN_POOL").is_err() {
            assert_eq!(
                config.pool,
                PoolSourceConfig::File {
                    path: PathBuf::from("bank.json")
                }
            );
        }
    }

    #[test]
    fn missing_explicit_file_fails() {
        let err = load_config_from(Some(Path::new("/nonexistent/quizrun.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn location_picks_source_kind() {
        assert!(matches!(
            PoolSourceConfig::from_location("https://example.com/q.json"),
            PoolSourceConfig::Http { timeout_secs: 30, .. }
        ));
        assert_eq!(
            PoolSourceConfig::from_location("pools/a.json"),
            PoolSourceConfig::File {
                path: PathBuf::from("pools/a.json")
            }
        );
        assert_eq!(source_for_location("pools/a.json").unwrap().name(), "pools/a.json");
    }
}
