//! Tracing setup and submission spans.
//!
//! Interactive mode writes logs to a file so they never land on the
//! terminal the form is drawn on; one-shot mode writes to stderr.

mod spans;

pub use spans::SubmitSpan;

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::{Error, Result};

pub const LOG_FILE_NAME: &str = "ai-query.log";

/// Where log output goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Logging configuration.
#[derive(Clone, Debug)]
pub struct LogConfig {
    pub target: LogTarget,
    pub debug: bool,
}

impl LogConfig {
    /// Log to stderr
    pub fn stderr(debug: bool) -> Self {
        Self {
            target: LogTarget::Stderr,
            debug,
        }
    }

    /// Log to `path`, without ANSI colours
    pub fn file(path: impl Into<PathBuf>, debug: bool) -> Self {
        Self {
            target: LogTarget::File(path.into()),
            debug,
        }
    }

    /// `RUST_LOG` wins; otherwise info, or debug with `--debug`.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            if self.debug {
                EnvFilter::new("ai_query=debug")
            } else {
                EnvFilter::new("ai_query=info")
            }
        })
    }
}

/// Platform log directory, e.g. `~/.local/share/ai-query/logs`.
pub fn default_log_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "ai-query")
        .map(|dirs| dirs.data_local_dir().join("logs"))
}

/// Log file in [`default_log_dir`], or the working directory.
pub fn default_log_file() -> PathBuf {
    default_log_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(LOG_FILE_NAME)
}

/// Install the global subscriber.
pub fn init_tracing(config: &LogConfig) -> Result<()> {
    let filter = config.env_filter();

    let result = match &config.target {
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init(),
        LogTarget::File(path) => {
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Arc::new(file))
                .with_target(false)
                .with_ansi(false)
                .try_init()
        }
    };

    result.map_err(|e| Error::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_file_name() {
        assert!(default_log_file().ends_with(LOG_FILE_NAME));
    }

    #[test]
    fn test_log_config_targets() {
        assert_eq!(LogConfig::stderr(false).target, LogTarget::Stderr);
        let config = LogConfig::file("/tmp/x.log", true);
        assert_eq!(config.target, LogTarget::File(PathBuf::from("/tmp/x.log")));
        assert!(config.debug);
    }
}
