//! Logging setup: compact human output on stderr, JSONL to a log file.
//!
//! The file location is resolved in this order:
//! `ISO4_LOG_PATH` (exact file) > `ISO4_LOG_DIR` > `log_dir` from config >
//! the platform's local data directory. Daily rotation applies to every
//! directory-based location.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_PATH_ENV: &str = "ISO4_LOG_PATH";
const LOG_DIR_ENV: &str = "ISO4_LOG_DIR";
const LOG_FILE_PREFIX: &str = "iso4";
const LOG_FILE_SUFFIX: &str = "jsonl";

/// Where JSONL logs go.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Exact log file; disables rotation.
    pub log_path: Option<PathBuf>,
    /// Directory for daily-rotated log files.
    pub log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Resolve from `ISO4_LOG_PATH`/`ISO4_LOG_DIR`, then `config_log_dir`,
    /// then the platform default.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self::resolve(
            non_empty_env(LOG_PATH_ENV),
            non_empty_env(LOG_DIR_ENV),
            config_log_dir,
            iso4_core::config::user_data_local_dir().map(|d| d.join("logs").into_std_path_buf()),
        )
    }

    fn resolve(
        env_path: Option<PathBuf>,
        env_dir: Option<PathBuf>,
        config_dir: Option<PathBuf>,
        default_dir: Option<PathBuf>,
    ) -> Self {
        if env_path.is_some() {
            return Self {
                log_path: env_path,
                log_dir: None,
            };
        }
        Self {
            log_path: None,
            log_dir: env_dir.or(config_dir).or(default_dir),
        }
    }

    /// Build the file appender, or `None` when no location is usable.
    fn appender(&self) -> Option<RollingFileAppender> {
        if let Some(ref path) = self.log_path {
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
            let dir = dir.unwrap_or_else(|| Path::new("."));
            let name = path.file_name()?.to_str()?;
            std::fs::create_dir_all(dir).ok()?;
            return RollingFileAppender::builder()
                .rotation(Rotation::NEVER)
                .filename_prefix(name)
                .build(dir)
                .ok();
        }

        let dir = self.log_dir.as_ref()?;
        std::fs::create_dir_all(dir).ok()?;
        RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(LOG_FILE_PREFIX)
            .filename_suffix(LOG_FILE_SUFFIX)
            .build(dir)
            .ok()
    }
}

fn non_empty_env(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Keeps the non-blocking file writer flushing until dropped.
#[derive(Debug)]
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// Level directive chosen from the CLI flags and the configured level.
fn default_directive(quiet: bool, verbose: u8, config_level: &str) -> &str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => config_level,
        1 => "debug",
        _ => "trace",
    }
}

/// Build the filter. `RUST_LOG` wins when set and valid.
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(quiet, verbose, config_level)))
}

/// Install the global subscriber.
///
/// A log file that cannot be opened only disables the file layer.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<LogGuard> {
    let (file_layer, guard) = match config.appender() {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_target(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };
    let file_enabled = file_layer.is_some();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    if !file_enabled {
        tracing::debug!(config = ?config, "log file unavailable; logging to stderr only");
    }

    Ok(LogGuard { _file: guard })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins_over_directories() {
        let cfg = ObservabilityConfig::resolve(
            Some(PathBuf::from("/tmp/x.jsonl")),
            Some(PathBuf::from("/env")),
            Some(PathBuf::from("/config")),
            Some(PathBuf::from("/default")),
        );
        assert_eq!(cfg.log_path, Some(PathBuf::from("/tmp/x.jsonl")));
        assert!(cfg.log_dir.is_none());
    }

    #[test]
    fn env_dir_beats_config_dir() {
        let cfg = ObservabilityConfig::resolve(
            None,
            Some(PathBuf::from("/env")),
            Some(PathBuf::from("/config")),
            None,
        );
        assert_eq!(cfg.log_dir, Some(PathBuf::from("/env")));
    }

    #[test]
    fn falls_back_to_default_dir() {
        let cfg = ObservabilityConfig::resolve(None, None, None, Some(PathBuf::from("/d")));
        assert_eq!(cfg.log_dir, Some(PathBuf::from("/d")));
    }

    #[test]
    fn quiet_and_verbose_pick_levels() {
        assert_eq!(default_directive(true, 3, "info"), "error");
        assert_eq!(default_directive(false, 0, "warn"), "warn");
        assert_eq!(default_directive(false, 1, "warn"), "debug");
        assert_eq!(default_directive(false, 2, "warn"), "trace");
    }

    #[test]
    fn appender_creates_log_directory() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = tmp.path().join("nested").join("logs");
        let cfg = ObservabilityConfig {
            log_path: None,
            log_dir: Some(dir.clone()),
        };
        assert!(cfg.appender().is_some());
        assert!(dir.is_dir());
    }

    #[test]
    fn no_location_means_no_appender() {
        assert!(ObservabilityConfig::default().appender().is_none());
    }
}
