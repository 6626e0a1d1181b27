// Logging bootstrap: diagnostics go to size-rotated files because the
// terminal belongs to the interactive menu. `main` calls `init_logging` once;
// later calls return without touching the running logger.

use anyhow::{anyhow, Context, Result};
use flexi_logger::{
    Cleanup, Criterion, FileSpec, LogSpecBuilder, Logger, LoggerHandle, Naming, WriteMode,
};
use log::{info, LevelFilter};
use once_cell::sync::OnceCell;
use std::path::PathBuf;

const LOG_FILE_BASENAME: &str = "book-catalog";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 2 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

/// Environment variable holding the log level.
pub const LOG_LEVEL_ENV: &str = "BOOK_CATALOG_LOG";
/// Environment variable holding the log directory.
pub const LOG_DIR_ENV: &str = "BOOK_CATALOG_LOG_DIR";

static LOGGER: OnceCell<LoggerHandle> = OnceCell::new();

/// Where and how verbosely to log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    pub log_dir: PathBuf,
}

impl LogConfig {
    /// Read `BOOK_CATALOG_LOG` and `BOOK_CATALOG_LOG_DIR`, falling back to
    /// `info` and `<local data dir>/book-catalog/logs`.
    pub fn from_env() -> Self {
        let level = std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| "info".into());
        let log_dir = std::env::var(LOG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_log_dir());
        LogConfig { level, log_dir }
    }

    /// Parsed level. Accepts `off`, `error`, `warn`, `info`, `debug` and
    /// `trace` in any case.
    pub fn level_filter(&self) -> Result<LevelFilter> {
        self.level
            .trim()
            .parse::<LevelFilter>()
            .map_err(|_| anyhow!("Unknown log level `{}`", self.level))
    }
}

fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("book-catalog")
        .join("logs")
}

/// Start file logging with `config`. Only the first successful call takes
/// effect.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    LOGGER.get_or_try_init(|| start_logger(config))?;
    Ok(())
}

fn start_logger(config: &LogConfig) -> Result<LoggerHandle> {
    let level = config.level_filter()?;
    std::fs::create_dir_all(&config.log_dir).with_context(|| {
        format!(
            "Failed to create log directory {}",
            config.log_dir.display()
        )
    })?;

    let spec = LogSpecBuilder::new().default(level).build();
    let handle = Logger::with(spec)
        .log_to_file(
            FileSpec::default()
                .directory(config.log_dir.clone())
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .context("Failed to start file logger")?;

    info!(
        "event=app_start version={} level={} log_dir={}",
        env!("CARGO_PKG_VERSION"),
        level,
        config.log_dir.display()
    );
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(level: &str, dir: &std::path::Path) -> LogConfig {
        LogConfig {
            level: level.to_string(),
            log_dir: dir.to_path_buf(),
        }
    }

    #[test]
    fn level_filter_accepts_any_case() {
        let dir = std::env::temp_dir();
        assert_eq!(config("INFO", &dir).level_filter().unwrap(), LevelFilter::Info);
        assert_eq!(config(" debug ", &dir).level_filter().unwrap(), LevelFilter::Debug);
        assert_eq!(config("off", &dir).level_filter().unwrap(), LevelFilter::Off);
    }

    #[test]
    fn level_filter_rejects_unknown_names() {
        let err = config("verbose", &std::env::temp_dir())
            .level_filter()
            .unwrap_err();
        assert!(err.to_string().contains("Unknown log level"));
    }

    #[test]
    fn bad_level_fails_before_creating_the_directory() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("logs");
        assert!(start_logger(&config("loud", &dir)).is_err());
        assert!(!dir.exists());
    }

    #[test]
    fn init_creates_log_dir_and_repeat_calls_succeed() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("nested").join("logs");
        let cfg = config("debug", &dir);

        init_logging(&cfg).unwrap();
        assert!(dir.is_dir());
        init_logging(&cfg).unwrap();
    }
}
