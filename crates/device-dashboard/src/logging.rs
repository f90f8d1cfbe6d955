//! Logging initialization.
//!
//! Configures the `tracing` subscriber with level filtering via the
//! `DDASH_LOG` environment variable, falling back to the configured
//! `log.level` when the variable is unset or invalid.
//!
//! The dashboard owns the terminal while it runs, so it logs to a file;
//! one-shot subcommands log to stderr.
//!
//! ```bash
//! DDASH_LOG=debug ddash
//! DDASH_LOG=device_dashboard::signals=trace,warn ddash snapshot
//! ```

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::schema::LogLevel;
use crate::config::xdg;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "DDASH_LOG";

fn filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level.as_directive()))
}

/// Logs to stderr. Used by the non-interactive subcommands.
pub fn init_stderr(level: LogLevel) {
    let result = fmt()
        .with_env_filter(filter(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// Appends to `path`, creating it and its directory when missing.
pub fn init_file(level: LogLevel, path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        xdg::ensure_dir(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let result = fmt()
        .with_env_filter(filter(level))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::EnvFilter;

    #[test]
    fn env_filter_parses_every_level_directive() {
        for level in [
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ] {
            assert!(
                EnvFilter::try_new(level.as_directive()).is_ok(),
                "failed to parse directive: {}",
                level.as_directive()
            );
        }
    }

    #[test]
    fn env_filter_parses_module_directive() {
        assert!(EnvFilter::try_new("device_dashboard::signals=trace,warn").is_ok());
    }

    #[test]
    fn init_file_creates_missing_directory() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("nested/ddash.log");
        init_file(LogLevel::Warn, &path).expect("init_file");
        assert!(path.exists());
    }
}
