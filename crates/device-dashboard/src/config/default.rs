//! Default configuration template and file creation utilities.
//!
//! Provides a commented TOML template that matches `Config::default()` and
//! a function to write it to the XDG config path.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::error::ConfigError;
use crate::config::xdg;

// ---------------------------------------------------------------------------
// Default TOML template
// ---------------------------------------------------------------------------

/// A commented TOML template with all default values.
///
/// Every value here must match `Config::default()` from `schema.rs`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Device Dashboard Configuration
#
# All values shown below are the built-in defaults.
# Modify options to customize the dashboard.
#
# Location: $XDG_CONFIG_HOME/device-dashboard/config.toml

# ==============================================================================
# TUI
# ==============================================================================

[tui]

# How often input is polled and the screen redrawn.
# Examples: "100ms", "250ms", "1s"
tick_rate = "250ms"

# Minimum width of a widget card in columns.
# The grid shows as many columns as fit the terminal width (at least one).
min_card_width = 28

# ==============================================================================
# Signals
# ==============================================================================

[signals]

# Watch the battery. Hosts without a battery simply show the fallback values.
battery = true

# Watch network quality (link speed and round-trip time).
network = true

# How often each signal is sampled. Widgets only refresh on change.
battery_poll_interval = "30s"
network_poll_interval = "5s"

# Address used to measure round-trip time with a TCP connect.
probe_address = "1.1.1.1:443"

# Give up on the probe after this long and report the network offline.
probe_timeout = "2s"

# ==============================================================================
# Location
# ==============================================================================

[location]

# Allow the Location widget to look up an approximate position.
# When false the widget reports that geolocation is not supported.
enabled = true

# Lookup service returning ipinfo-style JSON ("loc": "lat,lng").
endpoint = "https://ipinfo.io/json"

# Request timeout.
timeout = "5s"

# ==============================================================================
# Layout
# ==============================================================================

[layout]

# Where the widget order is saved after each drag.
# Empty string means $XDG_STATE_HOME/device-dashboard/widget-order.json
file = ""

# ==============================================================================
# Logging
# ==============================================================================

[log]

# Verbosity when DDASH_LOG is not set.
# Options: "error", "warn", "info", "debug", "trace"
level = "warn"

# Log file used while the dashboard is on screen.
# Empty string means $XDG_STATE_HOME/device-dashboard/ddash.log
file = ""
"#;

// ---------------------------------------------------------------------------
// File creation
// ---------------------------------------------------------------------------

/// Creates (or force-overwrites) the default config file.
///
/// - If the file exists and `force` is `false`, returns `ConfigError::AlreadyExists`.
/// - If the file exists and `force` is `true`, backs it up to `.toml.backup` first.
/// - Returns the path where the config was written.
pub fn create_default_config(force: bool) -> Result<PathBuf, ConfigError> {
    let path = xdg::config_path();

    if path.exists() {
        if !force {
            return Err(ConfigError::AlreadyExists { path });
        }
        let backup_path = path.with_extension("toml.backup");
        fs::rename(&path, &backup_path).map_err(|e| ConfigError::WriteError {
            path: backup_path.clone(),
            source: e,
        })?;
        tracing::info!("Backed up existing config to {}", backup_path.display());
    }

    write_default_config(&path)?;
    Ok(path)
}

/// Writes the default template to `path`, creating parent dirs and setting 0600 permissions.
fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let write_error = |source| ConfigError::WriteError {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        xdg::ensure_dir(parent).map_err(write_error)?;
    }
    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(write_error)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(write_error)?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::Config;
    use crate::config::test_env::with_env;
    use serial_test::serial;

    fn with_xdg_config<F: FnOnce()>(dir: &Path, f: F) {
        with_env(
            &[("XDG_CONFIG_HOME", Some(dir.to_str().expect("non-utf8 tmpdir")))],
            f,
        );
    }

    #[test]
    fn template_values_match_config_default() {
        let from_template: Config =
            toml::from_str(DEFAULT_CONFIG_TEMPLATE).expect("template should parse");
        assert_eq!(from_template, Config::default());
    }

    #[test]
    fn template_contains_all_section_headers() {
        for section in ["[tui]", "[signals]", "[location]", "[layout]", "[log]"] {
            assert!(
                DEFAULT_CONFIG_TEMPLATE.contains(section),
                "missing {section} section"
            );
        }
    }

    #[test]
    #[serial]
    fn create_writes_template() {
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        let expected = tmp.path().join("device-dashboard/config.toml");
        with_xdg_config(tmp.path(), || {
            let path = create_default_config(false).expect("should succeed");
            assert_eq!(path, expected);
            let content = fs::read_to_string(&path).expect("should read");
            assert_eq!(content, DEFAULT_CONFIG_TEMPLATE);
        });
    }

    #[test]
    #[serial]
    fn create_without_force_returns_already_exists() {
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        with_xdg_config(tmp.path(), || {
            create_default_config(false).expect("first call should succeed");
            let err = create_default_config(false).expect_err("should fail with AlreadyExists");
            assert!(matches!(err, ConfigError::AlreadyExists { .. }));
        });
    }

    #[test]
    #[serial]
    fn create_with_force_creates_backup() {
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        with_xdg_config(tmp.path(), || {
            let path = create_default_config(false).expect("first call should succeed");
            fs::write(&path, "# custom content\n").expect("overwrite for test");

            let new_path = create_default_config(true).expect("force should succeed");
            assert_eq!(new_path, path);

            let backup = path.with_extension("toml.backup");
            let backup_content = fs::read_to_string(&backup).expect("read backup");
            assert_eq!(backup_content, "# custom content\n");
            let content = fs::read_to_string(&path).expect("read new");
            assert_eq!(content, DEFAULT_CONFIG_TEMPLATE);
        });
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn file_permissions_are_0600() {
        use std::os::unix::fs::PermissionsExt;
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        with_xdg_config(tmp.path(), || {
            let path = create_default_config(false).expect("should succeed");
            let mode = fs::metadata(&path).expect("metadata").permissions().mode();
            assert_eq!(mode & 0o777, 0o600, "file should be owner-only read/write");
        });
    }
}
