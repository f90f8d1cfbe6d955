//! Platform-aware path resolution for device-dashboard.
//!
//! On **Linux**, follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/device-dashboard` or `~/.config/device-dashboard`
//! - State: `$XDG_STATE_HOME/device-dashboard` or `~/.local/state/device-dashboard`
//!
//! On **macOS**, the platform defaults come from `dirs` (Application
//! Support) while the XDG env vars still take precedence.

use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "device-dashboard";

/// File holding the persisted widget order.
pub const LAYOUT_FILE_NAME: &str = "widget-order.json";

/// Default log file used while the TUI owns the terminal.
pub const LOG_FILE_NAME: &str = "ddash.log";

/// Returns the configuration directory.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/device-dashboard` (if env var set, any platform)
/// 2. Platform default
pub fn config_dir() -> PathBuf {
    if let Some(xdg) = env_dir("XDG_CONFIG_HOME") {
        return xdg.join(APP_NAME);
    }
    platform_config_dir().join(APP_NAME)
}

/// Platform-native config base directory (without XDG override).
fn platform_config_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        dirs::config_dir().unwrap_or_else(|| home_dir().join("Library/Application Support"))
    }
    #[cfg(not(target_os = "macos"))]
    {
        home_dir().join(".config")
    }
}

/// Returns the path to the main configuration file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Returns the state directory for the widget order and the log file.
///
/// Resolution order:
/// 1. `$XDG_STATE_HOME/device-dashboard` (if env var set, any platform)
/// 2. Platform default
pub fn state_dir() -> PathBuf {
    if let Some(xdg) = env_dir("XDG_STATE_HOME") {
        return xdg.join(APP_NAME);
    }
    platform_state_dir().join(APP_NAME)
}

/// Platform-native state base directory (without XDG override).
fn platform_state_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        dirs::data_local_dir().unwrap_or_else(|| home_dir().join("Library/Application Support"))
    }
    #[cfg(not(target_os = "macos"))]
    {
        home_dir().join(".local/state")
    }
}

/// Default widget order file.
pub fn layout_path() -> PathBuf {
    state_dir().join(LAYOUT_FILE_NAME)
}

/// Default log file.
pub fn log_path() -> PathBuf {
    state_dir().join(LOG_FILE_NAME)
}

/// Resolves a configured path: empty means `default`, `~` is expanded.
pub fn resolve_or(configured: &str, default: impl FnOnce() -> PathBuf) -> PathBuf {
    if configured.trim().is_empty() {
        default()
    } else {
        expand_tilde(configured.trim())
    }
}

/// Expands a leading `~` in a path string to the user's home directory.
///
/// If the path does not start with `~`, it is returned as-is.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        home_dir().join(rest)
    } else if path == "~" {
        home_dir()
    } else {
        PathBuf::from(path)
    }
}

/// Creates a directory and all parent directories with mode 0700.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o700))?;
    }
    Ok(())
}

/// Empty XDG variables are treated as unset.
fn env_dir(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Home directory, or the current directory when none can be determined.
fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_env::with_env;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_config_path_with_xdg_override() {
        with_env(&[("XDG_CONFIG_HOME", Some("/custom/config"))], || {
            assert_eq!(
                config_path(),
                PathBuf::from("/custom/config/device-dashboard/config.toml")
            );
        });
    }

    #[test]
    #[serial]
    fn test_config_path_without_xdg_uses_platform_default() {
        with_env(&[("XDG_CONFIG_HOME", None)], || {
            let expected = platform_config_dir().join("device-dashboard/config.toml");
            assert_eq!(config_path(), expected);
        });
    }

    #[test]
    #[serial]
    fn test_empty_xdg_var_is_ignored() {
        with_env(&[("XDG_STATE_HOME", Some(""))], || {
            assert_eq!(state_dir(), platform_state_dir().join("device-dashboard"));
        });
    }

    #[test]
    #[serial]
    fn test_layout_and_log_paths_live_in_state_dir() {
        with_env(&[("XDG_STATE_HOME", Some("/state"))], || {
            assert_eq!(
                layout_path(),
                PathBuf::from("/state/device-dashboard/widget-order.json")
            );
            assert_eq!(
                log_path(),
                PathBuf::from("/state/device-dashboard/ddash.log")
            );
        });
    }

    #[cfg(not(target_os = "macos"))]
    #[test]
    #[serial]
    fn test_linux_state_default_is_local_state() {
        with_env(&[("XDG_STATE_HOME", None)], || {
            let home = dirs::home_dir().expect("could not determine home directory");
            assert_eq!(state_dir(), home.join(".local/state/device-dashboard"));
        });
    }

    #[test]
    fn test_resolve_or_uses_default_for_empty() {
        let path = resolve_or("  ", || PathBuf::from("/fallback"));
        assert_eq!(path, PathBuf::from("/fallback"));
        let path = resolve_or("/explicit.json", || PathBuf::from("/fallback"));
        assert_eq!(path, PathBuf::from("/explicit.json"));
    }

    #[test]
    fn test_expand_tilde_with_home_prefix() {
        let home = dirs::home_dir().expect("could not determine home directory");
        assert_eq!(expand_tilde("~/foo"), home.join("foo"));
        assert_eq!(expand_tilde("~"), home);
    }

    #[test]
    fn test_expand_tilde_other_paths_unchanged() {
        assert_eq!(expand_tilde("/absolute/path"), PathBuf::from("/absolute/path"));
        assert_eq!(expand_tilde("relative/path"), PathBuf::from("relative/path"));
    }

    #[test]
    fn test_ensure_dir_creates_directory() {
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        let nested = tmp.path().join("a/b/c");
        ensure_dir(&nested).expect("ensure_dir failed");
        assert!(nested.is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_ensure_dir_sets_permissions() {
        use std::os::unix::fs::PermissionsExt;
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        let dir = tmp.path().join("secure");
        ensure_dir(&dir).expect("ensure_dir failed");
        let mode = fs::metadata(&dir)
            .expect("failed to read metadata")
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o700);
    }
}
