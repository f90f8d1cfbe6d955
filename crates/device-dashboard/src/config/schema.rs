//! TOML configuration schema types for the device dashboard.
//!
//! All structs derive `Deserialize` and `Serialize` with defaults via
//! `#[serde(default)]`, so a partial (or empty) file is always valid.
//!
//! Duration fields use human-readable strings (e.g. `"5s"`, `"250ms"`)
//! parsed by the `humantime` crate. [`Config::validate`] checks all of them
//! up front so bad values are reported with their key.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration encompassing all sections.
///
/// ```toml
/// [tui]
/// [signals]
/// [location]
/// [layout]
/// [log]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Terminal UI behavior.
    pub tui: TuiConfig,
    /// Battery and network polling.
    pub signals: SignalsConfig,
    /// One-shot location lookup.
    pub location: LocationConfig,
    /// Widget order persistence.
    pub layout: LayoutConfig,
    /// Log output.
    pub log: LogConfig,
}

impl Config {
    /// Checks every value that only fails at use time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tui.tick_rate()?;
        if self.tui.min_card_width < MIN_CARD_WIDTH {
            return Err(ConfigError::InvalidValue {
                key: "tui.min_card_width".to_string(),
                message: format!("must be at least {}", MIN_CARD_WIDTH),
            });
        }
        self.signals.battery_poll_interval()?;
        self.signals.network_poll_interval()?;
        self.signals.probe_timeout()?;
        self.location.timeout()?;
        Ok(())
    }
}

/// Parses a humantime duration, rejecting zero.
pub fn parse_duration(key: &str, value: &str) -> Result<Duration, ConfigError> {
    let duration = humantime::parse_duration(value).map_err(|e| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("{:?} is not a duration ({})", value, e),
    })?;
    if duration.is_zero() {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: "must be greater than zero".to_string(),
        });
    }
    Ok(duration)
}

// ---------------------------------------------------------------------------
// TUI
// ---------------------------------------------------------------------------

/// Narrowest card that still fits a label and a value.
pub const MIN_CARD_WIDTH: u16 = 20;

/// TUI behavior settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TuiConfig {
    /// Input poll and redraw tick as a human-readable duration.
    pub tick_rate: String,
    /// Minimum card width in columns; the grid fits as many columns as this
    /// allows.
    pub min_card_width: u16,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate: "250ms".to_string(),
            min_card_width: 28,
        }
    }
}

impl TuiConfig {
    /// Parsed `tick_rate`.
    pub fn tick_rate(&self) -> Result<Duration, ConfigError> {
        parse_duration("tui.tick_rate", &self.tick_rate)
    }
}

// ---------------------------------------------------------------------------
// Signals
// ---------------------------------------------------------------------------

/// Battery and network subscription settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SignalsConfig {
    /// Subscribe to battery changes.
    pub battery: bool,
    /// Subscribe to network changes.
    pub network: bool,
    /// How often the battery is sampled.
    pub battery_poll_interval: String,
    /// How often the network is sampled.
    pub network_poll_interval: String,
    /// `host:port` used to measure round-trip time.
    pub probe_address: String,
    /// Connect timeout for the probe.
    pub probe_timeout: String,
}

impl Default for SignalsConfig {
    fn default() -> Self {
        Self {
            battery: true,
            network: true,
            battery_poll_interval: "30s".to_string(),
            network_poll_interval: "5s".to_string(),
            probe_address: host_signals::network::DEFAULT_PROBE_ADDRESS.to_string(),
            probe_timeout: "2s".to_string(),
        }
    }
}

impl SignalsConfig {
    /// Parsed `battery_poll_interval`.
    pub fn battery_poll_interval(&self) -> Result<Duration, ConfigError> {
        parse_duration("signals.battery_poll_interval", &self.battery_poll_interval)
    }

    /// Parsed `network_poll_interval`.
    pub fn network_poll_interval(&self) -> Result<Duration, ConfigError> {
        parse_duration("signals.network_poll_interval", &self.network_poll_interval)
    }

    /// Parsed `probe_timeout`.
    pub fn probe_timeout(&self) -> Result<Duration, ConfigError> {
        parse_duration("signals.probe_timeout", &self.probe_timeout)
    }
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// One-shot location lookup settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LocationConfig {
    /// When false the location widget reports that geolocation is not
    /// supported.
    pub enabled: bool,
    /// HTTPS endpoint returning ipinfo-style JSON.
    pub endpoint: String,
    /// Request timeout.
    pub timeout: String,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: host_signals::geolocation::DEFAULT_ENDPOINT.to_string(),
            timeout: "5s".to_string(),
        }
    }
}

impl LocationConfig {
    /// Parsed `timeout`.
    pub fn timeout(&self) -> Result<Duration, ConfigError> {
        parse_duration("location.timeout", &self.timeout)
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Widget order persistence settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Path of the widget order file. Empty string means the XDG state
    /// default. Tilde is expanded.
    pub file: String,
}

// ---------------------------------------------------------------------------
// Log
// ---------------------------------------------------------------------------

/// Log output settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Verbosity used when `DDASH_LOG` is not set.
    pub level: LogLevel,
    /// Log file used while the TUI owns the terminal. Empty string means
    /// the XDG state default.
    pub file: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Warn,
            file: String::new(),
        }
    }
}

/// Log verbosity levels (kebab-case in TOML).
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings (default).
    Warn,
    /// Informational messages.
    Info,
    /// Debug-level detail.
    Debug,
    /// Full trace output.
    Trace,
}

impl LogLevel {
    /// Directive string understood by `EnvFilter`.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_config_all_fields() {
        let toml_str = r#"
[tui]
tick_rate = "100ms"
min_card_width = 32

[signals]
battery = false
network = true
battery_poll_interval = "1m"
network_poll_interval = "10s"
probe_address = "9.9.9.9:53"
probe_timeout = "500ms"

[location]
enabled = false
endpoint = "https://example.test/geo"
timeout = "3s"

[layout]
file = "~/order.json"

[log]
level = "debug"
file = "/tmp/ddash.log"
"#;
        let config: Config = toml::from_str(toml_str).expect("valid TOML should parse");
        assert_eq!(config.tui.tick_rate, "100ms");
        assert_eq!(config.tui.min_card_width, 32);
        assert!(!config.signals.battery);
        assert_eq!(config.signals.probe_address, "9.9.9.9:53");
        assert!(!config.location.enabled);
        assert_eq!(config.location.endpoint, "https://example.test/geo");
        assert_eq!(config.layout.file, "~/order.json");
        assert_eq!(config.log.level, LogLevel::Debug);
        assert_eq!(config.log.file, "/tmp/ddash.log");
        config.validate().expect("all values valid");
    }

    #[test]
    fn parse_empty_string_uses_all_defaults() {
        let config: Config = toml::from_str("").expect("empty string should parse");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn parse_unknown_fields_are_ignored() {
        let toml_str = r#"
unknown_key = "hello"

[tui]
future_field = 42
"#;
        let config: Config = toml::from_str(toml_str).expect("unknown fields should be ignored");
        assert_eq!(config.tui, TuiConfig::default());
    }

    #[test]
    fn defaults_are_valid() {
        Config::default().validate().expect("defaults must validate");
    }

    #[test]
    fn default_durations() {
        let config = Config::default();
        assert_eq!(
            config.tui.tick_rate().expect("tick"),
            Duration::from_millis(250)
        );
        assert_eq!(
            config.signals.battery_poll_interval().expect("battery"),
            Duration::from_secs(30)
        );
        assert_eq!(
            config.signals.network_poll_interval().expect("network"),
            Duration::from_secs(5)
        );
        assert_eq!(
            config.location.timeout().expect("timeout"),
            Duration::from_secs(5)
        );
    }

    #[test]
    fn default_log_level_is_warn() {
        assert_eq!(Config::default().log.level, LogLevel::Warn);
        assert_eq!(LogLevel::Warn.as_directive(), "warn");
    }

    #[test]
    fn bad_duration_names_the_key() {
        let mut config = Config::default();
        config.signals.network_poll_interval = "often".to_string();
        let err = config.validate().expect_err("should reject");
        match err {
            ConfigError::InvalidValue { key, .. } => {
                assert_eq!(key, "signals.network_poll_interval")
            }
            other => panic!("expected InvalidValue, got: {other:?}"),
        }
    }

    #[test]
    fn zero_duration_is_rejected() {
        assert!(parse_duration("tui.tick_rate", "0s").is_err());
    }

    #[test]
    fn narrow_cards_are_rejected() {
        let mut config = Config::default();
        config.tui.min_card_width = 5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn invalid_log_level_returns_error() {
        let result: Result<LogConfig, _> = toml::from_str(r#"level = "verbose""#);
        assert!(result.is_err());
    }

    #[test]
    fn log_level_all_variants() {
        for (input, expected) in [
            ("error", LogLevel::Error),
            ("warn", LogLevel::Warn),
            ("info", LogLevel::Info),
            ("debug", LogLevel::Debug),
            ("trace", LogLevel::Trace),
        ] {
            let log: LogConfig =
                toml::from_str(&format!("level = \"{}\"", input)).expect("level should parse");
            assert_eq!(log.level, expected);
        }
    }
}
