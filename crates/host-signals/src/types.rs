//! Reading types produced by the host probes.
//!
//! Every field that a host may fail to report is an `Option`; `None` means
//! "not observed", never "zero".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Static device facts read once at startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Operating system name plus CPU architecture, e.g. `Ubuntu x86_64`.
    pub platform: Option<String>,
    /// Hardware vendor as reported by firmware.
    pub vendor: Option<String>,
    /// Desktop scale factor.
    pub pixel_ratio: Option<f64>,
    /// Logical CPU count.
    pub hardware_concurrency: Option<usize>,
    /// Touch points. A terminal host cannot observe these.
    pub max_touch_points: Option<u32>,
    /// IANA zone name, or a UTC offset when no zone name is known.
    pub timezone: Option<String>,
    /// BCP 47-style language tag derived from the locale, e.g. `en-US`.
    pub language: Option<String>,
    /// Whether a non-loopback interface is up.
    pub online: Option<bool>,
    /// Total physical memory in bytes.
    pub total_memory: Option<u64>,
    /// Used physical memory in bytes.
    pub used_memory: Option<u64>,
    /// Capacity of the root (or largest) disk in bytes.
    pub disk_total: Option<u64>,
    /// Free space on that disk in bytes.
    pub disk_available: Option<u64>,
}

/// One battery sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatteryReading {
    /// Charge level as a whole percentage (0-100).
    pub level: u8,
    /// Whether external power is connected.
    pub charging: bool,
}

/// Coarse connection class, using the Network Information API vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectiveType {
    /// Very slow or very high latency.
    #[serde(rename = "slow-2g")]
    Slow2g,
    /// 2G-class link.
    #[serde(rename = "2g")]
    TwoG,
    /// 3G-class link.
    #[serde(rename = "3g")]
    ThreeG,
    /// Anything faster.
    #[serde(rename = "4g")]
    FourG,
}

impl EffectiveType {
    /// Number of signal bars (1-4) shown for this class.
    pub fn strength(self) -> u8 {
        match self {
            EffectiveType::Slow2g => 1,
            EffectiveType::TwoG => 2,
            EffectiveType::ThreeG => 3,
            EffectiveType::FourG => 4,
        }
    }
}

impl fmt::Display for EffectiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EffectiveType::Slow2g => "slow-2g",
            EffectiveType::TwoG => "2g",
            EffectiveType::ThreeG => "3g",
            EffectiveType::FourG => "4g",
        };
        write!(f, "{}", s)
    }
}

/// Error type for parsing an [`EffectiveType`] from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEffectiveTypeError(pub String);

impl fmt::Display for ParseEffectiveTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid effective type: {}", self.0)
    }
}

impl std::error::Error for ParseEffectiveTypeError {}

impl FromStr for EffectiveType {
    type Err = ParseEffectiveTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "slow-2g" => Ok(EffectiveType::Slow2g),
            "2g" => Ok(EffectiveType::TwoG),
            "3g" => Ok(EffectiveType::ThreeG),
            "4g" => Ok(EffectiveType::FourG),
            _ => Err(ParseEffectiveTypeError(s.to_string())),
        }
    }
}

/// One network sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkReading {
    /// Connection class derived from `rtt` and `downlink`.
    pub effective_type: Option<EffectiveType>,
    /// Link capacity in Mbps.
    pub downlink: Option<f64>,
    /// Round-trip time in milliseconds.
    pub rtt: Option<u32>,
    /// Whether the reachability probe succeeded.
    pub online: bool,
}

/// Result of a one-shot location query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Accuracy radius in meters, when the service reports one.
    pub accuracy: Option<f64>,
}

/// A capability that can be sampled repeatedly.
///
/// `sample` blocks; callers on an async runtime run it on a blocking thread.
/// Returning `None` means the capability vanished for this sample.
pub trait Probe: Send + 'static {
    /// Reading produced by one sample.
    type Reading: Clone + PartialEq + Send + 'static;

    /// Takes one sample.
    fn sample(&mut self) -> Option<Self::Reading>;
}
