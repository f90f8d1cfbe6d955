//! Network reachability and link classification.
//!
//! A [`NetworkProbe`] combines two cheap observations:
//!
//! - the negotiated link speed of the interfaces that are up, read from
//!   `/sys/class/net`, reported as `downlink` in Mbps
//! - the time to open a TCP connection to a well-known address, reported
//!   as `rtt` in milliseconds
//!
//! Both are folded into an [`EffectiveType`] using the same thresholds as
//! the Network Information API.

use crate::types::{EffectiveType, NetworkReading, Probe};
use std::fs;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Default reachability target (Cloudflare DNS over HTTPS port).
pub const DEFAULT_PROBE_ADDRESS: &str = "1.1.1.1:443";

/// Default sysfs directory listing network interfaces.
pub const SYS_CLASS_NET: &str = "/sys/class/net";

/// RTT granularity in milliseconds.
const RTT_GRANULARITY_MS: u32 = 25;

/// Samples link speed and connect latency.
#[derive(Debug, Clone)]
pub struct NetworkProbe {
    probe_address: String,
    timeout: Duration,
    sys_class_net: PathBuf,
}

impl NetworkProbe {
    /// Creates a probe that connects to `probe_address` (`host:port`).
    pub fn new(probe_address: impl Into<String>, timeout: Duration) -> Self {
        Self {
            probe_address: probe_address.into(),
            timeout,
            sys_class_net: PathBuf::from(SYS_CLASS_NET),
        }
    }

    /// Overrides the sysfs root, used by tests.
    pub fn with_sys_class_net(mut self, path: impl Into<PathBuf>) -> Self {
        self.sys_class_net = path.into();
        self
    }

    /// Takes one reading. Never fails: unobservable fields stay `None`.
    pub fn read(&self) -> NetworkReading {
        let downlink = max_link_speed(&self.sys_class_net);
        let rtt = match connect_time(&self.probe_address, self.timeout) {
            Ok(elapsed) => Some(round_rtt(elapsed)),
            Err(e) => {
                log::debug!("network probe to {} failed: {}", self.probe_address, e);
                None
            }
        };
        NetworkReading {
            effective_type: classify(rtt, downlink),
            downlink,
            rtt,
            online: rtt.is_some(),
        }
    }
}

impl Default for NetworkProbe {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_ADDRESS, Duration::from_secs(2))
    }
}

impl Probe for NetworkProbe {
    type Reading = NetworkReading;

    fn sample(&mut self) -> Option<NetworkReading> {
        Some(self.read())
    }
}

/// Maps round-trip time and downlink to a connection class.
///
/// Returns `None` when neither input is known.
pub fn classify(rtt: Option<u32>, downlink: Option<f64>) -> Option<EffectiveType> {
    if rtt.is_none() && downlink.is_none() {
        return None;
    }
    let rtt_at_least = |ms: u32| rtt.is_some_and(|r| r >= ms);
    let downlink_below = |mbps: f64| downlink.is_some_and(|d| d < mbps);

    if rtt_at_least(2000) || downlink_below(0.05) {
        Some(EffectiveType::Slow2g)
    } else if rtt_at_least(1400) || downlink_below(0.07) {
        Some(EffectiveType::TwoG)
    } else if rtt_at_least(270) || downlink_below(0.7) {
        Some(EffectiveType::ThreeG)
    } else {
        Some(EffectiveType::FourG)
    }
}

/// Rounds a duration to the nearest 25 ms, never below 25 ms.
fn round_rtt(elapsed: Duration) -> u32 {
    let ms = elapsed.as_millis().min(u128::from(u32::MAX)) as u32;
    let rounded = (ms + RTT_GRANULARITY_MS / 2) / RTT_GRANULARITY_MS * RTT_GRANULARITY_MS;
    rounded.max(RTT_GRANULARITY_MS)
}

fn connect_time(address: &str, timeout: Duration) -> std::io::Result<Duration> {
    let addr: SocketAddr = address.to_socket_addrs()?.next().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("no address for {}", address),
        )
    })?;
    let start = Instant::now();
    let _stream = TcpStream::connect_timeout(&addr, timeout)?;
    Ok(start.elapsed())
}

/// Lists non-loopback interfaces whose operstate is `up`.
pub fn interfaces_up(sys_class_net: &Path) -> Vec<String> {
    let entries = match fs::read_dir(sys_class_net) {
        Ok(entries) => entries,
        Err(e) => {
            log::debug!("cannot list {}: {}", sys_class_net.display(), e);
            return Vec::new();
        }
    };

    let mut up: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name != "lo")
        .filter(|name| {
            fs::read_to_string(sys_class_net.join(name).join("operstate"))
                .map(|s| s.trim() == "up")
                .unwrap_or(false)
        })
        .collect();
    up.sort();
    up
}

/// Highest link speed in Mbps across interfaces that are up.
///
/// Interfaces report `-1` (or fail to read) when the driver does not know
/// the speed; those are skipped.
pub fn max_link_speed(sys_class_net: &Path) -> Option<f64> {
    interfaces_up(sys_class_net)
        .iter()
        .filter_map(|name| fs::read_to_string(sys_class_net.join(name).join("speed")).ok())
        .filter_map(|s| s.trim().parse::<i64>().ok())
        .filter(|&mbps| mbps > 0)
        .max()
        .map(|mbps| mbps as f64)
}
