//! # host-signals
//!
//! Synchronous readers for the device signals a dashboard shows: static
//! device facts, battery, network quality and a one-shot location.
//!
//! ## Features
//!
//! - Every reading is optional: hosts without a battery or network simply
//!   report nothing
//! - Battery and network probes implement [`Probe`] so callers can poll them
//!   and react to changes
//! - Network quality is classified into the familiar `slow-2g`..`4g` classes
//!
//! ## Example
//!
//! ```rust,ignore
//! use host_signals::{read_device_info, NetworkProbe};
//!
//! let info = read_device_info();
//! println!("platform: {:?}", info.platform);
//! println!("network: {:?}", NetworkProbe::default().read().effective_type);
//! ```

pub mod battery;
pub mod device;
pub mod error;
pub mod geolocation;
pub mod network;
pub mod types;

pub use battery::SystemBattery;
pub use device::read_device_info;
pub use error::SignalError;
#[cfg(feature = "blocking")]
pub use geolocation::locate;
pub use network::{classify, NetworkProbe};
pub use types::{BatteryReading, DeviceInfo, EffectiveType, NetworkReading, Position, Probe};
