//! Device signals shown by the widgets.
//!
//! [`SignalState`] is a flat record of every reading; each field is
//! optional and absent until a probe reports it. It is only ever changed by
//! applying a [`SignalUpdate`], which the collector produces.

pub mod collector;
pub mod subscription;
pub mod terminal;

use host_signals::{BatteryReading, DeviceInfo, EffectiveType, NetworkReading};
use serde::Serialize;

pub use collector::{snapshot, CollectorMessage, LocationRequest, SignalCollector};
pub use subscription::{subscribe, Capability, Subscription};
pub use terminal::DisplayInfo;

/// Every reading the dashboard knows about.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SignalState {
    pub platform: Option<String>,
    pub vendor: Option<String>,
    pub screen_width: Option<u32>,
    pub screen_height: Option<u32>,
    pub viewport_width: Option<u16>,
    pub viewport_height: Option<u16>,
    pub pixel_ratio: Option<f64>,
    pub color_depth: Option<u8>,
    pub hardware_concurrency: Option<usize>,
    pub max_touch_points: Option<u32>,
    pub timezone: Option<String>,
    pub language: Option<String>,
    pub online: Option<bool>,
    /// Percent, 0-100.
    pub battery_level: Option<u8>,
    pub charging: Option<bool>,
    pub effective_type: Option<EffectiveType>,
    /// Mbps.
    pub downlink: Option<f64>,
    /// Milliseconds.
    pub rtt: Option<u32>,
    /// Bytes.
    pub total_memory: Option<u64>,
    /// Bytes.
    pub used_memory: Option<u64>,
    /// Bytes.
    pub disk_total: Option<u64>,
    /// Bytes.
    pub disk_available: Option<u64>,
}

/// One change to [`SignalState`].
#[derive(Debug, Clone, PartialEq)]
pub enum SignalUpdate {
    /// Static device facts, read once.
    Device(DeviceInfo),
    /// Terminal window and color depth.
    Display(DisplayInfo),
    /// Terminal resized to columns × rows.
    Viewport {
        /// Columns.
        width: u16,
        /// Rows.
        height: u16,
    },
    /// Battery sample.
    Battery(BatteryReading),
    /// Network sample.
    Network(NetworkReading),
    /// A watched capability stopped reporting; its readings fall back.
    Lost(Capability),
}

impl SignalState {
    /// Folds `update` into the state.
    pub fn apply(&mut self, update: SignalUpdate) {
        match update {
            SignalUpdate::Device(info) => {
                self.platform = info.platform;
                self.vendor = info.vendor;
                self.pixel_ratio = info.pixel_ratio;
                self.hardware_concurrency = info.hardware_concurrency;
                self.max_touch_points = info.max_touch_points;
                self.timezone = info.timezone;
                self.language = info.language;
                // A network probe result is fresher than the startup guess
                if self.online.is_none() {
                    self.online = info.online;
                }
                self.total_memory = info.total_memory;
                self.used_memory = info.used_memory;
                self.disk_total = info.disk_total;
                self.disk_available = info.disk_available;
            }
            SignalUpdate::Display(display) => {
                self.screen_width = display.screen_width;
                self.screen_height = display.screen_height;
                self.viewport_width = display.viewport_width;
                self.viewport_height = display.viewport_height;
                self.color_depth = display.color_depth;
            }
            SignalUpdate::Viewport { width, height } => {
                self.viewport_width = Some(width);
                self.viewport_height = Some(height);
            }
            SignalUpdate::Battery(reading) => {
                self.battery_level = Some(reading.level);
                self.charging = Some(reading.charging);
            }
            SignalUpdate::Network(reading) => {
                self.effective_type = reading.effective_type;
                self.downlink = reading.downlink;
                self.rtt = reading.rtt;
                self.online = Some(reading.online);
            }
            SignalUpdate::Lost(Capability::Battery) => {
                self.battery_level = None;
                self.charging = None;
            }
            SignalUpdate::Lost(Capability::Network) => {
                self.effective_type = None;
                self.downlink = None;
                self.rtt = None;
            }
        }
    }
}
