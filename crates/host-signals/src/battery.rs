//! Battery level and charging state.
//!
//! The `battery` crate's manager is not `Send`, so a fresh manager is opened
//! for every sample. On Linux this is a handful of sysfs reads.

use crate::error::SignalError;
use crate::types::{BatteryReading, Probe};

/// Handle on the first battery of the host.
#[derive(Debug, Default)]
pub struct SystemBattery {
    _private: (),
}

impl SystemBattery {
    /// Checks that the host has at least one battery.
    ///
    /// Returns `Ok(None)` on hosts without a battery (desktops, VMs). An
    /// error means the platform battery interface itself failed.
    pub fn open() -> Result<Option<Self>, SignalError> {
        match read_first_battery()? {
            Some(_) => Ok(Some(Self { _private: () })),
            None => Ok(None),
        }
    }

    /// Reads the current level and charging state.
    pub fn read(&self) -> Result<Option<BatteryReading>, SignalError> {
        read_first_battery()
    }
}

impl Probe for SystemBattery {
    type Reading = BatteryReading;

    fn sample(&mut self) -> Option<BatteryReading> {
        match self.read() {
            Ok(reading) => reading,
            Err(e) => {
                log::warn!("battery sample failed: {}", e);
                None
            }
        }
    }
}

fn read_first_battery() -> Result<Option<BatteryReading>, SignalError> {
    let manager = battery::Manager::new().map_err(|e| SignalError::Battery(e.to_string()))?;
    let mut batteries = manager
        .batteries()
        .map_err(|e| SignalError::Battery(e.to_string()))?;

    match batteries.next() {
        Some(Ok(battery)) => {
            let percent = battery
                .state_of_charge()
                .get::<battery::units::ratio::percent>();
            Ok(Some(BatteryReading {
                level: percent_to_level(percent),
                charging: is_charging(battery.state()),
            }))
        }
        Some(Err(e)) => Err(SignalError::Battery(e.to_string())),
        None => Ok(None),
    }
}

/// External power counts as charging even when the battery is already full.
fn is_charging(state: battery::State) -> bool {
    matches!(state, battery::State::Charging | battery::State::Full)
}

/// Rounds a percentage to a whole level clamped to 0..=100.
fn percent_to_level(percent: f32) -> u8 {
    if !percent.is_finite() {
        return 0;
    }
    percent.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_rounds_and_clamps() {
        assert_eq!(percent_to_level(41.6), 42);
        assert_eq!(percent_to_level(100.4), 100);
        assert_eq!(percent_to_level(-3.0), 0);
        assert_eq!(percent_to_level(f32::NAN), 0);
    }

    #[test]
    fn full_battery_counts_as_charging() {
        assert!(is_charging(battery::State::Charging));
        assert!(is_charging(battery::State::Full));
        assert!(!is_charging(battery::State::Discharging));
        assert!(!is_charging(battery::State::Empty));
        assert!(!is_charging(battery::State::Unknown));
    }

    #[test]
    fn open_does_not_panic_without_battery() {
        // Hosts without a battery yield Ok(None); platforms without a
        // battery interface yield an error. Either way no panic.
        let _ = SystemBattery::open();
    }
}
