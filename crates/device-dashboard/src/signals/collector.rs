//! Gathers every signal and forwards it to the UI as messages.
//!
//! The collector owns all subscriptions. The UI drains the receiving end of
//! its channel before each frame and applies the updates to its own
//! [`SignalState`](super::SignalState); nothing else writes to the state.

use host_signals::{NetworkProbe, Position, SystemBattery};
use tokio::sync::mpsc;

use super::subscription::{subscribe, Capability, Subscription};
use super::terminal::read_display;
use super::{SignalState, SignalUpdate};
use crate::config::schema::{LocationConfig, SignalsConfig};

/// Messages sent from the collector to the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectorMessage {
    /// A reading changed.
    Signal(SignalUpdate),
    /// A location request finished.
    Location(Result<Position, String>),
}

/// Outcome of asking for a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationRequest {
    /// The query is running; a [`CollectorMessage::Location`] follows.
    Started,
    /// Location lookups are turned off.
    Disabled,
}

/// Owns the subscriptions and the sending half of the UI channel.
#[derive(Debug)]
pub struct SignalCollector {
    tx: mpsc::UnboundedSender<CollectorMessage>,
    location: LocationConfig,
    subscriptions: Vec<Subscription>,
}

impl SignalCollector {
    /// Creates a collector and the receiver the UI drains.
    pub fn channel(location: LocationConfig) -> (Self, mpsc::UnboundedReceiver<CollectorMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                tx,
                location,
                subscriptions: Vec::new(),
            },
            rx,
        )
    }

    /// Reads static properties and subscribes to battery and network.
    ///
    /// The display is read inline; device facts are read on the blocking
    /// pool because disk enumeration can be slow.
    pub async fn start(&mut self, signals: &SignalsConfig) {
        self.send(SignalUpdate::Display(read_display()));

        let tx = self.tx.clone();
        tokio::spawn(async move {
            match tokio::task::spawn_blocking(host_signals::read_device_info).await {
                Ok(info) => {
                    let _ = tx.send(CollectorMessage::Signal(SignalUpdate::Device(info)));
                }
                Err(e) => tracing::warn!("Device info task failed: {}", e),
            }
        });

        for capability in [Capability::Battery, Capability::Network] {
            let tx = self.tx.clone();
            let subscription = subscribe(capability, signals, move |update| {
                let _ = tx.send(CollectorMessage::Signal(update));
            })
            .await;
            match subscription {
                Some(sub) => self.subscriptions.push(sub),
                None => tracing::info!("{} readings unavailable, showing fallbacks", capability),
            }
        }
    }

    /// Active subscriptions.
    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    /// Forwards a resize.
    pub fn viewport_changed(&self, width: u16, height: u16) {
        self.send(SignalUpdate::Viewport { width, height });
    }

    /// Starts a one-shot location lookup.
    pub fn request_location(&self) -> LocationRequest {
        if !self.location.enabled {
            return LocationRequest::Disabled;
        }
        let timeout = match self.location.timeout() {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!("{}", e);
                return LocationRequest::Disabled;
            }
        };
        let endpoint = self.location.endpoint.clone();
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let result =
                tokio::task::spawn_blocking(move || host_signals::locate(&endpoint, timeout)).await;
            let message = match result {
                Ok(Ok(position)) => Ok(position),
                Ok(Err(e)) => {
                    tracing::warn!("Location lookup failed: {}", e);
                    Err(e.to_string())
                }
                Err(e) => {
                    tracing::warn!("Location task failed: {}", e);
                    Err(e.to_string())
                }
            };
            let _ = tx.send(CollectorMessage::Location(message));
        });
        LocationRequest::Started
    }

    fn send(&self, update: SignalUpdate) {
        if self.tx.send(CollectorMessage::Signal(update)).is_err() {
            tracing::debug!("UI channel closed, dropping update");
        }
    }
}

/// Takes one reading of everything, blocking. Used by `ddash snapshot`.
pub fn snapshot(signals: &SignalsConfig) -> SignalState {
    let mut state = SignalState::default();
    state.apply(SignalUpdate::Device(host_signals::read_device_info()));
    state.apply(SignalUpdate::Display(read_display()));

    if signals.battery {
        match SystemBattery::open().and_then(|b| match b {
            Some(b) => b.read(),
            None => Ok(None),
        }) {
            Ok(Some(reading)) => state.apply(SignalUpdate::Battery(reading)),
            Ok(None) => tracing::debug!("No battery on this host"),
            Err(e) => tracing::warn!("Battery unavailable: {}", e),
        }
    }

    if signals.network {
        match signals.probe_timeout() {
            Ok(timeout) => {
                let probe = NetworkProbe::new(signals.probe_address.clone(), timeout);
                state.apply(SignalUpdate::Network(probe.read()));
            }
            Err(e) => tracing::warn!("{}", e),
        }
    }
    state
}
