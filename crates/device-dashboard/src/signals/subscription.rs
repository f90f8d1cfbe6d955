//! Change subscriptions for polled capabilities.
//!
//! A subscription is a tokio task that samples a [`Probe`] on an interval
//! and reports readings that differ from the previous one, including a
//! reading that disappears. Probes block, so opening and sampling them
//! always happens on the blocking pool.

use std::fmt;
use std::time::Duration;

use host_signals::{NetworkProbe, Probe, SystemBattery};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::SignalUpdate;
use crate::config::schema::SignalsConfig;

/// A host capability that can be watched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Battery level and charging state.
    Battery,
    /// Network class, link speed and latency.
    Network,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Battery => write!(f, "battery"),
            Capability::Network => write!(f, "network"),
        }
    }
}

/// Handle on a running watch task. Dropping it stops the task.
#[derive(Debug)]
pub struct Subscription {
    capability: Capability,
    handle: JoinHandle<()>,
}

impl Subscription {
    /// Which capability is being watched.
    pub fn capability(&self) -> Capability {
        self.capability
    }

    /// Whether the watch task is still running.
    pub fn is_active(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Stops the watch task.
    pub fn unsubscribe(self) {
        tracing::debug!("Unsubscribing from {}", self.capability);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Starts watching `capability` with the settings in `config`.
///
/// `on_change` receives the first reading and then every reading that
/// differs from the last one. When a capability stops reporting it receives
/// [`SignalUpdate::Lost`] so the fields fall back. Returns `None` when the
/// capability is disabled or missing on this host.
pub async fn subscribe<F>(
    capability: Capability,
    config: &SignalsConfig,
    mut on_change: F,
) -> Option<Subscription>
where
    F: FnMut(SignalUpdate) + Send + 'static,
{
    match capability {
        Capability::Battery => {
            if !config.battery {
                tracing::debug!("Battery watching disabled in config");
                return None;
            }
            let interval = interval_or_warn(config.battery_poll_interval())?;
            let battery = match tokio::task::spawn_blocking(SystemBattery::open).await {
                Ok(Ok(Some(battery))) => battery,
                Ok(Ok(None)) => {
                    tracing::info!("No battery on this host");
                    return None;
                }
                Ok(Err(e)) => {
                    tracing::warn!("Battery unavailable: {}", e);
                    return None;
                }
                Err(e) => {
                    tracing::warn!("Battery open task failed: {}", e);
                    return None;
                }
            };
            Some(watch(capability, battery, interval, move |reading| {
                on_change(reading.map_or(SignalUpdate::Lost(capability), SignalUpdate::Battery))
            }))
        }
        Capability::Network => {
            if !config.network {
                tracing::debug!("Network watching disabled in config");
                return None;
            }
            let interval = interval_or_warn(config.network_poll_interval())?;
            let timeout = interval_or_warn(config.probe_timeout())?;
            let probe = NetworkProbe::new(config.probe_address.clone(), timeout);
            Some(watch(capability, probe, interval, move |reading| {
                on_change(reading.map_or(SignalUpdate::Lost(capability), SignalUpdate::Network))
            }))
        }
    }
}

fn interval_or_warn(
    parsed: Result<Duration, crate::config::error::ConfigError>,
) -> Option<Duration> {
    match parsed {
        Ok(d) => Some(d),
        Err(e) => {
            tracing::warn!("{}", e);
            None
        }
    }
}

/// Samples `probe` every `interval` and calls `on_change` with new readings.
///
/// A sample of `None` after a reading is reported once as `None`; leading
/// `None` samples are not reported.
pub fn watch<P, F>(capability: Capability, probe: P, interval: Duration, mut on_change: F) -> Subscription
where
    P: Probe,
    F: FnMut(Option<P::Reading>) + Send + 'static,
{
    let handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut probe = probe;
        let mut last: Option<P::Reading> = None;

        loop {
            ticker.tick().await;
            let sampled = tokio::task::spawn_blocking(move || {
                let reading = probe.sample();
                (probe, reading)
            })
            .await;
            let reading = match sampled {
                Ok((returned, reading)) => {
                    probe = returned;
                    reading
                }
                Err(e) => {
                    tracing::warn!("{} probe task failed: {}", capability, e);
                    break;
                }
            };

            if reading == last {
                continue;
            }
            match &reading {
                Some(_) => tracing::trace!("{} changed", capability),
                None => tracing::debug!("{} stopped reporting", capability),
            }
            on_change(reading.clone());
            last = reading;
        }
    });

    tracing::debug!("Subscribed to {} every {:?}", capability, interval);
    Subscription { capability, handle }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    /// Replays a fixed sequence, then repeats the last value.
    struct ScriptedProbe {
        script: Vec<Option<u32>>,
        next: usize,
    }

    impl ScriptedProbe {
        fn new(script: Vec<Option<u32>>) -> Self {
            Self { script, next: 0 }
        }
    }

    impl Probe for ScriptedProbe {
        type Reading = u32;

        fn sample(&mut self) -> Option<u32> {
            let idx = self.next.min(self.script.len() - 1);
            self.next += 1;
            self.script[idx]
        }
    }

    /// `None` on timeout; `Some(reading)` otherwise.
    async fn recv_within(
        rx: &mut mpsc::UnboundedReceiver<Option<u32>>,
        ms: u64,
    ) -> Option<Option<u32>> {
        tokio::time::timeout(Duration::from_millis(ms), rx.recv())
            .await
            .ok()
            .flatten()
    }

    #[tokio::test]
    async fn reports_only_changes() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let probe = ScriptedProbe::new(vec![None, Some(1), Some(1), Some(2), Some(2), Some(3)]);
        let _sub = watch(Capability::Battery, probe, Duration::from_millis(5), move |r| {
            let _ = tx.send(r);
        });

        assert_eq!(recv_within(&mut rx, 1000).await, Some(Some(1)), "leading gap is silent");
        assert_eq!(recv_within(&mut rx, 1000).await, Some(Some(2)));
        assert_eq!(recv_within(&mut rx, 1000).await, Some(Some(3)));
        assert_eq!(recv_within(&mut rx, 100).await, None, "steady value is not re-sent");
    }

    #[tokio::test]
    async fn reading_that_disappears_is_reported_once() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let probe = ScriptedProbe::new(vec![Some(80), None, None, Some(79), None]);
        let _sub = watch(Capability::Battery, probe, Duration::from_millis(5), move |r| {
            let _ = tx.send(r);
        });

        assert_eq!(recv_within(&mut rx, 1000).await, Some(Some(80)));
        assert_eq!(recv_within(&mut rx, 1000).await, Some(None));
        assert_eq!(recv_within(&mut rx, 1000).await, Some(Some(79)));
        assert_eq!(recv_within(&mut rx, 1000).await, Some(None));
        assert_eq!(recv_within(&mut rx, 100).await, None);
    }

    #[tokio::test]
    async fn dropping_subscription_stops_task() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let probe = ScriptedProbe::new(vec![Some(7)]);
        let sub = watch(Capability::Network, probe, Duration::from_millis(5), move |r| {
            let _ = tx.send(r);
        });
        assert_eq!(recv_within(&mut rx, 1000).await, Some(Some(7)));
        assert_eq!(sub.capability(), Capability::Network);

        sub.unsubscribe();
        // The callback (and its sender) is dropped with the aborted task
        let closed = tokio::time::timeout(Duration::from_secs(1), rx.recv()).await;
        assert_eq!(closed.expect("channel should close"), None);
    }

    #[tokio::test]
    async fn disabled_capabilities_return_none() {
        let config = SignalsConfig {
            battery: false,
            network: false,
            ..SignalsConfig::default()
        };
        assert!(subscribe(Capability::Battery, &config, |_| {}).await.is_none());
        assert!(subscribe(Capability::Network, &config, |_| {}).await.is_none());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn battery_subscription_opens_without_stalling_the_runtime() {
        let ticker = tokio::spawn(async {
            tokio::time::sleep(Duration::from_millis(1)).await;
        });
        let sub = subscribe(Capability::Battery, &SignalsConfig::default(), |_| {}).await;
        if let Some(sub) = sub {
            assert_eq!(sub.capability(), Capability::Battery);
            assert!(sub.is_active());
        }
        tokio::time::timeout(Duration::from_secs(1), ticker)
            .await
            .expect("runtime kept running")
            .expect("ticker task");
    }

    #[tokio::test]
    async fn network_subscription_is_active_until_dropped() {
        let config = SignalsConfig {
            probe_address: "127.0.0.1:9".to_string(),
            probe_timeout: "50ms".to_string(),
            ..SignalsConfig::default()
        };
        let sub = subscribe(Capability::Network, &config, |_| {})
            .await
            .expect("network is always available");
        assert!(sub.is_active());
    }

    #[test]
    fn capability_display() {
        assert_eq!(Capability::Battery.to_string(), "battery");
        assert_eq!(Capability::Network.to_string(), "network");
    }
}
