//! Shared link state
//!
//! One store per process, created at startup with zeroed telemetry. The
//! telemetry receive loop is the only writer; any number of observers read
//! snapshots. A single mutex guards the whole telemetry record together with
//! its timestamp so a merged update becomes visible as one unit - readers
//! never see old attitude paired with new power values.

use crate::link::liveness;
use crate::protocol::{AttitudeLine, DeviceStatus, StatusUpdate, TelemetryFrame};
use parking_lot::Mutex;
use std::sync::atomic::AtomicU64;
use std::time::{Duration, Instant};

/// Latest decoded readings from the device
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Telemetry {
    /// Pitch angle (degrees)
    pub pitch: f32,
    /// Roll angle (degrees)
    pub roll: f32,
    /// Yaw angle (degrees)
    pub yaw: f32,
    /// Z-axis acceleration (m/s^2)
    pub accel_z: f32,
    /// Solar light sensor reading
    pub light: f32,
    /// Battery bus voltage (V)
    pub voltage: f32,
    /// Solar panel current (A)
    pub current: f32,
    /// Internal temperature (C)
    pub temperature: f32,
    /// Status message from the last binary frame
    pub message: String,
    /// Device status block
    pub status: DeviceStatus,
}

/// Fields one successfully decoded datagram contributes
///
/// Each variant is a partial record: fields it does not carry keep their
/// previously stored value.
#[derive(Debug, Clone, PartialEq)]
pub enum TelemetryUpdate {
    /// Binary frame: power subsystem plus status message
    Power(TelemetryFrame),
    /// Text line: attitude plus light sensor
    Attitude(AttitudeLine),
    /// JSON datagram: any subset of attitude plus device status
    Status(StatusUpdate),
}

/// Read-only view of the link served to presentation collaborators
#[derive(Debug, Clone)]
pub struct LinkSnapshot {
    /// Derived at snapshot time from `last_update`, never stored
    pub connected: bool,
    /// When the last datagram decoded successfully (None = never)
    pub last_update: Option<Instant>,
    /// Full telemetry record
    pub telemetry: Telemetry,
}

/// Lock-free diagnostic counters
#[derive(Debug, Default)]
pub struct LinkCounters {
    /// Datagrams that decoded and were applied
    pub frames_received: AtomicU64,
    /// Datagrams dropped by the codec
    pub decode_failures: AtomicU64,
}

struct Inner {
    telemetry: Telemetry,
    last_update: Option<Instant>,
}

/// Shared store holding the latest telemetry and its timestamp
pub struct LinkStateStore {
    inner: Mutex<Inner>,
    timeout: Duration,
    counters: LinkCounters,
}

impl LinkStateStore {
    /// Create a store with zeroed telemetry and the given liveness timeout
    pub fn new(timeout: Duration) -> Self {
        Self {
            inner: Mutex::new(Inner {
                telemetry: Telemetry::default(),
                last_update: None,
            }),
            timeout,
            counters: LinkCounters::default(),
        }
    }

    /// Merge one decoded datagram and stamp the update time
    ///
    /// Runs under a single lock acquisition: concurrent readers observe
    /// either the pre-update or the fully post-update record.
    pub fn apply(&self, update: TelemetryUpdate) {
        let now = Instant::now();
        let mut inner = self.inner.lock();
        match update {
            TelemetryUpdate::Power(frame) => {
                inner.telemetry.voltage = frame.voltage;
                inner.telemetry.current = frame.current;
                inner.telemetry.temperature = frame.temperature;
                inner.telemetry.message = frame.message;
            }
            TelemetryUpdate::Attitude(line) => {
                inner.telemetry.pitch = line.pitch;
                inner.telemetry.roll = line.roll;
                inner.telemetry.light = line.light;
                inner.telemetry.accel_z = line.accel_z;
            }
            TelemetryUpdate::Status(update) => {
                let t = &mut inner.telemetry;
                if let Some(v) = update.pitch {
                    t.pitch = v;
                }
                if let Some(v) = update.roll {
                    t.roll = v;
                }
                if let Some(v) = update.yaw {
                    t.yaw = v;
                }
                if let Some(v) = update.accel_z {
                    t.accel_z = v;
                }
                if let Some(v) = update.light {
                    t.light = v;
                }
                if let Some(v) = update.status {
                    t.status = v;
                }
            }
        }
        inner.last_update = Some(now);
        drop(inner);

        self.counters
            .frames_received
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
    }

    /// Take an atomic snapshot, deriving `connected` at read time
    pub fn snapshot(&self) -> LinkSnapshot {
        let now = Instant::now();
        let inner = self.inner.lock();
        LinkSnapshot {
            connected: liveness::is_connected(inner.last_update, now, self.timeout),
            last_update: inner.last_update,
            telemetry: inner.telemetry.clone(),
        }
    }

    /// Configured liveness timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Diagnostic counters
    pub fn counters(&self) -> &LinkCounters {
        &self.counters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{LedState, SolarPanel};
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    fn power(voltage: f32, message: &str) -> TelemetryUpdate {
        TelemetryUpdate::Power(TelemetryFrame {
            voltage,
            current: 0.5,
            temperature: 35.0,
            message: message.to_string(),
        })
    }

    #[test]
    fn test_initial_state_is_disconnected_zeroed() {
        let store = LinkStateStore::new(Duration::from_secs(2));
        let snap = store.snapshot();
        assert!(!snap.connected);
        assert!(snap.last_update.is_none());
        assert_eq!(snap.telemetry, Telemetry::default());
        assert_eq!(snap.telemetry.status.solar, SolarPanel::Retracted);
    }

    #[test]
    fn test_apply_flips_connected() {
        let store = LinkStateStore::new(Duration::from_secs(2));
        store.apply(power(8.0, "ALL_OK"));

        let snap = store.snapshot();
        assert!(snap.connected);
        assert_eq!(snap.telemetry.voltage, 8.0);
        assert_eq!(snap.telemetry.message, "ALL_OK");
        assert_eq!(store.counters().frames_received.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_connection_goes_stale() {
        let store = LinkStateStore::new(Duration::from_millis(30));
        store.apply(power(8.0, "ALL_OK"));
        assert!(store.snapshot().connected);

        std::thread::sleep(Duration::from_millis(60));
        let snap = store.snapshot();
        assert!(!snap.connected);
        // Values stop changing but are not cleared
        assert_eq!(snap.telemetry.voltage, 8.0);
    }

    #[test]
    fn test_partial_updates_merge() {
        let store = LinkStateStore::new(Duration::from_secs(2));

        store.apply(power(7.4, "CHARGING"));
        store.apply(TelemetryUpdate::Attitude(AttitudeLine {
            pitch: 10.0,
            roll: -2.0,
            light: 512.0,
            accel_z: 9.78,
        }));

        let t = store.snapshot().telemetry;
        // Attitude arrived without clobbering the earlier power frame
        assert_eq!(t.voltage, 7.4);
        assert_eq!(t.message, "CHARGING");
        assert_eq!(t.pitch, 10.0);
        assert_eq!(t.light, 512.0);

        // A sparse JSON update touches only the fields it carries
        store.apply(TelemetryUpdate::Status(StatusUpdate {
            yaw: Some(90.0),
            status: Some(DeviceStatus {
                led: LedState::On,
                solar: SolarPanel::Deployed,
                ..Default::default()
            }),
            ..Default::default()
        }));

        let t = store.snapshot().telemetry;
        assert_eq!(t.yaw, 90.0);
        assert_eq!(t.pitch, 10.0);
        assert_eq!(t.voltage, 7.4);
        assert_eq!(t.status.led, LedState::On);
        assert_eq!(t.status.solar, SolarPanel::Deployed);
    }

    #[test]
    fn test_readers_never_observe_torn_record() {
        // The writer always keeps voltage and message consistent; readers
        // must never catch one without the other.
        let store = Arc::new(LinkStateStore::new(Duration::from_secs(2)));
        let readers: Vec<_> = (0..2)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for _ in 0..2000 {
                        let t = store.snapshot().telemetry;
                        if !t.message.is_empty() {
                            assert_eq!(t.message, format!("V={:.2}", t.voltage));
                        }
                    }
                })
            })
            .collect();

        for i in 0..2000 {
            let voltage = (i % 100) as f32 * 0.1;
            store.apply(power(voltage, &format!("V={:.2}", voltage)));
        }
        for handle in readers {
            handle.join().unwrap();
        }
    }
}
