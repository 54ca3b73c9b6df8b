//! UDP telemetry receive loop
//!
//! One worker owns the inbound socket for the lifetime of the process. The
//! socket carries a bounded read timeout so the loop can poll the shutdown
//! flag instead of blocking forever. Per-datagram failures are logged,
//! counted and dropped; nothing short of the shutdown flag ends the loop.

use crate::error::{Error, Result};
use crate::link::state::{LinkStateStore, TelemetryUpdate};
use crate::protocol::{AttitudeLine, DecodeError, ProtocolMode, StatusUpdate, TelemetryFrame};
use crossbeam_channel::Sender;
use std::io::ErrorKind;
use std::net::{SocketAddr, UdpSocket};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Receive poll interval - bounds how long shutdown can lag
const RECV_TIMEOUT: Duration = Duration::from_secs(1);

/// Largest accepted datagram (binary frames are 19 bytes, text/json lines
/// stay well under this)
const MAX_DATAGRAM_SIZE: usize = 1024;

/// Telemetry receiver owning the ingest socket
pub struct TelemetryReceiver {
    socket: UdpSocket,
    mode: ProtocolMode,
    device_tag: String,
    store: Arc<LinkStateStore>,
    running: Arc<AtomicBool>,
    events: Option<Sender<TelemetryUpdate>>,
}

impl TelemetryReceiver {
    /// Bind the ingest socket
    ///
    /// Failure here is fatal and must abort startup before any loop runs.
    pub fn bind(
        addr: &str,
        mode: ProtocolMode,
        device_tag: &str,
        store: Arc<LinkStateStore>,
        running: Arc<AtomicBool>,
    ) -> Result<Self> {
        let socket = UdpSocket::bind(addr).map_err(|source| Error::Bind {
            addr: addr.to_string(),
            source,
        })?;
        socket.set_read_timeout(Some(RECV_TIMEOUT))?;

        Ok(Self {
            socket,
            mode,
            device_tag: device_tag.to_string(),
            store,
            running,
            events: None,
        })
    }

    /// Also hand each decoded update to a downstream consumer (e.g. a pass
    /// archiver), in addition to the state store
    pub fn with_events(mut self, sender: Sender<TelemetryUpdate>) -> Self {
        self.events = Some(sender);
        self
    }

    /// Actual bound address (useful with port-0 binds)
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Run the receive loop until the shutdown flag clears
    pub fn run(&mut self) {
        log::info!(
            "Telemetry receiver started on {} ({:?} mode)",
            self.socket
                .local_addr()
                .map(|a| a.to_string())
                .unwrap_or_else(|_| "?".to_string()),
            self.mode
        );

        let mut buf = [0u8; MAX_DATAGRAM_SIZE];

        while self.running.load(Ordering::Relaxed) {
            let (len, from) = match self.socket.recv_from(&mut buf) {
                Ok(received) => received,
                Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                    // Receive timeout - just poll the shutdown flag again
                    continue;
                }
                Err(e) => {
                    log::warn!("Telemetry socket error: {}", e);
                    continue;
                }
            };

            match self.decode(&buf[..len]) {
                Ok(update) => {
                    let mut consumer_gone = false;
                    if let Some(tx) = &self.events {
                        if tx.send(update.clone()).is_err() {
                            consumer_gone = true;
                        }
                    }
                    if consumer_gone {
                        log::debug!("Telemetry event consumer disconnected");
                        self.events = None;
                    }

                    self.store.apply(update);
                    log::trace!("Applied {} byte datagram from {}", len, from);
                }
                Err(e) => {
                    self.store
                        .counters()
                        .decode_failures
                        .fetch_add(1, Ordering::Relaxed);
                    log::debug!("Dropped malformed datagram from {} ({} bytes): {}", from, len, e);
                }
            }
        }

        log::info!("Telemetry receiver stopped");
    }

    fn decode(&self, payload: &[u8]) -> std::result::Result<TelemetryUpdate, DecodeError> {
        match self.mode {
            ProtocolMode::Binary => TelemetryFrame::decode(payload).map(TelemetryUpdate::Power),
            ProtocolMode::Text => {
                let line = std::str::from_utf8(payload).map_err(|_| DecodeError::NotUtf8)?;
                AttitudeLine::decode(line, &self.device_tag).map(TelemetryUpdate::Attitude)
            }
            ProtocolMode::Json => StatusUpdate::decode(payload).map(TelemetryUpdate::Status),
        }
    }

    /// Spawn the loop on a dedicated named worker
    pub fn spawn(mut self) -> Result<JoinHandle<()>> {
        thread::Builder::new()
            .name("telemetry-rx".to_string())
            .spawn(move || self.run())
            .map_err(|e| Error::Other(format!("Failed to spawn telemetry receiver: {}", e)))
    }
}
