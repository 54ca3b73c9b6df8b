//! Outbound command dispatch
//!
//! Commands are fire-and-forget datagrams over an unreliable transport: no
//! acknowledgment is solicited, and a remote rejection is indistinguishable
//! from a dropped packet. The send socket is independent of the receive path
//! and shares no state with it beyond the destination host.

use crate::error::{Error, Result};
use crate::protocol::Command;
use std::net::{SocketAddr, UdpSocket};
use std::sync::atomic::{AtomicU64, Ordering};

/// Dispatches operator commands to the device's command port
pub struct CommandDispatcher {
    socket: UdpSocket,
    destination: SocketAddr,
    sent: AtomicU64,
}

impl CommandDispatcher {
    /// Open a long-lived send socket on an ephemeral port
    pub fn new(destination: SocketAddr) -> Result<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0").map_err(Error::Dispatch)?;
        Ok(Self {
            socket,
            destination,
            sent: AtomicU64::new(0),
        })
    }

    /// Configured destination
    pub fn destination(&self) -> SocketAddr {
        self.destination
    }

    /// Commands handed to the kernel so far
    pub fn sent_count(&self) -> u64 {
        self.sent.load(Ordering::Relaxed)
    }

    /// Send one command as a single complete datagram
    ///
    /// Returns as soon as the datagram leaves this host; whether anything is
    /// listening is the operator's problem, re-issuing on no effect. Errors
    /// are purely local socket failures.
    pub fn send(&self, command: &Command) -> Result<()> {
        let payload = command.token().as_bytes();
        let sent = self
            .socket
            .send_to(payload, self.destination)
            .map_err(Error::Dispatch)?;
        if sent != payload.len() {
            return Err(Error::Other(format!(
                "Short command send: {} of {} bytes",
                sent,
                payload.len()
            )));
        }

        self.sent.fetch_add(1, Ordering::Relaxed);
        log::info!("Dispatched command {} to {}", command, self.destination);
        Ok(())
    }
}
