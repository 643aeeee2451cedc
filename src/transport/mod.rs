//! Transport layer for metric datagrams.
//!
//! Provides the transport abstraction the [`Monitor`](crate::Monitor)
//! sends through, and the UDP implementation targeting a DogStatsD agent.

use std::fmt;
use std::net::UdpSocket;

use crate::config::MonitorConfig;
use crate::errors::MonitoringResult;

/// Trait for the metrics transport abstraction.
///
/// Implementations must be safe to share across threads; the monitor is
/// invoked concurrently from many call sites through one instance.
pub trait MetricsTransport: Send + Sync + fmt::Debug {
    /// Sends one encoded datagram, fire-and-forget.
    ///
    /// There is no acknowledgment and no buffering beyond what the OS
    /// socket does internally. Errors are returned to the caller verbatim.
    fn send(&self, datagram: &str) -> MonitoringResult<()>;
}

/// UDP transport connected to a DogStatsD agent.
pub struct UdpTransport {
    socket: UdpSocket,
    address: String,
}

impl fmt::Debug for UdpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UdpTransport")
            .field("address", &self.address)
            .finish()
    }
}

impl UdpTransport {
    /// Binds an ephemeral local socket and connects it to the agent
    /// address from the configuration.
    ///
    /// Fails when the address does not resolve or the socket cannot be
    /// created; the caller should treat that as fatal (no partial monitor
    /// is constructed from a failed transport).
    pub fn connect(config: &MonitorConfig) -> MonitoringResult<Self> {
        let address = config.address();
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        socket.connect(&address)?;
        Ok(Self { socket, address })
    }

    /// Returns the agent address this transport is connected to.
    pub fn address(&self) -> &str {
        &self.address
    }
}

impl MetricsTransport for UdpTransport {
    fn send(&self, datagram: &str) -> MonitoringResult<()> {
        self.socket.send(datagram.as_bytes())?;
        Ok(())
    }
}
