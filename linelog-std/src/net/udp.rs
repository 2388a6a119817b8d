//! UDP sink implementation for the std platform.

use core::net::SocketAddr;
use std::io::ErrorKind;
use std::time::Duration;

use linelog::sink::{SinkError, UdpSink};
use socket2::{Domain, Protocol, SockAddr, Socket, Type};

use crate::IntoSinkError;

/// Blocking UDP socket sending one datagram per log line.
///
/// Sends are bounded by the write timeout given at bind time, so a congested network stack
/// delays a log call by at most that long.
pub struct UdpSender {
    socket: Socket,
}

impl core::fmt::Debug for UdpSender {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("UdpSender")
            .field("local_addr", &self.local_addr().ok())
            .finish()
    }
}

impl UdpSender {
    /// Binds a socket to `address`.
    ///
    /// Use port `0` to let the operating system pick an ephemeral port.
    pub fn bind(address: SocketAddr, write_timeout: Option<Duration>) -> std::io::Result<Self> {
        let socket = Socket::new(
            Domain::for_address(address),
            Type::DGRAM,
            Some(Protocol::UDP),
        )?;

        socket.set_reuse_address(true)?;
        socket.set_write_timeout(write_timeout)?;

        let socket_addr: SockAddr = address.into();
        socket.bind(&socket_addr)?;

        tracing::debug!(%address, ?write_timeout, "bound UDP sink");

        Ok(Self { socket })
    }

    /// Returns the address the socket is bound to.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.socket
            .local_addr()?
            .as_socket()
            .ok_or_else(|| std::io::Error::from(ErrorKind::Unsupported))
    }
}

impl UdpSink for UdpSender {
    fn send_to(&mut self, bytes: &[u8], destination: SocketAddr) -> Result<(), SinkError> {
        let sent = self
            .socket
            .send_to(bytes, &destination.into())
            .map_err(IntoSinkError::into_sink_error)?;

        if sent != bytes.len() {
            return Err(SinkError::Incomplete);
        }

        Ok(())
    }
}

impl IntoSinkError for std::io::Error {
    fn into_sink_error(self) -> SinkError {
        match self.kind() {
            ErrorKind::PermissionDenied => SinkError::PermissionDenied,
            ErrorKind::HostUnreachable => SinkError::NoRoute,
            ErrorKind::NetworkUnreachable => SinkError::NoRoute,
            ErrorKind::AddrNotAvailable => SinkError::InvalidAddress,
            ErrorKind::InvalidInput => SinkError::InvalidAddress,
            ErrorKind::NetworkDown => SinkError::NetworkDown,
            ErrorKind::WouldBlock => SinkError::WouldBlock,
            ErrorKind::TimedOut => SinkError::TimedOut,
            ErrorKind::NotConnected | ErrorKind::BrokenPipe => SinkError::NotReady,
            _ => SinkError::Other,
        }
    }
}
