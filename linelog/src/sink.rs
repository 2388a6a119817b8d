//! Sink abstractions for the serial link and the UDP destination.
//!
//! Sinks are provided by the surrounding platform and are expected to be initialized before they
//! are handed to a [`Logger`][crate::Logger].
//! Their outcomes are only ever used to count faults; a failing sink never affects the caller of a
//! log macro.

use core::fmt::{Display, Formatter};
use core::net::SocketAddr;

/// A byte-oriented serial link.
///
/// # Example
///
/// ```rust
/// use linelog::sink::{SerialSink, SerialWriteError};
///
/// #[derive(Debug)]
/// struct Uart;
///
/// impl SerialSink for Uart {
///     fn write(&mut self, bytes: &[u8]) -> Result<(), SerialWriteError> {
///         // Push `bytes` into the transmit FIFO here. A FIFO that fills up part way reports
///         // `SerialWriteError::partial(SinkError::WouldBlock, accepted)`.
///         let _ = bytes;
///         Ok(())
///     }
/// }
/// ```
pub trait SerialSink {
    /// Writes all of `bytes` to the link.
    ///
    /// Implementations should not block indefinitely; a link that is not ready should report
    /// [`SinkError::NotReady`] or [`SinkError::WouldBlock`] instead.
    /// A failure after part of `bytes` went out must report that count through
    /// [`SerialWriteError::partial`], so the caller can close the fragment.
    fn write(&mut self, bytes: &[u8]) -> Result<(), SerialWriteError>;
}

/// A failed serial write, with the number of bytes that reached the link before it failed.
///
/// Converting a plain [`SinkError`] yields a write where nothing went out.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub struct SerialWriteError {
    kind: SinkError,
    written: usize,
}

impl SerialWriteError {
    /// A failure before any byte was written.
    pub const fn new(kind: SinkError) -> Self {
        Self { kind, written: 0 }
    }

    /// A failure after `written` bytes were accepted by the link.
    pub const fn partial(kind: SinkError, written: usize) -> Self {
        Self { kind, written }
    }

    /// Returns the cause of the failure.
    pub const fn kind(&self) -> SinkError {
        self.kind
    }

    /// Returns the number of bytes written before the failure.
    pub const fn written(&self) -> usize {
        self.written
    }
}

impl From<SinkError> for SerialWriteError {
    fn from(kind: SinkError) -> Self {
        Self::new(kind)
    }
}

impl Display for SerialWriteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ({} bytes written)", self.kind, self.written)
    }
}

impl core::error::Error for SerialWriteError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(&self.kind)
    }
}

/// A UDP socket able to send datagrams.
pub trait UdpSink {
    /// Sends `bytes` as one datagram to `destination`.
    fn send_to(&mut self, bytes: &[u8], destination: SocketAddr) -> Result<(), SinkError>;
}

/// Errors that can occur when handing bytes to a sink.
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Copy, Clone, Hash)]
pub enum SinkError {
    /// The link or socket is not ready to accept data.
    NotReady,
    /// The transmit buffer is full and the operation would have blocked.
    WouldBlock,
    /// The write did not complete within its time bound.
    TimedOut,
    /// Only part of the data could be written.
    Incomplete,
    /// No route to host.
    NoRoute,
    /// The network stack is down.
    NetworkDown,
    /// The destination address is invalid.
    InvalidAddress,
    /// No permission to access the resource.
    PermissionDenied,
    /// Currently unhandled error occurred.
    Other,
}

impl Display for SinkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            SinkError::NotReady => write!(f, "The sink is not ready to accept data."),
            SinkError::WouldBlock => {
                write!(f, "The transmit buffer is full, the write would block.")
            }
            SinkError::TimedOut => write!(f, "The write did not complete in time."),
            SinkError::Incomplete => write!(f, "Only part of the data could be written."),
            SinkError::NoRoute => write!(f, "No route to host."),
            SinkError::NetworkDown => write!(f, "The network stack is down."),
            SinkError::InvalidAddress => write!(f, "The destination address is invalid."),
            SinkError::PermissionDenied => write!(f, "No permission to access the resource."),
            SinkError::Other => write!(f, "Unspecified sink error."),
        }
    }
}

impl core::error::Error for SinkError {}

/// Adapts any [`embedded_io::Write`] implementation, such as a UART driver, into a [`SerialSink`].
///
/// # Example
///
/// ```rust
/// use linelog::sink::{IoSerial, SerialSink};
///
/// let mut buffer = [0u8; 8];
/// let mut serial = IoSerial::new(&mut buffer[..]);
/// serial.write(b"hi\r\n").unwrap();
/// drop(serial);
/// assert_eq!(&buffer[..4], b"hi\r\n");
/// ```
#[derive(Debug)]
pub struct IoSerial<T> {
    inner: T,
}

impl<T> IoSerial<T> {
    /// Wraps `inner`.
    pub const fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Returns a reference to the wrapped writer.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T> SerialSink for IoSerial<T>
where
    T: embedded_io::Write,
{
    fn write(&mut self, bytes: &[u8]) -> Result<(), SerialWriteError> {
        use embedded_io::Error as _;

        let mut written = 0;
        while written < bytes.len() {
            match self.inner.write(&bytes[written..]) {
                Ok(0) => return Err(SerialWriteError::partial(SinkError::Incomplete, written)),
                Ok(count) => written += count,
                Err(error) if error.kind() == embedded_io::ErrorKind::Interrupted => continue,
                Err(error) => {
                    return Err(SerialWriteError::partial(
                        io_error_kind_to_sink_error(error.kind()),
                        written,
                    ));
                }
            }
        }
        Ok(())
    }
}

fn io_error_kind_to_sink_error(kind: embedded_io::ErrorKind) -> SinkError {
    use embedded_io::ErrorKind;

    match kind {
        ErrorKind::NotConnected | ErrorKind::BrokenPipe | ErrorKind::ConnectionReset => {
            SinkError::NotReady
        }
        ErrorKind::TimedOut => SinkError::TimedOut,
        ErrorKind::PermissionDenied => SinkError::PermissionDenied,
        ErrorKind::WriteZero => SinkError::Incomplete,
        ErrorKind::OutOfMemory => SinkError::WouldBlock,
        _ => SinkError::Other,
    }
}
