//! In-memory sinks for testing.
//!
//! Each sink comes with a handle sharing its storage, so tests can inspect what was written after
//! the sink has been moved into a logger, and inject failures.

use core::net::SocketAddr;
use std::string::String;
use std::sync::{Arc, Mutex};
use std::vec::Vec;

use crate::sink::{SerialSink, SerialWriteError, SinkError, UdpSink};

#[derive(Debug)]
struct Recorded<T> {
    entries: Vec<T>,
    failure: Option<SinkError>,
    interruption: Option<(SinkError, usize)>,
}

impl<T> Default for Recorded<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            failure: None,
            interruption: None,
        }
    }
}

/// A [`SerialSink`] that records every write.
#[derive(Debug)]
pub struct RecordingSerial {
    record: Arc<Mutex<Recorded<Vec<u8>>>>,
}

/// Shared view of the writes made to a [`RecordingSerial`].
#[derive(Clone, Debug)]
pub struct SerialRecord {
    record: Arc<Mutex<Recorded<Vec<u8>>>>,
}

impl RecordingSerial {
    /// Creates a new sink and a handle to its recorded writes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linelog::sink::SerialSink;
    /// use linelog::test_sinks::RecordingSerial;
    ///
    /// let (mut serial, record) = RecordingSerial::new();
    /// serial.write(b"boot").unwrap();
    /// serial.write(b"\r\n").unwrap();
    /// assert_eq!(record.lines(), ["boot"]);
    /// ```
    pub fn new() -> (Self, SerialRecord) {
        let record = Arc::new(Mutex::new(Recorded::default()));
        (
            Self {
                record: record.clone(),
            },
            SerialRecord { record },
        )
    }
}

impl SerialSink for RecordingSerial {
    fn write(&mut self, bytes: &[u8]) -> Result<(), SerialWriteError> {
        let mut record = self.record.lock().unwrap();
        if let Some(error) = record.failure {
            return Err(error.into());
        }
        if let Some((error, accepted)) = record.interruption.take() {
            let written = accepted.min(bytes.len());
            if written > 0 {
                record.entries.push(bytes[..written].to_vec());
            }
            return Err(SerialWriteError::partial(error, written));
        }
        record.entries.push(bytes.to_vec());
        Ok(())
    }
}

impl SerialRecord {
    /// Returns every individual write, in order.
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.record.lock().unwrap().entries.clone()
    }

    /// Returns the written byte stream split into `\r\n` terminated lines.
    ///
    /// Bytes after the last terminator are not returned.
    pub fn lines(&self) -> Vec<String> {
        let stream: Vec<u8> = self.writes().concat();
        let text = String::from_utf8_lossy(&stream);
        let mut lines: Vec<String> = text.split("\r\n").map(String::from).collect();
        lines.pop();
        lines
    }

    /// Makes every following write fail with `error`, or succeed again with `None`.
    pub fn fail_with(&self, error: Option<SinkError>) {
        self.record.lock().unwrap().failure = error;
    }

    /// Makes the next write record only its first `accepted` bytes and then fail with `error`.
    pub fn interrupt_next_write(&self, error: SinkError, accepted: usize) {
        self.record.lock().unwrap().interruption = Some((error, accepted));
    }
}

/// A [`UdpSink`] that records every datagram.
#[derive(Debug)]
pub struct RecordingUdp {
    record: Arc<Mutex<Recorded<(Vec<u8>, SocketAddr)>>>,
}

/// Shared view of the datagrams sent through a [`RecordingUdp`].
#[derive(Clone, Debug)]
pub struct UdpRecord {
    record: Arc<Mutex<Recorded<(Vec<u8>, SocketAddr)>>>,
}

impl RecordingUdp {
    /// Creates a new sink and a handle to its recorded datagrams.
    pub fn new() -> (Self, UdpRecord) {
        let record = Arc::new(Mutex::new(Recorded::default()));
        (
            Self {
                record: record.clone(),
            },
            UdpRecord { record },
        )
    }
}

impl UdpSink for RecordingUdp {
    fn send_to(&mut self, bytes: &[u8], destination: SocketAddr) -> Result<(), SinkError> {
        let mut record = self.record.lock().unwrap();
        if let Some(error) = record.failure {
            return Err(error);
        }
        record.entries.push((bytes.to_vec(), destination));
        Ok(())
    }
}

impl UdpRecord {
    /// Returns every datagram with its destination, in order.
    pub fn datagrams(&self) -> Vec<(Vec<u8>, SocketAddr)> {
        self.record.lock().unwrap().entries.clone()
    }

    /// Returns the payloads as text.
    pub fn payloads(&self) -> Vec<String> {
        self.datagrams()
            .into_iter()
            .map(|(payload, _)| String::from_utf8_lossy(&payload).into_owned())
            .collect()
    }

    /// Makes every following send fail with `error`, or succeed again with `None`.
    pub fn fail_with(&self, error: Option<SinkError>) {
        self.record.lock().unwrap().failure = error;
    }
}
