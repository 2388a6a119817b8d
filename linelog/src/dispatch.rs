//! Routing of rendered lines to the selected sinks.

use core::net::SocketAddr;

use crate::interface::{InterfaceSelection, Transport};
use crate::line::LINE_TERMINATOR;
use crate::sink::{SerialSink, SinkError, UdpSink};

/// Number of lines lost per sink since the logger was created or the counters were reset.
///
/// A line counts as lost on a sink when the sink reported an error, or when the sink is selected
/// but has no endpoint configured.
/// Counters saturate at `u32::MAX`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct SinkFaults {
    /// Lines lost on the serial link.
    pub serial: u32,
    /// Lines lost on the UDP destination.
    pub udp: u32,
}

impl SinkFaults {
    /// Returns the counter for `transport`.
    pub const fn get(&self, transport: Transport) -> u32 {
        match transport {
            Transport::Serial => self.serial,
            Transport::Udp => self.udp,
        }
    }

    /// Returns the sum of all counters.
    pub const fn total(&self) -> u32 {
        self.serial.saturating_add(self.udp)
    }

    fn record(&mut self, transport: Transport) {
        let counter = match transport {
            Transport::Serial => &mut self.serial,
            Transport::Udp => &mut self.udp,
        };
        *counter = counter.saturating_add(1);
    }
}

/// The sink endpoints held by a logger together with their fault counters.
#[derive(Debug)]
pub(crate) struct Sinks<S, U> {
    pub(crate) serial: Option<S>,
    pub(crate) udp: Option<U>,
    pub(crate) udp_destination: Option<SocketAddr>,
    pub(crate) faults: SinkFaults,
}

impl<S, U> Sinks<S, U> {
    pub(crate) const fn new() -> Self {
        Self {
            serial: None,
            udp: None,
            udp_destination: None,
            faults: SinkFaults {
                serial: 0,
                udp: 0,
            },
        }
    }
}

impl<S, U> Sinks<S, U>
where
    S: SerialSink,
    U: UdpSink,
{
    /// Delivers `line` to every sink in `selection`.
    ///
    /// Each transport is attempted independently; failures only bump the fault counters.
    pub(crate) fn dispatch(&mut self, selection: InterfaceSelection, line: &[u8]) {
        if selection.serial() && self.write_serial(line).is_err() {
            self.faults.record(Transport::Serial);
        }

        if selection.udp() && self.send_udp(line).is_err() {
            self.faults.record(Transport::Udp);
        }
    }

    /// Writes the line, then the terminator as a separate write.
    ///
    /// A line that failed part way still gets its terminator, so the fragment does not run into
    /// the next line.
    fn write_serial(&mut self, line: &[u8]) -> Result<(), SinkError> {
        let serial = self.serial.as_mut().ok_or(SinkError::NotReady)?;
        match serial.write(line) {
            Ok(()) => serial
                .write(LINE_TERMINATOR)
                .map_err(|error| error.kind()),
            Err(error) => {
                if error.written() > 0 {
                    let _ = serial.write(LINE_TERMINATOR);
                }
                Err(error.kind())
            }
        }
    }

    fn send_udp(&mut self, line: &[u8]) -> Result<(), SinkError> {
        let destination = self.udp_destination.ok_or(SinkError::InvalidAddress)?;
        let udp = self.udp.as_mut().ok_or(SinkError::NotReady)?;
        udp.send_to(line, destination)
    }
}
