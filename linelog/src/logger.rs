//! The logger: threshold, interface selection and sink endpoints behind one lock.

use core::cell::RefCell;
use core::fmt;
use core::net::SocketAddr;

use critical_section::Mutex;

use crate::config::LoggerConfig;
use crate::dispatch::{SinkFaults, Sinks};
use crate::error::ConfigError;
use crate::interface::{InterfaceSelection, Transport};
use crate::line::{EMBEDDED_LINE_CAPACITY, RenderedLine};
use crate::severity::Severity;
use crate::sink::{SerialSink, UdpSink};

/// A logger delivering bounded lines of capacity `C` to a serial sink `S` and a UDP sink `U`.
///
/// All state is kept behind a [`critical_section::Mutex`], so a logger can be placed in a
/// `static` and shared between threads or interrupt handlers.
/// Each dispatch happens inside a single critical section, which keeps the bytes of one line
/// together on every sink.
/// The user message is formatted outside of the critical section.
///
/// Sinks must not log through the logger they are installed in; doing so panics on the
/// re-entrant borrow.
///
/// # Examples
///
/// ```rust
/// use linelog::test_sinks::{RecordingSerial, RecordingUdp};
/// use linelog::{InterfaceSelection, Logger, Severity};
///
/// static LOGGER: Logger<RecordingSerial, RecordingUdp> = Logger::new(InterfaceSelection::Both);
///
/// let (serial, serial_record) = RecordingSerial::new();
/// let (udp, udp_record) = RecordingUdp::new();
/// LOGGER.set_serial_sink(serial).unwrap();
/// LOGGER.set_udp_sink(udp).unwrap();
/// LOGGER.set_udp_destination("127.0.0.1:5140".parse().unwrap()).unwrap();
/// LOGGER.set_level(Severity::Info);
///
/// linelog::info!(LOGGER, "link up after {} ms", 12);
///
/// assert_eq!(serial_record.lines().len(), 1);
/// assert_eq!(udp_record.datagrams().len(), 1);
/// ```
pub struct Logger<S, U, const C: usize = EMBEDDED_LINE_CAPACITY> {
    state: Mutex<RefCell<State<S, U>>>,
}

#[derive(Debug)]
struct State<S, U> {
    level: Severity,
    interface: InterfaceSelection,
    sinks: Sinks<S, U>,
}

impl<S, U, const C: usize> fmt::Debug for Logger<S, U, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("capacity", &C)
            .finish_non_exhaustive()
    }
}

impl<S, U, const C: usize> Logger<S, U, C> {
    /// Creates a logger for `interface` with the default threshold and no sinks.
    ///
    /// Sinks and the UDP destination are added afterwards through the setters.
    pub const fn new(interface: InterfaceSelection) -> Self {
        Self {
            state: Mutex::new(RefCell::new(State {
                level: Severity::Debug,
                interface,
                sinks: Sinks::new(),
            })),
        }
    }

    /// Creates a logger from `config`.
    ///
    /// Fails if the configuration names an endpoint for a transport that is not selected.
    pub fn from_config(config: &LoggerConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let logger = Self::new(config.interface);
        logger.with_state(|state| {
            state.level = config.level;
            state.sinks.udp_destination = config.udp_destination;
        });
        Ok(logger)
    }

    /// Returns the current threshold.
    pub fn level(&self) -> Severity {
        self.with_state(|state| state.level)
    }

    /// Changes the threshold; messages below it are skipped.
    pub fn set_level(&self, level: Severity) {
        self.with_state(|state| state.level = level);
    }

    /// Returns `true` if messages of `level` pass the current threshold.
    pub fn is_enabled(&self, level: Severity) -> bool {
        level.is_at_least(self.level())
    }

    /// Returns the current interface selection.
    pub fn interface(&self) -> InterfaceSelection {
        self.with_state(|state| state.interface)
    }

    /// Changes which sinks receive lines.
    ///
    /// Configured endpoints are kept, so switching back to a transport resumes delivery on it.
    pub fn set_interface(&self, interface: InterfaceSelection) {
        self.with_state(|state| state.interface = interface);
    }

    /// Installs the serial sink, replacing any previous one.
    ///
    /// Returns [`ConfigError::TransportNotSelected`] and drops `sink` if the serial transport is
    /// not part of the current selection.
    pub fn set_serial_sink(&self, sink: S) -> Result<(), ConfigError> {
        self.with_state(|state| {
            Self::require(state, Transport::Serial)?;
            state.sinks.serial = Some(sink);
            Ok(())
        })
    }

    /// Removes and returns the serial sink.
    pub fn take_serial_sink(&self) -> Option<S> {
        self.with_state(|state| state.sinks.serial.take())
    }

    /// Installs the UDP sink, replacing any previous one.
    ///
    /// Returns [`ConfigError::TransportNotSelected`] and drops `sink` if the UDP transport is not
    /// part of the current selection.
    pub fn set_udp_sink(&self, sink: U) -> Result<(), ConfigError> {
        self.with_state(|state| {
            Self::require(state, Transport::Udp)?;
            state.sinks.udp = Some(sink);
            Ok(())
        })
    }

    /// Removes and returns the UDP sink.
    pub fn take_udp_sink(&self) -> Option<U> {
        self.with_state(|state| state.sinks.udp.take())
    }

    /// Sets the address and port datagrams are sent to.
    ///
    /// Returns [`ConfigError::TransportNotSelected`] if the UDP transport is not part of the
    /// current selection; the previous destination is kept in that case.
    pub fn set_udp_destination(&self, destination: SocketAddr) -> Result<(), ConfigError> {
        self.with_state(|state| {
            Self::require(state, Transport::Udp)?;
            state.sinks.udp_destination = Some(destination);
            Ok(())
        })
    }

    /// Returns the address datagrams are sent to, if any.
    pub fn udp_destination(&self) -> Option<SocketAddr> {
        self.with_state(|state| state.sinks.udp_destination)
    }

    /// Returns the number of lines lost per sink.
    pub fn faults(&self) -> SinkFaults {
        self.with_state(|state| state.sinks.faults)
    }

    /// Resets the fault counters, returning their previous values.
    pub fn reset_faults(&self) -> SinkFaults {
        self.with_state(|state| core::mem::take(&mut state.sinks.faults))
    }

    /// Renders a line if `level` passes the threshold.
    ///
    /// Returns `None` for gated levels without formatting anything.
    pub fn format_line(
        &self,
        level: Severity,
        file: &str,
        line: u32,
        args: fmt::Arguments<'_>,
    ) -> Option<RenderedLine<C>> {
        if !self.is_enabled(level) {
            return None;
        }

        Some(RenderedLine::compose(level, file, line, args))
    }

    fn require(state: &State<S, U>, transport: Transport) -> Result<(), ConfigError> {
        if state.interface.includes(transport) {
            Ok(())
        } else {
            Err(ConfigError::TransportNotSelected(transport))
        }
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut State<S, U>) -> R) -> R {
        critical_section::with(|cs| f(&mut self.state.borrow_ref_mut(cs)))
    }
}

impl<S, U, const C: usize> Logger<S, U, C>
where
    S: SerialSink,
    U: UdpSink,
{
    /// Delivers an already rendered line to the selected sinks.
    ///
    /// Sink failures are counted in [`faults`](Self::faults) and otherwise ignored.
    pub fn dispatch(&self, line: &RenderedLine<C>) {
        self.with_state(|state| state.sinks.dispatch(state.interface, line.as_bytes()));
    }

    /// Logs a message with the specified severity.
    ///
    /// Prefer using the macros, which fill in `file` and `line`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linelog::test_sinks::{RecordingSerial, RecordingUdp};
    /// use linelog::{InterfaceSelection, Logger, Severity};
    ///
    /// let logger: Logger<RecordingSerial, RecordingUdp> = Logger::new(InterfaceSelection::Serial);
    /// let (serial, record) = RecordingSerial::new();
    /// logger.set_serial_sink(serial).unwrap();
    ///
    /// logger.log(Severity::Error, "f.c", 10, format_args!("failure code {}", 12345));
    /// assert_eq!(record.lines(), ["ERROR f.c:10: failure code 12345"]);
    /// ```
    pub fn log(&self, level: Severity, file: &str, line: u32, args: fmt::Arguments<'_>) {
        if let Some(rendered) = self.format_line(level, file, line, args) {
            self.dispatch(&rendered);
        }
    }

    /// Logs a [`Severity::Trace`] message.
    pub fn trace(&self, file: &str, line: u32, args: fmt::Arguments<'_>) {
        self.log(Severity::Trace, file, line, args);
    }

    /// Logs a [`Severity::Debug`] message.
    pub fn debug(&self, file: &str, line: u32, args: fmt::Arguments<'_>) {
        self.log(Severity::Debug, file, line, args);
    }

    /// Logs a [`Severity::Info`] message.
    pub fn info(&self, file: &str, line: u32, args: fmt::Arguments<'_>) {
        self.log(Severity::Info, file, line, args);
    }

    /// Logs a [`Severity::Warn`] message.
    pub fn warn(&self, file: &str, line: u32, args: fmt::Arguments<'_>) {
        self.log(Severity::Warn, file, line, args);
    }

    /// Logs a [`Severity::Error`] message.
    pub fn error(&self, file: &str, line: u32, args: fmt::Arguments<'_>) {
        self.log(Severity::Error, file, line, args);
    }

    /// Logs a [`Severity::Fatal`] message.
    pub fn fatal(&self, file: &str, line: u32, args: fmt::Arguments<'_>) {
        self.log(Severity::Fatal, file, line, args);
    }
}
