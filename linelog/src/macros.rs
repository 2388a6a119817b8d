//! Logging macros.
//!
//! The macros capture the call site through [`file!`] and [`line!`] and forward a
//! [`format_args!`] message to the given [`Logger`][crate::Logger].
//! Formatting only happens when the severity passes the logger's threshold.
//!
//! - `log!`: Generic logging macro that accepts a severity level
//! - `trace!`: Logs trace-level messages (most verbose)
//! - `debug!`: Logs debug-level messages
//! - `info!`: Logs informational messages
//! - `warn!`: Logs warning messages
//! - `error!`: Logs error messages
//! - `fatal!`: Logs fatal error messages

/// Logs a message with the specified severity level.
///
/// This is the base logging macro that the severity-specific macros build upon.
///
/// # Examples
///
/// ```rust
/// use linelog::test_sinks::{RecordingSerial, RecordingUdp};
/// use linelog::{InterfaceSelection, Logger, Severity, log};
///
/// let logger: Logger<RecordingSerial, RecordingUdp> = Logger::new(InterfaceSelection::Serial);
/// let (serial, record) = RecordingSerial::new();
/// logger.set_serial_sink(serial).unwrap();
///
/// let port = 8080;
/// log!(logger, Severity::Info, "listening on {port}");
///
/// assert!(record.lines()[0].ends_with(": listening on 8080"));
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $severity:expr, $($arg:tt)+) => {
        $logger.log(
            $severity,
            ::core::file!(),
            ::core::line!(),
            ::core::format_args!($($arg)+),
        )
    };
}

/// Logs a trace-level message.
///
/// Trace messages are used for very detailed debugging information,
/// typically only enabled during development or deep troubleshooting.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Trace, $($arg)+)
    };
}

/// Logs a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Debug, $($arg)+)
    };
}

/// Logs an info-level message.
///
/// # Examples
///
/// ```rust
/// use linelog::test_sinks::{RecordingSerial, RecordingUdp};
/// use linelog::{InterfaceSelection, Logger, info};
///
/// let logger: Logger<RecordingSerial, RecordingUdp> = Logger::new(InterfaceSelection::Serial);
/// let (serial, record) = RecordingSerial::new();
/// logger.set_serial_sink(serial).unwrap();
///
/// info!(logger, "boot complete");
/// assert!(record.lines()[0].starts_with("INFO  "));
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Info, $($arg)+)
    };
}

/// Logs a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Warn, $($arg)+)
    };
}

/// Logs an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Error, $($arg)+)
    };
}

/// Logs a fatal-level message.
///
/// Fatal messages indicate critical failures that usually precede a reset.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Fatal, $($arg)+)
    };
}
