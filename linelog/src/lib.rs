//! # `linelog`
//!
//! A logging library for devices that talk to the outside world over a serial link, a UDP
//! destination, or both.
//!
//! Every log call produces at most one line of text, rendered into a fixed-capacity buffer and
//! handed to the selected sinks.
//! Lines that do not fit are cut and end in a `...` truncation marker, so a single call can never
//! write more than the configured capacity.
//!
//! ## Features
//!
//! - **Severity gating**: messages below the logger's threshold are skipped before any formatting
//!   happens
//! - **Bounded lines**: no allocation, `heapless` buffers with a compile-time capacity
//! - **Dual sinks**: serial lines are terminated with `\r\n`, UDP datagrams carry the bare line
//! - **Fault counting**: sink failures never reach the call site, but are counted per sink
//! - **`no_std`**: works on bare metal; all state is guarded by a `critical-section` mutex
//!
//! ## Feature Flags
//!
//! - `std` - Enable standard library support and the recording test sinks
//! - `clap` - Derive `clap::ValueEnum` for [`Severity`] and [`InterfaceSelection`]
//!
//! ## Basic Usage
//!
//! ```rust
//! use linelog::test_sinks::{RecordingSerial, RecordingUdp};
//! use linelog::{InterfaceSelection, Logger, Severity};
//!
//! let (serial, written) = RecordingSerial::new();
//!
//! let logger: Logger<RecordingSerial, RecordingUdp> = Logger::new(InterfaceSelection::Serial);
//! logger.set_serial_sink(serial).unwrap();
//! logger.set_level(Severity::Info);
//!
//! linelog::warn!(logger, "disk at {}%", 91);
//! linelog::trace!(logger, "tick");
//!
//! assert_eq!(written.lines().len(), 1);
//! ```
//!
//! ## Byte Dumps
//!
//! Raw buffers render as `<d0:d1:...:dn>`, either standalone through [`render_bytes`] or inside a
//! message through [`ByteDump`]:
//!
//! ```rust
//! use linelog::{ByteDump, render_bytes};
//!
//! let rendered = render_bytes::<32>(&[1, 2, 3]);
//! assert_eq!(rendered.as_str(), "<1:2:3>");
//! ```

#![no_std]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

#[cfg(any(test, feature = "std"))]
extern crate std;

mod bytes;
mod config;
mod dispatch;
mod error;
mod interface;
mod line;
mod logger;
mod macros;
mod severity;
pub mod sink;
#[cfg(any(test, feature = "std"))]
#[doc(hidden)]
pub mod test_sinks;

pub use bytes::{ByteDump, render_bytes};
pub use config::LoggerConfig;
pub use dispatch::SinkFaults;
pub use error::{ConfigError, ParseInterfaceError, ParseSeverityError};
pub use interface::{InterfaceSelection, Transport};
pub use line::{
    EMBEDDED_LINE_CAPACITY, HOSTED_LINE_CAPACITY, LINE_TERMINATOR, RenderedLine, TRUNCATION_MARKER,
};
pub use logger::Logger;
pub use severity::Severity;
