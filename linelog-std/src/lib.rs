//! Hosted sinks for `linelog`.
//!
//! This provides the serial and UDP endpoints a [`linelog::Logger`] needs on platforms with the
//! standard library:
//!
//! - [`StdSerial`]: a serial device node configured through termios, a plain file, or stdout
//! - [`UdpSender`](net::udp::UdpSender): a `socket2` datagram socket with a bounded write timeout
//!
//! [`open`] builds a ready-to-use [`StdLogger`] from a [`Config`].
//!
//! ```rust,no_run
//! use linelog_std::Config;
//!
//! let config = Config::from_toml_str(r#"
//!     level = "info"
//!     interface = "both"
//!
//!     [serial]
//!     device = "/dev/ttyUSB0"
//!
//!     [udp]
//!     destination = "192.0.2.10:5140"
//! "#)?;
//!
//! let logger = linelog_std::open(&config)?;
//! linelog::info!(logger, "ready");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]

mod config;
mod error;
pub mod net;
mod serial;

use core::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use linelog::{HOSTED_LINE_CAPACITY, Logger};

pub use self::config::{Config, SerialConfig, UdpConfig};
pub use self::error::{ConfigFileError, OpenError};
use self::net::udp::UdpSender;
pub use self::serial::{DEFAULT_BAUD_RATE, StdSerial, baud_rate};

/// A logger with the hosted sinks and the hosted line capacity.
pub type StdLogger = Logger<StdSerial, UdpSender, HOSTED_LINE_CAPACITY>;

/// Creates a logger and opens the sinks selected by `config`.
///
/// Only transports included in the interface selection are opened.
/// Without a configured device the serial sink writes to stdout.
pub fn open(config: &Config) -> Result<StdLogger, OpenError> {
    let logger = StdLogger::from_config(&config.logger_config())?;

    if config.interface.serial() {
        let serial = match &config.serial.device {
            Some(path) => StdSerial::open_device(path, config.serial.baud_rate)?,
            None => StdSerial::stdout(),
        };
        logger.set_serial_sink(serial)?;
    }

    if config.interface.udp() {
        let bind = config
            .udp
            .bind
            .unwrap_or_else(|| unspecified_for(config.udp.destination));
        let sender = UdpSender::bind(bind, Some(config.udp.write_timeout()))
            .map_err(|source| OpenError::UdpBind {
                address: bind,
                source,
            })?;
        if config.udp.destination.is_none() {
            tracing::warn!("UDP selected without a destination, datagrams will be dropped");
        }
        logger.set_udp_sink(sender)?;
    }

    tracing::debug!(level = %config.level, interface = %config.interface, "opened logger");

    Ok(logger)
}

/// Returns the wildcard address of the same family as `destination`, with an ephemeral port.
fn unspecified_for(destination: Option<SocketAddr>) -> SocketAddr {
    let ip = match destination {
        Some(SocketAddr::V6(_)) => IpAddr::V6(Ipv6Addr::UNSPECIFIED),
        _ => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
    };
    SocketAddr::new(ip, 0)
}

/// Helper trait to convert errors into sink errors.
///
/// We cannot implement `From` as that would be part of the public API.
pub(crate) trait IntoSinkError {
    /// Converts the error into a sink error.
    fn into_sink_error(self) -> linelog::sink::SinkError;
}
