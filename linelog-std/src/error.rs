//! Errors raised while loading configuration and opening sinks.

use core::net::SocketAddr;

use camino::Utf8PathBuf;
use linelog::ConfigError;

/// Errors that can occur when loading a [`Config`](crate::Config).
#[derive(thiserror::Error, Debug)]
pub enum ConfigFileError {
    /// The configuration file could not be read.
    #[error("failed to read configuration from {path}")]
    Read {
        /// The file that was read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid TOML or does not match the expected layout.
    #[error("invalid configuration")]
    Parse(#[from] toml::de::Error),
}

/// Errors that can occur when opening a logger with [`open`](crate::open).
#[derive(thiserror::Error, Debug)]
pub enum OpenError {
    /// The configuration names an endpoint for a transport that is not selected.
    #[error("inconsistent logger configuration")]
    Config(#[from] ConfigError),

    /// The serial device could not be opened or configured.
    #[error("failed to open serial device {path}")]
    SerialDevice {
        /// The device that was opened.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The requested link speed has no termios constant.
    #[error("unsupported baud rate {0}")]
    UnsupportedBaudRate(u32),

    /// The UDP socket could not be bound.
    #[error("failed to bind UDP socket to {address}")]
    UdpBind {
        /// The local address that was requested.
        address: SocketAddr,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
