//! Logger configuration.

use core::net::SocketAddr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::interface::{InterfaceSelection, Transport};
use crate::severity::Severity;

/// Initial settings of a [`Logger`][crate::Logger].
///
/// Every field has a default, so an empty document deserializes into
/// [`LoggerConfig::default()`]: threshold [`Severity::Debug`], both interfaces, no UDP
/// destination.
///
/// # Examples
///
/// ```rust
/// use linelog::{InterfaceSelection, LoggerConfig, Severity};
///
/// let config = LoggerConfig {
///     level: Severity::Info,
///     interface: InterfaceSelection::Udp,
///     udp_destination: Some("192.0.2.10:5140".parse().unwrap()),
/// };
/// config.validate().unwrap();
/// ```
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    /// Minimum severity a message needs to be rendered and dispatched.
    pub level: Severity,

    /// The sinks receiving rendered lines.
    pub interface: InterfaceSelection,

    /// Where UDP datagrams are sent.
    pub udp_destination: Option<SocketAddr>,
}

impl LoggerConfig {
    /// Checks that every configured endpoint belongs to a selected transport.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.udp_destination.is_some() && !self.interface.udp() {
            return Err(ConfigError::TransportNotSelected(Transport::Udp));
        }
        Ok(())
    }
}
