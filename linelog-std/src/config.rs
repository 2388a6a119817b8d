//! File based configuration for hosted loggers.

use core::net::SocketAddr;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use linelog::{InterfaceSelection, LoggerConfig, Severity};
use serde::{Deserialize, Serialize};

use crate::ConfigFileError;
use crate::serial::DEFAULT_BAUD_RATE;

/// Configuration of a hosted logger.
///
/// Every key is optional; a missing key takes its default.
///
/// ```toml
/// level = "info"          # threshold, default "debug"
/// interface = "both"      # "serial", "udp" or "both", default "both"
///
/// [serial]
/// device = "/dev/ttyUSB0" # stdout when absent
/// baud_rate = 115200
///
/// [udp]
/// destination = "192.0.2.10:5140"
/// bind = "0.0.0.0:0"      # wildcard of the destination's family when absent
/// write_timeout_ms = 50
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Minimum severity a message needs to be logged.
    pub level: Severity,

    /// The sinks receiving rendered lines.
    pub interface: InterfaceSelection,

    /// Serial link settings.
    pub serial: SerialConfig,

    /// UDP settings.
    pub udp: UdpConfig,
}

/// The `[serial]` section of a [`Config`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SerialConfig {
    /// The device node lines are written to; stdout when `None`.
    pub device: Option<Utf8PathBuf>,

    /// Link speed applied when the device is a terminal.
    pub baud_rate: u32,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            device: None,
            baud_rate: DEFAULT_BAUD_RATE,
        }
    }
}

/// The `[udp]` section of a [`Config`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UdpConfig {
    /// Where datagrams are sent.
    pub destination: Option<SocketAddr>,

    /// The local address of the sending socket.
    pub bind: Option<SocketAddr>,

    /// Upper bound for a single send, in milliseconds.
    pub write_timeout_ms: u64,
}

impl UdpConfig {
    /// The default upper bound for a single send, in milliseconds.
    pub const DEFAULT_WRITE_TIMEOUT_MS: u64 = 50;

    /// Returns the send timeout.
    ///
    /// Zero is raised to one millisecond, as sockets treat a zero timeout as "block forever".
    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms.max(1))
    }
}

impl Default for UdpConfig {
    fn default() -> Self {
        Self {
            destination: None,
            bind: None,
            write_timeout_ms: Self::DEFAULT_WRITE_TIMEOUT_MS,
        }
    }
}

impl Config {
    /// Parses a configuration from a TOML document.
    pub fn from_toml_str(document: &str) -> Result<Self, ConfigFileError> {
        Ok(toml::from_str(document)?)
    }

    /// Reads and parses the TOML file at `path`.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigFileError> {
        let document = std::fs::read_to_string(path).map_err(|source| ConfigFileError::Read {
            path: path.to_owned(),
            source,
        })?;
        let config = Self::from_toml_str(&document)?;
        tracing::debug!(%path, "loaded configuration");
        Ok(config)
    }

    /// Returns the settings for the transport independent part of the logger.
    pub fn logger_config(&self) -> LoggerConfig {
        LoggerConfig {
            level: self.level,
            interface: self.interface,
            udp_destination: self.udp.destination,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use camino::Utf8Path;
    use indoc::indoc;
    use linelog::{InterfaceSelection, Severity};
    use pretty_assertions::assert_eq;

    use super::{Config, SerialConfig, UdpConfig};
    use crate::ConfigFileError;

    #[test]
    fn empty_document() {
        let config = Config::from_toml_str("").unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.serial.baud_rate, 115_200);
        assert_eq!(config.udp.write_timeout(), Duration::from_millis(50));
    }

    #[test]
    fn full_document() {
        let config = Config::from_toml_str(indoc! {r#"
            level = "warn"
            interface = "both"

            [serial]
            device = "/dev/ttyS1"
            baud_rate = 9600

            [udp]
            destination = "192.0.2.10:5140"
            bind = "0.0.0.0:6000"
            write_timeout_ms = 5
        "#})
        .unwrap();

        assert_eq!(
            config,
            Config {
                level: Severity::Warn,
                interface: InterfaceSelection::Both,
                serial: SerialConfig {
                    device: Some("/dev/ttyS1".into()),
                    baud_rate: 9600,
                },
                udp: UdpConfig {
                    destination: Some("192.0.2.10:5140".parse().unwrap()),
                    bind: Some("0.0.0.0:6000".parse().unwrap()),
                    write_timeout_ms: 5,
                },
            }
        );
        assert_eq!(
            config.logger_config().udp_destination,
            config.udp.destination
        );
    }

    #[test]
    fn zero_timeout_is_raised() {
        let udp = UdpConfig {
            write_timeout_ms: 0,
            ..UdpConfig::default()
        };
        assert_eq!(udp.write_timeout(), Duration::from_millis(1));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let error = Config::from_toml_str(indoc! {r#"
            [serial]
            parity = "even"
        "#})
        .unwrap_err();

        assert!(matches!(error, ConfigFileError::Parse(_)));
    }

    #[test]
    fn load_from_file() {
        let directory = tempfile::tempdir().unwrap();
        let path = Utf8Path::from_path(directory.path())
            .unwrap()
            .join("linelog.toml");
        std::fs::write(&path, "level = \"error\"\n").unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.level, Severity::Error);
    }

    #[test]
    fn load_missing_file() {
        let error = Config::load(Utf8Path::new("/nonexistent/linelog.toml")).unwrap_err();

        assert!(matches!(error, ConfigFileError::Read { .. }));
        assert_eq!(
            error.to_string(),
            "failed to read configuration from /nonexistent/linelog.toml"
        );
    }
}
