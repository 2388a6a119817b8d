use core::{error, fmt};

use crate::interface::Transport;

/// An error returned when the logger configuration cannot be applied.
///
/// The logger state is left unchanged whenever one of these is returned.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ConfigError {
    /// The transport is not part of the current [`InterfaceSelection`][crate::InterfaceSelection].
    TransportNotSelected(Transport),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::TransportNotSelected(transport) => write!(
                f,
                "the {transport} transport is not part of the current interface selection"
            ),
        }
    }
}

impl error::Error for ConfigError {}

/// The type returned when parsing a [`Severity`][crate::Severity] from an unknown name.
#[derive(Debug, Eq, PartialEq)]
pub struct ParseSeverityError(pub(crate) ());

impl ParseSeverityError {
    const MESSAGE: &'static str =
        "unknown severity, expected one of trace, debug, info, warn, error, fatal";
}

impl fmt::Display for ParseSeverityError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str(Self::MESSAGE)
    }
}

impl error::Error for ParseSeverityError {}

/// The type returned when parsing an [`InterfaceSelection`][crate::InterfaceSelection] from an
/// unknown name.
#[derive(Debug, Eq, PartialEq)]
pub struct ParseInterfaceError(pub(crate) ());

impl ParseInterfaceError {
    const MESSAGE: &'static str = "unknown interface, expected one of serial, udp, both";
}

impl fmt::Display for ParseInterfaceError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str(Self::MESSAGE)
    }
}

impl error::Error for ParseInterfaceError {}
