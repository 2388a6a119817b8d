//! Transport selection.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseInterfaceError;

/// One of the two transports a line can be delivered over.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// The byte-oriented serial link.
    Serial,
    /// The UDP destination.
    Udp,
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transport::Serial => f.write_str("serial"),
            Transport::Udp => f.write_str("udp"),
        }
    }
}

/// Selects which sinks receive rendered lines.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum InterfaceSelection {
    /// Only the serial sink.
    Serial,
    /// Only the UDP sink.
    Udp,
    /// Both sinks, attempted independently.
    #[default]
    Both,
}

impl InterfaceSelection {
    /// Returns `true` if lines are delivered over `transport`.
    pub const fn includes(self, transport: Transport) -> bool {
        match (self, transport) {
            (InterfaceSelection::Both, _) => true,
            (InterfaceSelection::Serial, Transport::Serial) => true,
            (InterfaceSelection::Udp, Transport::Udp) => true,
            _ => false,
        }
    }

    /// Shorthand for `includes(Transport::Serial)`.
    pub const fn serial(self) -> bool {
        self.includes(Transport::Serial)
    }

    /// Shorthand for `includes(Transport::Udp)`.
    pub const fn udp(self) -> bool {
        self.includes(Transport::Udp)
    }
}

impl fmt::Display for InterfaceSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterfaceSelection::Serial => f.write_str("serial"),
            InterfaceSelection::Udp => f.write_str("udp"),
            InterfaceSelection::Both => f.write_str("both"),
        }
    }
}

impl FromStr for InterfaceSelection {
    type Err = ParseInterfaceError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        [
            ("serial", InterfaceSelection::Serial),
            ("udp", InterfaceSelection::Udp),
            ("both", InterfaceSelection::Both),
        ]
        .into_iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(input))
        .map(|(_, selection)| selection)
        .ok_or(ParseInterfaceError(()))
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::{InterfaceSelection, Transport};

    #[test_case(InterfaceSelection::Serial, true, false)]
    #[test_case(InterfaceSelection::Udp, false, true)]
    #[test_case(InterfaceSelection::Both, true, true)]
    fn includes(selection: InterfaceSelection, serial: bool, udp: bool) {
        assert_eq!(selection.includes(Transport::Serial), serial);
        assert_eq!(selection.includes(Transport::Udp), udp);
        assert_eq!(selection.serial(), serial);
        assert_eq!(selection.udp(), udp);
    }

    #[test]
    fn parse() {
        assert_eq!("serial".parse(), Ok(InterfaceSelection::Serial));
        assert_eq!("UDP".parse(), Ok(InterfaceSelection::Udp));
        assert_eq!("Both".parse(), Ok(InterfaceSelection::Both));
        assert!("ethernet".parse::<InterfaceSelection>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for selection in [
            InterfaceSelection::Serial,
            InterfaceSelection::Udp,
            InterfaceSelection::Both,
        ] {
            assert_eq!(std::format!("{selection}").parse(), Ok(selection));
        }
    }
}
