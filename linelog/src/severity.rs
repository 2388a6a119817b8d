//! Log message severity levels.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseSeverityError;

/// Log message severity levels.
///
/// These levels follow standard logging conventions, ordered from most verbose to most critical.
/// The derived ordering is the declaration order, so `Severity::Trace < Severity::Fatal`.
#[derive(
    Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Severity {
    /// The "trace" level.
    ///
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// The "debug" level.
    ///
    /// Designates lower priority information.
    #[default]
    Debug,

    /// The "info" level.
    ///
    /// Designates useful information.
    Info,

    /// The "warn" level.
    ///
    /// Designates hazardous situations.
    Warn,

    /// The "error" level.
    ///
    /// Designates very serious errors.
    Error,

    /// The "fatal" level.
    ///
    /// Designates critical failures that might crash the program.
    Fatal,
}

impl Severity {
    /// All severities, from most verbose to most critical.
    pub const ALL: [Severity; 6] = [
        Severity::Trace,
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Fatal,
    ];

    /// Width of the severity column in a rendered line.
    pub const NAME_WIDTH: usize = 5;

    /// Returns the uppercase name used in rendered lines.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    /// Returns `true` if a message of this severity passes the given threshold.
    pub const fn is_at_least(self, threshold: Severity) -> bool {
        self as u8 >= threshold as u8
    }
}

impl fmt::Display for Severity {
    /// Honors width and alignment flags, so `{:<5}` pads the name.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|severity| severity.as_str().eq_ignore_ascii_case(input))
            .ok_or(ParseSeverityError(()))
    }
}
