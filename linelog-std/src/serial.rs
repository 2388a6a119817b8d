//! Serial sinks for the std platform.

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Stdout, Write};
use std::os::unix::fs::OpenOptionsExt;

use camino::Utf8Path;
use linelog::sink::{SerialSink, SerialWriteError, SinkError};
use nix::fcntl::OFlag;
use nix::sys::termios::{self, BaudRate, SetArg};

use crate::{IntoSinkError, OpenError};

/// The serial link speed used when none is configured.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// A serial sink on a hosted platform.
pub enum StdSerial {
    /// A serial device node or a plain file.
    Device(File),
    /// The process' standard output.
    ///
    /// Stdout stays blocking, and the logger holds its lock while writing. A reader that stops
    /// draining stdout therefore stalls every logger in the process; use a device or UDP where
    /// that matters.
    Stdout(Stdout),
}

impl core::fmt::Debug for StdSerial {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StdSerial::Device(_) => f.debug_tuple("Device").finish_non_exhaustive(),
            StdSerial::Stdout(_) => f.debug_tuple("Stdout").finish_non_exhaustive(),
        }
    }
}

impl StdSerial {
    /// Opens the serial device at `path` for writing.
    ///
    /// Terminals are switched to raw mode at `baud_rate`; anything else, such as a regular file
    /// or a pipe, is written as is.
    /// The device is opened non-blocking, so a full transmit buffer surfaces as
    /// [`SinkError::WouldBlock`] instead of stalling the logging call.
    pub fn open_device(path: &Utf8Path, baud_rate: u32) -> Result<Self, OpenError> {
        let device_error = |source| OpenError::SerialDevice {
            path: path.to_owned(),
            source,
        };

        let file = OpenOptions::new()
            .write(true)
            .custom_flags((OFlag::O_NOCTTY | OFlag::O_NONBLOCK).bits())
            .open(path)
            .map_err(device_error)?;

        if nix::unistd::isatty(&file).unwrap_or(false) {
            let speed =
                self::baud_rate(baud_rate).ok_or(OpenError::UnsupportedBaudRate(baud_rate))?;
            configure_terminal(&file, speed)
                .map_err(|errno| device_error(std::io::Error::from(errno)))?;
            tracing::debug!(%path, baud_rate, "configured serial terminal");
        } else {
            tracing::debug!(%path, "serial device is not a terminal, writing as plain file");
        }

        Ok(Self::Device(file))
    }

    /// Uses the process' standard output as the serial link.
    ///
    /// Writes block until stdout accepts them, see [`StdSerial::Stdout`].
    pub fn stdout() -> Self {
        Self::Stdout(std::io::stdout())
    }
}

impl SerialSink for StdSerial {
    fn write(&mut self, bytes: &[u8]) -> Result<(), SerialWriteError> {
        match self {
            StdSerial::Device(device) => write_all(device, bytes),
            StdSerial::Stdout(stdout) => write_all(stdout, bytes),
        }
    }
}

/// Writes all of `bytes`, retrying interrupted calls and reporting how far a failed write got.
fn write_all(writer: &mut impl Write, bytes: &[u8]) -> Result<(), SerialWriteError> {
    let mut written = 0;
    while written < bytes.len() {
        match writer.write(&bytes[written..]) {
            Ok(0) => return Err(SerialWriteError::partial(SinkError::Incomplete, written)),
            Ok(count) => written += count,
            Err(error) if error.kind() == ErrorKind::Interrupted => continue,
            Err(error) => {
                return Err(SerialWriteError::partial(error.into_sink_error(), written));
            }
        }
    }
    Ok(())
}

/// Puts the terminal into raw output mode at `speed`.
fn configure_terminal(file: &File, speed: BaudRate) -> nix::Result<()> {
    let mut attributes = termios::tcgetattr(file)?;
    termios::cfmakeraw(&mut attributes);
    termios::cfsetspeed(&mut attributes, speed)?;
    termios::tcsetattr(file, SetArg::TCSANOW, &attributes)
}

/// Maps a numeric link speed to its termios constant.
///
/// Returns `None` for speeds without a portable constant.
pub fn baud_rate(value: u32) -> Option<BaudRate> {
    let rate = match value {
        1200 => BaudRate::B1200,
        2400 => BaudRate::B2400,
        4800 => BaudRate::B4800,
        9600 => BaudRate::B9600,
        19_200 => BaudRate::B19200,
        38_400 => BaudRate::B38400,
        57_600 => BaudRate::B57600,
        115_200 => BaudRate::B115200,
        230_400 => BaudRate::B230400,
        _ => return None,
    };
    Some(rate)
}
