//! Bounded line rendering.
//!
//! A rendered line is the `"<LEVEL> <file>:<line>: "` preamble followed by the user message, held
//! in a buffer of fixed capacity `C`.
//! If the composition does not fit, the line is cut and ends in [`TRUNCATION_MARKER`]; its length
//! is then exactly `C`.

use core::fmt::{self, Write};

use heapless::String;

use crate::severity::Severity;

/// Line capacity used on devices.
pub const EMBEDDED_LINE_CAPACITY: usize = 100;

/// Line capacity used in hosted builds and tests.
pub const HOSTED_LINE_CAPACITY: usize = 255;

/// Marks the end of a line that was cut to fit its capacity.
pub const TRUNCATION_MARKER: &str = "...";

/// Written to the serial sink after every line.
pub const LINE_TERMINATOR: &[u8] = b"\r\n";

/// A line of text bounded by the capacity `C`.
///
/// Invariants:
/// - `len() <= C`
/// - if [`is_truncated`](Self::is_truncated), `len() == C` and the line ends with
///   [`TRUNCATION_MARKER`]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RenderedLine<const C: usize> {
    text: String<C>,
    truncated: bool,
}

impl<const C: usize> RenderedLine<C> {
    /// Renders `severity`, the source location and `args` into a bounded line.
    ///
    /// Formatting stops at the first error returned by a `Display` implementation; everything
    /// written up to that point is kept.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linelog::{RenderedLine, Severity};
    ///
    /// let line = RenderedLine::<20>::compose(
    ///     Severity::Error,
    ///     "f.c",
    ///     10,
    ///     format_args!("failure code {}", 12345),
    /// );
    /// assert_eq!(line.as_str(), "ERROR f.c:10: fai...");
    /// assert!(line.is_truncated());
    /// ```
    pub fn compose(severity: Severity, file: &str, line: u32, args: fmt::Arguments<'_>) -> Self {
        let mut writer = LineWriter::new();

        // Errors here mean either overflow, which `finish` handles, or a failing `Display` impl,
        // whose partial output is kept.
        let _ = write!(
            writer,
            "{severity:<width$} {file}:{line}: ",
            width = Severity::NAME_WIDTH
        );
        let _ = writer.write_fmt(args);

        writer.finish()
    }

    /// Returns the line as a string slice.
    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    /// Returns the line as bytes, ready to hand to a sink.
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Returns the length of the line in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` if the line holds no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns `true` if the line was cut to fit its capacity.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Returns the capacity `C`.
    pub const fn capacity(&self) -> usize {
        C
    }
}

impl<const C: usize> fmt::Display for RenderedLine<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<const C: usize> AsRef<str> for RenderedLine<C> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<const C: usize> AsRef<[u8]> for RenderedLine<C> {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// A [`fmt::Write`] sink that never grows past `C` bytes.
///
/// The first write that does not fit fills the remaining space, marks the writer as overflowed and
/// returns [`fmt::Error`] so that formatting stops early.
#[derive(Debug)]
pub(crate) struct LineWriter<const C: usize> {
    text: String<C>,
    overflowed: bool,
}

impl<const C: usize> LineWriter<C> {
    const FITS_MARKER: () = assert!(
        C >= TRUNCATION_MARKER.len(),
        "line capacity must hold the truncation marker"
    );

    pub(crate) fn new() -> Self {
        let () = Self::FITS_MARKER;

        Self {
            text: String::new(),
            overflowed: false,
        }
    }

    /// Seals the writer into a line, applying the truncation marker if anything was cut.
    pub(crate) fn finish(mut self) -> RenderedLine<C> {
        if self.overflowed {
            let keep = floor_char_boundary(self.text.as_str(), C - TRUNCATION_MARKER.len());
            self.text.truncate(keep);
            // A multi-byte character straddling the cut leaves a gap; pad it with dots so the
            // line still ends at exactly `C`.
            while self.text.push('.').is_ok() {}
        }

        RenderedLine {
            text: self.text,
            truncated: self.overflowed,
        }
    }
}

impl<const C: usize> Write for LineWriter<C> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.overflowed {
            return Err(fmt::Error);
        }

        let remaining = C - self.text.len();
        if s.len() <= remaining {
            // Cannot fail, the length was checked above.
            let _ = self.text.push_str(s);
            return Ok(());
        }

        let _ = self.text.push_str(&s[..floor_char_boundary(s, remaining)]);
        self.overflowed = true;
        Err(fmt::Error)
    }
}

/// Returns the largest char boundary of `s` that is `<= index`.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }

    (0..=index)
        .rev()
        .find(|&i| s.is_char_boundary(i))
        .unwrap_or(0)
}
