//! Decimal rendering of raw byte buffers.

use core::fmt::{self, Write};

use crate::line::{LineWriter, RenderedLine};

/// Displays a byte buffer as `<d0:d1:...:dn>`, each byte in decimal.
///
/// An empty buffer displays as `<>`.
///
/// # Examples
///
/// ```rust
/// use linelog::ByteDump;
///
/// assert_eq!(format!("{}", ByteDump(&[0, 127, 255])), "<0:127:255>");
/// assert_eq!(format!("{}", ByteDump(&[])), "<>");
/// ```
#[derive(Copy, Clone, Debug)]
pub struct ByteDump<'a>(pub &'a [u8]);

impl fmt::Display for ByteDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('<')?;
        for (index, byte) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_char(':')?;
            }
            write!(f, "{byte}")?;
        }
        f.write_char('>')
    }
}

/// Renders `bytes` as `<d0:d1:...:dn>` into a line of capacity `C`.
///
/// Output that would exceed `C` is cut like any other line: it is exactly `C` bytes long and ends
/// with the truncation marker.
///
/// # Examples
///
/// ```rust
/// use linelog::render_bytes;
///
/// assert_eq!(render_bytes::<100>(&[]).as_str(), "<>");
/// assert_eq!(render_bytes::<100>(&[1, 2, 3]).as_str(), "<1:2:3>");
/// assert_eq!(render_bytes::<8>(&[100, 200, 255]).as_str(), "<100:...");
/// ```
pub fn render_bytes<const C: usize>(bytes: &[u8]) -> RenderedLine<C> {
    let mut writer = LineWriter::new();
    let _ = write!(writer, "{}", ByteDump(bytes));
    writer.finish()
}

#[cfg(test)]
mod tests {
    use std::format;
    use std::vec::Vec;

    use pretty_assertions::assert_eq;

    use super::{ByteDump, render_bytes};
    use crate::line::{EMBEDDED_LINE_CAPACITY, HOSTED_LINE_CAPACITY, TRUNCATION_MARKER};

    #[test]
    fn empty() {
        let rendered = render_bytes::<EMBEDDED_LINE_CAPACITY>(&[]);
        assert_eq!(rendered.as_str(), "<>");
        assert!(!rendered.is_truncated());
    }

    #[test]
    fn single_byte() {
        assert_eq!(render_bytes::<EMBEDDED_LINE_CAPACITY>(&[42]).as_str(), "<42>");
    }

    #[test]
    fn several_bytes() {
        assert_eq!(
            render_bytes::<EMBEDDED_LINE_CAPACITY>(&[1, 2, 3]).as_str(),
            "<1:2:3>"
        );
        assert_eq!(
            render_bytes::<EMBEDDED_LINE_CAPACITY>(&[0, 10, 255]).as_str(),
            "<0:10:255>"
        );
    }

    #[test]
    fn exact_fit() {
        // "<255:255>" is nine bytes.
        let rendered = render_bytes::<9>(&[255, 255]);
        assert_eq!(rendered.as_str(), "<255:255>");
        assert!(!rendered.is_truncated());
    }

    #[test]
    fn large_input_is_bounded() {
        let input: Vec<u8> = (0..=255).collect();

        let rendered = render_bytes::<EMBEDDED_LINE_CAPACITY>(&input);
        assert_eq!(rendered.len(), EMBEDDED_LINE_CAPACITY);
        assert!(rendered.is_truncated());
        assert!(rendered.as_str().starts_with("<0:1:2:3:"));
        assert!(rendered.as_str().ends_with(TRUNCATION_MARKER));

        let rendered = render_bytes::<HOSTED_LINE_CAPACITY>(&input);
        assert_eq!(rendered.len(), HOSTED_LINE_CAPACITY);
    }

    #[test]
    fn dump_matches_render() {
        let input = [7, 0, 19, 200];
        assert_eq!(
            format!("{}", ByteDump(&input)),
            render_bytes::<EMBEDDED_LINE_CAPACITY>(&input).as_str()
        );
    }
}
