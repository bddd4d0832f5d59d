//! Contains the palette table and hex palette parsing.

use crate::{MAX_K, PixelizeError};
use palette::Srgb;
use std::fmt::{Debug, Display};

/// A non-fatal warning for a palette line that is not a valid hex color code.
///
/// The inner value is the offending line as it appeared in the source.
/// Warnings accumulate while parsing continues with the remaining lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidHexLine(pub String);

impl Display for InvalidHexLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid hex code in palette: {}", self.0)
    }
}

/// An ordered table of 1 to [`MAX_COLORS`](crate::MAX_COLORS) palette colors.
///
/// Insertion order is preserved: when a pixel is equidistant from several
/// entries, quantization selects the entry with the lowest index.
///
/// # Examples
/// From an explicit color list:
/// ```
/// # use pixelize::PaletteTable;
/// # use palette::Srgb;
/// # fn main() -> Result<(), pixelize::PixelizeError> {
/// let palette = PaletteTable::new(vec![Srgb::new(0, 0, 0), Srgb::new(255, 255, 255)])?;
/// # Ok(())
/// # }
/// ```
///
/// From the contents of a `.hex` palette file, one `RRGGBB` code per line:
/// ```
/// # use pixelize::PaletteTable;
/// # fn main() -> Result<(), pixelize::PixelizeError> {
/// let (palette, warnings) = PaletteTable::from_hex_lines("#1a1c2c\n#f4f4f4\nnot a color".lines())?;
/// assert_eq!(palette.colors().len(), 2);
/// assert_eq!(warnings.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteTable {
    /// The palette entries in insertion order.
    colors: Vec<Srgb<u8>>,
}

impl PaletteTable {
    /// Creates a new [`PaletteTable`] from an ordered color list.
    ///
    /// Only the first [`MAX_COLORS`](crate::MAX_COLORS) colors are retained;
    /// any further colors are silently dropped, mirroring the addressable
    /// size of an indexed-color image.
    ///
    /// # Errors
    /// Returns [`PixelizeError::EmptyPalette`] if `colors` is empty.
    pub fn new(mut colors: Vec<Srgb<u8>>) -> Result<Self, PixelizeError> {
        if colors.is_empty() {
            return Err(PixelizeError::EmptyPalette);
        }
        colors.truncate(MAX_K);
        Ok(Self { colors })
    }

    /// Parses a palette from text lines, each expected to hold a 6-digit hex
    /// color code with an optional leading `#`.
    ///
    /// Lines that do not parse (including blank lines) are reported as
    /// [`InvalidHexLine`] warnings and skipped; parsing continues with the
    /// remaining lines. Accepted colors beyond the
    /// [`MAX_COLORS`](crate::MAX_COLORS)th are silently dropped.
    ///
    /// # Errors
    /// Returns [`PixelizeError::EmptyPalette`] if no line holds a valid color.
    pub fn from_hex_lines<'a>(
        lines: impl IntoIterator<Item = &'a str>,
    ) -> Result<(Self, Vec<InvalidHexLine>), PixelizeError> {
        let mut colors = Vec::new();
        let mut warnings = Vec::new();

        for line in lines {
            if let Some(color) = parse_hex_line(line) {
                if colors.len() < MAX_K {
                    colors.push(color);
                }
            } else {
                warnings.push(InvalidHexLine(line.to_owned()));
            }
        }

        Ok((Self::new(colors)?, warnings))
    }

    /// Returns the palette entries in insertion order.
    ///
    /// The returned slice is never empty and never longer than
    /// [`MAX_COLORS`](crate::MAX_COLORS).
    #[must_use]
    pub fn colors(&self) -> &[Srgb<u8>] {
        &self.colors
    }
}

/// Parses one palette line into a color.
///
/// Whitespace is trimmed and leading `#` characters are stripped; the
/// remainder must be exactly 6 hexadecimal digits.
fn parse_hex_line(line: &str) -> Option<Srgb<u8>> {
    let code = line.trim().trim_start_matches('#');
    if code.len() != 6 || !code.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let value = u32::from_str_radix(code, 16).ok()?;

    #[allow(clippy::cast_possible_truncation)]
    {
        Some(Srgb::new(
            (value >> 16) as u8,
            (value >> 8) as u8,
            value as u8,
        ))
    }
}

/// Encodes a color as a lowercase `rrggbb` hex code.
#[must_use]
pub fn encode_hex(color: Srgb<u8>) -> String {
    format!("{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tests::*;

    #[test]
    fn parses_plain_and_prefixed_lines() {
        let (palette, warnings) =
            PaletteTable::from_hex_lines("1a1c2c\n#5d275d\n  #b13e53  ".lines()).unwrap();

        assert!(warnings.is_empty());
        assert_eq!(
            palette.colors(),
            &[
                Srgb::new(0x1a, 0x1c, 0x2c),
                Srgb::new(0x5d, 0x27, 0x5d),
                Srgb::new(0xb1, 0x3e, 0x53),
            ]
        );
    }

    #[test]
    fn hex_parsing_is_case_insensitive() {
        let (upper, _) = PaletteTable::from_hex_lines(["#B13E53"]).unwrap();
        let (lower, _) = PaletteTable::from_hex_lines(["#b13e53"]).unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn valid_lines_round_trip() {
        let lines = ["000000", "ffffff", "c86432", "1a1c2c"];
        let (palette, warnings) = PaletteTable::from_hex_lines(lines).unwrap();

        assert!(warnings.is_empty());
        for (line, &color) in lines.iter().zip(palette.colors()) {
            assert_eq!(encode_hex(color), *line);
        }
    }

    #[test]
    fn malformed_lines_warn_and_parsing_continues() {
        let (palette, warnings) =
            PaletteTable::from_hex_lines("fish\n\nff0000\n12345\n1234567".lines()).unwrap();

        assert_eq!(palette.colors(), &[Srgb::new(255, 0, 0)]);
        assert_eq!(
            warnings,
            vec![
                InvalidHexLine("fish".to_owned()),
                InvalidHexLine(String::new()),
                InvalidHexLine("12345".to_owned()),
                InvalidHexLine("1234567".to_owned()),
            ]
        );
    }

    #[test]
    fn non_hex_six_char_line_warns() {
        let (palette, warnings) = PaletteTable::from_hex_lines(["ff0000", "gggggg"]).unwrap();
        assert_eq!(palette.colors().len(), 1);
        assert_eq!(warnings, vec![InvalidHexLine("gggggg".to_owned())]);
    }

    #[test]
    fn no_valid_colors_is_fatal() {
        assert_eq!(
            PaletteTable::from_hex_lines("oops\n#12\n".lines()).unwrap_err(),
            PixelizeError::EmptyPalette
        );
        assert_eq!(PaletteTable::new(Vec::new()).unwrap_err(), PixelizeError::EmptyPalette);
    }

    #[test]
    fn truncates_to_max_colors() {
        let lines = (0..300).map(|i| format!("{i:06x}")).collect::<Vec<_>>();
        let (palette, warnings) =
            PaletteTable::from_hex_lines(lines.iter().map(String::as_str)).unwrap();

        assert_eq!(palette.colors().len(), MAX_K);
        assert!(warnings.is_empty());
        assert_eq!(*palette.colors().last().unwrap(), Srgb::new(0, 0, 255));

        let colors = (0..300).map(|_| gray(7)).collect::<Vec<_>>();
        assert_eq!(PaletteTable::new(colors).unwrap().colors().len(), MAX_K);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let (palette, _) = PaletteTable::from_hex_lines(["ffffff", "000000"]).unwrap();
        assert_eq!(palette.colors(), &[gray(255), gray(0)]);
    }
}
