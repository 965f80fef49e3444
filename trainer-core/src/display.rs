//! 7-segment display codes
//!
//! Bit layout is `0bGFEDCBA`: bit 0 is segment A (top), bit 6 is segment G
//! (middle). The output port carries the segments in bits 6..0 and the
//! ready LED in bit 7.

/// Segments to light, bits 6..0
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayCode(u8);

const SEGMENT_MASK: u8 = 0x7F;
const READY_BIT: u8 = 0x80;

impl DisplayCode {
    /// All segments off
    pub const BLANK: DisplayCode = DisplayCode(0x00);
    /// Unrecognized sequence: three horizontal bars
    pub const ERROR: DisplayCode = DisplayCode(0x49);
    /// Recognized character without a glyph: bottom bar
    pub const UNKNOWN: DisplayCode = DisplayCode(0x08);

    pub const fn from_segments(segments: u8) -> Self {
        Self(segments & SEGMENT_MASK)
    }

    pub const fn segments(&self) -> u8 {
        self.0
    }

    /// Glyph for `c`, `UNKNOWN` if the display cannot draw it
    pub const fn for_char(c: char) -> Self {
        match glyph(c) {
            Some(code) => code,
            None => Self::UNKNOWN,
        }
    }

    /// Pack segments and the ready LED into one port byte
    pub const fn to_port(&self, ready: bool) -> u8 {
        (self.0 & SEGMENT_MASK) | if ready { READY_BIT } else { 0 }
    }

    /// Split a port byte back into segments and the ready LED
    pub const fn from_port(port: u8) -> (Self, bool) {
        (Self(port & SEGMENT_MASK), port & READY_BIT != 0)
    }

    /// True if segment `index` (0 = A .. 6 = G) is lit
    pub const fn is_lit(&self, index: u8) -> bool {
        index < 7 && self.0 & (1 << index) != 0
    }
}

/// Glyph table lookup (case-insensitive)
///
/// Seven segments cannot tell every pair apart: `S`/`5` and `Z`/`2` share a
/// glyph, as do `C`/`(`.
pub const fn glyph(c: char) -> Option<DisplayCode> {
    let segments = match c.to_ascii_uppercase() {
        '0' => 0x3F,
        '1' => 0x06,
        '2' => 0x5B,
        '3' => 0x4F,
        '4' => 0x66,
        '5' => 0x6D,
        '6' => 0x7D,
        '7' => 0x07,
        '8' => 0x7F,
        '9' => 0x6F,
        'A' => 0x77,
        'B' => 0x7C,
        'C' => 0x39,
        'D' => 0x5E,
        'E' => 0x79,
        'F' => 0x71,
        'G' => 0x3D,
        'H' => 0x76,
        'I' => 0x30,
        'J' => 0x1E,
        'K' => 0x75,
        'L' => 0x38,
        'M' => 0x37,
        'N' => 0x54,
        'O' => 0x5C,
        'P' => 0x73,
        'Q' => 0x67,
        'R' => 0x50,
        'S' => 0x6D,
        'T' => 0x78,
        'U' => 0x3E,
        'V' => 0x1C,
        'W' => 0x2A,
        'X' => 0x64,
        'Y' => 0x6E,
        'Z' => 0x5B,
        '-' => 0x40,
        '=' => 0x48,
        '?' => 0x53,
        '\'' => 0x02,
        '"' => 0x22,
        '(' => 0x39,
        ')' => 0x0F,
        _ => return None,
    };
    Some(DisplayCode(segments))
}
