//! Seven-segment layouts
//!
//! ```text
//!    ─A─
//!   F   B
//!    ─G─
//!   E   C
//!    ─D─  .DP
//! ```

use core::ops::{BitAnd, BitOr, BitOrAssign};

/// Set of lit segments in one digit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Segments(u8);

impl Segments {
    pub const NONE: Self = Self(0);
    pub const A: Self = Self(1 << 0);
    pub const B: Self = Self(1 << 1);
    pub const C: Self = Self(1 << 2);
    pub const D: Self = Self(1 << 3);
    pub const E: Self = Self(1 << 4);
    pub const F: Self = Self(1 << 5);
    pub const G: Self = Self(1 << 6);
    pub const DP: Self = Self(1 << 7);
    pub const ALL: Self = Self(0xFF);

    /// Build from raw bits (bit 0 = A ... bit 7 = DP)
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Raw bits as written to display RAM
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether every segment in `other` is lit
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Light the segments in `other`
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Turn off the segments in `other`
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    /// Layout for a hexadecimal digit (0-15)
    pub fn for_digit(digit: u8) -> Option<Self> {
        DIGITS.get(digit as usize).copied().map(Self)
    }

    /// Layout for a character, where one exists
    ///
    /// Letters are drawn in whichever case reads best on seven segments.
    pub fn for_char(c: char) -> Option<Self> {
        if let Some(d) = c.to_digit(16) {
            return Self::for_digit(d as u8);
        }
        let bits = match c {
            ' ' => 0x00,
            '-' => 0x40,
            '_' => 0x08,
            '=' => 0x48,
            '\'' => 0x20,
            '"' => 0x22,
            'G' | 'g' => 0x3D,
            'H' => 0x76,
            'h' => 0x74,
            'I' | 'i' => 0x30,
            'J' | 'j' => 0x1E,
            'L' | 'l' => 0x38,
            'N' | 'n' => 0x54,
            'O' | 'o' => 0x5C,
            'P' | 'p' => 0x73,
            'R' | 'r' => 0x50,
            'S' | 's' => 0x6D,
            'T' | 't' => 0x78,
            'U' => 0x3E,
            'u' => 0x1C,
            'Y' | 'y' => 0x6E,
            _ => return None,
        };
        Some(Self(bits))
    }
}

/// 0-9, A, b, C, d, E, F
const DIGITS: [u8; 16] = [
    0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F, 0x77, 0x7C, 0x39, 0x5E, 0x79, 0x71,
];

impl BitOr for Segments {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Segments {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Segments {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}
