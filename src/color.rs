//! RGBA color data and parsing of hex color literals

use std::fmt::{Display, Formatter, LowerHex};
use std::str::FromStr;
use thiserror::Error;

#[cfg(test)]
use quickcheck::{Arbitrary, Gen};

/// Color data represented as red, green, blue and alpha channels each having a depth of 8 bits
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Rgba(pub u8, pub u8, pub u8, pub u8);

/// An error which indicates that a hex color literal could not be parsed
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum ColorParseError {
    /// The literal did not have six or eight hex digits
    #[error("color literal {0:?} must have 6 (RRGGBB) or 8 (RRGGBBAA) hex digits")]
    InvalidLength(String),
    /// The literal contained a character that is not a hex digit
    #[error("color literal {0:?} contains non-hexadecimal characters")]
    InvalidDigit(String),
}

impl Rgba {
    /// Whether this color is fully transparent
    pub fn is_transparent(&self) -> bool {
        self.3 == 0
    }
}

impl Default for Rgba {
    fn default() -> Self {
        // opaque black
        Self(0, 0, 0, 0xFF)
    }
}

impl From<[u8; 4]> for Rgba {
    fn from(data: [u8; 4]) -> Self {
        Self(data[0], data[1], data[2], data[3])
    }
}

impl From<Rgba> for [u8; 4] {
    fn from(value: Rgba) -> Self {
        [value.0, value.1, value.2, value.3]
    }
}

impl From<u32> for Rgba {
    fn from(src: u32) -> Self {
        let b = src.to_be_bytes();
        Self(b[0], b[1], b[2], b[3])
    }
}

impl From<Rgba> for u32 {
    fn from(value: Rgba) -> Self {
        u32::from_be_bytes([value.0, value.1, value.2, value.3])
    }
}

impl FromStr for Rgba {
    type Err = ColorParseError;

    /// Parse an `RRGGBB` or `RRGGBBAA` literal (case-insensitive); a missing
    /// alpha channel defaults to fully opaque.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit(s.to_string()));
        }
        let parse_channel = |digits: &str| {
            u8::from_str_radix(digits, 16).map_err(|_| ColorParseError::InvalidDigit(s.to_string()))
        };
        match s.len() {
            6 => Ok(Self(
                parse_channel(&s[0..2])?,
                parse_channel(&s[2..4])?,
                parse_channel(&s[4..6])?,
                0xFF,
            )),
            8 => Ok(Self(
                parse_channel(&s[0..2])?,
                parse_channel(&s[2..4])?,
                parse_channel(&s[4..6])?,
                parse_channel(&s[6..8])?,
            )),
            _ => Err(ColorParseError::InvalidLength(s.to_string())),
        }
    }
}

impl LowerHex for Rgba {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "{:02x}{:02x}{:02x}{:02x}",
            self.0, self.1, self.2, self.3
        ))
    }
}

impl Display for Rgba {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("#{:x}", self))
    }
}

#[cfg(test)]
impl Arbitrary for Rgba {
    fn arbitrary(g: &mut Gen) -> Self {
        u32::arbitrary(g).into()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use quickcheck::quickcheck;

    quickcheck! {
        fn test_u32_conversion(color: Rgba) -> bool {
            let encoded: u32 = color.into();
            Rgba::from(encoded) == color
        }
    }

    #[test]
    fn test_parse_rgb_defaults_alpha() {
        assert_eq!("ff8000".parse::<Rgba>().unwrap(), Rgba(0xFF, 0x80, 0x00, 0xFF));
    }

    #[test]
    fn test_parse_rgba() {
        assert_eq!("00ff0080".parse::<Rgba>().unwrap(), Rgba(0x00, 0xFF, 0x00, 0x80));
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("AbCdEf".parse::<Rgba>(), "abcdef".parse::<Rgba>());
    }

    #[test]
    fn test_parse_rejects_invalid_length() {
        assert!(matches!(
            "abcd".parse::<Rgba>(),
            Err(ColorParseError::InvalidLength(_))
        ));
        assert!(matches!(
            "aabbccddee".parse::<Rgba>(),
            Err(ColorParseError::InvalidLength(_))
        ));
    }

    #[test]
    fn test_parse_rejects_invalid_digits() {
        assert!(matches!(
            "gg0000".parse::<Rgba>(),
            Err(ColorParseError::InvalidDigit(_))
        ));
    }

    #[test]
    fn test_transparency() {
        assert!(Rgba(1, 2, 3, 0).is_transparent());
        assert!(!Rgba(1, 2, 3, 1).is_transparent());
    }
}
