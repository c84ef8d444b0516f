//! Encoding of paint operations into IPv6 addresses
//!
//! The canvas interprets the low 64 bits of a pinged address as
//! `XXXX:YYYY:RRGG:BBAA`. The high 64 bits are the canvas operator's fixed
//! prefix, carried here as a validated [`BaseAddress`].

use crate::color::Rgba;
use std::fmt::{Display, Formatter};
use std::net::Ipv6Addr;
use std::str::FromStr;
use thiserror::Error;

/// The suffix appended to a base address to check that the combination still
/// forms a syntactically valid IPv6 literal
const DUMMY_SUFFIX: &str = "ffff:ffff:ffff:ffff";

/// An error which indicates that a base address cannot prefix a valid IPv6 address
#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("{base:?} followed by 64 bits of pixel data is not a valid IPv6 address")]
pub struct InvalidBaseAddressError {
    /// The rejected base address
    pub base: String,
}

/// The fixed high-order 64-bit prefix shared by every address of a run
///
/// The contained string ends in `::` (or a single trailing colon) so that four
/// more hextets can be appended verbatim. Validated at construction and never
/// mutated afterwards.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BaseAddress(String);

impl BaseAddress {
    /// Validate the given prefix string and wrap it
    pub fn new(base: &str) -> Result<Self, InvalidBaseAddressError> {
        let probe = format!("{}{}", base, DUMMY_SUFFIX);
        match Ipv6Addr::from_str(&probe) {
            Ok(_) => Ok(Self(base.to_string())),
            Err(_) => Err(InvalidBaseAddressError {
                base: base.to_string(),
            }),
        }
    }

    /// The raw prefix string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for BaseAddress {
    type Err = InvalidBaseAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Display for BaseAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Encode one paint operation as the IPv6 address that, when pinged, paints it
///
/// Pure function: the wire contract is `base` followed by
/// `xxxx:yyyy:rrgg:bbaa` in lowercase zero-padded hex.
pub fn encode_address(base: &BaseAddress, x: u16, y: u16, color: Rgba) -> String {
    format!(
        "{}{:04x}:{:04x}:{:02x}{:02x}:{:02x}{:02x}",
        base, x, y, color.0, color.1, color.2, color.3
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use quickcheck::quickcheck;

    fn base() -> BaseAddress {
        BaseAddress::new("2602:f75c:c0::").unwrap()
    }

    #[test]
    fn test_encoding_matches_wire_contract() {
        let addr = encode_address(&base(), 4, 255, Rgba(0xFF, 0x80, 0x00, 0xFF));
        assert_eq!(addr, "2602:f75c:c0::0004:00ff:ff80:00ff");
    }

    #[test]
    fn test_valid_base_addresses_are_accepted() {
        assert!(BaseAddress::new("2602:f75c:c0::").is_ok());
        assert!(BaseAddress::new("fe80:1:2:3:").is_ok());
    }

    #[test]
    fn test_invalid_base_addresses_are_rejected() {
        assert!(BaseAddress::new("not an address").is_err());
        assert!(BaseAddress::new("2602:f75c:c0").is_err());
        // a full address leaves no room for pixel data
        assert!(BaseAddress::new("2602:f75c:c0::1").is_err());
    }

    quickcheck! {
        fn test_encoding_roundtrips(x: u16, y: u16, color: Rgba) -> bool {
            let addr = encode_address(&base(), x, y, color);
            let suffix = addr.strip_prefix("2602:f75c:c0::").unwrap();
            let fields: Vec<&str> = suffix.split(':').collect();
            let got_x = u16::from_str_radix(fields[0], 16).unwrap();
            let got_y = u16::from_str_radix(fields[1], 16).unwrap();
            let rg = u16::from_str_radix(fields[2], 16).unwrap();
            let ba = u16::from_str_radix(fields[3], 16).unwrap();
            let got_color = Rgba::from(((rg as u32) << 16) | ba as u32);
            got_x == x && got_y == y && got_color == color
        }

        fn test_encoded_address_is_valid_ipv6(x: u16, y: u16, color: Rgba) -> bool {
            let addr = encode_address(&base(), x, y, color);
            Ipv6Addr::from_str(&addr).is_ok()
        }
    }
}
