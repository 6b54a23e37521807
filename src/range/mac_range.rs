//! MAC address ranges and vendor-style prefixes.

use super::{ByteRange, RangeValue};
use crate::error::{AddrError, Result};
use crate::generator::{ByteArrayGenerator, ByteSpec, Layout};
use crate::models::{MacAddress, MAC_ADDR_SIZE};
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

const MAX_PREFIX_LEN: usize = MAC_ADDR_SIZE - 1;

lazy_static! {
    static ref RE_PREFIX: Regex =
        Regex::new(r"^[0-9A-Fa-f]{2}(?:[:-][0-9A-Fa-f]{2}){0,4}$").unwrap();
}

/// A range of MAC addresses, six `:`-separated hex positions such as
/// `00:1b:2c:*:00-0f:*`.
pub type MacRange = ByteRange<MacAddress>;

impl RangeValue for MacAddress {
    const WHAT: &'static str = "MAC range";

    fn generator_for(spec: &str) -> Result<ByteArrayGenerator> {
        ByteArrayGenerator::parse_with(spec, Layout::Hex, MAC_ADDR_SIZE)
    }

    fn decode(bytes: &[u8]) -> Result<MacAddress> {
        MacAddress::from_bytes(bytes)
    }

    fn encode(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

/// The leading one to five octets of a MAC address, e.g. an OUI `00:1b:2c`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MacPrefix {
    bytes: Vec<u8>,
}

impl MacPrefix {
    /// Parse 1 to 5 hex octets separated by `:` or `-`.
    pub fn parse(text: &str) -> Result<MacPrefix> {
        let s = text.trim();
        if !RE_PREFIX.is_match(s) {
            return Err(AddrError::malformed("MAC prefix", s));
        }
        let bytes = s
            .split(|c| c == ':' || c == '-')
            .map(|octet| u8::from_str_radix(octet, 16))
            .collect::<std::result::Result<Vec<u8>, _>>()
            .map_err(|_| AddrError::malformed("MAC prefix", s))?;
        Ok(MacPrefix { bytes })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<MacPrefix> {
        if bytes.is_empty() || bytes.len() > MAX_PREFIX_LEN {
            return Err(AddrError::invalid(
                "MAC prefix",
                format!("must be 1 to {MAX_PREFIX_LEN} bytes, got {}", bytes.len()),
            ));
        }
        Ok(MacPrefix {
            bytes: bytes.to_vec(),
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of octets in the prefix.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn contains(&self, mac: &MacAddress) -> bool {
        mac.as_bytes().starts_with(&self.bytes)
    }

    /// The range with the prefix octets fixed and `*` everywhere else.
    pub fn to_range(&self) -> MacRange {
        let specs = (0..MAC_ADDR_SIZE)
            .map(|i| self.bytes.get(i).map_or(ByteSpec::ANY, |&b| ByteSpec::fixed(b)))
            .collect();
        ByteRange::from_generator(ByteArrayGenerator::from_specs(Layout::Hex, specs))
    }
}

impl fmt::Display for MacPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}", self.bytes.iter().format(":"))
    }
}

impl fmt::Debug for MacPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MacPrefix({self})")
    }
}

impl FromStr for MacPrefix {
    type Err = AddrError;

    fn from_str(s: &str) -> Result<MacPrefix> {
        MacPrefix::parse(s)
    }
}

string_serde!(MacPrefix);

#[cfg(test)]
mod tests {
    use super::*;

    fn mac(s: &str) -> MacAddress {
        MacAddress::parse(s).unwrap()
    }

    #[test]
    fn test_parse_mac_range() {
        let r = MacRange::parse("00:1B:2c:*:00-0F:ff").unwrap();
        assert_eq!(r.to_string(), "00:1b:2c:*:00-0f:ff");
        assert_eq!(r.size_as_long(), 256 * 16);
        assert_eq!(r.first().unwrap(), mac("00:1b:2c:00:00:ff"));
        assert_eq!(r.last().unwrap(), mac("00:1b:2c:ff:0f:ff"));
        assert!(r.contains(&mac("00:1b:2c:7f:0a:ff")));
        assert!(!r.contains(&mac("00:1b:2c:7f:1a:ff")));
        assert!(MacRange::parse("00:1b:2c:*:00").unwrap_err().is_malformed());
        assert!(MacRange::parse("00-1b-2c-00-00-00").unwrap_err().is_malformed());
        assert!(MacRange::parse("00:1b:2c:*:0f-00:ff").unwrap_err().is_invalid());
    }

    #[test]
    fn test_mac_range_algebra() {
        let wide = MacRange::parse("00:1b:*:*:*:*").unwrap();
        let narrow = MacRange::parse("00:1b:2c:*:*:01-02").unwrap();
        assert!(wide.contains_range(&narrow).unwrap());
        assert!(!narrow.contains_range(&wide).unwrap());
        assert!(narrow.intersects(&wide).unwrap());
        let members: Vec<MacAddress> = MacRange::parse("00:00:00:00:00:fe-ff")
            .unwrap()
            .iter()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(members, vec![mac("00:00:00:00:00:fe"), MacAddress::from_u64(0xff).unwrap()]);
    }

    #[test]
    fn test_mac_range_list_round_trip() {
        let list = MacRange::parse_list("00:1b:*:*:*:*,ff:ff:ff:ff:ff:00-0f").unwrap();
        let text = MacRange::list_to_string(&list);
        assert_eq!(text, "00:1b:*:*:*:*,ff:ff:ff:ff:ff:00-0f");
        assert_eq!(MacRange::parse_list(&text).unwrap(), list);
    }

    #[test]
    fn test_prefix() {
        let p = MacPrefix::parse("00-1B:2c").unwrap();
        assert_eq!(p.len(), 3);
        assert_eq!(p.to_string(), "00:1b:2c");
        assert!(p.contains(&mac("00:1b:2c:3d:4e:5f")));
        assert!(!p.contains(&mac("00:1b:2d:3d:4e:5f")));
        assert_eq!(p.to_range().to_string(), "00:1b:2c:*:*:*");
        assert!(p.to_range().contains(&mac("00:1b:2c:00:00:01")));
        assert_eq!(MacPrefix::parse("0a:0b:0c:0d:0e").unwrap().to_range().size_as_long(), 256);
    }

    #[test]
    fn test_prefix_failures() {
        assert!(MacPrefix::parse("").unwrap_err().is_malformed());
        assert!(MacPrefix::parse("00:1b:2c:3d:4e:5f").unwrap_err().is_malformed());
        assert!(MacPrefix::parse("0:1b").unwrap_err().is_malformed());
        assert!(MacPrefix::from_bytes(&[]).unwrap_err().is_invalid());
        assert!(MacPrefix::from_bytes(&[0; 6]).unwrap_err().is_invalid());
        assert_eq!(MacPrefix::from_bytes(&[0xAB]).unwrap().to_string(), "ab");
    }
}
