//! Validated subnet masks.

use super::{Family, IpAddress, Subnet};
use crate::config::{MAX_PREFIX_LENGTH_V4, MAX_PREFIX_LENGTH_V6, MIN_PREFIX_LENGTH};
use crate::error::{AddrError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

const WHAT: &str = "subnet mask";

/// The eight bytes that consist of leading one-bits followed by zero-bits.
const LEADING_ONES: [u8; 8] = [0x80, 0xC0, 0xE0, 0xF0, 0xF8, 0xFC, 0xFE, 0xFF];

/// An address whose bits are a run of ones followed by a run of zeros.
///
/// The top byte must be `0xFF` and the last bit must be clear, so IPv4
/// masks span /8 to /31 and IPv6 masks /8 to /127.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubnetMask {
    mask: IpAddress,
    prefix_length: u8,
}

impl SubnetMask {
    pub const MASK_255_0_0_0: SubnetMask = SubnetMask::v4(255, 0, 0, 0, 8);
    pub const MASK_255_240_0_0: SubnetMask = SubnetMask::v4(255, 240, 0, 0, 12);
    pub const MASK_255_255_0_0: SubnetMask = SubnetMask::v4(255, 255, 0, 0, 16);
    pub const MASK_255_255_248_0: SubnetMask = SubnetMask::v4(255, 255, 248, 0, 21);
    pub const MASK_255_255_255_0: SubnetMask = SubnetMask::v4(255, 255, 255, 0, 24);

    const fn v4(a: u8, b: u8, c: u8, d: u8, prefix_length: u8) -> SubnetMask {
        SubnetMask {
            mask: IpAddress::v4(a, b, c, d),
            prefix_length,
        }
    }

    /// Validate `mask` as a subnet mask.
    pub fn from_ip(mask: IpAddress) -> Result<SubnetMask> {
        let prefix_length = validate(mask.as_bytes()).map_err(|reason| {
            AddrError::invalid(WHAT, format!("{reason}: {mask}"))
        })?;
        Ok(SubnetMask {
            mask,
            prefix_length,
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<SubnetMask> {
        SubnetMask::from_ip(IpAddress::from_bytes(bytes)?)
    }

    /// Parse a mask written as an address, e.g. `255.255.248.0`.
    pub fn parse(text: &str) -> Result<SubnetMask> {
        SubnetMask::from_ip(IpAddress::parse(text)?)
    }

    /// Mask of a CIDR specification such as `10.0.0.0/21`.
    pub fn from_cidr(text: &str) -> Result<SubnetMask> {
        Ok(Subnet::parse(text)?.mask())
    }

    /// Build the mask with `prefix_length` leading one-bits.
    pub fn from_prefix_length(prefix_length: u8, family: Family) -> Result<SubnetMask> {
        let max = match family {
            Family::IPv4 => MAX_PREFIX_LENGTH_V4,
            Family::IPv6 => MAX_PREFIX_LENGTH_V6,
        };
        if !(MIN_PREFIX_LENGTH..=max).contains(&prefix_length) {
            return Err(AddrError::invalid(
                WHAT,
                format!(
                    "{family} prefix length {prefix_length} outside {MIN_PREFIX_LENGTH}..={max}"
                ),
            ));
        }
        let mut bytes = vec![0u8; family.byte_len()];
        let full = usize::from(prefix_length / 8);
        let over = usize::from(prefix_length % 8);
        bytes[..full].fill(0xFF);
        if over > 0 {
            bytes[full] = LEADING_ONES[over - 1];
        }
        SubnetMask::from_bytes(&bytes)
    }

    pub fn prefix_length(&self) -> u8 {
        self.prefix_length
    }

    pub fn family(&self) -> Family {
        self.mask.family()
    }

    pub fn to_ip_address(&self) -> IpAddress {
        self.mask
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.mask.as_bytes()
    }

    /// `address AND mask`.
    pub fn network_portion(&self, address: &IpAddress) -> Result<IpAddress> {
        self.validate_family(address)?;
        let bytes: Vec<u8> = self
            .as_bytes()
            .iter()
            .zip(address.as_bytes())
            .map(|(m, a)| m & a)
            .collect();
        IpAddress::from_bytes(&bytes)
    }

    /// `address AND NOT mask`.
    pub fn host_portion(&self, address: &IpAddress) -> Result<IpAddress> {
        self.validate_family(address)?;
        let bytes: Vec<u8> = self
            .as_bytes()
            .iter()
            .zip(address.as_bytes())
            .map(|(m, a)| !m & a)
            .collect();
        IpAddress::from_bytes(&bytes)
    }

    fn validate_family(&self, address: &IpAddress) -> Result<()> {
        if address.family() != self.family() {
            return Err(AddrError::invalid(
                WHAT,
                format!(
                    "family mismatch: expected {} but found {}",
                    self.family(),
                    address.family()
                ),
            ));
        }
        Ok(())
    }

    pub fn debug_string(&self) -> String {
        format!("{} ({} bits, {})", self, self.prefix_length, self.family())
    }
}

/// Check the contiguous-ones rule and return the number of one-bits.
fn validate(bytes: &[u8]) -> std::result::Result<u8, &'static str> {
    if bytes[0] != 0xFF {
        return Err("top byte not 255");
    }
    if bytes[bytes.len() - 1] & 0x01 != 0 {
        return Err("last bit not 0");
    }
    // the last byte is not 0xFF, so a boundary byte always exists
    let idx = bytes.iter().position(|&b| b != 0xFF).unwrap_or(bytes.len() - 1);
    let boundary = bytes[idx];
    if boundary != 0x00 && !LEADING_ONES.contains(&boundary) {
        return Err("bits not contiguous");
    }
    if bytes[idx + 1..].iter().any(|&b| b != 0x00) {
        return Err("bits not contiguous");
    }
    Ok(bytes.iter().map(|b| b.count_ones() as u8).sum())
}

impl fmt::Display for SubnetMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mask)
    }
}

impl fmt::Debug for SubnetMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubnetMask({}/{})", self.mask.to_short_string(), self.prefix_length)
    }
}

impl FromStr for SubnetMask {
    type Err = AddrError;

    fn from_str(s: &str) -> Result<SubnetMask> {
        SubnetMask::parse(s)
    }
}

string_serde!(SubnetMask);

impl PartialOrd for SubnetMask {
    fn partial_cmp(&self, other: &SubnetMask) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SubnetMask {
    fn cmp(&self, other: &SubnetMask) -> Ordering {
        self.mask.cmp(&other.mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_masks() {
        let m = SubnetMask::parse("255.255.248.0").unwrap();
        assert_eq!(m.prefix_length(), 21);
        assert_eq!(m, SubnetMask::MASK_255_255_248_0);
        assert_eq!(m.to_string(), "255.255.248.0");
        assert_eq!(m.debug_string(), "255.255.248.0 (21 bits, IPv4)");
        assert_eq!(SubnetMask::parse("255.0.0.0").unwrap().prefix_length(), 8);
        assert_eq!(SubnetMask::parse("255.255.255.254").unwrap().prefix_length(), 31);
        assert_eq!(SubnetMask::parse("ffff:ffff::").unwrap().prefix_length(), 32);
    }

    #[test]
    fn test_reject_invalid_masks() {
        let err = SubnetMask::from_bytes(&[0xFF, 0x00, 0xFF, 0x00]).unwrap_err();
        assert!(err.is_invalid());
        assert!(SubnetMask::parse("255.255.255.255").unwrap_err().is_invalid());
        assert!(SubnetMask::parse("240.0.0.0").unwrap_err().is_invalid());
        assert!(SubnetMask::parse("255.255.253.0").unwrap_err().is_invalid());
        assert!(SubnetMask::parse("255.255.0.128").unwrap_err().is_invalid());
        assert!(SubnetMask::parse("0.0.0.0").unwrap_err().is_invalid());
        assert!(SubnetMask::parse("255.255.x.0").unwrap_err().is_malformed());
    }

    #[test]
    fn test_network_and_host_portions() {
        let ip = IpAddress::parse("15.37.129.123").unwrap();
        let m = SubnetMask::parse("255.255.248.0").unwrap();
        assert_eq!(m.network_portion(&ip).unwrap().to_string(), "15.37.128.0");
        assert_eq!(m.host_portion(&ip).unwrap().to_string(), "0.0.1.123");

        let v6 = IpAddress::parse("fe80::1").unwrap();
        assert!(m.network_portion(&v6).unwrap_err().is_invalid());
    }

    #[test]
    fn test_from_prefix_length() {
        let m = SubnetMask::from_prefix_length(21, Family::IPv4).unwrap();
        assert_eq!(m, SubnetMask::MASK_255_255_248_0);
        let m = SubnetMask::from_prefix_length(12, Family::IPv4).unwrap();
        assert_eq!(m, SubnetMask::MASK_255_240_0_0);
        let m = SubnetMask::from_prefix_length(64, Family::IPv6).unwrap();
        assert_eq!(m.to_string(), "FFFF:FFFF:FFFF:FFFF:0:0:0:0");
        assert!(SubnetMask::from_prefix_length(4, Family::IPv4).is_err());
        assert!(SubnetMask::from_prefix_length(32, Family::IPv4).is_err());
        assert!(SubnetMask::from_prefix_length(128, Family::IPv6).is_err());
    }

    #[test]
    fn test_from_cidr() {
        assert_eq!(
            SubnetMask::from_cidr("10.0.0.0/16").unwrap(),
            SubnetMask::MASK_255_255_0_0
        );
    }

    #[test]
    fn test_mask_ordering() {
        assert!(SubnetMask::MASK_255_0_0_0 < SubnetMask::MASK_255_255_0_0);
        assert!(SubnetMask::MASK_255_255_248_0 < SubnetMask::MASK_255_255_255_0);
    }
}
