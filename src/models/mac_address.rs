//! Ethernet MAC address value type.

use crate::config::{DEFAULT_MAC_FORMAT, DEFAULT_MAC_LOWER_CASE};
use crate::error::{AddrError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

/// Number of bytes in a MAC address.
pub const MAC_ADDR_SIZE: usize = 6;

const WHAT: &str = "MAC address";
const MAX_ENCODED: u64 = 0xFFFF_FFFF_FFFF;

lazy_static! {
    // xx:xx:xx:xx:xx:xx with ':' or '-' between octets
    static ref RE_SIX: Regex = Regex::new(
        r"^[0-9A-Fa-f]{2}(?:[:-][0-9A-Fa-f]{2}){5}$"
    ).unwrap();
    // xxxxxx:xxxxxx or xxxxxx-xxxxxx
    static ref RE_TWO: Regex = Regex::new(r"^[0-9A-Fa-f]{6}[:-][0-9A-Fa-f]{6}$").unwrap();
    static ref RE_NONE: Regex = Regex::new(r"^[0-9A-Fa-f]{12}$").unwrap();
}

/// Textual layouts a MAC address can be rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MacFormat {
    /// `00:1b:2c:3d:4e:5f`
    MultiColon,
    /// `00-1b-2c-3d-4e-5f`
    MultiDash,
    /// `001b2c:3d4e5f`
    SingleColon,
    /// `001b2c-3d4e5f`
    SingleDash,
    /// `001b2c3d4e5f`
    NoDelimiter,
}

impl MacFormat {
    fn delimiter(self) -> Option<char> {
        match self {
            MacFormat::MultiColon | MacFormat::SingleColon => Some(':'),
            MacFormat::MultiDash | MacFormat::SingleDash => Some('-'),
            MacFormat::NoDelimiter => None,
        }
    }

    fn between_every_octet(self) -> bool {
        matches!(self, MacFormat::MultiColon | MacFormat::MultiDash)
    }
}

/// A 48-bit MAC address.
///
/// Ordering follows the 48-bit unsigned encoding, which is the same as
/// comparing the bytes most-significant first.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MacAddress {
    bytes: [u8; MAC_ADDR_SIZE],
}

impl MacAddress {
    pub const BROADCAST: MacAddress = MacAddress {
        bytes: [0xFF; MAC_ADDR_SIZE],
    };
    pub const LINK_LOCAL_00: MacAddress = MacAddress::ieee_control(0x00);
    pub const LINK_LOCAL_03: MacAddress = MacAddress::ieee_control(0x03);
    pub const LINK_LOCAL_0E: MacAddress = MacAddress::ieee_control(0x0E);

    /// `01:80:C2:00:00:xx` - IEEE 802.1 reserved control addresses.
    const fn ieee_control(last: u8) -> MacAddress {
        MacAddress {
            bytes: [0x01, 0x80, 0xC2, 0x00, 0x00, last],
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<MacAddress> {
        let bytes: [u8; MAC_ADDR_SIZE] = bytes.try_into().map_err(|_| {
            AddrError::invalid(WHAT, format!("bad number of bytes (not 6): {}", bytes.len()))
        })?;
        Ok(MacAddress { bytes })
    }

    /// Build from the 48-bit unsigned encoding.
    pub fn from_u64(encoded: u64) -> Result<MacAddress> {
        if encoded > MAX_ENCODED {
            return Err(AddrError::invalid(
                WHAT,
                format!("bad internal coding: {encoded:#x}"),
            ));
        }
        let be = encoded.to_be_bytes();
        let mut bytes = [0u8; MAC_ADDR_SIZE];
        bytes.copy_from_slice(&be[2..]);
        Ok(MacAddress { bytes })
    }

    /// Parse any of the five accepted layouts, case-insensitively.
    ///
    /// # Examples
    /// ```
    /// use netspec::MacAddress;
    /// let mac = MacAddress::parse("01-80-C2-00-00-0E").unwrap();
    /// assert!(mac.is_link_local());
    /// ```
    pub fn parse(text: &str) -> Result<MacAddress> {
        let s = text.trim();
        if !(RE_SIX.is_match(s) || RE_TWO.is_match(s) || RE_NONE.is_match(s)) {
            return Err(AddrError::malformed(WHAT, s));
        }
        let digits: Vec<u8> = s
            .chars()
            .filter_map(|c| c.to_digit(16))
            .map(|d| d as u8)
            .collect();
        let mut bytes = [0u8; MAC_ADDR_SIZE];
        for (b, pair) in bytes.iter_mut().zip(digits.chunks(2)) {
            *b = (pair[0] << 4) | pair[1];
        }
        Ok(MacAddress { bytes })
    }

    pub fn read_from<R: Read + ?Sized>(reader: &mut R) -> Result<MacAddress> {
        let mut bytes = [0u8; MAC_ADDR_SIZE];
        reader
            .read_exact(&mut bytes)
            .map_err(|e| AddrError::malformed(WHAT, format!("buffer read failed: {e}")))?;
        Ok(MacAddress { bytes })
    }

    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn to_u64(&self) -> u64 {
        self.bytes
            .iter()
            .fold(0u64, |acc, &b| (acc << 8) | u64::from(b))
    }

    pub fn to_formatted_string(&self, format: MacFormat, lower_case: bool) -> String {
        let mut out = String::with_capacity(17);
        for (i, b) in self.bytes.iter().enumerate() {
            if i > 0 {
                if let Some(delim) = format.delimiter() {
                    if format.between_every_octet() || i == 3 {
                        out.push(delim);
                    }
                }
            }
            if lower_case {
                out.push_str(&format!("{b:02x}"));
            } else {
                out.push_str(&format!("{b:02X}"));
            }
        }
        out
    }

    pub fn is_broadcast(&self) -> bool {
        *self == MacAddress::BROADCAST
    }

    /// Group bit (least significant bit of the first octet) set.
    pub fn is_multicast(&self) -> bool {
        self.bytes[0] & 0x01 != 0
    }

    /// One of the three IEEE 802.1 control addresses `01:80:C2:00:00:{00,03,0E}`.
    pub fn is_link_local(&self) -> bool {
        [
            MacAddress::LINK_LOCAL_00,
            MacAddress::LINK_LOCAL_03,
            MacAddress::LINK_LOCAL_0E,
        ]
        .contains(self)
    }

    /// VRRP virtual router MAC `00:00:5E:00:01:xx`.
    pub fn is_vrrp_vmac(&self) -> bool {
        self.bytes[..5] == [0x00, 0x00, 0x5E, 0x00, 0x01]
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.to_formatted_string(DEFAULT_MAC_FORMAT, DEFAULT_MAC_LOWER_CASE)
        )
    }
}

impl fmt::Debug for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MacAddress({self})")
    }
}

impl FromStr for MacAddress {
    type Err = AddrError;

    fn from_str(s: &str) -> Result<MacAddress> {
        MacAddress::parse(s)
    }
}

string_serde!(MacAddress);
