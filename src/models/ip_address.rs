//! IPv4 / IPv6 address value type.
//!
//! [`IpAddress`] is an immutable, byte-backed address in network order. It
//! parses dotted-decimal IPv4, full and `::`-shorthand IPv6 (optionally in
//! `[...]` with a port suffix), renders canonical strings, and answers the
//! usual predicates (loopback, multicast, link-local, ...).

use super::AddressClass;
use crate::config::MAX_PORT;
use crate::error::{AddrError, Result};
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::io::{Read, Write};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Number of bytes in an IPv4 address.
pub const IP_V4_ADDR_SIZE: usize = 4;
/// Number of bytes in an IPv6 address.
pub const IP_V6_ADDR_SIZE: usize = 16;

const WHAT: &str = "IP address";

lazy_static! {
    static ref RE_V6_PORT: Regex = Regex::new(r"^\[(.*)\](?::([0-9]+))?$").unwrap();
    static ref RE_V4_PORT: Regex = Regex::new(r"^([0-9]+\.[0-9]+\.[0-9]+\.[0-9]+):([0-9]+)$").unwrap();
}

const V6_LINK_LOCAL_MASK: u32 = 0xFFC0_0000;
const V6_LINK_LOCAL_TAG: u32 = 0xFE80_0000;

/// Address family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Family {
    IPv4,
    IPv6,
}

impl Family {
    /// Number of bytes in an address of this family.
    pub fn byte_len(self) -> usize {
        match self {
            Family::IPv4 => IP_V4_ADDR_SIZE,
            Family::IPv6 => IP_V6_ADDR_SIZE,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::IPv4 => write!(f, "IPv4"),
            Family::IPv6 => write!(f, "IPv6"),
        }
    }
}

/// An IPv4 or IPv6 address.
///
/// IPv4 addresses occupy the first four bytes of the backing array; the
/// remaining bytes are always zero so derived equality and hashing see only
/// `(family, bytes)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct IpAddress {
    family: Family,
    bytes: [u8; IP_V6_ADDR_SIZE],
}

impl IpAddress {
    pub const LOOPBACK_IPV4: IpAddress = IpAddress::v4(127, 0, 0, 1);
    pub const LOOPBACK_IPV6: IpAddress = IpAddress::v6_low(1);
    pub const UNDETERMINED_IPV4: IpAddress = IpAddress::v4(0, 0, 0, 0);
    pub const UNDETERMINED_IPV6: IpAddress = IpAddress::v6_low(0);
    pub const BROADCAST_IPV4: IpAddress = IpAddress::v4(255, 255, 255, 255);

    pub(crate) const fn v4(a: u8, b: u8, c: u8, d: u8) -> IpAddress {
        let mut bytes = [0u8; IP_V6_ADDR_SIZE];
        bytes[0] = a;
        bytes[1] = b;
        bytes[2] = c;
        bytes[3] = d;
        IpAddress {
            family: Family::IPv4,
            bytes,
        }
    }

    const fn v6_low(last: u8) -> IpAddress {
        let mut bytes = [0u8; IP_V6_ADDR_SIZE];
        bytes[IP_V6_ADDR_SIZE - 1] = last;
        IpAddress {
            family: Family::IPv6,
            bytes,
        }
    }

    /// Build an address from 4 or 16 network-order bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<IpAddress> {
        let family = match bytes.len() {
            IP_V4_ADDR_SIZE => Family::IPv4,
            IP_V6_ADDR_SIZE => Family::IPv6,
            n => {
                return Err(AddrError::invalid(
                    WHAT,
                    format!("unsupported number of bytes ({n})"),
                ))
            }
        };
        let mut array = [0u8; IP_V6_ADDR_SIZE];
        array[..bytes.len()].copy_from_slice(bytes);
        let ip = IpAddress {
            family,
            bytes: array,
        };
        ip.check_link_local()?;
        Ok(ip)
    }

    /// Parse an address, ignoring (after validating) any port suffix.
    ///
    /// # Examples
    /// ```
    /// use netspec::IpAddress;
    /// let ip = IpAddress::parse("[fe80::1]:8080").unwrap();
    /// assert_eq!(ip.to_short_string(), "FE80::1");
    /// ```
    pub fn parse(text: &str) -> Result<IpAddress> {
        let key = text.trim();
        let (addr, port) = split_port(key);
        if let Some(port) = port {
            verify_port(port)?;
        }
        parse_bare(addr).map_err(|e| e.within(WHAT, key))
    }

    /// Port number carried by `text`, if it has a port suffix.
    pub fn port_of(text: &str) -> Result<Option<u16>> {
        let key = text.trim();
        let (addr, port) = split_port(key);
        parse_bare(addr)?;
        port.map(verify_port).transpose()
    }

    /// Read an address of the given family from a byte source.
    pub fn read_from<R: Read + ?Sized>(reader: &mut R, family: Family) -> Result<IpAddress> {
        let mut buf = [0u8; IP_V6_ADDR_SIZE];
        let buf = &mut buf[..family.byte_len()];
        reader
            .read_exact(buf)
            .map_err(|e| AddrError::malformed(WHAT, format!("buffer read failed: {e}")))?;
        IpAddress::from_bytes(buf)
    }

    /// Write the network-order bytes to a sink.
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(self.as_bytes())
    }

    fn check_link_local(&self) -> Result<()> {
        if self.family == Family::IPv6 && self.v6_link_local_tagged() {
            let reserved = self.quarter(0) & !V6_LINK_LOCAL_MASK;
            if reserved != 0 || self.quarter(1) != 0 {
                return Err(AddrError::invalid(
                    WHAT,
                    format!("illegally formed IPv6 link-local address {self}"),
                ));
            }
        }
        Ok(())
    }

    fn v6_link_local_tagged(&self) -> bool {
        self.quarter(0) & V6_LINK_LOCAL_MASK == V6_LINK_LOCAL_TAG
    }

    /// The `i`th big-endian 32-bit word of the address.
    fn quarter(&self, i: usize) -> u32 {
        let b = &self.bytes[i * 4..i * 4 + 4];
        u32::from_be_bytes([b[0], b[1], b[2], b[3]])
    }

    fn low_order(&self) -> u32 {
        match self.family {
            Family::IPv4 => self.quarter(0),
            Family::IPv6 => self.quarter(3),
        }
    }

    fn higher_order_bits_set(&self) -> bool {
        self.family == Family::IPv6 && (self.quarter(0) | self.quarter(1) | self.quarter(2)) != 0
    }

    pub fn family(&self) -> Family {
        self.family
    }

    pub fn is_ipv4(&self) -> bool {
        self.family == Family::IPv4
    }

    pub fn is_ipv6(&self) -> bool {
        self.family == Family::IPv6
    }

    /// Network-order bytes (4 or 16 of them).
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.family.byte_len()]
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }

    /// The eight 16-bit groups of an IPv6 address (IPv4 yields two groups).
    pub fn groups(&self) -> Vec<u16> {
        self.as_bytes()
            .chunks(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect()
    }

    /// IPv6 with the longest run of zero groups collapsed to `::`.
    pub fn to_short_string(&self) -> String {
        if self.family == Family::IPv4 {
            return self.to_string();
        }
        let groups = self.groups();
        let Some((start, len)) = longest_zero_run(&groups) else {
            return self.to_string();
        };
        let head = groups[..start].iter().map(|g| format!("{g:X}")).join(":");
        let tail = groups[start + len..]
            .iter()
            .map(|g| format!("{g:X}"))
            .join(":");
        format!("{head}::{tail}")
    }

    /// IPv6 with every group zero-padded to four hex digits.
    pub fn to_full_string(&self) -> String {
        if self.family == Family::IPv4 {
            return self.to_string();
        }
        self.groups().iter().map(|g| format!("{g:04X}")).join(":")
    }

    /// `a.b.c.d:port` or `[v6]:port`.
    pub fn to_string_with_port(&self, port: u16) -> String {
        match self.family {
            Family::IPv4 => format!("{self}:{port}"),
            Family::IPv6 => format!("[{self}]:{port}"),
        }
    }

    /// Classful category derived from the leading bits (IPv6 is always classless).
    pub fn address_class(&self) -> AddressClass {
        if self.family == Family::IPv6 {
            return AddressClass::Classless;
        }
        AddressClass::from_top_byte(self.bytes[0])
    }

    pub fn is_multicast(&self) -> bool {
        self.address_class() == AddressClass::D
    }

    pub fn is_broadcast(&self) -> bool {
        *self == IpAddress::BROADCAST_IPV4
    }

    /// IPv4 addresses whose top byte is zero.
    pub fn is_reserved(&self) -> bool {
        self.family == Family::IPv4 && self.bytes[0] == 0
    }

    pub fn is_loopback(&self) -> bool {
        match self.family {
            Family::IPv4 => self.bytes[0] == 127,
            Family::IPv6 => *self == IpAddress::LOOPBACK_IPV6,
        }
    }

    pub fn is_undetermined(&self) -> bool {
        *self == IpAddress::UNDETERMINED_IPV4 || *self == IpAddress::UNDETERMINED_IPV6
    }

    /// `169.254.0.0/16` for IPv4, `fe80::/10` (reserved bits zero) for IPv6.
    pub fn is_link_local(&self) -> bool {
        match self.family {
            Family::IPv4 => self.bytes[0] == 169 && self.bytes[1] == 254,
            Family::IPv6 => self.v6_link_local_tagged(),
        }
    }
}

/// Split off a `:port` (IPv4) or `[...]:port` (IPv6) suffix.
fn split_port(key: &str) -> (&str, Option<&str>) {
    if let Some(caps) = RE_V6_PORT.captures(key) {
        let addr = caps.get(1).map_or("", |m| m.as_str());
        // brackets are for IPv6 only
        if !addr.contains('.') {
            return (addr, caps.get(2).map(|m| m.as_str()));
        }
    }
    if let Some(caps) = RE_V4_PORT.captures(key) {
        let addr = caps.get(1).map_or("", |m| m.as_str());
        return (addr, caps.get(2).map(|m| m.as_str()));
    }
    (key, None)
}

fn verify_port(port: &str) -> Result<u16> {
    match port.parse::<u32>() {
        Ok(p) if p <= MAX_PORT => Ok(p as u16),
        _ => Err(AddrError::malformed("port number", port)),
    }
}

fn parse_bare(s: &str) -> Result<IpAddress> {
    if s.contains('.') {
        parse_v4(s)
    } else if s.contains(':') {
        parse_v6(s)
    } else {
        Err(AddrError::malformed(WHAT, s))
    }
}

fn parse_v4(s: &str) -> Result<IpAddress> {
    let parts: Vec<&str> = s.split('.').collect();
    if parts.len() != IP_V4_ADDR_SIZE {
        return Err(AddrError::malformed(WHAT, s));
    }
    let mut bytes = [0u8; IP_V4_ADDR_SIZE];
    for (b, part) in bytes.iter_mut().zip(&parts) {
        if part.is_empty() || part.len() > 3 || !part.bytes().all(|c| c.is_ascii_digit()) {
            return Err(AddrError::malformed(WHAT, s));
        }
        *b = part.parse().map_err(|_| AddrError::malformed(WHAT, s))?;
    }
    IpAddress::from_bytes(&bytes)
}

/// Parse up to eight `:`-separated groups of 1-4 hex digits; `::` stands
/// for one or more zero groups and may appear at most once.
pub(crate) fn parse_v6_groups(s: &str) -> Result<[u16; 8]> {
    let parse_list = |list: &str| -> Result<Vec<u16>> {
        if list.is_empty() {
            return Ok(vec![]);
        }
        list.split(':')
            .map(|g| {
                if g.is_empty() || g.len() > 4 || !g.bytes().all(|c| c.is_ascii_hexdigit()) {
                    return Err(AddrError::malformed(WHAT, s));
                }
                u16::from_str_radix(g, 16).map_err(|_| AddrError::malformed(WHAT, s))
            })
            .collect()
    };
    let mut groups = [0u16; 8];
    match s.find("::") {
        Some(at) => {
            let head = parse_list(&s[..at])?;
            let tail_text = &s[at + 2..];
            if tail_text.contains("::") {
                return Err(AddrError::malformed(WHAT, s));
            }
            let tail = parse_list(tail_text)?;
            if head.len() + tail.len() > 7 {
                return Err(AddrError::malformed(WHAT, s));
            }
            groups[..head.len()].copy_from_slice(&head);
            groups[8 - tail.len()..].copy_from_slice(&tail);
        }
        None => {
            let all = parse_list(s)?;
            if all.len() != 8 {
                return Err(AddrError::malformed(WHAT, s));
            }
            groups.copy_from_slice(&all);
        }
    }
    Ok(groups)
}

fn parse_v6(s: &str) -> Result<IpAddress> {
    let groups = parse_v6_groups(s)?;
    let bytes: Vec<u8> = groups.iter().flat_map(|g| g.to_be_bytes()).collect();
    IpAddress::from_bytes(&bytes)
}

/// Start and length of the first longest run of zero groups.
fn longest_zero_run(groups: &[u16]) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    let mut i = 0;
    while i < groups.len() {
        if groups[i] != 0 {
            i += 1;
            continue;
        }
        let start = i;
        while i < groups.len() && groups[i] == 0 {
            i += 1;
        }
        let len = i - start;
        if best.map_or(true, |(_, l)| len > l) {
            best = Some((start, len));
        }
    }
    best
}

impl fmt::Display for IpAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.family {
            Family::IPv4 => write!(f, "{}", self.as_bytes().iter().join(".")),
            Family::IPv6 => write!(
                f,
                "{}",
                self.groups().iter().map(|g| format!("{g:X}")).join(":")
            ),
        }
    }
}

impl fmt::Debug for IpAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IpAddress({})", self.to_short_string())
    }
}

impl FromStr for IpAddress {
    type Err = AddrError;

    fn from_str(s: &str) -> Result<IpAddress> {
        IpAddress::parse(s)
    }
}

string_serde!(IpAddress);

impl PartialOrd for IpAddress {
    fn partial_cmp(&self, other: &IpAddress) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IpAddress {
    /// Same family: byte order. Across families an IPv6 address with any of
    /// its upper 96 bits set sorts after every IPv4 address; otherwise the low
    /// 32 bits decide, and on a tie IPv4 comes first.
    fn cmp(&self, other: &IpAddress) -> Ordering {
        match (self.family, other.family) {
            (a, b) if a == b => self.as_bytes().cmp(other.as_bytes()),
            (Family::IPv6, _) => {
                if self.higher_order_bits_set() {
                    Ordering::Greater
                } else {
                    self.low_order()
                        .cmp(&other.low_order())
                        .then(Ordering::Greater)
                }
            }
            (Family::IPv4, _) => {
                if other.higher_order_bits_set() {
                    Ordering::Less
                } else {
                    self.low_order()
                        .cmp(&other.low_order())
                        .then(Ordering::Less)
                }
            }
        }
    }
}

impl From<Ipv4Addr> for IpAddress {
    fn from(addr: Ipv4Addr) -> IpAddress {
        let [a, b, c, d] = addr.octets();
        IpAddress::v4(a, b, c, d)
    }
}

impl TryFrom<Ipv6Addr> for IpAddress {
    type Error = AddrError;

    fn try_from(addr: Ipv6Addr) -> Result<IpAddress> {
        IpAddress::from_bytes(&addr.octets())
    }
}

impl TryFrom<IpAddr> for IpAddress {
    type Error = AddrError;

    fn try_from(addr: IpAddr) -> Result<IpAddress> {
        match addr {
            IpAddr::V4(v4) => Ok(v4.into()),
            IpAddr::V6(v6) => v6.try_into(),
        }
    }
}

impl From<IpAddress> for IpAddr {
    fn from(ip: IpAddress) -> IpAddr {
        match ip.family {
            Family::IPv4 => IpAddr::V4(Ipv4Addr::new(
                ip.bytes[0],
                ip.bytes[1],
                ip.bytes[2],
                ip.bytes[3],
            )),
            Family::IPv6 => IpAddr::V6(Ipv6Addr::from(ip.bytes)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ip(s: &str) -> IpAddress {
        IpAddress::parse(s).unwrap()
    }

    #[test]
    fn test_parse_ipv4() {
        let a = ip(" 15.37.129.123 ");
        assert_eq!(a.family(), Family::IPv4);
        assert_eq!(a.as_bytes(), &[15, 37, 129, 123]);
        assert_eq!(a.to_string(), "15.37.129.123");
        assert!(IpAddress::parse("1.2.3").unwrap_err().is_malformed());
        assert!(IpAddress::parse("1.2.3.256").unwrap_err().is_malformed());
        assert!(IpAddress::parse("1.2.3.-4").unwrap_err().is_malformed());
        assert!(IpAddress::parse("1.2..4").unwrap_err().is_malformed());
        assert!(IpAddress::parse("foo").unwrap_err().is_malformed());
    }

    #[test]
    fn test_parse_ipv6_forms() {
        let full = ip("2001:db8:0:0:0:ff00:42:8329");
        assert_eq!(full.to_string(), "2001:DB8:0:0:0:FF00:42:8329");
        assert_eq!(full.to_short_string(), "2001:DB8::FF00:42:8329");
        assert_eq!(
            full.to_full_string(),
            "2001:0DB8:0000:0000:0000:FF00:0042:8329"
        );
        assert_eq!(ip("2001:db8::ff00:42:8329"), full);

        assert_eq!(ip("::").to_short_string(), "::");
        assert_eq!(ip("::1").to_short_string(), "::1");
        assert_eq!(ip("1::").to_short_string(), "1::");
        assert_eq!(ip("::2:3:4:5:6:7:8").to_string(), "0:2:3:4:5:6:7:8");
        assert_eq!(ip("1:2:3:4:5:6:7::").to_string(), "1:2:3:4:5:6:7:0");
    }

    #[test]
    fn test_parse_ipv6_failures() {
        for bad in [
            "1:2:3",
            "1:2:3:4:5:6:7:8:9",
            "1::2::3",
            "1:::2",
            ":1:2:3:4:5:6:7",
            "1:2:3:4:5:6:7:",
            "12345::",
            "g::1",
            "1::2:3:4:5:6:7:8",
            "+1::",
            "fe80::+a",
            "1:2:3:4:5:6:7:-8",
        ] {
            assert!(IpAddress::parse(bad).is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn test_short_form_ties_use_first_run() {
        assert_eq!(ip("1:0:0:2:0:0:3:4").to_short_string(), "1::2:0:0:3:4");
        assert_eq!(ip("1:0:2:0:0:0:3:4").to_short_string(), "1:0:2::3:4");
        assert_eq!(ip("1:2:3:4:5:6:7:8").to_short_string(), "1:2:3:4:5:6:7:8");
    }

    #[test]
    fn test_port_suffix() {
        assert_eq!(ip("15.37.129.123:8080"), ip("15.37.129.123"));
        assert_eq!(ip("[fe80::1]:80"), ip("fe80::1"));
        assert_eq!(ip("[::1]"), IpAddress::LOOPBACK_IPV6);
        assert!(IpAddress::parse("1.2.3.4:65536").unwrap_err().is_malformed());
        assert_eq!(IpAddress::port_of("1.2.3.4:22").unwrap(), Some(22));
        assert_eq!(IpAddress::port_of("[::1]:443").unwrap(), Some(443));
        assert_eq!(IpAddress::port_of("1.2.3.4").unwrap(), None);
        assert_eq!(ip("1.2.3.4").to_string_with_port(22), "1.2.3.4:22");
        assert_eq!(ip("::1").to_string_with_port(443), "[0:0:0:0:0:0:0:1]:443");
    }

    #[test]
    fn test_brackets_only_wrap_ipv6() {
        assert!(IpAddress::parse("[1.2.3.4]:80").unwrap_err().is_malformed());
        assert!(IpAddress::parse("[1.2.3.4]").unwrap_err().is_malformed());
        assert!(IpAddress::port_of("[1.2.3.4]:80").is_err());
    }

    #[test]
    fn test_link_local() {
        assert!(ip("fe80::1").is_link_local());
        assert!(ip("169.254.10.1").is_link_local());
        assert!(!ip("169.253.10.1").is_link_local());
        assert!(!ip("fec0::1").is_link_local());
        let err = IpAddress::parse("fe80:1::1").unwrap_err();
        assert!(err.is_invalid());
        assert!(IpAddress::parse("fe81::1").unwrap_err().is_invalid());
        assert!(IpAddress::parse("fe80:0:1::1").unwrap_err().is_invalid());
    }

    #[test]
    fn test_predicates() {
        assert!(ip("127.4.5.6").is_loopback());
        assert!(ip("::1").is_loopback());
        assert!(!ip("::2").is_loopback());
        assert!(ip("255.255.255.255").is_broadcast());
        assert!(ip("224.0.0.5").is_multicast());
        assert!(ip("239.255.255.255").is_multicast());
        assert!(!ip("240.0.0.1").is_multicast());
        assert!(ip("0.1.2.3").is_reserved());
        assert!(!ip("::").is_reserved());
        assert!(ip("0.0.0.0").is_undetermined());
        assert!(ip("::").is_undetermined());
    }

    #[test]
    fn test_from_bytes() {
        assert_eq!(
            IpAddress::from_bytes(&[10, 0, 0, 1]).unwrap(),
            ip("10.0.0.1")
        );
        assert!(IpAddress::from_bytes(&[1, 2, 3]).unwrap_err().is_invalid());
    }

    #[test]
    fn test_same_family_ordering() {
        assert!(ip("10.0.0.1") < ip("10.0.0.2"));
        assert!(ip("9.255.255.255") < ip("10.0.0.0"));
        assert!(ip("128.0.0.0") > ip("127.255.255.255"));
        assert!(ip("::1") < ip("::2"));
        assert!(ip("8000::") > ip("7fff::"));
    }

    #[test]
    fn test_cross_family_ordering() {
        // upper bits set: after every IPv4 address
        assert!(ip("1::") > ip("255.255.255.255"));
        assert!(ip("255.255.255.255") < ip("1::"));
        // low 32 bits decide otherwise
        assert!(ip("::5") < ip("0.0.0.6"));
        assert!(ip("::7") > ip("0.0.0.6"));
        // exact tie: IPv4 first
        assert!(ip("::6") > ip("0.0.0.6"));
        assert!(ip("0.0.0.6") < ip("::6"));
        assert_ne!(ip("::6"), ip("0.0.0.6"));
    }

    #[test]
    fn test_buffer_round_trip() {
        let mut buf = Vec::new();
        ip("15.37.129.123").write_to(&mut buf).unwrap();
        ip("fe80::1").write_to(&mut buf).unwrap();
        assert_eq!(buf.len(), 20);

        let mut cursor = Cursor::new(buf);
        assert_eq!(
            IpAddress::read_from(&mut cursor, Family::IPv4).unwrap(),
            ip("15.37.129.123")
        );
        assert_eq!(
            IpAddress::read_from(&mut cursor, Family::IPv6).unwrap(),
            ip("fe80::1")
        );
        assert_eq!(cursor.position(), 20);
        assert!(IpAddress::read_from(&mut cursor, Family::IPv4)
            .unwrap_err()
            .is_malformed());
    }

    #[test]
    fn test_std_conversions() {
        let std_ip: IpAddr = ip("10.1.2.3").into();
        assert_eq!(std_ip, IpAddr::V4(Ipv4Addr::new(10, 1, 2, 3)));
        let back = IpAddress::try_from(IpAddr::V6(Ipv6Addr::LOCALHOST)).unwrap();
        assert_eq!(back, IpAddress::LOOPBACK_IPV6);
    }

    #[test]
    fn test_round_trip_strings() {
        for s in ["1.2.3.4", "FE80:0:0:0:0:0:0:1", "2001:DB8:0:0:1:0:0:1"] {
            let a = ip(s);
            assert_eq!(ip(&a.to_string()), a);
            assert_eq!(ip(&a.to_short_string()), a);
            assert_eq!(ip(&a.to_full_string()), a);
        }
    }
}
