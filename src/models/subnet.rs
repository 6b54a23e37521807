//! Subnets: a network address paired with its mask.

use super::{AddressClass, Family, IpAddress, SubnetMask};
use crate::error::{AddrError, Result};
use crate::range::IpRange;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

const WHAT: &str = "CIDR specification";

/// A network address and mask. The stored address never has host bits set.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subnet {
    address: IpAddress,
    mask: SubnetMask,
}

impl Subnet {
    pub(crate) const fn from_parts(address: IpAddress, mask: SubnetMask) -> Subnet {
        Subnet { address, mask }
    }

    /// Subnet containing `address`; host bits are cleared first.
    pub fn new(address: IpAddress, mask: SubnetMask) -> Result<Subnet> {
        if address.family() != mask.family() {
            return Err(AddrError::invalid(
                "subnet",
                format!("mis-matched IP families: {address} / {mask}"),
            ));
        }
        let network = mask.network_portion(&address)?;
        Ok(Subnet {
            address: network,
            mask,
        })
    }

    /// Parse `addr/n`; without a slash the mask is implied by the address class.
    ///
    /// # Examples
    /// ```
    /// use netspec::Subnet;
    /// let s = Subnet::parse("15.37.129.123/21").unwrap();
    /// assert_eq!(s.to_string(), "15.37.128.0/21");
    /// ```
    pub fn parse(text: &str) -> Result<Subnet> {
        let spec = text.trim();
        if !spec.contains('/') {
            return Subnet::from_implied_mask(spec);
        }
        let pieces: Vec<&str> = spec.split('/').collect();
        if pieces.len() != 2 {
            return Err(AddrError::malformed(WHAT, spec));
        }
        let address = IpAddress::parse(pieces[0]).map_err(|e| e.within(WHAT, spec))?;
        if pieces[1].is_empty() || !pieces[1].bytes().all(|c| c.is_ascii_digit()) {
            return Err(AddrError::malformed(WHAT, spec));
        }
        let bits: u8 = pieces[1]
            .parse()
            .map_err(|_| AddrError::malformed(WHAT, spec))?;
        let mask = SubnetMask::from_prefix_length(bits, address.family())?;
        Subnet::new(address, mask)
    }

    fn from_implied_mask(spec: &str) -> Result<Subnet> {
        let address = IpAddress::parse(spec)?;
        match address.address_class().implied_mask() {
            Some(mask) => Subnet::new(address, mask),
            None => Err(AddrError::invalid(
                "subnet",
                format!("IP address is not class A, B or C: {spec}"),
            )),
        }
    }

    pub fn address(&self) -> IpAddress {
        self.address
    }

    pub fn mask(&self) -> SubnetMask {
        self.mask
    }

    pub fn prefix_length(&self) -> u8 {
        self.mask.prefix_length()
    }

    pub fn family(&self) -> Family {
        self.address.family()
    }

    /// `address OR NOT mask`; IPv4 only.
    pub fn broadcast_address(&self) -> Result<IpAddress> {
        if self.family() == Family::IPv6 {
            return Err(AddrError::invalid(
                "subnet",
                "broadcast address can't be used for IPv6 subnets",
            ));
        }
        let bytes: Vec<u8> = self
            .mask
            .as_bytes()
            .iter()
            .zip(self.address.as_bytes())
            .map(|(m, a)| !m | a)
            .collect();
        IpAddress::from_bytes(&bytes)
    }

    /// Range spanning the network address through the all-ones host address.
    pub fn equivalent_range(&self) -> IpRange {
        IpRange::from_subnet(self)
    }

    pub fn contains(&self, ip: &IpAddress) -> bool {
        ip.family() == self.family()
            && self
                .mask
                .network_portion(ip)
                .map_or(false, |net| net == self.address)
    }

    /// True if every address of `range` lies in this subnet.
    pub fn contains_range(&self, range: &IpRange) -> Result<bool> {
        self.equivalent_range().contains_range(range)
    }

    pub fn debug_string(&self) -> String {
        let range = self.equivalent_range();
        let lowest = IpAddress::from_bytes(&range.generator().lowest());
        let highest = IpAddress::from_bytes(&range.generator().highest());
        let show = |r: Result<IpAddress>| r.map_or_else(|e| e.to_string(), |ip| ip.to_string());
        format!(
            "{self}\n  Address: {}\n  Mask   : {}\n  Lowest : {}\n  Highest: {}\n",
            self.address,
            self.mask,
            show(lowest),
            show(highest)
        )
    }

    /// Class of the network address.
    pub fn address_class(&self) -> AddressClass {
        self.address.address_class()
    }
}

impl fmt::Display for Subnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.mask.prefix_length())
    }
}

impl fmt::Debug for Subnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Subnet({}/{})", self.address.to_short_string(), self.mask.prefix_length())
    }
}

impl FromStr for Subnet {
    type Err = AddrError;

    fn from_str(s: &str) -> Result<Subnet> {
        Subnet::parse(s)
    }
}

string_serde!(Subnet);

impl PartialOrd for Subnet {
    fn partial_cmp(&self, other: &Subnet) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Subnet {
    fn cmp(&self, other: &Subnet) -> Ordering {
        self.address
            .cmp(&other.address)
            .then_with(|| self.mask.cmp(&other.mask))
    }
}
