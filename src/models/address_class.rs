//! Classful IPv4 address categories.

use super::{IpAddress, Subnet, SubnetMask};
use std::fmt;

/// Class of an IPv4 address, derived from its leading bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressClass {
    /// `0xxx xxxx` - 0.0.0.0 to 127.255.255.255
    A,
    /// `10xx xxxx` - 128.0.0.0 to 191.255.255.255
    B,
    /// `110x xxxx` - 192.0.0.0 to 223.255.255.255
    C,
    /// `1110 xxxx` - multicast
    D,
    /// `1111 xxxx` - reserved
    E,
    /// Everything else, including all IPv6 addresses.
    Classless,
}

const PRIVATE_A: Subnet = Subnet::from_parts(IpAddress::v4(10, 0, 0, 0), SubnetMask::MASK_255_0_0_0);
const PRIVATE_B: Subnet = Subnet::from_parts(IpAddress::v4(172, 16, 0, 0), SubnetMask::MASK_255_240_0_0);
const PRIVATE_C: Subnet = Subnet::from_parts(IpAddress::v4(192, 168, 0, 0), SubnetMask::MASK_255_255_0_0);

impl AddressClass {
    pub(crate) fn from_top_byte(top: u8) -> AddressClass {
        if top & 0x80 == 0 {
            AddressClass::A
        } else if top & 0xC0 == 0x80 {
            AddressClass::B
        } else if top & 0xE0 == 0xC0 {
            AddressClass::C
        } else if top & 0xF0 == 0xE0 {
            AddressClass::D
        } else {
            AddressClass::E
        }
    }

    /// Mask implied by the class: /8, /16 and /24 for A, B and C.
    pub fn implied_mask(&self) -> Option<SubnetMask> {
        match self {
            AddressClass::A => Some(SubnetMask::MASK_255_0_0_0),
            AddressClass::B => Some(SubnetMask::MASK_255_255_0_0),
            AddressClass::C => Some(SubnetMask::MASK_255_255_255_0),
            _ => None,
        }
    }

    /// The private network block reserved within the class.
    pub fn private_network(&self) -> Option<Subnet> {
        match self {
            AddressClass::A => Some(PRIVATE_A),
            AddressClass::B => Some(PRIVATE_B),
            AddressClass::C => Some(PRIVATE_C),
            _ => None,
        }
    }
}

impl fmt::Display for AddressClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AddressClass::A => "A",
            AddressClass::B => "B",
            AddressClass::C => "C",
            AddressClass::D => "D",
            AddressClass::E => "E",
            AddressClass::Classless => "CLASSLESS",
        };
        write!(f, "{name}")
    }
}
