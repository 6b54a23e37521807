//! IP address ranges.

use super::{ByteRange, RangeValue};
use crate::error::{AddrError, Result};
use crate::generator::{ByteArrayGenerator, ByteSpec, Layout};
use crate::models::{
    parse_v6_groups, Family, IpAddress, Subnet, SubnetMask, IP_V4_ADDR_SIZE, IP_V6_ADDR_SIZE,
};

/// A range of IPv4 addresses (`15.23.12-13.*`) or IPv6 addresses
/// (`FE80:0:0:0:*:*:*:1-FF`, `fe80::1-ff`). A CIDR spec parses to the
/// subnet's equivalent range.
pub type IpRange = ByteRange<IpAddress>;

impl RangeValue for IpAddress {
    const WHAT: &'static str = "IP range";

    fn generator_for(spec: &str) -> Result<ByteArrayGenerator> {
        if spec.contains('/') {
            Ok(Subnet::parse(spec)?.equivalent_range().generator().clone())
        } else if spec.contains('.') {
            ByteArrayGenerator::parse_with(spec, Layout::Decimal, IP_V4_ADDR_SIZE)
        } else if spec.contains("::") {
            expand_v6(spec)
        } else {
            ByteArrayGenerator::parse_with(spec, Layout::HexWord, IP_V6_ADDR_SIZE)
        }
    }

    fn decode(bytes: &[u8]) -> Result<IpAddress> {
        IpAddress::from_bytes(bytes)
    }

    fn encode(&self) -> Vec<u8> {
        self.to_vec()
    }
}

/// Split a `::` shorthand spec into low and high addresses and span them
/// group by group.
fn expand_v6(spec: &str) -> Result<ByteArrayGenerator> {
    let malformed = || AddrError::malformed("IPv6 range spec", spec);
    let mut low = Vec::new();
    let mut high = Vec::new();
    for piece in spec.split(':') {
        let (lo, hi) = match piece {
            "*" => ("0", "FFFF"),
            p => match p.split_once('-') {
                Some((lo, hi)) if lo.is_empty() || hi.is_empty() => return Err(malformed()),
                Some(pair) => pair,
                None => (p, p),
            },
        };
        low.push(lo);
        high.push(hi);
    }
    let lows = parse_v6_groups(&low.join(":")).map_err(|_| malformed())?;
    let highs = parse_v6_groups(&high.join(":")).map_err(|_| malformed())?;
    let specs = lows
        .iter()
        .zip(&highs)
        .flat_map(|(lo, hi)| lo.to_be_bytes().into_iter().zip(hi.to_be_bytes()))
        .map(|(lo, hi)| ByteSpec::new(lo, hi))
        .collect::<Result<Vec<_>>>()?;
    Ok(ByteArrayGenerator::from_specs(Layout::HexWord, specs))
}

impl ByteRange<IpAddress> {
    /// The range from the subnet's network address to its all-ones host address.
    pub fn from_subnet(subnet: &Subnet) -> IpRange {
        let layout = match subnet.family() {
            Family::IPv4 => Layout::Decimal,
            Family::IPv6 => Layout::HexWord,
        };
        let specs = subnet
            .address()
            .as_bytes()
            .iter()
            .zip(subnet.mask().as_bytes())
            .map(|(&net, &mask)| ByteSpec::spanning(net, net | !mask))
            .collect();
        ByteRange::from_generator(ByteArrayGenerator::from_specs(layout, specs))
    }

    pub fn family(&self) -> Family {
        if self.generator().len() == IP_V4_ADDR_SIZE {
            Family::IPv4
        } else {
            Family::IPv6
        }
    }

    /// The subnet covering exactly this range, if there is one.
    ///
    /// The candidate mask is `NOT(first XOR last)`; it must be a valid mask
    /// and must leave the first address unchanged as its network portion.
    pub fn equivalent_subnet(&self) -> Option<Subnet> {
        let first = self.generator().lowest();
        let last = self.generator().highest();
        let candidate: Vec<u8> = first.iter().zip(&last).map(|(f, l)| !(f ^ l)).collect();
        let mask = SubnetMask::from_bytes(&candidate).ok()?;
        let network = IpAddress::from_bytes(&first).ok()?;
        if mask.network_portion(&network).ok()? != network {
            return None;
        }
        Subnet::new(network, mask).ok()
    }
}
