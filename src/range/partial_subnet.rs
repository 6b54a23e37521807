//! A subnet restricted to one or more disjoint address ranges.

use super::IpRange;
use crate::error::{AddrError, Result};
use crate::generator::{big_as_int, big_as_long};
use crate::models::{IpAddress, Subnet};
use itertools::Itertools;
use num_bigint::BigUint;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

const WHAT: &str = "partial subnet";

/// A [`Subnet`] together with the ranges of it that are in use.
///
/// Every range shares the subnet's family, lies inside the subnet and is
/// disjoint from every other range. The text form is
/// `subnet[,range[,range...]]` with no whitespace.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PartialSubnet {
    subnet: Subnet,
    ranges: Vec<IpRange>,
    size: BigUint,
}

impl PartialSubnet {
    /// The whole subnet as a single range.
    pub fn from_subnet(subnet: Subnet) -> PartialSubnet {
        let ranges = vec![subnet.equivalent_range()];
        PartialSubnet::build(subnet, ranges)
    }

    /// Validate `ranges` against `subnet`. No ranges means the whole subnet.
    pub fn new(subnet: Subnet, ranges: Vec<IpRange>) -> Result<PartialSubnet> {
        if ranges.is_empty() {
            return Ok(PartialSubnet::from_subnet(subnet));
        }
        validate(&subnet, &ranges)?;
        Ok(PartialSubnet::build(subnet, ranges))
    }

    /// Parse `subnet[,range...]`, e.g. `15.23.12.0/23,15.23.12.1-99,15.23.13.*`.
    pub fn parse(text: &str) -> Result<PartialSubnet> {
        let s = text.trim();
        if s.chars().any(char::is_whitespace) {
            return Err(AddrError::malformed(WHAT, s));
        }
        let mut pieces = s.split(',');
        let subnet = match pieces.next() {
            Some(p) => Subnet::parse(p).map_err(|e| e.within(WHAT, s))?,
            None => return Err(AddrError::malformed(WHAT, s)),
        };
        let ranges = pieces
            .map(IpRange::parse)
            .collect::<Result<Vec<_>>>()
            .map_err(|e| {
                log::debug!("range in [{s}] rejected: {e}");
                e.within(WHAT, s)
            })?;
        PartialSubnet::new(subnet, ranges)
    }

    fn build(subnet: Subnet, ranges: Vec<IpRange>) -> PartialSubnet {
        let size = ranges.iter().map(IpRange::size).sum();
        PartialSubnet {
            subnet,
            ranges,
            size,
        }
    }

    pub fn subnet(&self) -> Subnet {
        self.subnet
    }

    /// The first range.
    pub fn range(&self) -> &IpRange {
        &self.ranges[0]
    }

    pub fn ranges(&self) -> &[IpRange] {
        &self.ranges
    }

    pub fn contains(&self, ip: &IpAddress) -> bool {
        self.ranges.iter().any(|r| r.contains(ip))
    }

    /// True if `range` lies wholly within one of the ranges.
    pub fn contains_range(&self, range: &IpRange) -> Result<bool> {
        for r in &self.ranges {
            if r.contains_range(range)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Total number of addresses across the ranges.
    pub fn size(&self) -> &BigUint {
        &self.size
    }

    pub fn size_as_long(&self) -> i64 {
        big_as_long(&self.size)
    }

    pub fn size_as_int(&self) -> i32 {
        big_as_int(&self.size)
    }

    /// Members of each range in turn, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Result<IpAddress>> + '_ {
        self.ranges.iter().flat_map(IpRange::iter)
    }

    pub fn debug_string(&self) -> String {
        let mut out = format!("{self}\n**Size: {}", self.size);
        if self.size_as_long() == -1 {
            out.push_str(" (LONG and INT overflow)");
        } else if self.size_as_int() == -1 {
            out.push_str(" (INT overflow)");
        }
        out.push_str(&format!("\n**Subnet: {}", self.subnet.debug_string()));
        for (i, r) in self.ranges.iter().enumerate() {
            out.push_str(&format!("**IpRange[{i}]: {}", r.debug_string()));
        }
        out
    }
}

fn validate(subnet: &Subnet, ranges: &[IpRange]) -> Result<()> {
    if let Some(r) = ranges.iter().find(|r| r.family() != subnet.family()) {
        return Err(AddrError::invalid(
            WHAT,
            format!("mis-matched IP families: {subnet} / {r}"),
        ));
    }
    let whole = subnet.equivalent_range();
    for r in ranges {
        if !whole.contains_range(r)? {
            return Err(AddrError::invalid(
                WHAT,
                format!("range {r} falls outside the subnet {subnet}"),
            ));
        }
    }
    for ((i, a), (j, b)) in ranges.iter().enumerate().tuple_combinations() {
        if a.intersects(b)? {
            return Err(AddrError::invalid(
                WHAT,
                format!("intersecting ranges ({i},{j}): [{a}],[{b}]"),
            ));
        }
    }
    Ok(())
}

impl fmt::Display for PartialSubnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.subnet)?;
        for r in &self.ranges {
            write!(f, ",{r}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for PartialSubnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PartialSubnet({self})")
    }
}

impl FromStr for PartialSubnet {
    type Err = AddrError;

    fn from_str(s: &str) -> Result<PartialSubnet> {
        PartialSubnet::parse(s)
    }
}

string_serde!(PartialSubnet);

impl PartialOrd for PartialSubnet {
    fn partial_cmp(&self, other: &PartialSubnet) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PartialSubnet {
    /// By subnet, then range by range, then fewer ranges first.
    fn cmp(&self, other: &PartialSubnet) -> Ordering {
        self.subnet
            .cmp(&other.subnet)
            .then_with(|| self.ranges.cmp(&other.ranges))
    }
}
