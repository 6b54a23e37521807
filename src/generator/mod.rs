//! Combinatorial byte-array generator.
//!
//! A [`ByteArrayGenerator`] is parsed from a compact textual spec such as
//! `15.23.12-13.*` and describes the cartesian product of one inclusive byte
//! range per position. It answers containment and overlap questions about
//! that set, enumerates it in odometer order and samples it at random.
//!
//! - [`byte_spec`] - per-position grammar and rendering
//! - [`iter`] - odometer-order enumeration

mod byte_spec;
mod iter;

pub use byte_spec::{ByteSpec, Layout};
pub use iter::ByteArrayIter;

use crate::error::{AddrError, Result};
use byte_spec::{parse_position, render_position};
use itertools::Itertools;
use num_bigint::BigUint;
use num_traits::{One, ToPrimitive};
use rand::Rng;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Set of byte arrays described by one inclusive range per byte position.
#[derive(Debug, Clone)]
pub struct ByteArrayGenerator {
    spec: String,
    layout: Layout,
    specs: Vec<ByteSpec>,
    normalized: String,
    space_size: BigUint,
}

impl ByteArrayGenerator {
    /// Parse `spec` into a generator of `length`-byte arrays.
    ///
    /// The layout is inferred from the separator: `.` means decimal one-byte
    /// positions, `:` means hex positions of one byte each, or two bytes each
    /// when there are exactly `length / 2` positions.
    ///
    /// # Examples
    /// ```
    /// use netspec::ByteArrayGenerator;
    /// let bag = ByteArrayGenerator::parse("15.23.12-13.*", 4).unwrap();
    /// assert_eq!(bag.size_as_long(), 512);
    /// ```
    pub fn parse(spec: &str, length: usize) -> Result<ByteArrayGenerator> {
        let trimmed = spec.trim();
        let layout = if trimmed.contains(':') {
            let positions = trimmed.split(':').count();
            if positions * 2 == length {
                Layout::HexWord
            } else {
                Layout::Hex
            }
        } else {
            Layout::Decimal
        };
        Self::parse_with(trimmed, layout, length)
    }

    /// Parse `spec` with an explicit layout.
    pub fn parse_with(spec: &str, layout: Layout, length: usize) -> Result<ByteArrayGenerator> {
        let trimmed = spec.trim();
        let positions: Vec<&str> = trimmed.split(layout.separator()).collect();
        if length == 0 || positions.len() * layout.bytes_per_position() != length {
            log::trace!("spec [{trimmed}] has {} positions, want {length} bytes", positions.len());
            return Err(AddrError::malformed("byte spec", trimmed));
        }
        let mut specs = Vec::with_capacity(length);
        for position in positions {
            specs.extend(parse_position(position, layout)?);
        }
        Ok(Self::build(trimmed.to_string(), layout, specs))
    }

    /// Build a generator directly from per-byte bounds.
    pub fn from_bounds(layout: Layout, lows: &[u8], highs: &[u8]) -> Result<ByteArrayGenerator> {
        if lows.is_empty()
            || lows.len() != highs.len()
            || lows.len() % layout.bytes_per_position() != 0
        {
            return Err(AddrError::invalid(
                "byte bounds",
                format!("unusable lengths {} and {}", lows.len(), highs.len()),
            ));
        }
        let specs = lows
            .iter()
            .zip(highs)
            .map(|(&lo, &hi)| ByteSpec::new(lo, hi))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_specs(layout, specs))
    }

    /// Build from already-ordered byte specs; the spec text is the normalized form.
    pub(crate) fn from_specs(layout: Layout, specs: Vec<ByteSpec>) -> ByteArrayGenerator {
        let normalized = Self::render(layout, &specs);
        Self::build(normalized, layout, specs)
    }

    fn build(spec: String, layout: Layout, specs: Vec<ByteSpec>) -> ByteArrayGenerator {
        let space_size = specs
            .iter()
            .fold(BigUint::one(), |acc, s| acc * BigUint::from(s.width()));
        let normalized = Self::render(layout, &specs);
        log::trace!("generator [{spec}] normalized to [{normalized}] size={space_size}");
        ByteArrayGenerator {
            spec,
            layout,
            specs,
            normalized,
            space_size,
        }
    }

    fn render(layout: Layout, specs: &[ByteSpec]) -> String {
        specs
            .chunks(layout.bytes_per_position())
            .map(|chunk| render_position(chunk, layout))
            .join(&layout.separator().to_string())
    }

    /// The spec text this generator was parsed from.
    pub fn spec(&self) -> &str {
        &self.spec
    }

    /// Canonical rendering, usable as an equality or cache key.
    pub fn normalized_spec(&self) -> &str {
        &self.normalized
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Number of bytes in every generated array.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn byte_specs(&self) -> &[ByteSpec] {
        &self.specs
    }

    pub fn lowest(&self) -> Vec<u8> {
        self.specs.iter().map(ByteSpec::lo).collect()
    }

    pub fn highest(&self) -> Vec<u8> {
        self.specs.iter().map(ByteSpec::hi).collect()
    }

    /// Exact number of distinct arrays.
    pub fn result_space_size(&self) -> &BigUint {
        &self.space_size
    }

    /// Size as `i64`, or -1 if it does not fit.
    pub fn size_as_long(&self) -> i64 {
        big_as_long(&self.space_size)
    }

    /// Size as `i32`, or -1 if it does not fit.
    pub fn size_as_int(&self) -> i32 {
        big_as_int(&self.space_size)
    }

    /// True if every byte of `bytes` lies within its position's bounds.
    pub fn contains(&self, bytes: &[u8]) -> Result<bool> {
        if bytes.len() != self.len() {
            return Err(AddrError::invalid(
                "byte array",
                format!("size mismatch: expected {} but was {}", self.len(), bytes.len()),
            ));
        }
        Ok(self.specs.iter().zip(bytes).all(|(s, &b)| s.contains(b)))
    }

    fn validate_for_compare(&self, other: &ByteArrayGenerator) -> Result<()> {
        if other.len() != self.len() {
            return Err(AddrError::invalid(
                "generator comparison",
                format!("size mismatch: expected {} but was {}", self.len(), other.len()),
            ));
        }
        if other.layout != self.layout {
            return Err(AddrError::invalid(
                "generator comparison",
                format!(
                    "incompatible generator kind: {:?} vs {:?}",
                    self.layout, other.layout
                ),
            ));
        }
        Ok(())
    }

    /// True if `other` lies completely within the bounds of this generator.
    pub fn is_superset(&self, other: &ByteArrayGenerator) -> Result<bool> {
        self.validate_for_compare(other)?;
        Ok(self
            .specs
            .iter()
            .zip(&other.specs)
            .all(|(mine, theirs)| mine.covers(theirs)))
    }

    /// True if the two generators share at least one array.
    pub fn intersects(&self, other: &ByteArrayGenerator) -> Result<bool> {
        self.validate_for_compare(other)?;
        // positions are independent, so a single disjoint position is enough
        Ok(self
            .specs
            .iter()
            .zip(&other.specs)
            .all(|(mine, theirs)| mine.overlaps(theirs)))
    }

    /// Enumerate every array in odometer order. Each call starts afresh.
    pub fn iter(&self) -> ByteArrayIter<'_> {
        ByteArrayIter::new(&self.specs)
    }

    /// Draw one array, each position uniform within its bounds.
    pub fn generate(&self) -> Vec<u8> {
        self.generate_with(&mut rand::thread_rng())
    }

    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<u8> {
        self.specs
            .iter()
            .map(|s| rng.gen_range(s.lo()..=s.hi()))
            .collect()
    }

    /// Multi-line summary for diagnostics.
    pub fn debug_string(&self) -> String {
        format!(
            "[ByteArrayGenerator: {}]\n Original Spec: {}\n Size: {}\n Result Space Size: {}\n Lowest: {}\n Highest: {}\n",
            self.normalized,
            self.spec,
            self.len(),
            self.space_size,
            hex_string(&self.lowest()),
            hex_string(&self.highest()),
        )
    }
}

pub(crate) fn big_as_long(b: &BigUint) -> i64 {
    b.to_i64().unwrap_or(-1)
}

pub(crate) fn big_as_int(b: &BigUint) -> i32 {
    b.to_i32().unwrap_or(-1)
}

fn hex_string(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

impl PartialEq for ByteArrayGenerator {
    fn eq(&self, other: &Self) -> bool {
        self.layout == other.layout && self.specs == other.specs
    }
}

impl Eq for ByteArrayGenerator {}

impl Hash for ByteArrayGenerator {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.layout.hash(state);
        self.specs.hash(state);
    }
}

impl PartialOrd for ByteArrayGenerator {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ByteArrayGenerator {
    /// Shorter arrays first, then by lowest array, then by highest.
    fn cmp(&self, other: &Self) -> Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| self.lowest().cmp(&other.lowest()))
            .then_with(|| self.highest().cmp(&other.highest()))
            .then_with(|| self.layout.cmp(&other.layout))
    }
}

impl fmt::Display for ByteArrayGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.normalized)
    }
}

impl<'a> IntoIterator for &'a ByteArrayGenerator {
    type Item = Vec<u8>;
    type IntoIter = ByteArrayIter<'a>;

    fn into_iter(self) -> ByteArrayIter<'a> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_parse_and_normalize() {
        let bag = ByteArrayGenerator::parse(" 15.23.012-13.0-255 ", 4).unwrap();
        assert_eq!(bag.spec(), "15.23.012-13.0-255");
        assert_eq!(bag.normalized_spec(), "15.23.12-13.*");
        assert_eq!(bag.layout(), Layout::Decimal);
        assert_eq!(bag.len(), 4);
        assert_eq!(bag.lowest(), vec![15, 23, 12, 0]);
        assert_eq!(bag.highest(), vec![15, 23, 13, 255]);
        assert_eq!(bag.result_space_size(), &BigUint::from(512u32));

        let mac = ByteArrayGenerator::parse("00:1B-2c:*:00:00:0A", 6).unwrap();
        assert_eq!(mac.layout(), Layout::Hex);
        assert_eq!(mac.normalized_spec(), "00:1b-2c:*:00:00:0a");

        let v6 = ByteArrayGenerator::parse("fe80:0:0:0:0:0:0:1-ff", 16).unwrap();
        assert_eq!(v6.layout(), Layout::HexWord);
        assert_eq!(v6.normalized_spec(), "FE80:0:0:0:0:0:0:1-FF");
        assert_eq!(v6.size_as_long(), 255);
    }

    #[test]
    fn test_parse_failures() {
        assert!(ByteArrayGenerator::parse("1.2.3", 4).unwrap_err().is_malformed());
        assert!(ByteArrayGenerator::parse("1.2.3.4.5", 4).unwrap_err().is_malformed());
        assert!(ByteArrayGenerator::parse("1.2.3.256", 4).unwrap_err().is_malformed());
        assert!(ByteArrayGenerator::parse("1..3.4", 4).unwrap_err().is_malformed());
        assert!(ByteArrayGenerator::parse("1.2.9-3.4", 4).unwrap_err().is_invalid());
        assert!(ByteArrayGenerator::parse("", 4).unwrap_err().is_malformed());
        assert!(ByteArrayGenerator::parse("0g:00:00:00:00:00", 6)
            .unwrap_err()
            .is_malformed());
    }

    #[test]
    fn test_size_overflow_sentinels() {
        let bag = ByteArrayGenerator::parse("*.*.*.*", 4).unwrap();
        assert_eq!(bag.size_as_long(), 1i64 << 32);
        assert_eq!(bag.size_as_int(), -1);

        let huge = ByteArrayGenerator::parse("*:*:*:*:*:*:*:*", 16).unwrap();
        assert_eq!(huge.size_as_long(), -1);
        assert_eq!(huge.size_as_int(), -1);
        assert_eq!(huge.result_space_size(), &(BigUint::one() << 128usize));
    }

    #[test]
    fn test_contains() {
        let bag = ByteArrayGenerator::parse("35.*.2.44", 4).unwrap();
        assert!(bag.contains(&[35, 127, 2, 44]).unwrap());
        assert!(bag.contains(&[35, 128, 2, 44]).unwrap());
        assert!(bag.contains(&[35, 255, 2, 44]).unwrap());
        assert!(!bag.contains(&[32, 127, 2, 44]).unwrap());
        assert!(bag.contains(&[35, 1, 2]).unwrap_err().is_invalid());
    }

    #[test]
    fn test_superset_and_intersects() {
        let outer = ByteArrayGenerator::parse("10.0-50.*.*", 4).unwrap();
        let inner = ByteArrayGenerator::parse("10.10-20.5.*", 4).unwrap();
        let straddles = ByteArrayGenerator::parse("10.40-60.5.*", 4).unwrap();
        let outside = ByteArrayGenerator::parse("11.*.*.*", 4).unwrap();

        assert!(outer.is_superset(&outer).unwrap());
        assert!(outer.is_superset(&inner).unwrap());
        assert!(!inner.is_superset(&outer).unwrap());
        assert!(!outer.is_superset(&straddles).unwrap());

        assert!(outer.intersects(&inner).unwrap());
        assert!(inner.intersects(&outer).unwrap());
        assert!(straddles.intersects(&outer).unwrap());
        assert!(!straddles.intersects(&inner).unwrap());
        assert!(!outside.intersects(&outer).unwrap());
    }

    #[test]
    fn test_compare_mismatched_generators() {
        let dec = ByteArrayGenerator::parse("1.2.3.4", 4).unwrap();
        let six = ByteArrayGenerator::parse("1.2.3.4.5.6", 6).unwrap();
        let hex = ByteArrayGenerator::parse_with("1:2:3:4", Layout::Hex, 4).unwrap();
        assert!(dec.is_superset(&six).unwrap_err().is_invalid());
        assert!(dec.intersects(&hex).unwrap_err().is_invalid());
    }

    #[test]
    fn test_iterator_is_restartable() {
        let bag = ByteArrayGenerator::parse("2.0-5", 2).unwrap();
        let first: Vec<Vec<u8>> = bag.iter().collect();
        assert_eq!(first.len(), 6);
        assert_eq!(first[0], vec![2, 0]);
        assert_eq!(first[5], vec![2, 5]);
        let again: Vec<Vec<u8>> = (&bag).into_iter().collect();
        assert_eq!(first, again);
    }

    #[test]
    fn test_iterator_on_huge_space_is_lazy() {
        let huge = ByteArrayGenerator::parse("*:*:*:*:*:*:*:*", 16).unwrap();
        let some: Vec<Vec<u8>> = huge.iter().take(3).collect();
        assert_eq!(some[2][15], 2);
    }

    #[test]
    fn test_generate_stays_in_bounds() {
        let bag = ByteArrayGenerator::parse("15.37.100-120.*", 4).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let bytes = bag.generate_with(&mut rng);
            assert!(bag.contains(&bytes).unwrap());
        }
        assert!(bag.contains(&bag.generate()).unwrap());
    }

    #[test]
    fn test_from_bounds() {
        let bag = ByteArrayGenerator::from_bounds(Layout::Decimal, &[10, 0, 0, 0], &[10, 0, 255, 255])
            .unwrap();
        assert_eq!(bag.normalized_spec(), "10.0.*.*");
        assert_eq!(bag, ByteArrayGenerator::parse("10.0.*.*", 4).unwrap());
        assert!(ByteArrayGenerator::from_bounds(Layout::Decimal, &[2], &[1])
            .unwrap_err()
            .is_invalid());
        assert!(ByteArrayGenerator::from_bounds(Layout::HexWord, &[1, 2, 3], &[1, 2, 3])
            .unwrap_err()
            .is_invalid());
    }

    #[test]
    fn test_equality_uses_normalized_form() {
        let a = ByteArrayGenerator::parse("1.2.3.0-255", 4).unwrap();
        let b = ByteArrayGenerator::parse("1.2.3.*", 4).unwrap();
        assert_eq!(a, b);
        assert!(a.debug_string().contains("Result Space Size: 256"));
    }
}
