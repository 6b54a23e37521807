//! Typed ranges of byte-encoded values.
//!
//! [`ByteRange`] pairs a [`ByteArrayGenerator`] with a [`RangeValue`] codec,
//! so one implementation of the range algebra serves every address type.
//!
//! - [`ip_range`] - [`IpRange`] and subnet equivalence
//! - [`mac_range`] - [`MacRange`] and [`MacPrefix`]
//! - [`partial_subnet`] - a subnet restricted to disjoint ranges

mod ip_range;
mod mac_range;
mod partial_subnet;

pub use ip_range::IpRange;
pub use mac_range::{MacPrefix, MacRange};
pub use partial_subnet::PartialSubnet;

use crate::error::Result;
use crate::generator::{ByteArrayGenerator, ByteArrayIter};
use itertools::Itertools;
use num_bigint::BigUint;
use rand::Rng;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::marker::PhantomData;

/// A value that can be the member type of a [`ByteRange`].
pub trait RangeValue: Sized {
    /// Name used in error messages.
    const WHAT: &'static str;

    /// Build the generator for a textual range spec of this value type.
    fn generator_for(spec: &str) -> Result<ByteArrayGenerator>;

    fn decode(bytes: &[u8]) -> Result<Self>;

    fn encode(&self) -> Vec<u8>;
}

/// A non-empty set of `T` values described by one byte range per position.
pub struct ByteRange<T> {
    bag: ByteArrayGenerator,
    _value: PhantomData<fn() -> T>,
}

impl<T: RangeValue> ByteRange<T> {
    /// Parse a range spec such as `15.23.12-13.*`.
    pub fn parse(spec: &str) -> Result<ByteRange<T>> {
        let bag = T::generator_for(spec.trim())?;
        log::debug!("parsed {} [{}] as [{}]", T::WHAT, spec.trim(), bag);
        Ok(ByteRange::from_generator(bag))
    }

    pub(crate) fn from_generator(bag: ByteArrayGenerator) -> ByteRange<T> {
        ByteRange {
            bag,
            _value: PhantomData,
        }
    }

    /// Parse a comma-separated list of specs, in order. Empty items are skipped.
    pub fn parse_list(specs: &str) -> Result<Vec<ByteRange<T>>> {
        specs
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ByteRange::parse)
            .collect()
    }

    /// Inverse of [`ByteRange::parse_list`].
    pub fn list_to_string(ranges: &[ByteRange<T>]) -> String {
        ranges.iter().join(",")
    }

    pub fn generator(&self) -> &ByteArrayGenerator {
        &self.bag
    }

    /// Lowest member.
    pub fn first(&self) -> Result<T> {
        T::decode(&self.bag.lowest())
    }

    /// Highest member.
    pub fn last(&self) -> Result<T> {
        T::decode(&self.bag.highest())
    }

    pub fn size(&self) -> &BigUint {
        self.bag.result_space_size()
    }

    /// Size as `i64`, or -1 on overflow.
    pub fn size_as_long(&self) -> i64 {
        self.bag.size_as_long()
    }

    /// Size as `i32`, or -1 on overflow.
    pub fn size_as_int(&self) -> i32 {
        self.bag.size_as_int()
    }

    /// True if `value` is a member. Values of a different byte length are
    /// never members.
    pub fn contains(&self, value: &T) -> bool {
        self.bag.contains(&value.encode()).unwrap_or(false)
    }

    /// True if every member of `other` is a member of this range.
    ///
    /// Fails if the ranges are not comparable (different byte lengths or
    /// layouts, e.g. IPv4 against IPv6).
    pub fn contains_range(&self, other: &ByteRange<T>) -> Result<bool> {
        self.bag.is_superset(&other.bag)
    }

    pub fn intersects(&self, other: &ByteRange<T>) -> Result<bool> {
        self.bag.intersects(&other.bag)
    }

    /// A uniformly random member.
    pub fn random(&self) -> Result<T> {
        self.random_with(&mut rand::thread_rng())
    }

    pub fn random_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<T> {
        T::decode(&self.bag.generate_with(rng))
    }

    /// Members in ascending byte order. Each call starts afresh.
    pub fn iter(&self) -> ByteRangeIter<'_, T> {
        ByteRangeIter {
            inner: self.bag.iter(),
            _value: PhantomData,
        }
    }

    pub fn debug_string(&self) -> String {
        format!("[{}] {}", T::WHAT, self.bag.debug_string())
    }
}

/// Iterator over the members of a [`ByteRange`].
///
/// Yields an error for byte patterns that do not decode to a valid value,
/// such as IPv6 link-local addresses with reserved bits set.
pub struct ByteRangeIter<'a, T> {
    inner: ByteArrayIter<'a>,
    _value: PhantomData<fn() -> T>,
}

impl<T: RangeValue> Iterator for ByteRangeIter<'_, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Result<T>> {
        self.inner.next().map(|bytes| T::decode(&bytes))
    }
}

impl<T: RangeValue> FusedIterator for ByteRangeIter<'_, T> {}

impl<'a, T: RangeValue> IntoIterator for &'a ByteRange<T> {
    type Item = Result<T>;
    type IntoIter = ByteRangeIter<'a, T>;

    fn into_iter(self) -> ByteRangeIter<'a, T> {
        self.iter()
    }
}

impl<T> Clone for ByteRange<T> {
    fn clone(&self) -> Self {
        ByteRange {
            bag: self.bag.clone(),
            _value: PhantomData,
        }
    }
}

impl<T> PartialEq for ByteRange<T> {
    fn eq(&self, other: &Self) -> bool {
        self.bag == other.bag
    }
}

impl<T> Eq for ByteRange<T> {}

impl<T> Hash for ByteRange<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bag.hash(state);
    }
}

impl<T: RangeValue + Ord> PartialOrd for ByteRange<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: RangeValue + Ord> Ord for ByteRange<T> {
    /// By first member, then last member.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.first(), other.first(), self.last(), other.last()) {
            (Ok(a), Ok(b), Ok(c), Ok(d)) => a
                .cmp(&b)
                .then_with(|| c.cmp(&d))
                .then_with(|| self.bag.cmp(&other.bag)),
            _ => self.bag.cmp(&other.bag),
        }
    }
}

impl<T> fmt::Display for ByteRange<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bag)
    }
}

impl<T: RangeValue> fmt::Debug for ByteRange<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ByteRange<{}>({})", T::WHAT, self.bag)
    }
}

impl<T: RangeValue> std::str::FromStr for ByteRange<T> {
    type Err = crate::error::AddrError;

    fn from_str(s: &str) -> Result<ByteRange<T>> {
        ByteRange::parse(s)
    }
}

impl<T> Serialize for ByteRange<T> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de, T: RangeValue> Deserialize<'de> for ByteRange<T> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<ByteRange<T>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ByteRange::parse(&s).map_err(de::Error::custom)
    }
}
