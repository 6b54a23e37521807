//! Natural ("human") ordering of strings with embedded numbers.
//!
//! `a2` sorts before `a11`, and `Port 9` before `port 10`.

use lazy_static::lazy_static;
use num_bigint::BigUint;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;

lazy_static! {
    static ref RE_COUPLET: Regex = Regex::new(r"([^0-9]*)([0-9]*)").unwrap();
}

/// A run of non-digits followed by an optional run of digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Couplet {
    pub prefix: String,
    pub suffix: Option<BigUint>,
}

impl Couplet {
    fn cmp_natural(&self, other: &Couplet) -> Ordering {
        let fold = |s: &str| s.chars().flat_map(char::to_lowercase).collect::<Vec<_>>();
        fold(&self.prefix)
            .cmp(&fold(&other.prefix))
            .then_with(|| self.suffix.cmp(&other.suffix))
    }
}

/// Split `text` into its couplets.
///
/// # Examples
/// ```
/// use netspec::natural::couplets;
/// let parts = couplets("eth1/12");
/// assert_eq!(parts.len(), 2);
/// assert_eq!(parts[1].prefix, "/");
/// ```
pub fn couplets(text: &str) -> Vec<Couplet> {
    RE_COUPLET
        .captures_iter(text)
        .filter(|caps| !caps[0].is_empty())
        .map(|caps| Couplet {
            prefix: caps[1].to_string(),
            suffix: caps[2].parse::<BigUint>().ok(),
        })
        .collect()
}

/// Compare two strings in natural order.
///
/// Couplets are compared in turn, prefixes case-insensitively and then
/// numeric suffixes, where a missing suffix sorts before any number. A
/// string whose couplets are a strict prefix of the other's sorts first.
/// Remaining ties fall back to plain string order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let left = couplets(a);
    let right = couplets(b);
    left.iter()
        .zip(&right)
        .map(|(l, r)| l.cmp_natural(r))
        .find(|o| o.is_ne())
        .unwrap_or_else(|| left.len().cmp(&right.len()))
        .then_with(|| a.cmp(b))
}

/// A string that orders naturally.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NaturalName(String);

impl NaturalName {
    pub fn new(name: impl Into<String>) -> NaturalName {
        NaturalName(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NaturalName {
    fn from(s: &str) -> NaturalName {
        NaturalName::new(s)
    }
}

impl From<String> for NaturalName {
    fn from(s: String) -> NaturalName {
        NaturalName(s)
    }
}

impl PartialOrd for NaturalName {
    fn partial_cmp(&self, other: &NaturalName) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NaturalName {
    fn cmp(&self, other: &NaturalName) -> Ordering {
        natural_cmp(&self.0, &other.0)
    }
}

impl fmt::Display for NaturalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
