//! Per-position byte specifications (`n`, `n-m`, `*`).

use crate::error::{AddrError, Result};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RE_DEC: Regex = Regex::new(r"^([0-9]{1,3})(?:-([0-9]{1,3}))?$").unwrap();
    static ref RE_HEX: Regex = Regex::new(r"^([0-9a-fA-F]{1,2})(?:-([0-9a-fA-F]{1,2}))?$").unwrap();
    static ref RE_WORD: Regex = Regex::new(r"^([0-9a-fA-F]{1,4})(?:-([0-9a-fA-F]{1,4}))?$").unwrap();
}

const STAR: &str = "*";

/// How positions of a textual spec map onto bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layout {
    /// `.`-separated decimal positions, one byte each (IPv4).
    Decimal,
    /// `:`-separated hex positions, one byte each (MAC).
    Hex,
    /// `:`-separated hex positions, two bytes each (IPv6).
    HexWord,
}

impl Layout {
    pub fn bytes_per_position(self) -> usize {
        match self {
            Layout::Decimal | Layout::Hex => 1,
            Layout::HexWord => 2,
        }
    }

    pub fn separator(self) -> char {
        match self {
            Layout::Decimal => '.',
            Layout::Hex | Layout::HexWord => ':',
        }
    }

    fn radix(self) -> u32 {
        match self {
            Layout::Decimal => 10,
            Layout::Hex | Layout::HexWord => 16,
        }
    }

    fn position_max(self) -> u32 {
        match self {
            Layout::Decimal | Layout::Hex => 0xFF,
            Layout::HexWord => 0xFFFF,
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            Layout::Decimal => &RE_DEC,
            Layout::Hex => &RE_HEX,
            Layout::HexWord => &RE_WORD,
        }
    }
}

/// Inclusive `[lo, hi]` set of values allowed at one byte position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByteSpec {
    lo: u8,
    hi: u8,
}

impl ByteSpec {
    /// The full `[0, 255]` range.
    pub const ANY: ByteSpec = ByteSpec { lo: 0, hi: 0xFF };

    pub fn new(lo: u8, hi: u8) -> Result<ByteSpec> {
        if lo > hi {
            return Err(AddrError::invalid(
                "byte spec",
                format!("low/high error: {lo} > {hi}"),
            ));
        }
        Ok(ByteSpec { lo, hi })
    }

    /// Spec covering both bounds, whichever order they come in.
    pub(crate) fn spanning(a: u8, b: u8) -> ByteSpec {
        ByteSpec {
            lo: a.min(b),
            hi: a.max(b),
        }
    }

    pub fn fixed(value: u8) -> ByteSpec {
        ByteSpec { lo: value, hi: value }
    }

    pub fn lo(&self) -> u8 {
        self.lo
    }

    pub fn hi(&self) -> u8 {
        self.hi
    }

    /// Number of values at this position (1..=256).
    pub fn width(&self) -> u32 {
        u32::from(self.hi) - u32::from(self.lo) + 1
    }

    pub fn is_any(&self) -> bool {
        *self == ByteSpec::ANY
    }

    pub fn is_fixed(&self) -> bool {
        self.lo == self.hi
    }

    pub fn contains(&self, b: u8) -> bool {
        self.lo <= b && b <= self.hi
    }

    /// True if `other` lies entirely within this position's bounds.
    pub fn covers(&self, other: &ByteSpec) -> bool {
        self.lo <= other.lo && self.hi >= other.hi
    }

    pub fn overlaps(&self, other: &ByteSpec) -> bool {
        other.lo <= self.hi && other.hi >= self.lo
    }
}

/// Parse one position of a spec into its byte specs (two for [`Layout::HexWord`]).
pub(crate) fn parse_position(text: &str, layout: Layout) -> Result<Vec<ByteSpec>> {
    if text == STAR {
        return Ok(vec![ByteSpec::ANY; layout.bytes_per_position()]);
    }
    let caps = layout
        .pattern()
        .captures(text)
        .ok_or_else(|| AddrError::malformed("byte spec position", text))?;
    let parse = |s: &str| -> Result<u32> {
        let v = u32::from_str_radix(s, layout.radix())
            .map_err(|_| AddrError::malformed("byte spec position", text))?;
        if v > layout.position_max() {
            return Err(AddrError::malformed("byte spec position", text));
        }
        Ok(v)
    };
    let lo = parse(&caps[1])?;
    let hi = match caps.get(2) {
        Some(m) => parse(m.as_str())?,
        None => lo,
    };
    if lo > hi {
        return Err(AddrError::invalid(
            "byte spec",
            format!("low/high error: [{text}]"),
        ));
    }
    match layout {
        Layout::Decimal | Layout::Hex => Ok(vec![ByteSpec::new(lo as u8, hi as u8)?]),
        Layout::HexWord => {
            let high_byte = ByteSpec::new((lo >> 8) as u8, (hi >> 8) as u8)?;
            let low_byte = ByteSpec::new((lo & 0xFF) as u8, (hi & 0xFF) as u8).map_err(|_| {
                AddrError::invalid(
                    "byte spec",
                    format!("low byte bounds out of order in [{text}]"),
                )
            })?;
            Ok(vec![high_byte, low_byte])
        }
    }
}

/// Render one position (one or two byte specs) in its canonical form.
pub(crate) fn render_position(specs: &[ByteSpec], layout: Layout) -> String {
    if specs.iter().all(ByteSpec::is_any) {
        return STAR.to_string();
    }
    match layout {
        Layout::Decimal => render_pair(specs[0], |v| v.to_string()),
        Layout::Hex => render_pair(specs[0], |v| format!("{v:02x}")),
        Layout::HexWord => {
            let lo = (u32::from(specs[0].lo) << 8) | u32::from(specs[1].lo);
            let hi = (u32::from(specs[0].hi) << 8) | u32::from(specs[1].hi);
            if lo == hi {
                format!("{lo:X}")
            } else {
                format!("{lo:X}-{hi:X}")
            }
        }
    }
}

fn render_pair(spec: ByteSpec, fmt: impl Fn(u8) -> String) -> String {
    if spec.is_fixed() {
        fmt(spec.lo)
    } else {
        format!("{}-{}", fmt(spec.lo), fmt(spec.hi))
    }
}
