//! Network address value types.
//!
//! Immutable, validated values for IP and MAC addresses, subnet masks,
//! subnets, and ranges of addresses written in a compact per-byte grammar
//! (`15.23.12-13.*`, `00:1b:2c:*:*:*`).
//!
//! - [`generator`] - the byte-array set algebra everything is built on
//! - [`models`] - single addresses, masks and subnets
//! - [`range`] - typed ranges and partial subnets
//! - [`natural`] - natural-order string comparison
//! - [`cache`] - optional interning of parsed values
//! - [`output`] - terminal descriptions used by the `netspec` binary

/// `Serialize`/`Deserialize` as the canonical string, decoded through `parse`.
macro_rules! string_serde {
    ($ty:ty) => {
        impl serde::Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::ser::Serializer,
            {
                serializer.collect_str(self)
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> std::result::Result<$ty, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                <$ty>::parse(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

pub mod cache;
pub mod config;
pub mod error;
pub mod generator;
pub mod models;
pub mod natural;
pub mod output;
pub mod range;

pub use cache::ValueCache;
pub use error::{AddrError, Result};
pub use generator::{ByteArrayGenerator, ByteArrayIter, ByteSpec, Layout};
pub use models::{
    AddressClass, Family, IpAddress, MacAddress, MacFormat, Subnet, SubnetMask, IP_V4_ADDR_SIZE,
    IP_V6_ADDR_SIZE, MAC_ADDR_SIZE,
};
pub use natural::{natural_cmp, NaturalName};
pub use range::{ByteRange, ByteRangeIter, IpRange, MacPrefix, MacRange, PartialSubnet, RangeValue};
