//! Library-wide constants.

use crate::models::MacFormat;

/// Fewest one-bits a mask may be built from with `SubnetMask::from_prefix_length`.
pub const MIN_PREFIX_LENGTH: u8 = 8;
/// Most one-bits an IPv4 mask may have (the last bit must stay clear).
pub const MAX_PREFIX_LENGTH_V4: u8 = 31;
/// Most one-bits an IPv6 mask may have.
pub const MAX_PREFIX_LENGTH_V6: u8 = 127;

/// Highest valid TCP/UDP port accepted as an address suffix.
pub const MAX_PORT: u32 = 65535;

/// Layout used by `MacAddress`'s `Display` impl.
pub const DEFAULT_MAC_FORMAT: MacFormat = MacFormat::MultiColon;
/// MAC addresses render in lower case unless asked otherwise.
pub const DEFAULT_MAC_LOWER_CASE: bool = true;

/// Entries kept by a `ValueCache` created with `ValueCache::default()`.
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// Log config read by the `netspec` binary when `NETSPEC_LOG_CONFIG` is unset.
pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";
/// Members printed per range by the `netspec` binary when
/// `NETSPEC_ENUMERATE_LIMIT` is unset.
pub const DEFAULT_ENUMERATE_LIMIT: usize = 16;
