//! Network address value types.
//!
//! - [`IpAddress`] - IPv4/IPv6 address with canonical string forms
//! - [`MacAddress`] - 48-bit Ethernet address
//! - [`SubnetMask`] - contiguous-ones mask with its prefix length
//! - [`Subnet`] - network address plus mask
//! - [`AddressClass`] - classful IPv4 categories

mod address_class;
mod ip_address;
mod mac_address;
mod subnet;
mod subnet_mask;

pub use address_class::AddressClass;
pub(crate) use ip_address::parse_v6_groups;
pub use ip_address::{Family, IpAddress, IP_V4_ADDR_SIZE, IP_V6_ADDR_SIZE};
pub use mac_address::{MacAddress, MacFormat, MAC_ADDR_SIZE};
pub use subnet::Subnet;
pub use subnet_mask::SubnetMask;
