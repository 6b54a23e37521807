//! Recognise a command-line argument and describe it.

use super::terminal::{format_field, format_flags, format_heading, LABEL_WIDTH};
use crate::error::AddrError;
use crate::models::{Family, IpAddress, MacAddress, MacFormat, Subnet};
use crate::range::{ByteRange, IpRange, MacRange, PartialSubnet, RangeValue};
use colored::Colorize;
use num_bigint::BigUint;
use std::fmt::Display;

/// What an argument was recognised as.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed {
    PartialSubnet(PartialSubnet),
    Subnet(Subnet),
    Mac(MacAddress),
    Ip(IpAddress),
    MacRange(MacRange),
    IpRange(IpRange),
    /// Looked like a subnet or partial subnet but failed to parse.
    Rejected { input: String, error: AddrError },
    /// Not an address at all.
    Name(String),
}

/// Try each value type in turn. Single addresses win over the one-member
/// ranges they would also parse as.
pub fn classify(arg: &str) -> Parsed {
    let arg = arg.trim();
    if arg.contains(',') {
        return PartialSubnet::parse(arg).map_or_else(
            |error| rejected(arg, error),
            Parsed::PartialSubnet,
        );
    }
    if arg.contains('/') {
        return Subnet::parse(arg).map_or_else(|error| rejected(arg, error), Parsed::Subnet);
    }
    if let Ok(mac) = MacAddress::parse(arg) {
        return Parsed::Mac(mac);
    }
    if let Ok(ip) = IpAddress::parse(arg) {
        return Parsed::Ip(ip);
    }
    if let Ok(range) = MacRange::parse(arg) {
        return Parsed::MacRange(range);
    }
    if let Ok(range) = IpRange::parse(arg) {
        return Parsed::IpRange(range);
    }
    log::debug!("[{arg}] is not an address, treating it as a name");
    Parsed::Name(arg.to_string())
}

fn rejected(input: &str, error: AddrError) -> Parsed {
    log::warn!("rejected [{input}]: {error}");
    Parsed::Rejected {
        input: input.to_string(),
        error,
    }
}

/// Lines describing `parsed`; ranges list at most `limit` members.
pub fn describe(input: &str, parsed: &Parsed, limit: usize) -> Vec<String> {
    match parsed {
        Parsed::Ip(ip) => describe_ip(input, ip),
        Parsed::Mac(mac) => describe_mac(input, mac),
        Parsed::Subnet(subnet) => describe_subnet(input, subnet, limit),
        Parsed::PartialSubnet(partial) => describe_partial(input, partial, limit),
        Parsed::IpRange(range) => {
            let mut lines = vec![format_heading(input, "IP range")];
            lines.push(field("family", range.family()));
            let equivalent = range
                .equivalent_subnet()
                .map_or_else(|| "none".to_string(), |s| s.to_string());
            lines.push(field("subnet", equivalent));
            lines.extend(describe_range(range, limit));
            lines
        }
        Parsed::MacRange(range) => {
            let mut lines = vec![format_heading(input, "MAC range")];
            lines.extend(describe_range(range, limit));
            lines
        }
        Parsed::Rejected { input, error } => {
            vec![format!("{} {}", input.bold(), error.to_string().red())]
        }
        Parsed::Name(name) => vec![format_heading(name, "name")],
    }
}

fn field<T: ToString>(label: &str, value: T) -> String {
    format_field(label, value, LABEL_WIDTH)
}

fn describe_ip(input: &str, ip: &IpAddress) -> Vec<String> {
    let private = ip
        .address_class()
        .private_network()
        .map_or(false, |net| net.contains(ip));
    let mut lines = vec![
        format_heading(input, "IP address"),
        field("family", ip.family()),
        field("address", ip),
        field("short", ip.to_short_string()),
    ];
    if ip.family() == Family::IPv4 {
        lines.push(field("class", ip.address_class()));
    }
    lines.push(field(
        "flags",
        format_flags(&[
            ("loopback", ip.is_loopback()),
            ("multicast", ip.is_multicast()),
            ("broadcast", ip.is_broadcast()),
            ("link-local", ip.is_link_local()),
            ("undetermined", ip.is_undetermined()),
            ("reserved", ip.is_reserved()),
            ("private", private),
        ]),
    ));
    lines
}

fn describe_mac(input: &str, mac: &MacAddress) -> Vec<String> {
    vec![
        format_heading(input, "MAC address"),
        field("address", mac),
        field("dashed", mac.to_formatted_string(MacFormat::MultiDash, false)),
        field("number", mac.to_u64()),
        field(
            "flags",
            format_flags(&[
                ("broadcast", mac.is_broadcast()),
                ("multicast", mac.is_multicast()),
                ("link-local", mac.is_link_local()),
                ("vrrp", mac.is_vrrp_vmac()),
            ]),
        ),
    ]
}

fn describe_subnet(input: &str, subnet: &Subnet, limit: usize) -> Vec<String> {
    let mut lines = vec![
        format_heading(input, "subnet"),
        field("subnet", subnet),
        field("mask", subnet.mask()),
        field("prefix", subnet.prefix_length()),
    ];
    if let Ok(broadcast) = subnet.broadcast_address() {
        lines.push(field("broadcast", broadcast));
    }
    lines.extend(describe_range(&subnet.equivalent_range(), limit));
    lines
}

fn describe_partial(input: &str, partial: &PartialSubnet, limit: usize) -> Vec<String> {
    let mut lines = vec![
        format_heading(input, "partial subnet"),
        field("subnet", partial.subnet()),
        field("ranges", IpRange::list_to_string(partial.ranges())),
        field("size", partial.size()),
    ];
    lines.extend(members(partial.iter(), partial.size(), limit));
    lines
}

fn describe_range<T: RangeValue + Display>(range: &ByteRange<T>, limit: usize) -> Vec<String> {
    let mut lines = vec![field("range", range), field("size", range.size())];
    lines.extend(members(range.iter(), range.size(), limit));
    lines
}

fn members<T: Display>(
    items: impl Iterator<Item = crate::Result<T>>,
    size: &BigUint,
    limit: usize,
) -> Vec<String> {
    let mut lines: Vec<String> = items
        .take(limit)
        .map(|item| match item {
            Ok(value) => format!("{:>LABEL_WIDTH$}  {value}", ""),
            Err(e) => format!("{:>LABEL_WIDTH$}  {}", "", e.to_string().red()),
        })
        .collect();
    let shown = BigUint::from(lines.len());
    if *size > shown {
        lines.push(format!("{:>LABEL_WIDTH$}  ... {} more", "", size - shown));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(arg: &str, limit: usize) -> Vec<String> {
        colored::control::set_override(false);
        describe(arg, &classify(arg), limit)
    }

    #[test]
    fn test_classify() {
        assert!(matches!(classify("10.0.0.1"), Parsed::Ip(_)));
        assert!(matches!(classify("[fe80::1]:80"), Parsed::Ip(_)));
        assert!(matches!(classify("00:1b:2c:3d:4e:5f"), Parsed::Mac(_)));
        assert!(matches!(classify("10.0.0.0/8"), Parsed::Subnet(_)));
        assert!(matches!(classify("10.0.0.0/24,10.0.0.1-9"), Parsed::PartialSubnet(_)));
        assert!(matches!(classify("10.0.0.*"), Parsed::IpRange(_)));
        assert!(matches!(classify("fe80::1-ff"), Parsed::IpRange(_)));
        assert!(matches!(classify("00:1b:2c:*:*:*"), Parsed::MacRange(_)));
        assert!(matches!(classify("eth0"), Parsed::Name(_)));
        assert!(matches!(classify("10.0.0.0/99"), Parsed::Rejected { .. }));
        assert!(matches!(
            classify("10.0.0.0/24,10.0.1.*"),
            Parsed::Rejected { .. }
        ));
    }

    #[test]
    fn test_describe_ip() {
        let lines = plain("10.1.2.3", 4);
        assert_eq!(lines[0], "10.1.2.3 [IP address]");
        assert!(lines.contains(&"       class: A".to_string()));
        assert!(lines.contains(&"       flags: private".to_string()));
        let lines = plain("::1", 4);
        assert!(lines.contains(&"       short: ::1".to_string()));
        assert!(lines.contains(&"       flags: loopback".to_string()));
    }

    #[test]
    fn test_describe_range_is_limited() {
        let lines = plain("10.0.0.1-10", 3);
        assert!(lines.contains(&"      subnet: none".to_string()));
        assert!(lines.contains(&"        size: 10".to_string()));
        assert!(lines.contains(&"              10.0.0.3".to_string()));
        assert!(!lines.iter().any(|l| l.ends_with("10.0.0.4")));
        assert_eq!(lines.last().unwrap(), "              ... 7 more");
    }

    #[test]
    fn test_describe_subnet_and_partial() {
        let lines = plain("192.168.1.0/30", 8);
        assert!(lines.contains(&"   broadcast: 192.168.1.3".to_string()));
        assert!(lines.contains(&"        size: 4".to_string()));
        assert!(!lines.iter().any(|l| l.contains("more")));

        let lines = plain("10.0.0.0/24,10.0.0.5-6,10.0.0.1", 8);
        assert!(lines.contains(&"      ranges: 10.0.0.5-6,10.0.0.1".to_string()));
        assert!(lines.contains(&"        size: 3".to_string()));
    }

    #[test]
    fn test_describe_mac_and_rejects() {
        let lines = plain("01-80-C2-00-00-0E", 2);
        assert!(lines.contains(&"     address: 01:80:c2:00:00:0e".to_string()));
        assert!(lines.contains(&"       flags: multicast, link-local".to_string()));
        let lines = plain("10.0.0.0/4", 2);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("10.0.0.0/4 invalid subnet mask"));
    }
}
