//! IP addresses and CIDR blocks.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

pub(super) fn is_ip(s: String) -> bool {
    s.parse::<IpAddr>().is_ok()
}

pub(super) fn is_ipv4(s: String) -> bool {
    s.parse::<Ipv4Addr>().is_ok()
}

pub(super) fn is_ipv6(s: String) -> bool {
    s.parse::<Ipv6Addr>().is_ok()
}

/// Splits `addr/prefix` and checks the prefix against the address family.
fn parse_cidr(s: &str) -> Option<IpAddr> {
    let (addr, prefix) = s.split_once('/')?;
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let addr: IpAddr = addr.parse().ok()?;
    let prefix: u8 = prefix.parse().ok()?;
    let max = if addr.is_ipv4() { 32 } else { 128 };
    (prefix <= max).then_some(addr)
}

pub(super) fn is_cidr(s: String) -> bool {
    parse_cidr(&s).is_some()
}

pub(super) fn is_cidr_v4(s: String) -> bool {
    parse_cidr(&s).is_some_and(|addr| addr.is_ipv4())
}

pub(super) fn is_cidr_v6(s: String) -> bool {
    parse_cidr(&s).is_some_and(|addr| addr.is_ipv6())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addresses() {
        assert!(is_ip("10.0.0.1".into()));
        assert!(is_ip("::1".into()));
        assert!(is_ipv4("192.168.1.1".into()));
        assert!(!is_ipv4("::1".into()));
        assert!(is_ipv6("fe80::1".into()));
        assert!(!is_ip("256.0.0.1".into()));
    }

    #[test]
    fn cidr_blocks() {
        assert!(is_cidr("10.0.0.0/8".into()));
        assert!(is_cidr_v4("10.0.0.0/32".into()));
        assert!(!is_cidr_v4("10.0.0.0/33".into()));
        assert!(is_cidr_v6("2001:db8::/32".into()));
        assert!(!is_cidr_v6("10.0.0.0/8".into()));
        assert!(!is_cidr("10.0.0.0".into()));
        assert!(!is_cidr("10.0.0.0/+8".into()));
    }
}
