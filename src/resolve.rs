use crate::icmp::IpFamily;
use crate::{PingError, PingResult};
use std::net::IpAddr;

/// A host name together with the address it resolved to.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Target {
    pub host: String,
    pub addr: IpAddr,
    pub family: IpFamily,
}

impl Target {
    pub fn new(host: impl Into<String>, addr: IpAddr) -> Self {
        Target { host: host.into(), addr, family: IpFamily::of(&addr) }
    }
}

/// Looks up `host`, which may also be a numeric IPv4 or IPv6 address.
///
/// IPv4 results are preferred. IPv6 is used only when there is no IPv4 result.
pub fn resolve(host: &str) -> PingResult<Target> {
    let ips: Vec<IpAddr> =
        dns_lookup::lookup_host(host).map_err(|e| PingError::resolution(host, format!("lookup failed: {e}")))?;
    tracing::debug!("{host} resolved to {ips:?}");
    select_address(&ips)
        .map(|addr| Target::new(host, addr))
        .ok_or_else(|| PingError::resolution(host, "no usable IP address"))
}

pub(crate) fn select_address(ips: &[IpAddr]) -> Option<IpAddr> {
    ips.iter()
        .find_map(|ip| match ip {
            IpAddr::V4(v4) => Some(IpAddr::V4(*v4)),
            IpAddr::V6(v6) => v6.to_ipv4_mapped().map(IpAddr::V4),
        })
        .or_else(|| ips.iter().copied().find(IpAddr::is_ipv6))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::net::{Ipv4Addr, Ipv6Addr};

    const V4: IpAddr = IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1));
    const V6: IpAddr = IpAddr::V6(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1));

    #[test]
    fn prefers_ipv4() {
        assert_eq!(Some(V4), select_address(&[V6, V4]));
        assert_eq!(Some(V4), select_address(&[V4, V6]));
    }

    #[test]
    fn falls_back_to_ipv6() {
        assert_eq!(Some(V6), select_address(&[V6]));
    }

    #[test]
    fn ipv4_mapped_address_counts_as_ipv4() {
        let mapped = IpAddr::V6(Ipv4Addr::new(192, 0, 2, 7).to_ipv6_mapped());
        assert_eq!(Some(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 7))), select_address(&[V6, mapped]));
    }

    #[test]
    fn nothing_to_select() {
        assert_eq!(None, select_address(&[]));
    }

    #[test]
    fn resolve_numeric_ipv4() {
        let target = resolve("127.0.0.1").unwrap();
        assert_eq!(IpAddr::V4(Ipv4Addr::LOCALHOST), target.addr);
        assert_eq!(IpFamily::V4, target.family);
        assert_eq!("127.0.0.1", target.host);
    }

    #[test]
    fn resolve_numeric_ipv6() {
        let target = resolve("::1").unwrap();
        assert_eq!(IpAddr::V6(Ipv6Addr::LOCALHOST), target.addr);
        assert_eq!(IpFamily::V6, target.family);
    }

    #[test]
    fn resolve_invalid_name_fails() {
        let result = resolve("no-such-host.invalid");
        assert!(matches!(result, Err(PingError::Resolution { .. })));
    }
}
