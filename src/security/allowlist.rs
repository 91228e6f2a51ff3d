//! Per-path client allowlists.
//!
//! Rules are classified once, when the routing table is built: anything that
//! parses as a CIDR range becomes [`AllowRule::Range`], everything else is kept
//! as a trimmed [`AllowRule::Literal`] compared textually against the client
//! address string.

use std::net::IpAddr;

use ipnet::IpNet;

/// A single classified allow rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowRule {
    /// Matches a client address string that is textually identical.
    Literal(String),
    /// Matches any client address inside the network.
    Range(IpNet),
}

impl AllowRule {
    /// Classify a raw rule from the configuration.
    pub fn parse(raw: &str) -> Self {
        let rule = raw.trim();
        match rule.parse::<IpNet>() {
            Ok(net) => AllowRule::Range(net),
            Err(_) => AllowRule::Literal(rule.to_string()),
        }
    }

    /// Whether the rule can ever match a parseable client address.
    pub fn is_usable(&self) -> bool {
        match self {
            AllowRule::Literal(literal) => literal.parse::<IpAddr>().is_ok(),
            AllowRule::Range(_) => true,
        }
    }

    fn matches(&self, raw: &str, addr: IpAddr) -> bool {
        match self {
            AllowRule::Literal(literal) => literal == raw,
            AllowRule::Range(net) => net_contains(net, addr),
        }
    }
}

/// IPv4-mapped IPv6 clients (`::ffff:a.b.c.d`) count as IPv4: they match IPv4
/// ranges and never match IPv6 ranges.
fn net_contains(net: &IpNet, addr: IpAddr) -> bool {
    match (net, addr.to_canonical()) {
        (IpNet::V4(net), IpAddr::V4(v4)) => net.contains(&v4),
        (IpNet::V6(net), IpAddr::V6(v6)) => net.contains(&v6),
        _ => false,
    }
}

/// Ordered set of allow rules for one import path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Allowlist {
    rules: Vec<AllowRule>,
}

impl Allowlist {
    pub fn new<I, S>(raw_rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            rules: raw_rules
                .into_iter()
                .map(|r| AllowRule::parse(r.as_ref()))
                .collect(),
        }
    }

    pub fn rules(&self) -> &[AllowRule] {
        &self.rules
    }

    /// An empty allowlist places no restriction on clients.
    pub fn is_unrestricted(&self) -> bool {
        self.rules.is_empty()
    }

    /// Decide whether `client_ip` may access the path.
    ///
    /// Unrestricted lists permit everything. Otherwise the client string must
    /// parse as an IP address and match at least one rule.
    pub fn permits(&self, client_ip: &str) -> bool {
        if self.is_unrestricted() {
            return true;
        }

        let addr: IpAddr = match client_ip.parse() {
            Ok(addr) => addr,
            Err(_) => return false,
        };

        self.rules.iter().any(|rule| rule.matches(client_ip, addr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_allows_everything() {
        let list = Allowlist::new(Vec::<String>::new());
        assert!(list.is_unrestricted());
        assert!(list.permits("10.0.0.1"));
        assert!(list.permits("2001:db8::1"));
        assert!(list.permits("not-an-ip"));
        assert!(list.permits(""));
    }

    #[test]
    fn test_cidr_match() {
        let list = Allowlist::new(["10.0.0.0/8"]);
        assert!(list.permits("10.2.3.4"));
        assert!(!list.permits("192.168.1.1"));
    }

    #[test]
    fn test_literal_match() {
        let list = Allowlist::new(["203.0.113.9"]);
        assert!(list.permits("203.0.113.9"));
        assert!(!list.permits("203.0.113.10"));
    }

    #[test]
    fn test_rules_are_trimmed() {
        let list = Allowlist::new(["  203.0.113.9 ", " 10.0.0.0/8\t"]);
        assert_eq!(
            list.rules(),
            &[
                AllowRule::Literal("203.0.113.9".into()),
                AllowRule::Range("10.0.0.0/8".parse().unwrap()),
            ]
        );
        assert!(list.permits("203.0.113.9"));
        assert!(list.permits("10.9.9.9"));
    }

    #[test]
    fn test_literal_is_textual() {
        let list = Allowlist::new(["2001:db8:0:0::1"]);
        assert!(!list.permits("2001:db8::1"));
        assert!(list.permits("2001:db8:0:0::1"));
    }

    #[test]
    fn test_ipv6_range() {
        let list = Allowlist::new(["fd00::/8"]);
        assert!(list.permits("fd12:3456::1"));
        assert!(!list.permits("2001:db8::1"));
    }

    #[test]
    fn test_mapped_ipv4_matches_v4_range() {
        let list = Allowlist::new(["10.0.0.0/8"]);
        assert!(list.permits("::ffff:10.1.2.3"));
        assert!(!list.permits("::ffff:11.1.2.3"));
    }

    #[test]
    fn test_mapped_ipv4_never_matches_v6_range() {
        assert!(!Allowlist::new(["::ffff:10.0.0.0/104"]).permits("::ffff:10.1.2.3"));
        assert!(!Allowlist::new(["::/0"]).permits("::ffff:10.1.2.3"));
        assert!(Allowlist::new(["::/0"]).permits("2001:db8::1"));
    }

    #[test]
    fn test_unparseable_client_denied() {
        let list = Allowlist::new(["", "garbage", "10.0.0.0/8"]);
        assert!(!list.permits(""));
        assert!(!list.permits("garbage"));
        assert!(!list.permits("10.0.0.1:8080"));
    }

    #[test]
    fn test_bad_rules_are_skipped() {
        let list = Allowlist::new(["garbage", "10.0.0.0/33", "192.168.0.0/16"]);
        assert!(list.permits("192.168.4.4"));
        assert!(!list.permits("10.0.0.1"));
        assert!(!list.rules()[0].is_usable());
        assert!(!list.rules()[1].is_usable());
        assert!(list.rules()[2].is_usable());
    }

    #[test]
    fn test_order_does_not_matter() {
        let a = Allowlist::new(["198.51.100.0/24", "10.0.0.0/8", "203.0.113.9"]);
        let b = Allowlist::new(["203.0.113.9", "10.0.0.0/8", "198.51.100.0/24"]);
        for ip in ["198.51.100.77", "10.1.1.1", "203.0.113.9", "8.8.8.8", "::1"] {
            assert_eq!(a.permits(ip), b.permits(ip), "{ip}");
        }
    }

    #[test]
    fn test_host_bits_in_range_rule() {
        // Parsed as the enclosing network.
        let list = Allowlist::new(["10.2.3.4/8"]);
        assert!(list.permits("10.200.0.1"));
    }
}
