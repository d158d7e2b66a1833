//! Validated IP address values
//!
//! Addresses are carried as validated text rather than binary form: the value
//! that was resolved is the value that gets written into a DNS record, with no
//! re-formatting in between. Construction trims and validates against the
//! family's textual grammar; the stored text round-trips unchanged.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// IP address family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    V4,
    V6,
}

impl Family {
    /// The DNS record type tracking this family (A for v4, AAAA for v6)
    pub fn record_type(&self) -> &'static str {
        match self {
            Family::V4 => "A",
            Family::V6 => "AAAA",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::V4 => write!(f, "IPv4"),
            Family::V6 => write!(f, "IPv6"),
        }
    }
}

/// A validated, immutable IP address in textual form
///
/// Equality is structural: family plus the trimmed text. Two addresses of
/// different families are never equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpAddress {
    family: Family,
    value: String,
}

impl IpAddress {
    /// Construct an address, trimming and validating the raw text
    ///
    /// Fails with [`Error::InvalidAddress`] if the trimmed text does not match
    /// the family's grammar (dotted-quad with octets 0-255 for v4; colon-hextet
    /// form including `::` compression and embedded-v4 forms for v6).
    pub fn new(family: Family, raw: impl AsRef<str>) -> Result<Self> {
        let value = raw.as_ref().trim();
        let valid = match family {
            Family::V4 => value.parse::<Ipv4Addr>().is_ok(),
            Family::V6 => value.parse::<Ipv6Addr>().is_ok(),
        };
        if !valid {
            return Err(Error::invalid_address(family, value));
        }
        Ok(Self {
            family,
            value: value.to_string(),
        })
    }

    /// Construct a validated IPv4 address
    pub fn v4(raw: impl AsRef<str>) -> Result<Self> {
        Self::new(Family::V4, raw)
    }

    /// Construct a validated IPv6 address
    pub fn v6(raw: impl AsRef<str>) -> Result<Self> {
        Self::new(Family::V6, raw)
    }

    /// The address family
    pub fn family(&self) -> Family {
        self.family
    }

    /// The validated textual value
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for IpAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// The outcome of one resolver invocation (or of merging several)
///
/// Either family may be absent; a partial pair is a normal result, not an
/// error. Pairs are cycle-scoped: produced fresh, consumed, discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedPair {
    pub ipv4: Option<IpAddress>,
    pub ipv6: Option<IpAddress>,
}

impl ResolvedPair {
    /// An empty pair with both families absent
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fill in families that are still absent from `other`
    ///
    /// Never overwrites an already-resolved family, even if `other` disagrees.
    pub fn merge_missing(&mut self, other: ResolvedPair) {
        if self.ipv4.is_none() {
            self.ipv4 = other.ipv4;
        }
        if self.ipv6.is_none() {
            self.ipv6 = other.ipv6;
        }
    }

    /// True once both families are resolved
    pub fn is_complete(&self) -> bool {
        self.ipv4.is_some() && self.ipv6.is_some()
    }

    /// True if neither family is resolved
    pub fn is_empty(&self) -> bool {
        self.ipv4.is_none() && self.ipv6.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_ipv4_round_trips_trimmed_input() {
        let addr = IpAddress::v4("  203.0.113.7\n").unwrap();
        assert_eq!(addr.family(), Family::V4);
        assert_eq!(addr.to_string(), "203.0.113.7");
    }

    #[test]
    fn ipv4_rejects_out_of_range_octet() {
        assert!(matches!(
            IpAddress::v4("1.2.3.256"),
            Err(Error::InvalidAddress { family: Family::V4, .. })
        ));
    }

    #[test]
    fn ipv4_rejects_wrong_segment_count() {
        assert!(IpAddress::v4("1.2.3").is_err());
        assert!(IpAddress::v4("1.2.3.4.5").is_err());
        assert!(IpAddress::v4("").is_err());
    }

    #[test]
    fn ipv4_rejects_ipv6_text() {
        assert!(IpAddress::v4("::1").is_err());
    }

    #[test]
    fn valid_ipv6_forms_accepted() {
        for raw in [
            "::1",
            "2001:db8::8a2e:370:7334",
            "2001:0db8:0000:0000:0000:ff00:0042:8329",
            "::ffff:192.0.2.128",
        ] {
            let addr = IpAddress::v6(raw).unwrap();
            assert_eq!(addr.to_string(), raw);
        }
    }

    #[test]
    fn ipv6_rejects_ipv4_text() {
        assert!(IpAddress::v6("1.2.3.4").is_err());
    }

    #[test]
    fn equality_requires_same_family_and_text() {
        let a = IpAddress::v4("1.2.3.4").unwrap();
        let b = IpAddress::v4(" 1.2.3.4 ").unwrap();
        let c = IpAddress::v4("1.2.3.5").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn merge_missing_never_overwrites() {
        let first = IpAddress::v4("1.2.3.4").unwrap();
        let second = IpAddress::v4("5.6.7.8").unwrap();
        let six = IpAddress::v6("::1").unwrap();

        let mut pair = ResolvedPair {
            ipv4: Some(first.clone()),
            ipv6: None,
        };
        pair.merge_missing(ResolvedPair {
            ipv4: Some(second),
            ipv6: Some(six.clone()),
        });

        assert_eq!(pair.ipv4, Some(first));
        assert_eq!(pair.ipv6, Some(six));
        assert!(pair.is_complete());
    }
}
