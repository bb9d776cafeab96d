use crate::domain::{Address, CompanyDomain, DomainResult, GeocodingOutcome, Link};
use crate::error::{GeocodingResult, ProbeError};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use url::Url;

/// Geocoding service.
///
/// Implementations translate provider accuracy classifications into
/// [`crate::domain::LocationType`] and fail with
/// [`crate::error::GeocodingError`] on outages, never with a "no match".
pub trait Geocoder: Send + Sync {
    /// Geocode the address and report how precisely it matched.
    fn geocode(&self, address: &Address) -> GeocodingResult<GeocodingOutcome>;
}

/// Confirms that an address exists.
///
/// Failures are reported as `DomainError::Verification(VerificationError::Address)`.
pub trait AddressVerifier: Send + Sync {
    fn verify(&self, address: &Address) -> DomainResult<()>;
}

/// Validates an address.
///
/// Every [`AddressVerifier`] is also a validator.
pub trait AddressValidator: Send + Sync {
    fn validate(&self, address: &Address) -> DomainResult<()>;
}

impl<T: AddressVerifier + ?Sized> AddressValidator for T {
    fn validate(&self, address: &Address) -> DomainResult<()> {
        self.verify(address)
    }
}

/// Confirms that a domain name has address records.
pub trait DomainNameVerifier: Send + Sync {
    fn verify(&self, domain: &CompanyDomain) -> DomainResult<()>;
}

/// Confirms that a link is reachable and safe to fetch.
pub trait LinkVerifier: Send + Sync {
    fn verify(&self, link: &Link) -> DomainResult<()>;
}

/// A and AAAA records found for a host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DnsRecords {
    pub a: Vec<Ipv4Addr>,
    pub aaaa: Vec<Ipv6Addr>,
}

impl DnsRecords {
    /// Split resolved addresses by family.
    pub fn from_ips(ips: impl IntoIterator<Item = IpAddr>) -> Self {
        let mut records = Self::default();
        for ip in ips {
            match ip {
                IpAddr::V4(v4) if !records.a.contains(&v4) => records.a.push(v4),
                IpAddr::V6(v6) if !records.aaaa.contains(&v6) => records.aaaa.push(v6),
                _ => {}
            }
        }
        records
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty() && self.aaaa.is_empty()
    }

    /// Every record, A first.
    pub fn all(&self) -> impl Iterator<Item = IpAddr> + '_ {
        self.a
            .iter()
            .map(|ip| IpAddr::V4(*ip))
            .chain(self.aaaa.iter().map(|ip| IpAddr::V6(*ip)))
    }

    /// First IPv4 record, falling back to the first IPv6 record.
    pub fn preferred(&self) -> Option<IpAddr> {
        self.all().next()
    }
}

/// DNS lookup of A and AAAA records.
pub trait DnsResolver: Send + Sync {
    /// Resolve `host`; lookup failures yield empty records.
    fn lookup(&self, host: &str) -> DnsRecords;
}

/// Status and headers of a HEAD response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
}

impl ProbeResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// 2xx or 3xx.
    pub fn is_success(&self) -> bool {
        (200..400).contains(&self.status)
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// HTTP client issuing HEAD requests pinned to a resolved address.
pub trait HttpProbe: Send + Sync {
    /// Send `HEAD url`, connecting to `pinned` instead of resolving the host.
    fn head(
        &self,
        url: &Url,
        pinned: SocketAddr,
        timeout: Duration,
    ) -> Result<ProbeResponse, ProbeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dns_records_prefers_ipv4() {
        let records = DnsRecords::from_ips([
            "2606:4700::1".parse::<IpAddr>().unwrap(),
            "93.184.216.34".parse().unwrap(),
            "93.184.216.34".parse().unwrap(),
        ]);
        assert_eq!(records.a.len(), 1);
        assert_eq!(records.aaaa.len(), 1);
        assert_eq!(
            records.preferred(),
            Some("93.184.216.34".parse::<IpAddr>().unwrap())
        );
        assert!(DnsRecords::default().preferred().is_none());
    }

    #[test]
    fn test_probe_response_header_lookup() {
        let response = ProbeResponse::new(302).with_header("Content-Type", "application/pdf");
        assert!(response.is_success());
        assert_eq!(response.header("content-type"), Some("application/pdf"));
        assert!(response.header("location").is_none());
        assert!(!ProbeResponse::new(404).is_success());
    }
}
