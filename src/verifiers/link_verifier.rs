//! Reachability checks for links with SSRF protection.

use super::traits::{DnsResolver, HttpProbe, LinkVerifier};
use crate::domain::{DomainError, DomainResult, Link, VerificationError};
use crate::metrics::Metrics;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use url::Host;

/// Document types a link may point at.
pub const ACCEPTED_CONTENT_TYPES: [&str; 3] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Verifies that a link resolves to a public address and serves an
/// accepted document.
///
/// The HEAD request is pinned to the address that passed the SSRF check so
/// a second DNS answer cannot redirect it.
#[derive(Clone)]
pub struct DefaultLinkVerifier {
    local_host: String,
    resolver: Arc<dyn DnsResolver>,
    probe: Arc<dyn HttpProbe>,
    timeout: Duration,
    metrics: Metrics,
}

impl DefaultLinkVerifier {
    /// `local_host` is the application's own ASCII host; links to it are
    /// trusted without a request.
    pub fn new(
        local_host: impl Into<String>,
        resolver: Arc<dyn DnsResolver>,
        probe: Arc<dyn HttpProbe>,
    ) -> Self {
        Self {
            local_host: local_host.into(),
            resolver,
            probe,
            timeout: Duration::from_secs(1),
            metrics: Metrics::new(),
        }
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve the host to one address, rejecting unsafe targets.
    fn resolve_ip(&self, host: &Host<&str>) -> DomainResult<IpAddr> {
        let domain = match host {
            Host::Ipv4(ip) => return check_literal(IpAddr::V4(*ip)),
            Host::Ipv6(ip) => return check_literal(IpAddr::V6(*ip)),
            Host::Domain(domain) => *domain,
        };

        let records = self.resolver.lookup(domain);
        if records.is_empty() {
            return Err(failure(format!("Unable to resolve host [{}].", domain)));
        }

        if let Some(ip) = records.all().find(is_unsafe_ip) {
            tracing::warn!("Rejected {}: resolves to disallowed address {}", domain, ip);
            return Err(failure("Target IP is not allowed.".to_string()));
        }

        records
            .preferred()
            .ok_or_else(|| failure(format!("No valid IP found for host [{}].", domain)))
    }
}

fn check_literal(ip: IpAddr) -> DomainResult<IpAddr> {
    if is_unsafe_ip(&ip) {
        tracing::warn!("Rejected literal address {}", ip);
        return Err(failure("Target IP is not allowed.".to_string()));
    }
    Ok(ip)
}

fn failure(message: String) -> DomainError {
    VerificationError::Link(message).into()
}

/// Private, loopback, link-local, multicast, unspecified and reserved ranges.
pub fn is_unsafe_ip(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(addr) => {
            let octets = addr.octets();
            addr.is_loopback()
                || addr.is_private()
                || addr.is_link_local()
                || addr.is_multicast()
                || addr.is_unspecified()
                || addr.is_broadcast()
                || addr.is_documentation()
                // 0.0.0.0/8
                || octets[0] == 0
                // Shared address space 100.64.0.0/10
                || (octets[0] == 100 && (octets[1] & 0xc0) == 64)
                // IETF protocol assignments 192.0.0.0/24
                || (octets[0] == 192 && octets[1] == 0 && octets[2] == 0)
                // Benchmarking 198.18.0.0/15
                || (octets[0] == 198 && (octets[1] & 0xfe) == 18)
                // Reserved 240.0.0.0/4
                || octets[0] >= 240
        }
        IpAddr::V6(addr) => {
            if let Some(mapped) = addr.to_ipv4_mapped() {
                return is_unsafe_ip(&IpAddr::V4(mapped));
            }
            let first = addr.segments()[0];
            addr.is_loopback()
                || addr.is_multicast()
                || addr.is_unspecified()
                // Unique local fc00::/7
                || (first & 0xfe00) == 0xfc00
                // Link-local fe80::/10
                || (first & 0xffc0) == 0xfe80
                // Documentation 2001:db8::/32
                || (first == 0x2001 && addr.segments()[1] == 0x0db8)
        }
    }
}

impl LinkVerifier for DefaultLinkVerifier {
    fn verify(&self, link: &Link) -> DomainResult<()> {
        let result = self.check(link);
        self.metrics.record_verification(result.is_ok());
        result
    }
}

impl DefaultLinkVerifier {
    fn check(&self, link: &Link) -> DomainResult<()> {
        let url = link.url();
        let host = url
            .host()
            .ok_or_else(|| DomainError::Logic(format!("Link [{}] has no host.", link)))?;

        if host.to_string() == self.local_host {
            tracing::debug!("Skipping verification of local link {}", link);
            return Ok(());
        }

        let ip = self.resolve_ip(&host)?;
        let port = url.port_or_known_default().unwrap_or(80);
        let pinned = SocketAddr::new(ip, port);

        tracing::debug!("HEAD {} via {}", link, pinned);
        let response = self.probe.head(url, pinned, self.timeout).map_err(|e| {
            tracing::warn!("HEAD {} failed: {}", link, e);
            failure(format!("The resource at [{}] is not accessible.", link))
        })?;

        if !response.is_success() {
            return Err(failure(format!(
                "The resource at [{}] does not exist.",
                link
            )));
        }

        let content_type = response
            .header("Content-Type")
            .and_then(|value| value.split(';').next())
            .map(str::trim)
            .unwrap_or_default();
        if !ACCEPTED_CONTENT_TYPES.contains(&content_type) {
            return Err(failure(format!(
                "The resource at [{}] does not have an accepted type.",
                link
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn test_unsafe_ipv4_ranges() {
        for addr in [
            "127.0.0.1",
            "10.1.2.3",
            "172.16.0.1",
            "172.31.255.255",
            "192.168.1.1",
            "169.254.169.254",
            "0.0.0.0",
            "100.64.0.1",
            "224.0.0.1",
            "255.255.255.255",
            "198.18.0.1",
        ] {
            assert!(is_unsafe_ip(&ip(addr)), "{} should be unsafe", addr);
        }
        for addr in ["93.184.216.34", "8.8.8.8", "172.32.0.1", "100.128.0.1"] {
            assert!(!is_unsafe_ip(&ip(addr)), "{} should be allowed", addr);
        }
    }

    #[test]
    fn test_unsafe_ipv6_ranges() {
        for addr in ["::1", "::", "fc00::1", "fd12:3456::1", "fe80::1", "ff02::1", "::ffff:10.0.0.1"] {
            assert!(is_unsafe_ip(&ip(addr)), "{} should be unsafe", addr);
        }
        assert!(!is_unsafe_ip(&ip("2606:4700:4700::1111")));
    }
}
