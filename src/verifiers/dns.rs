//! Resolver backed by the operating system.

use super::traits::{DnsRecords, DnsResolver};
use crate::metrics::Metrics;
use std::net::ToSocketAddrs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

/// Default bound on lookups running at once.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 16;

/// [`DnsResolver`] using the system resolver (`getaddrinfo`).
///
/// The lookup runs on a helper thread so a slow resolver cannot hold the
/// caller past the timeout; a timed out lookup yields no records.
///
/// `getaddrinfo` cannot be cancelled, so a timed out helper thread keeps
/// running until the OS resolver gives up. Clones share one bound on
/// running helper threads; a lookup over the bound is not started and
/// yields no records.
#[derive(Debug, Clone)]
pub struct SystemDnsResolver {
    timeout: Duration,
    metrics: Metrics,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: usize,
}

/// Releases a helper thread slot when the lookup finishes.
struct InFlightSlot(Arc<AtomicUsize>);

impl InFlightSlot {
    fn acquire(counter: &Arc<AtomicUsize>, max: usize) -> Option<Self> {
        counter
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n < max).then_some(n + 1)
            })
            .ok()
            .map(|_| Self(Arc::clone(counter)))
    }
}

impl Drop for InFlightSlot {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

impl SystemDnsResolver {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            metrics: Metrics::new(),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
        }
    }

    /// Bound the number of helper threads running at once.
    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight;
        self
    }

    /// Helper threads still running, including timed out ones.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Share a metrics collector with other collaborators.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}

impl DnsResolver for SystemDnsResolver {
    fn lookup(&self, host: &str) -> DnsRecords {
        self.metrics.record_dns_lookup();
        tracing::debug!("Resolving {}", host);

        let Some(slot) = InFlightSlot::acquire(&self.in_flight, self.max_in_flight) else {
            tracing::warn!(
                "DNS lookup for {} skipped: {} lookups already running",
                host,
                self.max_in_flight
            );
            return DnsRecords::default();
        };

        let (tx, rx) = mpsc::channel();
        let target = (host.trim_end_matches('.').to_string(), 0u16);
        thread::spawn(move || {
            let ips: Vec<_> = target
                .to_socket_addrs()
                .map(|addrs| addrs.map(|addr| addr.ip()).collect())
                .unwrap_or_default();
            drop(slot);
            let _ = tx.send(ips);
        });

        match rx.recv_timeout(self.timeout) {
            Ok(ips) => DnsRecords::from_ips(ips),
            Err(_) => {
                tracing::warn!("DNS lookup for {} timed out", host);
                DnsRecords::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_localhost_resolves() {
        let resolver = SystemDnsResolver::new(Duration::from_secs(5));
        let records = resolver.lookup("localhost");
        assert!(!records.is_empty());
        assert!(records.all().all(|ip| ip.is_loopback()));
        assert_eq!(resolver.metrics().dns_lookups_total(), 1);
    }

    #[test]
    fn test_invalid_host_yields_no_records() {
        let resolver = SystemDnsResolver::new(Duration::from_secs(5));
        assert!(resolver.lookup("no such host").is_empty());
    }

    #[test]
    fn test_finished_lookups_release_their_slot() {
        let resolver = SystemDnsResolver::new(Duration::from_secs(5)).with_max_in_flight(1);
        let clone = resolver.clone();

        // Each helper releases its slot before answering
        for _ in 0..3 {
            assert!(!clone.lookup("localhost").is_empty());
            assert_eq!(resolver.in_flight(), 0);
        }
    }

    #[test]
    fn test_lookup_over_bound_is_not_started() {
        let resolver = SystemDnsResolver::new(Duration::from_secs(5));
        let _held: Vec<_> = (0..DEFAULT_MAX_IN_FLIGHT)
            .map(|_| InFlightSlot::acquire(&resolver.in_flight, DEFAULT_MAX_IN_FLIGHT).unwrap())
            .collect();

        assert!(resolver.lookup("localhost").is_empty());
        assert_eq!(resolver.in_flight(), DEFAULT_MAX_IN_FLIGHT);
        assert_eq!(resolver.metrics().dns_lookups_total(), 1);
    }
}
