use job_board_core::verifiers::traits::{DnsRecords, DnsResolver};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Arc, Mutex};

/// Mock DNS resolver for testing.
///
/// Hosts resolve to whatever addresses were registered for them; anything
/// else has no records.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockDnsResolver {
    hosts: Arc<Mutex<HashMap<String, Vec<IpAddr>>>>,
    lookups: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl MockDnsResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the addresses `host` resolves to.
    pub fn add_host(&self, host: &str, ips: &[&str]) {
        let ips = ips
            .iter()
            .map(|ip| ip.parse().expect("valid IP in test fixture"))
            .collect();
        self.hosts.lock().unwrap().insert(host.to_string(), ips);
    }

    /// Builder form of [`MockDnsResolver::add_host`].
    pub fn with_host(self, host: &str, ips: &[&str]) -> Self {
        self.add_host(host, ips);
        self
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.lock().unwrap().len()
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

impl DnsResolver for MockDnsResolver {
    fn lookup(&self, host: &str) -> DnsRecords {
        self.lookups.lock().unwrap().push(host.to_string());

        let hosts = self.hosts.lock().unwrap();
        hosts
            .get(host)
            .map(|ips| DnsRecords::from_ips(ips.iter().copied()))
            .unwrap_or_default()
    }
}
