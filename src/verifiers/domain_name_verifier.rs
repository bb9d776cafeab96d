use super::traits::{DnsResolver, DomainNameVerifier};
use crate::domain::{CompanyDomain, DomainResult, VerificationError};
use crate::metrics::Metrics;
use std::sync::Arc;

/// Checks that a domain has at least one A or AAAA record.
#[derive(Clone)]
pub struct DnsDomainNameVerifier {
    resolver: Arc<dyn DnsResolver>,
    metrics: Metrics,
}

impl DnsDomainNameVerifier {
    pub fn new(resolver: Arc<dyn DnsResolver>) -> Self {
        Self {
            resolver,
            metrics: Metrics::new(),
        }
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }
}

impl DomainNameVerifier for DnsDomainNameVerifier {
    fn verify(&self, domain: &CompanyDomain) -> DomainResult<()> {
        let records = self.resolver.lookup(domain.as_str());

        self.metrics.record_verification(!records.is_empty());

        if records.is_empty() {
            tracing::warn!("No address records for {}", domain);
            return Err(VerificationError::DomainName(format!(
                "The domain name given [{}] does not exist.",
                domain
            ))
            .into());
        }

        tracing::debug!(
            "{} has {} A and {} AAAA records",
            domain,
            records.a.len(),
            records.aaaa.len()
        );
        Ok(())
    }
}
