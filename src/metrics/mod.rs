//! Basic metrics instrumentation for network collaborators.
//!
//! Provides counters and duration tracking for HTTP requests, DNS lookups
//! and verification outcomes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Metrics collector shared by geocoder, probe, resolver and verifiers.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// Total number of HTTP requests made
    http_requests_total: Arc<AtomicU64>,

    /// Total number of HTTP errors
    http_errors_total: Arc<AtomicU64>,

    /// Total duration of all HTTP requests in milliseconds
    http_duration_total_ms: Arc<AtomicU64>,

    /// Number of DNS lookups issued
    dns_lookups_total: Arc<AtomicU64>,

    /// Number of verifications attempted
    verifications_total: Arc<AtomicU64>,

    /// Number of verifications that did not pass
    verification_failures_total: Arc<AtomicU64>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            http_requests_total: Arc::new(AtomicU64::new(0)),
            http_errors_total: Arc::new(AtomicU64::new(0)),
            http_duration_total_ms: Arc::new(AtomicU64::new(0)),
            dns_lookups_total: Arc::new(AtomicU64::new(0)),
            verifications_total: Arc::new(AtomicU64::new(0)),
            verification_failures_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record an HTTP request with duration.
    pub fn record_http_request(&self, duration: Duration) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);
        self.http_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record an HTTP error.
    pub fn record_http_error(&self) {
        self.http_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a DNS lookup.
    pub fn record_dns_lookup(&self) {
        self.dns_lookups_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the outcome of a verification.
    pub fn record_verification(&self, passed: bool) {
        self.verifications_total.fetch_add(1, Ordering::Relaxed);
        if !passed {
            self.verification_failures_total
                .fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn http_requests_total(&self) -> u64 {
        self.http_requests_total.load(Ordering::Relaxed)
    }

    pub fn http_errors_total(&self) -> u64 {
        self.http_errors_total.load(Ordering::Relaxed)
    }

    pub fn http_duration_total_ms(&self) -> u64 {
        self.http_duration_total_ms.load(Ordering::Relaxed)
    }

    /// Get average HTTP request duration in milliseconds.
    pub fn http_duration_avg_ms(&self) -> f64 {
        let total = self.http_duration_total_ms.load(Ordering::Relaxed);
        let count = self.http_requests_total.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    pub fn dns_lookups_total(&self) -> u64 {
        self.dns_lookups_total.load(Ordering::Relaxed)
    }

    pub fn verifications_total(&self) -> u64 {
        self.verifications_total.load(Ordering::Relaxed)
    }

    pub fn verification_failures_total(&self) -> u64 {
        self.verification_failures_total.load(Ordering::Relaxed)
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            http_requests_total: self.http_requests_total(),
            http_errors_total: self.http_errors_total(),
            http_duration_total_ms: self.http_duration_total_ms(),
            http_duration_avg_ms: self.http_duration_avg_ms(),
            dns_lookups_total: self.dns_lookups_total(),
            verifications_total: self.verifications_total(),
            verification_failures_total: self.verification_failures_total(),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone)]
pub struct MetricsSummary {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub http_duration_total_ms: u64,
    pub http_duration_avg_ms: f64,
    pub dns_lookups_total: u64,
    pub verifications_total: u64,
    pub verification_failures_total: u64,
}

/// Helper for timing HTTP requests.
pub struct HttpTimer {
    start: Instant,
    metrics: Metrics,
}

impl HttpTimer {
    /// Start timing an HTTP request.
    pub fn new(metrics: Metrics) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    /// Complete the timing and record the duration.
    pub fn complete(self) {
        self.metrics.record_http_request(self.start.elapsed());
    }

    /// Complete the timing and record as an error.
    pub fn complete_with_error(self) {
        self.metrics.record_http_request(self.start.elapsed());
        self.metrics.record_http_error();
    }

    /// Complete the timing, counting an error when the request failed.
    pub fn finish<T, E>(self, result: &Result<T, E>) {
        if result.is_ok() {
            self.complete();
        } else {
            self.complete_with_error();
        }
    }
}
