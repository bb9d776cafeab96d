//! Job board verification CLI.
//!
//! Operator entry point for the jobs the core leaves to its host
//! application: refreshing the technology allow-list and checking domains
//! and links by hand.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use job_board_core::domain::{CompanyDomain, Link};
use job_board_core::{
    Config, DefaultLinkVerifier, DnsDomainNameVerifier, FileStore, Metrics, SystemDnsResolver,
    TechnologyCatalog, TechnologyCatalogRefresher, UreqHttpProbe,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "job-board-verify",
    about = "Maintain and exercise the job board verification services",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch popular technology tags and rewrite the allow-list
    RefreshTechnologies,
    /// Check that a company domain has DNS address records
    VerifyDomain {
        /// Domain name, e.g. example.com
        domain: String,
    },
    /// Check that a link is reachable, safe and serves an accepted document
    VerifyLink {
        /// Absolute http(s) URL
        url: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    // Initialize logging (stderr only)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let metrics = Metrics::new();
    let result = run(cli.command, &config, &metrics);

    let summary = metrics.summary();
    info!(
        "HTTP requests: {} ({} errors, avg {:.1} ms), DNS lookups: {}, verifications: {} ({} failed)",
        summary.http_requests_total,
        summary.http_errors_total,
        summary.http_duration_avg_ms,
        summary.dns_lookups_total,
        summary.verifications_total,
        summary.verification_failures_total
    );

    if let Err(e) = &result {
        error!("{:#}", e);
    }
    result
}

fn run(command: Command, config: &Config, metrics: &Metrics) -> Result<()> {
    let resolver = Arc::new(
        SystemDnsResolver::new(config.verification_timeout()).with_metrics(metrics.clone()),
    );

    match command {
        Command::RefreshTechnologies => {
            let store = Arc::new(FileStore::new(config.storage_path.clone()));
            let catalog = TechnologyCatalog::new(store, config.technology_cache_ttl());
            let refresher =
                TechnologyCatalogRefresher::new(catalog, config.verification_timeout())
                    .with_metrics(metrics.clone());

            let count = refresher
                .refresh()
                .context("Failed to refresh the technology allow-list")?;
            info!(
                "Stored {} technologies in {}",
                count,
                config.storage_path.display()
            );
        }
        Command::VerifyDomain { domain } => {
            let verifier = DnsDomainNameVerifier::new(resolver).with_metrics(metrics.clone());
            let verified = CompanyDomain::new(domain)?.verify(&verifier)?;
            info!("{} exists", verified);
        }
        Command::VerifyLink { url } => {
            let local_host = config
                .local_host()
                .context("APP_URL does not have a host")?;
            let probe = Arc::new(UreqHttpProbe::new().with_metrics(metrics.clone()));
            let verifier = DefaultLinkVerifier::new(local_host, resolver, probe)
                .with_timeout(config.verification_timeout())
                .with_metrics(metrics.clone());

            let verified = Link::new(&url)?.verify(&verifier)?;
            info!("{} is reachable", verified);
        }
    }

    Ok(())
}
