//! HEAD requests pinned to a vetted address.

use crate::error::ProbeError;
use crate::metrics::{HttpTimer, Metrics};
use crate::verifiers::{HttpProbe, ProbeResponse};
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use url::Url;

/// [`HttpProbe`] over `ureq`.
///
/// Each request gets its own agent whose resolver always answers with the
/// pinned address, so the connection goes exactly where the SSRF check
/// allowed. Redirects are not followed.
#[derive(Debug, Clone, Default)]
pub struct UreqHttpProbe {
    metrics: Metrics,
}

impl UreqHttpProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}

fn to_probe_response(response: &ureq::Response) -> ProbeResponse {
    response
        .headers_names()
        .into_iter()
        .fold(ProbeResponse::new(response.status()), |acc, name| {
            match response.header(&name) {
                Some(value) => {
                    let value = value.to_string();
                    acc.with_header(name, value)
                }
                None => acc,
            }
        })
}

impl HttpProbe for UreqHttpProbe {
    fn head(
        &self,
        url: &Url,
        pinned: SocketAddr,
        timeout: Duration,
    ) -> Result<ProbeResponse, ProbeError> {
        let timer = HttpTimer::new(self.metrics.clone());
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .redirects(0)
            .resolver(move |_: &str| -> io::Result<Vec<SocketAddr>> { Ok(vec![pinned]) })
            .build();

        let result = match agent.head(url.as_str()).call() {
            Ok(response) => Ok(to_probe_response(&response)),
            Err(ureq::Error::Status(_, response)) => Ok(to_probe_response(&response)),
            Err(ureq::Error::Transport(transport)) => Err(match transport.kind() {
                ureq::ErrorKind::Io => ProbeError::Timeout,
                ureq::ErrorKind::InvalidUrl | ureq::ErrorKind::UnknownScheme => {
                    ProbeError::InvalidRequest(transport.to_string())
                }
                _ => ProbeError::Connection(transport.to_string()),
            }),
        };

        timer.finish(&result);

        tracing::debug!("HEAD {} via {} -> {:?}", url, pinned, result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_is_pinned_to_given_address() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("HEAD", "/resume.pdf")
            .with_status(200)
            .with_header("content-type", "application/pdf")
            .create();

        let pinned: SocketAddr = server.host_with_port().parse().unwrap();
        // Host name does not resolve; only the pinned address is used
        let url = Url::parse(&format!(
            "http://cv.invalid:{}/resume.pdf",
            pinned.port()
        ))
        .unwrap();

        let probe = UreqHttpProbe::new();
        let response = probe.head(&url, pinned, Duration::from_secs(5)).unwrap();

        mock.assert();
        assert_eq!(response.status, 200);
        assert_eq!(response.header("Content-Type"), Some("application/pdf"));
        assert_eq!(probe.metrics().http_requests_total(), 1);
    }

    #[test]
    fn test_error_status_is_a_response() {
        let mut server = mockito::Server::new();
        let _mock = server.mock("HEAD", "/missing.pdf").with_status(404).create();

        let pinned: SocketAddr = server.host_with_port().parse().unwrap();
        let url = Url::parse(&format!("{}/missing.pdf", server.url())).unwrap();

        let response = UreqHttpProbe::new()
            .head(&url, pinned, Duration::from_secs(5))
            .unwrap();
        assert_eq!(response.status, 404);
        assert!(!response.is_success());
    }

    #[test]
    fn test_refused_connection_counts_as_http_error() {
        let pinned = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let url = Url::parse(&format!("http://cv.invalid:{}/resume.pdf", pinned.port())).unwrap();

        let probe = UreqHttpProbe::new();
        assert!(probe.head(&url, pinned, Duration::from_secs(5)).is_err());

        assert_eq!(probe.metrics().http_requests_total(), 1);
        assert_eq!(probe.metrics().http_errors_total(), 1);
    }

    #[test]
    fn test_redirects_are_not_followed() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("HEAD", "/old.pdf")
            .with_status(301)
            .with_header("location", "/new.pdf")
            .create();

        let pinned: SocketAddr = server.host_with_port().parse().unwrap();
        let url = Url::parse(&format!("{}/old.pdf", server.url())).unwrap();

        let response = UreqHttpProbe::new()
            .head(&url, pinned, Duration::from_secs(5))
            .unwrap();
        assert_eq!(response.status, 301);
    }
}
