use job_board_core::error::ProbeError;
use job_board_core::verifiers::traits::{HttpProbe, ProbeResponse};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

/// Mock HTTP probe for testing.
///
/// Answers every HEAD request with the configured response and records the
/// URL and pinned address of each request.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockHttpProbe {
    response: Arc<Mutex<Result<ProbeResponse, ProbeError>>>,
    requests: Arc<Mutex<Vec<(String, SocketAddr, Duration)>>>,
}

#[allow(dead_code)]
impl MockHttpProbe {
    /// Probe that answers 200 with a PDF content type.
    pub fn new() -> Self {
        Self::responding(ProbeResponse::new(200).with_header("Content-Type", "application/pdf"))
    }

    pub fn responding(response: ProbeResponse) -> Self {
        Self {
            response: Arc::new(Mutex::new(Ok(response))),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(error: ProbeError) -> Self {
        let mock = Self::new();
        *mock.response.lock().unwrap() = Err(error);
        mock
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Address the last request was pinned to.
    pub fn last_pinned(&self) -> Option<SocketAddr> {
        self.requests.lock().unwrap().last().map(|(_, addr, _)| *addr)
    }

    pub fn last_timeout(&self) -> Option<Duration> {
        self.requests
            .lock()
            .unwrap()
            .last()
            .map(|(_, _, timeout)| *timeout)
    }
}

impl Default for MockHttpProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpProbe for MockHttpProbe {
    fn head(
        &self,
        url: &Url,
        pinned: SocketAddr,
        timeout: Duration,
    ) -> Result<ProbeResponse, ProbeError> {
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), pinned, timeout));
        self.response.lock().unwrap().clone()
    }
}
