//! libcurl-backed [`HttpClient`].

use super::{FetchError, HttpClient, HttpResponse};
use std::time::Duration;

/// Blocking GET through a fresh curl easy handle per request.
#[derive(Debug, Clone)]
pub struct CurlClient {
    connect_timeout: Duration,
}

impl CurlClient {
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }
}

impl HttpClient for CurlClient {
    fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, FetchError> {
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.useragent(concat!("assetpull/", env!("CARGO_PKG_VERSION")))?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(timeout)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer
                .perform()
                .map_err(|e| FetchError::from_curl(e, timeout))?;
        }

        let status = easy.response_code()?;
        tracing::debug!(url, status, bytes = body.len(), "GET finished");
        Ok(HttpResponse { status, body })
    }
}
