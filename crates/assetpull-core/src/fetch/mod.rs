//! Single-asset fetch: one GET, body written whole to the destination.
//!
//! The HTTP layer sits behind [`HttpClient`] so the batch can run against
//! libcurl in production and a canned client in tests.

mod curl_client;
mod error;

pub use curl_client::CurlClient;
pub use error::FetchError;

use crate::storage;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Status and full body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

/// Performs one blocking GET bounded by `timeout`.
pub trait HttpClient {
    fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, FetchError>;
}

impl<C: HttpClient + ?Sized> HttpClient for &C {
    fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, FetchError> {
        (**self).get(url, timeout)
    }
}

/// Fetches URLs to files through an [`HttpClient`].
#[derive(Debug, Clone)]
pub struct Fetcher<C> {
    client: C,
    timeout: Duration,
}

impl<C: HttpClient> Fetcher<C> {
    pub fn new(client: C, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Download `url` to `destination`, creating parent directories.
    ///
    /// Only status 200 counts as success; the body is then written atomically,
    /// overwriting any existing file. Returns the number of bytes written.
    pub fn fetch(&self, url: &str, destination: &Path) -> Result<u64, FetchError> {
        check_url(url)?;

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(|e| FetchError::filesystem(parent, e))?;
        }

        let response = self.client.get(url, self.timeout)?;
        if response.status != 200 {
            return Err(FetchError::Http(response.status));
        }

        storage::write_atomically(destination, &response.body)
            .map_err(|(path, e)| FetchError::filesystem(path, e))?;
        Ok(response.body.len() as u64)
    }
}

/// Accept only absolute http/https URLs.
fn check_url(url: &str) -> Result<(), FetchError> {
    let parsed = url::Url::parse(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(FetchError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme {other:?}"),
        }),
    }
}
