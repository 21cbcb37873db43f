//! Per-asset failure type. Never fatal to the run.

use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Why a single asset could not be fetched or written.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Not an absolute http(s) URL, or not a string in the manifest.
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    /// Manifest filename would not stay inside its destination directory.
    #[error("invalid filename {0:?}")]
    InvalidFilename(String),
    #[error("timed out after {}s", .0.as_secs())]
    Timeout(Duration),
    /// Curl reported an error (connection, DNS, TLS, ...).
    #[error("{0}")]
    Network(#[from] curl::Error),
    /// Response status other than 200.
    #[error("HTTP {0}")]
    Http(u32),
    /// Directory creation or file write failed.
    #[error("{}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FetchError {
    pub(crate) fn filesystem(path: impl Into<PathBuf>, source: io::Error) -> Self {
        FetchError::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Classify a curl error raised while `timeout` was in effect.
    pub(crate) fn from_curl(e: curl::Error, timeout: Duration) -> Self {
        if e.is_operation_timedout() {
            FetchError::Timeout(timeout)
        } else {
            FetchError::Network(e)
        }
    }
}
