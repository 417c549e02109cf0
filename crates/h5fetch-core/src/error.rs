//! Error type for the fetch operation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by [`crate::fetcher::Fetcher::fetch`]. None of them are retried.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Remote metadata (or the body) could not be retrieved and there is no
    /// usable local copy to fall back on.
    #[error("cannot reach {url}: {reason}")]
    Connectivity { url: String, reason: String },

    /// The completed download does not have the size the server declared.
    #[error(
        "download error: size expected = {expected} bytes, size received = {received} bytes ({})",
        path.display()
    )]
    Integrity {
        path: PathBuf,
        expected: u64,
        received: u64,
    },

    /// A download is needed but the caller disabled downloading.
    #[error("{} is not available locally and downloading is disabled", path.display())]
    NotCached { path: PathBuf },

    /// The URL has no final path segment usable as a filename.
    #[error("cannot derive a cache filename from URL: {url}")]
    InvalidUrl { url: String },

    /// `~` expansion was requested but the home directory is unknown.
    #[error("could not determine home directory to expand {}", path.display())]
    HomeDirUnknown { path: PathBuf },

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FetchError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn connectivity(url: &str, reason: impl std::fmt::Display) -> Self {
        FetchError::Connectivity {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T, E = FetchError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integrity_message_carries_both_sizes() {
        let e = FetchError::Integrity {
            path: PathBuf::from("/tmp/notMNIST.h5"),
            expected: 100,
            received: 42,
        };
        let msg = e.to_string();
        assert!(msg.contains("size expected = 100 bytes"));
        assert!(msg.contains("size received = 42 bytes"));
        assert!(msg.contains("/tmp/notMNIST.h5"));
    }

    #[test]
    fn connectivity_message_names_url() {
        let e = FetchError::connectivity("https://example.com/file.h5", "HTTP 503");
        assert_eq!(e.to_string(), "cannot reach https://example.com/file.h5: HTTP 503");
    }
}
