//! Fetch a remote file into the local cache, verified by byte count.
//!
//! Flow: resolve the cache path, probe the URL for `Content-Length`, compare
//! with the file on disk, download when missing or mismatched, re-check the
//! size, return the path. If the probe fails but a local file exists it is
//! trusted as-is so cached datasets stay usable offline. A transfer that ends
//! early is caught by the size re-check and reported as an integrity error.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cache_path::{resolve_cache_dir, FetchEnv};
use crate::config::{CurlOptions, FetchConfig};
use crate::downloader::{download_single, temp_path};
use crate::error::{FetchError, Result};
use crate::fetch_head::{self, HeadResult};
use crate::url_model::cache_filename;

/// Per-call options.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Cache directory; `None` means the working directory captured in [`FetchEnv`].
    pub cache_path: Option<PathBuf>,
    /// When false a missing or mismatched file is an error instead of a download.
    pub download_if_missing: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            cache_path: None,
            download_if_missing: true,
        }
    }
}

impl FetchOptions {
    pub fn with_cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_path = Some(path.into());
        self
    }

    pub fn download_if_missing(mut self, yes: bool) -> Self {
        self.download_if_missing = yes;
        self
    }
}

/// How the returned file was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Downloaded in this call; size matches the server.
    Downloaded,
    /// Already on disk with the size the server reports.
    AlreadyVerified,
    /// Server metadata was unavailable; the existing file was returned unchecked.
    Unverified,
}

impl FetchOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            FetchOutcome::Downloaded => "Data downloaded and verified.",
            FetchOutcome::AlreadyVerified => "Data file already exists and is verified.",
            FetchOutcome::Unverified => {
                "Warning: could not reach the server; using existing data file without verification."
            }
        }
    }
}

/// A file in the cache after a successful fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedFile {
    pub local_path: PathBuf,
    /// Server-declared size; `None` for [`FetchOutcome::Unverified`].
    pub expected_size: Option<u64>,
    pub actual_size: u64,
    pub outcome: FetchOutcome,
}

/// Blocking fetcher. Holds the environment and curl tuning; stateless between calls.
#[derive(Debug, Clone)]
pub struct Fetcher {
    env: FetchEnv,
    curl: CurlOptions,
    atomic_download: bool,
}

impl Fetcher {
    pub fn new(env: FetchEnv, config: &FetchConfig) -> Self {
        Self {
            env,
            curl: config.curl_options(),
            atomic_download: config.atomic_download,
        }
    }

    /// Fetcher bound to the current process's working and home directories.
    pub fn from_process(config: &FetchConfig) -> Result<Self> {
        Ok(Self::new(FetchEnv::from_process()?, config))
    }

    pub fn env(&self) -> &FetchEnv {
        &self.env
    }

    /// Where `data_url` is (or would be) cached for the given options.
    pub fn local_path(&self, data_url: &str, opts: &FetchOptions) -> Result<PathBuf> {
        let dir = resolve_cache_dir(opts.cache_path.as_deref(), &self.env)?;
        Ok(dir.join(cache_filename(data_url)?))
    }

    /// Make sure `data_url` is cached and return where it is.
    pub fn fetch(&self, data_url: &str, opts: &FetchOptions) -> Result<CachedFile> {
        let local_path = self.local_path(data_url, opts)?;
        let local_size = regular_file_size(&local_path);

        let expected = match fetch_head::probe(data_url, &self.curl) {
            Ok(HeadResult {
                content_length: Some(n),
                etag,
                last_modified,
            }) => {
                tracing::debug!(
                    url = data_url,
                    content_length = n,
                    etag = etag.as_deref().unwrap_or("-"),
                    last_modified = last_modified.as_deref().unwrap_or("-"),
                    "probed remote"
                );
                n
            }
            Ok(_) => {
                return self.metadata_unavailable(data_url, local_path, local_size, "no Content-Length")
            }
            Err(e) => {
                return self.metadata_unavailable(data_url, local_path, local_size, format!("{:#}", e))
            }
        };

        if local_size == Some(expected) {
            tracing::info!(path = %local_path.display(), bytes = expected, "cache hit, size verified");
            return Ok(CachedFile {
                local_path,
                expected_size: Some(expected),
                actual_size: expected,
                outcome: FetchOutcome::AlreadyVerified,
            });
        }

        if !opts.download_if_missing {
            tracing::info!(
                path = %local_path.display(),
                local = ?local_size,
                expected,
                "download needed but disabled"
            );
            return Err(FetchError::NotCached { path: local_path });
        }

        match local_size {
            Some(n) => tracing::info!(
                path = %local_path.display(),
                local = n,
                expected,
                "size mismatch, re-downloading"
            ),
            None => tracing::info!(path = %local_path.display(), expected, "not cached, downloading"),
        }

        let received = self.download(data_url, &local_path, expected)?;
        tracing::info!(path = %local_path.display(), bytes = received, "downloaded and verified");
        Ok(CachedFile {
            local_path,
            expected_size: Some(expected),
            actual_size: received,
            outcome: FetchOutcome::Downloaded,
        })
    }

    /// Download into place and check the size on disk. Returns the verified size.
    fn download(&self, data_url: &str, local_path: &Path, expected: u64) -> Result<u64> {
        if let Some(dir) = local_path.parent() {
            fs::create_dir_all(dir).map_err(|e| FetchError::io(dir, e))?;
        }

        let write_path = if self.atomic_download {
            temp_path(local_path)
        } else {
            local_path.to_path_buf()
        };

        let written = download_single(data_url, &write_path, &self.curl)?;
        let received = fs::metadata(&write_path)
            .map_err(|e| FetchError::io(&write_path, e))?
            .len();
        tracing::debug!(written, received, "stat after download");

        if received != expected {
            tracing::warn!(
                path = %write_path.display(),
                expected,
                received,
                "downloaded size does not match Content-Length"
            );
            return Err(FetchError::Integrity {
                path: write_path,
                expected,
                received,
            });
        }

        if self.atomic_download {
            fs::rename(&write_path, local_path).map_err(|e| FetchError::io(local_path, e))?;
        }
        Ok(received)
    }

    fn metadata_unavailable(
        &self,
        data_url: &str,
        local_path: PathBuf,
        local_size: Option<u64>,
        reason: impl std::fmt::Display,
    ) -> Result<CachedFile> {
        match local_size {
            Some(actual_size) => {
                tracing::warn!(
                    url = data_url,
                    path = %local_path.display(),
                    "cannot verify cached file ({}); using it as-is",
                    reason
                );
                Ok(CachedFile {
                    local_path,
                    expected_size: None,
                    actual_size,
                    outcome: FetchOutcome::Unverified,
                })
            }
            None => Err(FetchError::connectivity(data_url, reason)),
        }
    }
}

/// Size of `path` if it is a regular file (symlinks followed).
fn regular_file_size(path: &Path) -> Option<u64> {
    fs::metadata(path)
        .ok()
        .filter(|m| m.is_file())
        .map(|m| m.len())
}
