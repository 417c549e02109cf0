//! HTTP HEAD / metadata probing.
//!
//! Uses the curl crate (libcurl) to fetch response headers and read the
//! `Content-Length` the cached copy is verified against. Servers that refuse
//! HEAD, or answer it without a length, are asked again with a GET whose body
//! is dropped as soon as the headers are in.

mod parse;

use anyhow::{Context, Result};
use std::str;

use crate::config::CurlOptions;

/// Result of a HEAD request: the headers the fetcher cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadResult {
    /// Total size in bytes, if `Content-Length` is present and numeric.
    pub content_length: Option<u64>,
    /// `ETag` value if present (logged only).
    pub etag: Option<String>,
    /// `Last-Modified` value if present (logged only).
    pub last_modified: Option<String>,
}

/// Probes `url` and returns parsed metadata of the final response.
///
/// Follows redirects. Blocks the current thread until the probe finishes or
/// the probe timeout elapses.
pub fn probe(url: &str, curl: &CurlOptions) -> Result<HeadResult> {
    let (code, head) = request_headers(url, curl, true)?;

    let head_unusable = code == 405
        || code == 501
        || ((200..300).contains(&code) && head.content_length.is_none());
    if head_unusable {
        tracing::debug!(url, code, "HEAD gave no length, reading headers from GET");
        let (code, got) = request_headers(url, curl, false)?;
        if !(200..300).contains(&code) {
            anyhow::bail!("GET {} returned HTTP {}", url, code);
        }
        return Ok(got);
    }

    if !(200..300).contains(&code) {
        anyhow::bail!("HEAD {} returned HTTP {}", url, code);
    }
    Ok(head)
}

/// Runs one request and collects its response headers. With `head_only`
/// false the body is aborted on its first byte.
fn request_headers(url: &str, curl: &CurlOptions, head_only: bool) -> Result<(u32, HeadResult)> {
    let mut headers: Vec<String> = Vec::new();
    let method = if head_only { "HEAD" } else { "GET" };

    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    if head_only {
        easy.nobody(true)?;
    }
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(curl.connect_timeout)?;
    easy.timeout(curl.probe_timeout)?;

    let performed = {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                headers.push(s.trim_end().to_string());
            }
            true
        })?;
        if !head_only {
            transfer.write_function(|_| Ok(0))?;
        }
        transfer.perform()
    };
    match performed {
        Ok(()) => {}
        // Body refused on purpose once the headers were read.
        Err(e) if !head_only && e.is_write_error() => {}
        Err(e) => return Err(e).with_context(|| format!("{} request failed", method)),
    }

    let code = easy.response_code().context("no response code")?;
    Ok((code, parse::parse_headers(&headers)))
}
