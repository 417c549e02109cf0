//! Single-stream HTTP GET downloader.
//!
//! Writes the response body sequentially to a file. The file is only
//! truncated once the first body bytes arrive, so a request that fails
//! up front leaves whatever was on disk alone.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::config::CurlOptions;
use crate::error::{FetchError, Result};

/// Downloads `url` with a single GET into `dest`, replacing any existing content.
/// Returns the number of bytes written.
///
/// A transfer cut short after the body started (or a short body, curl's
/// "partial file") is not an error here: the bytes received are kept and the
/// caller's size check decides. Failures before any body arrived and error
/// statuses map to [`FetchError::Connectivity`]; failures writing `dest` map
/// to [`FetchError::Io`].
pub fn download_single(url: &str, dest: &Path, curl: &CurlOptions) -> Result<u64> {
    let mut easy = curl::easy::Easy::new();
    configure(&mut easy, url, curl).map_err(|e| FetchError::connectivity(url, e))?;

    let mut out: Option<BufWriter<File>> = None;
    let mut written: u64 = 0;
    let mut write_error: Option<io::Error> = None;

    let performed = {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| {
                if out.is_none() {
                    match create_truncated(dest) {
                        Ok(f) => out = Some(BufWriter::new(f)),
                        Err(e) => {
                            write_error = Some(e);
                            return Ok(0); // abort transfer
                        }
                    }
                }
                let Some(w) = out.as_mut() else {
                    return Ok(0);
                };
                match w.write_all(data) {
                    Ok(()) => {
                        written += data.len() as u64;
                        Ok(data.len())
                    }
                    Err(e) => {
                        tracing::warn!("download write failed: {}", e);
                        write_error = Some(e);
                        Ok(0) // abort transfer
                    }
                }
            })
            .map_err(|e| FetchError::connectivity(url, e))?;
        transfer.perform()
    };

    if let Some(e) = write_error {
        return Err(FetchError::io(dest, e));
    }
    let code = easy.response_code().unwrap_or(0);
    match performed {
        Ok(()) => {
            if !(200..300).contains(&code) {
                return Err(FetchError::connectivity(url, format!("GET returned HTTP {}", code)));
            }
        }
        Err(_) if code >= 400 => {
            return Err(FetchError::connectivity(url, format!("GET returned HTTP {}", code)));
        }
        Err(e) if e.is_partial_file() || written > 0 => {
            tracing::warn!(url, bytes = written, "transfer ended early: {}", e);
        }
        Err(e) => {
            return Err(FetchError::connectivity(url, format!("GET failed: {}", e)));
        }
    }

    let out = match out {
        Some(w) => w,
        // Empty body: still leave an (empty) file behind.
        None => BufWriter::new(create_truncated(dest).map_err(|e| FetchError::io(dest, e))?),
    };
    let file = out
        .into_inner()
        .map_err(|e| FetchError::io(dest, e.into_error()))?;
    file.sync_all().map_err(|e| FetchError::io(dest, e))?;
    tracing::debug!(url, bytes = written, dest = %dest.display(), "GET complete");
    Ok(written)
}

fn create_truncated(dest: &Path) -> io::Result<File> {
    File::options()
        .write(true)
        .create(true)
        .truncate(true)
        .open(dest)
}

fn configure(
    easy: &mut curl::easy::Easy,
    url: &str,
    curl: &CurlOptions,
) -> std::result::Result<(), curl::Error> {
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    // Error statuses abort before their body reaches the file.
    easy.fail_on_error(true)?;
    easy.connect_timeout(curl.connect_timeout)?;
    // No total timeout: multi-GB bodies are bounded by the stall check instead.
    easy.low_speed_limit(curl.low_speed_limit)?;
    easy.low_speed_time(curl.low_speed_time)?;
    Ok(())
}
