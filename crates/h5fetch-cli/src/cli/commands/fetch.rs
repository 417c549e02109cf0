//! `h5fetch fetch` / `h5fetch dataset` – make sure a file is cached and print its path.

use anyhow::{Context, Result};
use h5fetch_core::{FetchOptions, Fetcher};

/// Status goes to stderr so stdout carries only the path (for `$(h5fetch ...)`).
pub fn run_fetch(fetcher: &Fetcher, url: &str, opts: &FetchOptions) -> Result<()> {
    let cached = fetcher
        .fetch(url, opts)
        .with_context(|| format!("fetching {}", url))?;

    eprintln!("{}", cached.outcome.message());
    println!("{}", cached.local_path.display());
    Ok(())
}
