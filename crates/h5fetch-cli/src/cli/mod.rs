//! CLI for the h5fetch dataset cache.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use h5fetch_core::{config, Dataset, FetchOptions, Fetcher};
use std::path::{Path, PathBuf};

use commands::{run_fetch, run_list};

/// Top-level CLI for h5fetch.
#[derive(Debug, Parser)]
#[command(name = "h5fetch")]
#[command(about = "Fetch and cache remote HDF5 dataset files, verified by size", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch a file by URL into the cache directory.
    Fetch {
        /// Direct HTTP/HTTPS URL of the data file.
        url: String,
        #[command(flatten)]
        cache: CacheArgs,
    },

    /// Fetch a known dataset by name (see `list`).
    Dataset {
        /// Dataset name, e.g. `not-mnist`.
        name: Dataset,
        #[command(flatten)]
        cache: CacheArgs,
    },

    /// List known datasets and their URLs.
    List,
}

/// Cache location and download policy shared by the fetching commands.
#[derive(Debug, Clone, Args)]
pub struct CacheArgs {
    /// Directory to cache into (default: config `cache_dir`, else the current directory).
    #[arg(long, value_name = "DIR")]
    pub cache_path: Option<PathBuf>,
    /// Fail instead of downloading when the file is missing or has the wrong size.
    #[arg(long)]
    pub no_download: bool,
}

impl CacheArgs {
    /// `--cache-path` wins over the configured default directory.
    pub fn options(&self, default_dir: Option<&Path>) -> FetchOptions {
        FetchOptions {
            cache_path: self
                .cache_path
                .clone()
                .or_else(|| default_dir.map(Path::to_path_buf)),
            download_if_missing: !self.no_download,
        }
    }
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        let (url, cache) = match cli.command {
            CliCommand::List => {
                run_list();
                return Ok(());
            }
            CliCommand::Fetch { url, cache } => (url, cache),
            CliCommand::Dataset { name, cache } => (name.url().to_string(), cache),
        };

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let fetcher = Fetcher::from_process(&cfg)?;
        run_fetch(&fetcher, &url, &cache.options(cfg.cache_dir.as_deref()))
    }
}

#[cfg(test)]
mod tests;
