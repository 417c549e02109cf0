//! Fetch large remote dataset files into a local cache, verified by size.
//!
//! ```no_run
//! use h5fetch_core::{FetchConfig, FetchOptions, Fetcher};
//!
//! let fetcher = Fetcher::from_process(&FetchConfig::default())?;
//! let cached = fetcher.fetch(
//!     "https://s3.amazonaws.com/astronn/notMNIST.h5",
//!     &FetchOptions::default().with_cache_path("~/data"),
//! )?;
//! println!("{}", cached.local_path.display());
//! # Ok::<(), h5fetch_core::FetchError>(())
//! ```

pub mod config;
pub mod logging;

pub mod cache_path;
pub mod downloader;
pub mod error;
pub mod fetch_head;
pub mod fetcher;
pub mod presets;
pub mod url_model;

pub use cache_path::FetchEnv;
pub use config::FetchConfig;
pub use error::FetchError;
pub use fetcher::{CachedFile, FetchOptions, FetchOutcome, Fetcher};
pub use presets::Dataset;
