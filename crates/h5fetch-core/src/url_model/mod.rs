//! URL modeling and filename derivation.
//!
//! The cache file is named after the last path segment of the data URL.

mod path;

pub use path::filename_from_url_path;

use crate::error::{FetchError, Result};

/// Filename the cached copy of `url` is stored under.
///
/// Two URLs sharing a basename map to the same file; no host or version is
/// folded into the name.
///
/// # Examples
///
/// - `cache_filename("https://s3.amazonaws.com/astronn/notMNIST.h5")` → `"notMNIST.h5"`
pub fn cache_filename(url: &str) -> Result<String> {
    filename_from_url_path(url).ok_or_else(|| FetchError::InvalidUrl {
        url: url.to_string(),
    })
}
