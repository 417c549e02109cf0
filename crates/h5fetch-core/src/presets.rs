//! Known datasets with built-in URLs.

use std::fmt;
use std::str::FromStr;

use crate::error::Result;
use crate::fetcher::{CachedFile, FetchOptions, Fetcher};

/// Default location of the notMNIST archive (~1.7 GB).
pub const NOT_MNIST_URL: &str = "https://s3.amazonaws.com/astronn/notMNIST.h5";
/// Default location of the reduced notMNIST archive.
pub const NOT_MNIST_SMALL_URL: &str = "https://s3.amazonaws.com/astronn/notMNIST_small.h5";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    NotMnist,
    NotMnistSmall,
}

impl Dataset {
    pub const ALL: [Dataset; 2] = [Dataset::NotMnist, Dataset::NotMnistSmall];

    pub fn url(&self) -> &'static str {
        match self {
            Dataset::NotMnist => NOT_MNIST_URL,
            Dataset::NotMnistSmall => NOT_MNIST_SMALL_URL,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dataset::NotMnist => "not-mnist",
            Dataset::NotMnistSmall => "not-mnist-small",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDataset(pub String);

impl fmt::Display for UnknownDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown dataset {:?} (expected one of: ", self.0)?;
        for (i, d) in Dataset::ALL.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", d)?;
        }
        write!(f, ")")
    }
}

impl std::error::Error for UnknownDataset {}

impl FromStr for Dataset {
    type Err = UnknownDataset;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Dataset::ALL
            .into_iter()
            .find(|d| d.name() == normalized || d.name().replace('-', "") == normalized)
            .ok_or_else(|| UnknownDataset(s.to_string()))
    }
}

impl Fetcher {
    /// [`Fetcher::fetch`] with the dataset's built-in URL.
    pub fn fetch_dataset(&self, dataset: Dataset, opts: &FetchOptions) -> Result<CachedFile> {
        self.fetch(dataset.url(), opts)
    }

    pub fn fetch_not_mnist(&self, opts: &FetchOptions) -> Result<CachedFile> {
        self.fetch_dataset(Dataset::NotMnist, opts)
    }
}
