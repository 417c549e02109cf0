//! Cache directory resolution.
//!
//! The working directory and home directory are captured once in a
//! [`FetchEnv`] and passed in; nothing here looks at process state.

use std::path::{Component, Path, PathBuf};

use crate::error::{FetchError, Result};

/// Process state the fetch depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchEnv {
    /// Default cache root and base for relative cache paths.
    pub cwd: PathBuf,
    /// Target of `~` expansion, if known.
    pub home: Option<PathBuf>,
}

impl FetchEnv {
    pub fn new(cwd: impl Into<PathBuf>, home: Option<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            home,
        }
    }

    /// Snapshot the current working directory and the user's home directory.
    pub fn from_process() -> Result<Self> {
        let cwd = std::env::current_dir().map_err(|e| FetchError::io(".", e))?;
        Ok(Self::new(cwd, dirs::home_dir()))
    }
}

/// Resolve the directory the cached file lives in.
///
/// `None` means the working directory. Otherwise a leading `~` is expanded
/// against `env.home`, relative paths are joined onto `env.cwd`, and `.`/`..`
/// are folded lexically (symlinks are not resolved).
pub fn resolve_cache_dir(cache_path: Option<&Path>, env: &FetchEnv) -> Result<PathBuf> {
    let Some(path) = cache_path else {
        return Ok(env.cwd.clone());
    };
    let expanded = expand_user(path, env.home.as_deref())?;
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        env.cwd.join(expanded)
    };
    Ok(normalize_lexically(&absolute))
}

/// Expand a leading `~` component. `~user` forms are left untouched.
pub fn expand_user(path: &Path, home: Option<&Path>) -> Result<PathBuf> {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => {
            let home = home.ok_or_else(|| FetchError::HomeDirUnknown {
                path: path.to_path_buf(),
            })?;
            Ok(home.join(components.as_path()))
        }
        _ => Ok(path.to_path_buf()),
    }
}

fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `/..` stays `/`
                if !out.pop() && !out.has_root() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}
