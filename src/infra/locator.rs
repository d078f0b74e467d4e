use crate::error::{PodmanError, Result};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Command name looked up on `PATH` when no explicit binary is configured
pub const DEFAULT_BINARY: &str = "podman";

/// Path to the podman executable, validated once at construction.
///
/// The check is advisory: nothing stops the file from changing between
/// resolution and launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeBinary {
    path: PathBuf,
}

impl RuntimeBinary {
    /// Resolves `path_or_name`.
    ///
    /// The bare name `podman` is returned unchanged and left for the OS to
    /// find at launch time. Anything else must be an existing regular file
    /// and is made absolute.
    pub fn resolve(path_or_name: &str) -> Result<Self> {
        if path_or_name == DEFAULT_BINARY {
            return Ok(Self {
                path: PathBuf::from(DEFAULT_BINARY),
            });
        }

        let path = Path::new(path_or_name);
        let metadata = fs::metadata(path).map_err(|source| PodmanError::NotFound {
            path: path.to_path_buf(),
            source,
        })?;

        if !metadata.is_file() {
            return Err(PodmanError::InvalidBinary {
                path: path.to_path_buf(),
            });
        }

        let absolute = std::path::absolute(path).map_err(|source| PodmanError::NotFound {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self { path: absolute })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Program string handed to the launcher
    pub fn program(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    pub fn is_bare_name(&self) -> bool {
        self.path.as_os_str() == DEFAULT_BINARY
    }

    /// Where the OS would find the binary right now. Diagnostic only.
    pub fn search_path(&self) -> Option<PathBuf> {
        if self.is_bare_name() {
            return which::which(&self.path).ok();
        }
        self.path.is_file().then(|| self.path.clone())
    }
}

impl Default for RuntimeBinary {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_BINARY),
        }
    }
}

impl fmt::Display for RuntimeBinary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
