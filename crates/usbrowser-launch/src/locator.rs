use std::ffi::OsString;
use std::path::PathBuf;

/// Resolves a profile's executable before anything is launched
pub trait ExecutableLocator {
    fn locate(&self, executable: &str) -> Option<PathBuf>;
}

/// Looks executables up on `PATH`, or on a custom search path
pub struct PathLocator {
    search_path: Option<OsString>,
}

impl PathLocator {
    /// Locator using the process `PATH`
    pub fn new() -> Self {
        Self { search_path: None }
    }

    /// Locator using the given `PATH`-style list instead of the environment
    pub fn with_search_path(search_path: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(search_path.into()),
        }
    }
}

impl Default for PathLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutableLocator for PathLocator {
    /// Absolute and relative paths are checked as-is, bare names are searched
    fn locate(&self, executable: &str) -> Option<PathBuf> {
        if executable.is_empty() {
            return None;
        }

        let result = match &self.search_path {
            Some(paths) => {
                let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
                which::which_in(executable, Some(paths), cwd)
            }
            None => which::which(executable),
        };

        match result {
            Ok(path) => {
                tracing::debug!("Resolved `{}` to {}", executable, path.display());
                Some(path)
            }
            Err(e) => {
                tracing::debug!("Could not resolve `{}`: {}", executable, e);
                None
            }
        }
    }
}
