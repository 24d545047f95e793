//! Filesystem walker for traversing directory trees in a canonical order

use crate::error::HashingError;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Filesystem walker configuration
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Whether to follow symbolic links (default: true, bundles are often symlinked)
    pub follow_symlinks: bool,
    /// Entry names that are skipped along with everything beneath them
    pub ignore_names: Vec<String>,
    /// Maximum depth to traverse (None = unlimited)
    pub max_depth: Option<usize>,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: true,
            ignore_names: vec![".DS_Store".to_string()],
            max_depth: None,
        }
    }
}

/// Filesystem walker
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            config: WalkerConfig::default(),
        }
    }

    /// Create a walker with custom configuration
    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Self {
        Self { root, config }
    }

    /// Collect every file below the root, sorted by path for determinism.
    ///
    /// Directories are descended into but not listed.
    pub fn files(&self) -> Result<Vec<PathBuf>, HashingError> {
        let mut files = Vec::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .max_depth(self.config.max_depth.unwrap_or(usize::MAX))
            .into_iter()
            .filter_entry(|entry| !self.should_ignore(entry));

        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.root.clone());
                match e.into_io_error() {
                    Some(io) => HashingError::io(path, io),
                    None => HashingError::Io {
                        path,
                        source: std::io::Error::new(
                            std::io::ErrorKind::Other,
                            "filesystem loop while walking directory",
                        ),
                    },
                }
            })?;

            // Skip the root itself (we only want its contents)
            if entry.depth() == 0 {
                continue;
            }

            let path = entry.path().to_path_buf();
            let metadata = entry.metadata().map_err(|e| {
                let io = e.into_io_error().unwrap_or_else(|| {
                    std::io::Error::new(std::io::ErrorKind::Other, "unreadable metadata")
                });
                HashingError::io(&path, io)
            })?;

            if metadata.is_file() {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }

    /// Check if an entry should be ignored based on its name
    fn should_ignore(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 {
            return false;
        }
        let name = entry.file_name().to_string_lossy();
        self.config
            .ignore_names
            .iter()
            .any(|ignored| ignored.as_str() == name)
    }
}
