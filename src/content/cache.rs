//! Path hash cache shared by all hashers of one run.

use crate::types::Digest;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Absolute path -> content digest, filled as hashers read the filesystem.
///
/// Writes are idempotent (the same path always hashes to the same digest within
/// a run), so concurrent writers racing on one path resolve to last-write-wins.
#[derive(Debug, Default)]
pub struct PathHashCache {
    entries: RwLock<HashMap<PathBuf, Digest>>,
}

impl PathHashCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the cache with digests computed earlier.
    pub fn with_entries(entries: HashMap<PathBuf, Digest>) -> Self {
        Self {
            entries: RwLock::new(entries),
        }
    }

    pub fn get(&self, path: &Path) -> Option<Digest> {
        self.entries.read().get(path).copied()
    }

    pub fn insert(&self, path: PathBuf, digest: Digest) {
        self.entries.write().insert(path, digest);
    }

    /// Return the cached digest for `path`, computing and storing it on a miss.
    ///
    /// The lock is not held while `compute` runs, so independent paths hash in
    /// parallel.
    pub fn get_or_try_insert_with<E, F>(&self, path: &Path, compute: F) -> Result<Digest, E>
    where
        F: FnOnce() -> Result<Digest, E>,
    {
        if let Some(digest) = self.get(path) {
            trace!(path = %path.display(), "Path hash cache hit");
            return Ok(digest);
        }
        let digest = compute()?;
        self.insert(path.to_path_buf(), digest);
        Ok(digest)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Copy of the current entries.
    pub fn snapshot(&self) -> HashMap<PathBuf, Digest> {
        self.entries.read().clone()
    }
}
