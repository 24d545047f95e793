//! Content primitive hashing using BLAKE3
//!
//! Every digest in the crate bottoms out here. Sequences are framed with
//! big-endian length prefixes so that `["ab", "c"]` and `["a", "bc"]` never
//! collide, and maps are folded in key order.

use crate::content::cache::PathHashCache;
use crate::content::path;
use crate::content::walker::{Walker, WalkerConfig};
use crate::error::HashingError;
use crate::types::Digest;
use blake3::Hasher;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::trace;

/// Primitive hashing operations shared by every aspect hasher.
pub trait ContentHashing: Send + Sync {
    /// Digest of raw bytes.
    fn hash_bytes(&self, data: &[u8]) -> Digest;

    /// Digest of a file's bytes, or of a directory's sorted contents.
    fn hash_path(&self, path: &Path) -> Result<Digest, HashingError>;

    fn hash_str(&self, value: &str) -> Digest {
        self.hash_bytes(value.as_bytes())
    }

    /// Digest of an ordered list. The empty list hashes like the empty string.
    fn hash_strings(&self, values: &[String]) -> Digest {
        self.hash_bytes(&frame_strings(values.iter().map(String::as_str)))
    }

    /// Digest of a map; iteration order of `map` never matters.
    fn hash_map(&self, map: &HashMap<String, String>) -> Digest {
        let sorted: BTreeMap<&str, &str> = map
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        self.hash_bytes(&frame_strings(
            sorted.into_iter().flat_map(|(k, v)| [k, v]),
        ))
    }

    /// Digest of a list of digests.
    fn hash_digests(&self, digests: &[Digest]) -> Digest {
        let hex: Vec<String> = digests.iter().map(Digest::to_hex).collect();
        self.hash_strings(&hex)
    }
}

/// Length-prefixed concatenation of `values`.
pub fn frame_strings<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<u8> {
    let mut buffer = Vec::new();
    for value in values {
        buffer.extend_from_slice(&(value.len() as u64).to_be_bytes());
        buffer.extend_from_slice(value.as_bytes());
    }
    buffer
}

/// Compute content hash for bytes
pub fn compute_content_hash(content: &[u8]) -> Digest {
    let mut hasher = Hasher::new();
    hasher.update(content);
    hasher.finalize().into()
}

/// Filesystem-backed content hasher
#[derive(Debug, Clone, Default)]
pub struct ContentHasher {
    walker_config: WalkerConfig,
}

impl ContentHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory hashing skips entries named in `ignore_names`.
    pub fn with_ignore_names(ignore_names: Vec<String>) -> Self {
        Self {
            walker_config: WalkerConfig {
                ignore_names,
                ..WalkerConfig::default()
            },
        }
    }

    fn hash_file(&self, path: &Path) -> Result<Digest, HashingError> {
        let content = std::fs::read(path).map_err(|e| HashingError::io(path, e))?;
        Ok(compute_content_hash(&content))
    }

    /// dir_hash = hash("directory" || (relative_path, file_hash)...) over sorted files
    fn hash_directory(&self, dir: &Path) -> Result<Digest, HashingError> {
        let files = Walker::with_config(dir.to_path_buf(), self.walker_config.clone()).files()?;

        let mut hasher = Hasher::new();
        hasher.update(b"directory");
        hasher.update(&(files.len() as u64).to_be_bytes());
        for file in files {
            let relative = path::relative_label(&file, dir);
            let digest = self.hash_file(&file)?;
            hasher.update(&frame_strings([relative.as_str()]));
            hasher.update(digest.as_bytes());
        }
        Ok(hasher.finalize().into())
    }
}

impl ContentHashing for ContentHasher {
    fn hash_bytes(&self, data: &[u8]) -> Digest {
        compute_content_hash(data)
    }

    fn hash_path(&self, path: &Path) -> Result<Digest, HashingError> {
        let metadata = std::fs::metadata(path).map_err(|e| HashingError::io(path, e))?;
        trace!(path = %path.display(), directory = metadata.is_dir(), "Hashing path");
        if metadata.is_dir() {
            self.hash_directory(path)
        } else {
            self.hash_file(path)
        }
    }
}

/// Routes path hashing through a [`PathHashCache`] shared by the whole run.
pub struct CachedContentHasher<'a> {
    inner: &'a dyn ContentHashing,
    cache: &'a PathHashCache,
}

impl<'a> CachedContentHasher<'a> {
    pub fn new(inner: &'a dyn ContentHashing, cache: &'a PathHashCache) -> Self {
        Self { inner, cache }
    }
}

impl ContentHashing for CachedContentHasher<'_> {
    fn hash_bytes(&self, data: &[u8]) -> Digest {
        self.inner.hash_bytes(data)
    }

    fn hash_path(&self, path: &Path) -> Result<Digest, HashingError> {
        self.cache
            .get_or_try_insert_with(path, || self.inner.hash_path(path))
    }
}
