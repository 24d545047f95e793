//! Whole-graph hashing.
//!
//! Targets are hashed level by level: a level only starts once every target of
//! the previous levels has its hash recorded, so dependency lookups always
//! succeed for a well-formed graph. Targets within a level run on a bounded
//! worker pool and share one path hash cache.

use crate::content::{ContentHashing, PathHashCache};
use crate::error::HashingError;
use crate::graph::{Graph, GraphTarget};
use crate::hashers::platform::RunDestination;
use crate::hashers::target::{TargetContentHash, TargetContentHasher};
use crate::types::{Digest, HashedTargets, TargetIdentity};
use parking_lot::RwLock;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

pub type GraphContentHashes = BTreeMap<TargetIdentity, TargetContentHash>;

pub struct GraphContentHasher<'a> {
    content: &'a dyn ContentHashing,
    target_hasher: TargetContentHasher<'a>,
    workers: usize,
}

impl<'a> GraphContentHasher<'a> {
    pub fn new(content: &'a dyn ContentHashing) -> Self {
        Self {
            content,
            target_hasher: TargetContentHasher::new(content),
            workers: 0,
        }
    }

    pub fn with_target_hasher(mut self, target_hasher: TargetContentHasher<'a>) -> Self {
        self.target_hasher = target_hasher;
        self
    }

    /// Worker threads per level; `0` uses one per CPU.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Hash every target of `graph` and report those accepted by `include`.
    ///
    /// Filtering happens after hashing, so it never changes the hash of a
    /// reported target.
    pub fn content_hashes<F>(
        &self,
        graph: &Graph,
        include: F,
        destination: Option<&RunDestination>,
        additional_strings: &[String],
    ) -> Result<GraphContentHashes, HashingError>
    where
        F: Fn(&GraphTarget<'_>) -> bool,
    {
        let start = Instant::now();
        let levels = graph.topological_levels()?;
        let target_count: usize = levels.iter().map(Vec::len).sum();
        info!(
            graph = %graph.name,
            targets = target_count,
            levels = levels.len(),
            "Hashing graph"
        );

        let mut additional_strings = additional_strings.to_vec();
        if let Some(lock) = package_lock_hash(self.content, &graph.path)? {
            additional_strings.push(lock.to_hex());
        }

        let pool = match rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()
        {
            Ok(pool) => Some(pool),
            Err(e) => {
                warn!("failed to create thread pool ({e}), hashing sequentially");
                None
            }
        };

        let hashed_paths = PathHashCache::new();
        let hashed_targets = RwLock::new(HashedTargets::new());
        let mut results = GraphContentHashes::new();
        for level in &levels {
            let outcomes: Vec<Result<TargetContentHash, HashingError>> = {
                let hashed = hashed_targets.read();
                let hashed: &HashedTargets = &hashed;
                let hash_one = |graph_target: &GraphTarget<'_>| {
                    self.target_hasher.content_hash(
                        graph_target,
                        hashed,
                        &hashed_paths,
                        destination,
                        &additional_strings,
                    )
                };
                match &pool {
                    Some(pool) => pool.install(|| level.par_iter().map(hash_one).collect()),
                    None => level.iter().map(hash_one).collect(),
                }
            };

            let mut hashed = hashed_targets.write();
            for (graph_target, outcome) in level.iter().zip(outcomes) {
                let content_hash = outcome?;
                hashed.insert(graph_target.identity(), content_hash.hash);
                if include(graph_target) {
                    results.insert(graph_target.identity(), content_hash);
                }
            }
        }

        info!(
            graph = %graph.name,
            hashed = target_count,
            reported = results.len(),
            cached_paths = hashed_paths.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Hashed graph"
        );
        Ok(results)
    }
}

/// Package lock files, in the order they are looked for.
fn lock_file_candidates(root: &Path) -> Result<Vec<PathBuf>, HashingError> {
    let mut candidates = vec![root.join(".package.resolved"), root.join("Package.resolved")];

    let mut entries: Vec<PathBuf> = match std::fs::read_dir(root) {
        Ok(entries) => entries
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<_, _>>()
            .map_err(|e| HashingError::io(root, e))?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
        Err(e) => return Err(HashingError::io(root, e)),
    };
    entries.sort();

    let with_extension = |extension: &str| {
        entries
            .iter()
            .filter(|p| p.extension().is_some_and(|e| e == extension))
            .cloned()
            .collect::<Vec<_>>()
    };
    for workspace in with_extension("xcworkspace") {
        candidates.push(workspace.join("xcshareddata/swiftpm/Package.resolved"));
    }
    for project in with_extension("xcodeproj") {
        candidates.push(project.join("project.xcworkspace/xcshareddata/swiftpm/Package.resolved"));
    }
    Ok(candidates)
}

/// Content hash of the first package lock file under `root`, if there is one.
pub fn package_lock_hash(
    content: &dyn ContentHashing,
    root: &Path,
) -> Result<Option<Digest>, HashingError> {
    for candidate in lock_file_candidates(root)? {
        if candidate.is_file() {
            return content.hash_path(&candidate).map(Some);
        }
    }
    Ok(None)
}
