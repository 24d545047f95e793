//! Content primitives
//!
//! Hashing of strings, ordered lists, maps and filesystem paths, the labeled
//! Merkle node every aspect hasher returns, and the per-run path hash cache.

pub mod cache;
pub mod hasher;
pub mod merkle;
pub mod path;
pub mod walker;

pub use cache::PathHashCache;
pub use hasher::{CachedContentHasher, ContentHasher, ContentHashing};
pub use merkle::MerkleNode;
