//! cachekey: Deterministic Content Hashing for Module Graphs
//!
//! Computes a stable content hash for every target of a project graph. A
//! target's hash covers its sources, resources, scripts, settings, platform
//! data and the hashes of its dependencies, so it changes exactly when
//! something that affects the build output changes and can be used as a
//! binary cache key.

pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod graph;
pub mod hashers;
pub mod logging;
pub mod types;
