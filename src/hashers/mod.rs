//! Hashers for every build-relevant aspect of a target, and the target and
//! graph hashers that combine them.
//!
//! Aspect hashers are functions of an [`AspectContext`] and the aspect's model
//! data, returning a labeled [`MerkleNode`]. Unordered inputs are sorted by a
//! stable key before they are folded.

pub mod buildable_folders;
pub mod copy_files;
pub mod core_data_models;
pub mod dependencies;
pub mod foreign;
pub mod graph;
pub mod headers;
pub mod platform;
pub mod plist;
pub mod resources;
pub mod scripts;
pub mod settings;
pub mod sources;
pub mod target;
pub mod xcconfig;

pub use foreign::ForeignBuildHasher;
pub use graph::GraphContentHasher;
pub use platform::RunDestination;
pub use settings::WarningFilter;
pub use target::{TargetContentHash, TargetContentHashSubhashes, TargetContentHasher};
pub use xcconfig::XcconfigHasher;

use crate::content::{path, ContentHashing, MerkleNode};
use crate::error::HashingError;
use crate::types::Digest;
use std::path::{Path, PathBuf};

/// What every aspect hasher needs: primitive hashing and the root that
/// relative inputs and labels are expressed against.
#[derive(Clone, Copy)]
pub struct AspectContext<'a> {
    pub content: &'a dyn ContentHashing,
    pub source_root: &'a Path,
}

impl<'a> AspectContext<'a> {
    pub fn new(content: &'a dyn ContentHashing, source_root: &'a Path) -> Self {
        Self {
            content,
            source_root,
        }
    }

    /// Absolute location of a model path.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        path::lexical_normalize(&self.source_root.join(path))
    }

    /// Label of a model path inside a Merkle node.
    pub fn label(&self, path: &Path) -> String {
        path::relative_label(&self.resolve(path), self.source_root)
    }

    pub fn hash_file(&self, path: &Path) -> Result<Digest, HashingError> {
        self.content.hash_path(&self.resolve(path))
    }

    pub fn leaf_str(&self, identifier: impl Into<String>, value: &str) -> MerkleNode {
        MerkleNode::leaf(identifier, self.content.hash_str(value))
    }

    pub fn leaf_strings(&self, identifier: impl Into<String>, values: &[String]) -> MerkleNode {
        MerkleNode::leaf(identifier, self.content.hash_strings(values))
    }

    pub fn leaf_bool(&self, identifier: impl Into<String>, value: bool) -> MerkleNode {
        self.leaf_str(identifier, if value { "true" } else { "false" })
    }

    /// Branch with one content leaf per path, sorted by label.
    pub fn files_node(
        &self,
        identifier: impl Into<String>,
        paths: &[PathBuf],
    ) -> Result<MerkleNode, HashingError> {
        let mut children = Vec::with_capacity(paths.len());
        for path in paths {
            children.push(MerkleNode::leaf(self.label(path), self.hash_file(path)?));
        }
        children.sort_by(|a, b| a.identifier.cmp(&b.identifier));
        Ok(MerkleNode::branch(identifier, children))
    }
}
