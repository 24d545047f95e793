//! Labeled Merkle nodes used to accumulate every hashed aspect of a target.
//!
//! node_hash = hash("merkle" || id_len || identifier || child_count || child hashes...)
//!
//! A leaf's value digest takes the place of its single child hash, so a node's
//! hash depends only on its identifier and the ordered hashes beneath it.

use crate::types::Digest;
use blake3::Hasher;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleNode {
    pub hash: Digest,
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MerkleNode>,
}

impl MerkleNode {
    /// Leaf carrying the digest of a primitive input.
    pub fn leaf(identifier: impl Into<String>, value: Digest) -> Self {
        let identifier = identifier.into();
        let hash = combine(&identifier, std::iter::once(&value));
        Self {
            hash,
            identifier,
            children: Vec::new(),
        }
    }

    /// Inner node over `children`, in the order given.
    ///
    /// Callers sort children by a stable key before building when the source
    /// collection is unordered.
    pub fn branch(identifier: impl Into<String>, children: Vec<MerkleNode>) -> Self {
        let identifier = identifier.into();
        let hash = combine(&identifier, children.iter().map(|c| &c.hash));
        Self {
            hash,
            identifier,
            children,
        }
    }

    /// Look up a descendant by a path of identifiers, e.g. `["resources", "a.png", "name"]`.
    pub fn find(&self, path: &[&str]) -> Option<&MerkleNode> {
        let mut node = self;
        for segment in path {
            node = node.children.iter().find(|c| c.identifier == *segment)?;
        }
        Some(node)
    }

    /// Direct child by identifier.
    pub fn child(&self, identifier: &str) -> Option<&MerkleNode> {
        self.children.iter().find(|c| c.identifier == identifier)
    }

    /// Whether this node or any descendant carries `identifier`.
    pub fn contains_identifier(&self, identifier: &str) -> bool {
        self.identifier == identifier
            || self
                .children
                .iter()
                .any(|c| c.contains_identifier(identifier))
    }

    /// Indented `identifier hash` listing, one node per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, 0);
        out
    }

    fn render_into(&self, out: &mut String, depth: usize) {
        let _ = writeln!(out, "{}{} {}", "  ".repeat(depth), self.identifier, self.hash);
        for child in &self.children {
            child.render_into(out, depth + 1);
        }
    }
}

fn combine<'a>(identifier: &str, hashes: impl ExactSizeIterator<Item = &'a Digest>) -> Digest {
    let mut hasher = Hasher::new();
    hasher.update(b"merkle");
    hasher.update(&(identifier.len() as u64).to_be_bytes());
    hasher.update(identifier.as_bytes());
    hasher.update(&(hashes.len() as u64).to_be_bytes());
    for hash in hashes {
        hasher.update(hash.as_bytes());
    }
    hasher.finalize().into()
}
