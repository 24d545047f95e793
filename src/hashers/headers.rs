//! Public, private and project headers.

use crate::content::MerkleNode;
use crate::error::HashingError;
use crate::graph::resources::Headers;
use crate::hashers::AspectContext;

pub fn hash(
    context: &AspectContext<'_>,
    identifier: &str,
    headers: &Headers,
) -> Result<MerkleNode, HashingError> {
    Ok(MerkleNode::branch(
        identifier,
        vec![
            context.files_node("public", &headers.public)?,
            context.files_node("private", &headers.private)?,
            context.files_node("project", &headers.project)?,
        ],
    ))
}
