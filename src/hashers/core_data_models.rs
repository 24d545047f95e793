//! Core Data models (`.xcdatamodeld` bundles).

use crate::content::MerkleNode;
use crate::error::HashingError;
use crate::graph::resources::CoreDataModel;
use crate::hashers::AspectContext;

pub fn hash(
    context: &AspectContext<'_>,
    identifier: &str,
    models: &[CoreDataModel],
) -> Result<MerkleNode, HashingError> {
    let mut children = Vec::with_capacity(models.len());
    for model in models {
        children.push(MerkleNode::branch(
            context.label(&model.path),
            vec![
                MerkleNode::leaf("content", context.hash_file(&model.path)?),
                context.leaf_str("current_version", &model.current_version),
                context.files_node("versions", &model.versions)?,
            ],
        ));
    }
    children.sort_by(|a, b| a.identifier.cmp(&b.identifier));
    Ok(MerkleNode::branch(identifier, children))
}
