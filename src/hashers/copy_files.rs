//! Copy files build phases.

use crate::content::MerkleNode;
use crate::error::HashingError;
use crate::graph::resources::{CopyFileElement, CopyFilesAction};
use crate::hashers::{platform, AspectContext};

pub fn hash(
    context: &AspectContext<'_>,
    identifier: &str,
    actions: &[CopyFilesAction],
) -> Result<MerkleNode, HashingError> {
    let mut children = Vec::with_capacity(actions.len());
    for action in actions {
        let mut files = Vec::with_capacity(action.files.len());
        for file in &action.files {
            files.push(hash_file(context, file)?);
        }
        files.sort_by(|a, b| a.identifier.cmp(&b.identifier));

        children.push(MerkleNode::branch(
            action.name.clone(),
            vec![
                context.leaf_str("destination", action.destination.as_str()),
                context.leaf_str("subpath", action.subpath.as_deref().unwrap_or_default()),
                MerkleNode::branch("files", files),
            ],
        ));
    }
    // Phases keep their relative order when names repeat.
    children.sort_by(|a, b| a.identifier.cmp(&b.identifier));
    Ok(MerkleNode::branch(identifier, children))
}

fn hash_file(
    context: &AspectContext<'_>,
    file: &CopyFileElement,
) -> Result<MerkleNode, HashingError> {
    let mut children = vec![
        MerkleNode::leaf("content", context.hash_file(&file.path)?),
        context.leaf_bool("code_sign_on_copy", file.code_sign_on_copy),
    ];
    if let Some(condition) = &file.condition {
        children.push(platform::hash_condition(context, "condition", condition));
    }
    Ok(MerkleNode::branch(context.label(&file.path), children))
}
