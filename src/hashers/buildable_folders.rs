//! Buildable (synchronized) folders.

use crate::content::MerkleNode;
use crate::error::HashingError;
use crate::graph::resources::BuildableFolder;
use crate::hashers::AspectContext;

pub fn hash(
    context: &AspectContext<'_>,
    identifier: &str,
    folders: &[BuildableFolder],
) -> Result<MerkleNode, HashingError> {
    let mut children = Vec::with_capacity(folders.len());
    for folder in folders {
        children.push(hash_folder(context, folder)?);
    }
    children.sort_by(|a, b| a.identifier.cmp(&b.identifier));
    Ok(MerkleNode::branch(identifier, children))
}

fn hash_folder(
    context: &AspectContext<'_>,
    folder: &BuildableFolder,
) -> Result<MerkleNode, HashingError> {
    let mut files = Vec::with_capacity(folder.resolved_files.len());
    for file in &folder.resolved_files {
        if folder.is_excluded(&file.path) {
            continue;
        }
        let mut children = vec![MerkleNode::leaf("content", context.hash_file(&file.path)?)];
        if let Some(flags) = folder.compiler_flags(file) {
            children.push(context.leaf_str("compiler_flags", flags));
        }
        if let Some(visibility) = folder.header_visibility(&file.path) {
            children.push(context.leaf_str("visibility", visibility.as_str()));
        }
        files.push(MerkleNode::branch(context.label(&file.path), children));
    }
    files.sort_by(|a, b| a.identifier.cmp(&b.identifier));
    Ok(MerkleNode::branch(context.label(&folder.path), files))
}
