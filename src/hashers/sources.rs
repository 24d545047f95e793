//! Source files: content, compiler flags and code generation visibility.

use crate::content::MerkleNode;
use crate::error::HashingError;
use crate::graph::target::SourceFile;
use crate::hashers::AspectContext;

pub fn hash(
    context: &AspectContext<'_>,
    identifier: &str,
    sources: &[SourceFile],
) -> Result<MerkleNode, HashingError> {
    let mut children = Vec::with_capacity(sources.len());
    for source in sources {
        let mut file = vec![MerkleNode::leaf("content", context.hash_file(&source.path)?)];
        if let Some(flags) = &source.compiler_flags {
            file.push(context.leaf_str("compiler_flags", flags));
        }
        if let Some(code_gen) = &source.code_gen {
            file.push(context.leaf_str("code_gen", code_gen.as_str()));
        }
        children.push(MerkleNode::branch(context.label(&source.path), file));
    }
    children.sort_by(|a, b| a.identifier.cmp(&b.identifier));
    Ok(MerkleNode::branch(identifier, children))
}
