//! Info.plist and entitlements.

use crate::content::MerkleNode;
use crate::error::HashingError;
use crate::graph::resources::PlistSource;
use crate::hashers::AspectContext;

pub fn hash(
    context: &AspectContext<'_>,
    identifier: &str,
    plist: &PlistSource,
) -> Result<MerkleNode, HashingError> {
    let child = match plist {
        PlistSource::File { path } => MerkleNode::leaf(context.label(path), context.hash_file(path)?),
        PlistSource::Dictionary { content } => {
            let text = serde_json::to_string(content)
                .map_err(|e| HashingError::Unsupported(format!("{identifier} dictionary: {e}")))?;
            context.leaf_str("dictionary", &text)
        }
    };
    Ok(MerkleNode::branch(identifier, vec![child]))
}
