//! Bundle resources and the privacy manifest.
//!
//! Each resource is a child keyed by its path label with the subchildren
//! `name`, `content`, `is_reference`, `tags` and, when set,
//! `inclusion_condition`. Two files with identical bytes but different names
//! therefore never hash alike.

use crate::content::{path, MerkleNode};
use crate::error::HashingError;
use crate::graph::resources::{PrivacyManifest, ResourceFileElement, ResourceFileElements};
use crate::hashers::{platform, AspectContext};

pub fn hash(
    context: &AspectContext<'_>,
    identifier: &str,
    resources: &ResourceFileElements,
) -> Result<MerkleNode, HashingError> {
    let mut children = Vec::with_capacity(resources.resources.len() + 1);
    for element in &resources.resources {
        children.push(hash_element(context, element)?);
    }
    children.sort_by(|a, b| a.identifier.cmp(&b.identifier));

    if let Some(manifest) = &resources.privacy_manifest {
        children.push(hash_privacy_manifest(context, manifest)?);
    }
    Ok(MerkleNode::branch(identifier, children))
}

fn hash_element(
    context: &AspectContext<'_>,
    element: &ResourceFileElement,
) -> Result<MerkleNode, HashingError> {
    let mut tags = element.tags().to_vec();
    tags.sort();

    let mut children = vec![
        context.leaf_str("name", &path::file_name_label(element.path())),
        MerkleNode::leaf("content", context.hash_file(element.path())?),
        context.leaf_bool("is_reference", element.is_reference()),
        context.leaf_strings("tags", &tags),
    ];
    if let Some(condition) = element.inclusion_condition() {
        children.push(platform::hash_condition(
            context,
            "inclusion_condition",
            condition,
        ));
    }
    Ok(MerkleNode::branch(context.label(element.path()), children))
}

fn hash_privacy_manifest(
    context: &AspectContext<'_>,
    manifest: &PrivacyManifest,
) -> Result<MerkleNode, HashingError> {
    let mut domains = manifest.tracking_domains.clone();
    domains.sort();
    Ok(MerkleNode::branch(
        "privacy_manifest",
        vec![
            context.leaf_bool("tracking", manifest.tracking),
            context.leaf_strings("tracking_domains", &domains),
            context.leaf_strings(
                "collected_data_types",
                &canonical_json(&manifest.collected_data_types)?,
            ),
            context.leaf_strings(
                "accessed_api_types",
                &canonical_json(&manifest.accessed_api_types)?,
            ),
        ],
    ))
}

/// JSON text of each entry; object keys come out sorted.
fn canonical_json(values: &[serde_json::Value]) -> Result<Vec<String>, HashingError> {
    values
        .iter()
        .map(|value| {
            serde_json::to_string(value)
                .map_err(|e| HashingError::Unsupported(format!("privacy manifest entry: {e}")))
        })
        .collect()
}
