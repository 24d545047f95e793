//! Target dependencies.
//!
//! Target and project edges resolve to the already computed hash of the
//! dependency, so a target can only be hashed after everything it depends on.
//! Edge platform conditions do not take part.

use crate::content::MerkleNode;
use crate::error::HashingError;
use crate::graph::dependency::TargetDependency;
use crate::graph::GraphTarget;
use crate::hashers::AspectContext;
use crate::types::{Digest, HashedTargets, TargetIdentity};

pub fn hash(
    context: &AspectContext<'_>,
    identifier: &str,
    graph_target: &GraphTarget<'_>,
    hashed_targets: &HashedTargets,
) -> Result<MerkleNode, HashingError> {
    let mut children = Vec::with_capacity(graph_target.target.dependencies.len());
    for dependency in &graph_target.target.dependencies {
        children.push(hash_dependency(
            context,
            graph_target,
            dependency,
            hashed_targets,
        )?);
    }
    children.sort_by(|a, b| {
        a.identifier
            .cmp(&b.identifier)
            .then_with(|| a.hash.cmp(&b.hash))
    });
    Ok(MerkleNode::branch(identifier, children))
}

fn hash_dependency(
    context: &AspectContext<'_>,
    graph_target: &GraphTarget<'_>,
    dependency: &TargetDependency,
    hashed_targets: &HashedTargets,
) -> Result<MerkleNode, HashingError> {
    let content = context.content;
    let node = match dependency {
        TargetDependency::Target { name, .. } => {
            let identity = TargetIdentity::new(graph_target.path, name.clone());
            let digest = hashed_targets.get(&identity).copied().ok_or_else(|| {
                HashingError::MissingTargetHash {
                    source_target_name: graph_target.target.name.clone(),
                    dependency_project_path: graph_target.path.to_path_buf(),
                    dependency_target_name: name.clone(),
                }
            })?;
            MerkleNode::leaf(format!("target:{name}"), digest)
        }
        TargetDependency::Project { target, path, .. } => {
            let identity = TargetIdentity::new(path.clone(), target.clone());
            let digest = hashed_targets.get(&identity).copied().ok_or_else(|| {
                HashingError::MissingProjectTargetHash {
                    source_project_path: graph_target.path.to_path_buf(),
                    source_target_name: graph_target.target.name.clone(),
                    dependency_project_path: path.clone(),
                    dependency_target_name: target.clone(),
                }
            })?;
            MerkleNode::leaf(format!("project:{}:{target}", context.label(path)), digest)
        }
        TargetDependency::Framework { path, .. } => MerkleNode::leaf(
            format!("framework:{}", context.label(path)),
            context.hash_file(path)?,
        ),
        TargetDependency::Xcframework { path, .. } => MerkleNode::leaf(
            format!("xcframework:{}", context.label(path)),
            context.hash_file(path)?,
        ),
        TargetDependency::Library {
            path,
            public_headers,
            swift_module_map,
            ..
        } => {
            let mut parts = vec![
                "library".to_string(),
                context.hash_file(path)?.to_hex(),
                context.hash_file(public_headers)?.to_hex(),
            ];
            if let Some(module_map) = swift_module_map {
                parts.push(context.hash_file(module_map)?.to_hex());
            }
            MerkleNode::leaf(
                format!("library:{}", context.label(path)),
                content.hash_strings(&parts),
            )
        }
        TargetDependency::Package {
            product,
            package_type,
            ..
        } => MerkleNode::leaf(
            format!("package:{product}"),
            describe(context, &["package", product, package_type.as_str()]),
        ),
        TargetDependency::Sdk { name, status, .. } => MerkleNode::leaf(
            format!("sdk:{name}"),
            describe(context, &["sdk", name, status.as_str()]),
        ),
        TargetDependency::Xctest => MerkleNode::leaf("xctest", content.hash_str("xctest")),
    };
    Ok(node)
}

fn describe(context: &AspectContext<'_>, parts: &[&str]) -> Digest {
    let parts: Vec<String> = parts.iter().map(|p| p.to_string()).collect();
    context.content.hash_strings(&parts)
}
