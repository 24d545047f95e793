//! Platform conditions, destinations, deployment targets and the run destination.

use crate::content::MerkleNode;
use crate::graph::target::{DeploymentTargets, Destination, PlatformCondition};
use crate::hashers::AspectContext;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Simulator or device a build is made for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunDestination {
    pub device_name: String,
    pub runtime_identifier: String,
}

impl RunDestination {
    pub fn new(device_name: impl Into<String>, runtime_identifier: impl Into<String>) -> Self {
        Self {
            device_name: device_name.into(),
            runtime_identifier: runtime_identifier.into(),
        }
    }
}

/// One child per covered platform, sorted by name.
pub fn hash_condition(
    context: &AspectContext<'_>,
    identifier: &str,
    condition: &PlatformCondition,
) -> MerkleNode {
    let names: BTreeSet<&str> = condition.platform_filters.iter().map(|f| f.as_str()).collect();
    MerkleNode::branch(
        identifier,
        names.into_iter().map(|name| context.leaf_str(name, name)).collect(),
    )
}

pub fn hash_destinations(
    context: &AspectContext<'_>,
    identifier: &str,
    destinations: &BTreeSet<Destination>,
) -> MerkleNode {
    let names: BTreeSet<&str> = destinations.iter().map(Destination::as_str).collect();
    MerkleNode::branch(
        identifier,
        names.into_iter().map(|name| context.leaf_str(name, name)).collect(),
    )
}

pub fn hash_deployment_targets(
    context: &AspectContext<'_>,
    identifier: &str,
    targets: &DeploymentTargets,
) -> MerkleNode {
    let versions = [
        ("ios", &targets.ios),
        ("macos", &targets.macos),
        ("tvos", &targets.tvos),
        ("visionos", &targets.visionos),
        ("watchos", &targets.watchos),
    ];
    let children = versions
        .into_iter()
        .filter_map(|(platform, version)| {
            version
                .as_ref()
                .map(|version| context.leaf_str(platform, version))
        })
        .collect();
    MerkleNode::branch(identifier, children)
}

/// The identifying strings of the destination are the child labels, so the
/// tree shows which device a hash was made for.
pub fn hash_run_destination(
    context: &AspectContext<'_>,
    identifier: &str,
    destination: &RunDestination,
) -> MerkleNode {
    MerkleNode::branch(
        identifier,
        vec![
            context.leaf_str(destination.device_name.clone(), &destination.device_name),
            context.leaf_str(
                destination.runtime_identifier.clone(),
                &destination.runtime_identifier,
            ),
        ],
    )
}
