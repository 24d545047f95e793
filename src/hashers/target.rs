//! Target content hashing.
//!
//! Every aspect of a target becomes one child of the target's root node, in
//! this fixed order:
//!
//! name, product, bundle_id, product_name, dependencies, sources, resources,
//! copy_files, core_data_models, scripts, environment, destinations, headers,
//! info_plist, entitlements, buildable_folders, foreign_build,
//! deployment_targets, project_settings, target_settings, destination,
//! additional_strings
//!
//! Optional aspects are left out when the target does not declare them. The
//! root hash is the target's content hash.
//!
//! Targets of an external project that carries a precomputed hash short-circuit
//! to: external, name, product, project_settings, target_settings,
//! dependencies, destinations, additional_strings.

use crate::content::walker::WalkerConfig;
use crate::content::{CachedContentHasher, ContentHashing, MerkleNode, PathHashCache};
use crate::error::HashingError;
use crate::graph::GraphTarget;
use crate::hashers::foreign::ForeignBuildHasher;
use crate::hashers::platform::{self, RunDestination};
use crate::hashers::settings::{self, WarningFilter};
use crate::hashers::{
    buildable_folders, copy_files, core_data_models, dependencies, headers, plist, resources,
    scripts, sources, AspectContext,
};
use crate::types::{Digest, HashedTargets};
use serde::Serialize;
use tracing::debug;

/// Per-aspect hashes of a target, for explaining why a hash changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TargetContentHashSubhashes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external: Option<Digest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Digest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Digest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<Digest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copy_files: Option<Digest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub core_data_models: Option<Digest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scripts: Option<Digest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<Digest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destinations: Option<Digest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<Digest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info_plist: Option<Digest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entitlements: Option<Digest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buildable_folders: Option<Digest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreign_build: Option<Digest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_targets: Option<Digest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_settings: Option<Digest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_settings: Option<Digest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<Digest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_strings: Option<Digest>,
}

impl TargetContentHashSubhashes {
    pub fn from_tree(tree: &MerkleNode) -> Self {
        let get = |identifier: &str| tree.child(identifier).map(|node| node.hash);
        Self {
            external: get("external"),
            dependencies: get("dependencies"),
            sources: get("sources"),
            resources: get("resources"),
            copy_files: get("copy_files"),
            core_data_models: get("core_data_models"),
            scripts: get("scripts"),
            environment: get("environment"),
            destinations: get("destinations"),
            headers: get("headers"),
            info_plist: get("info_plist"),
            entitlements: get("entitlements"),
            buildable_folders: get("buildable_folders"),
            foreign_build: get("foreign_build"),
            deployment_targets: get("deployment_targets"),
            project_settings: get("project_settings"),
            target_settings: get("target_settings"),
            destination: get("destination"),
            additional_strings: get("additional_strings"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetContentHash {
    pub hash: Digest,
    pub subhashes: TargetContentHashSubhashes,
    #[serde(skip)]
    pub tree: MerkleNode,
}

pub struct TargetContentHasher<'a> {
    content: &'a dyn ContentHashing,
    warning_filter: WarningFilter,
    walker_config: WalkerConfig,
}

impl<'a> TargetContentHasher<'a> {
    pub fn new(content: &'a dyn ContentHashing) -> Self {
        Self {
            content,
            warning_filter: WarningFilter::default(),
            walker_config: WalkerConfig::default(),
        }
    }

    pub fn with_warning_filter(mut self, warning_filter: WarningFilter) -> Self {
        self.warning_filter = warning_filter;
        self
    }

    /// Names skipped when expanding foreign build globs.
    pub fn with_ignore_names(mut self, ignore_names: Vec<String>) -> Self {
        self.walker_config.ignore_names = ignore_names;
        self
    }

    /// Hash one target.
    ///
    /// Every target and project dependency of `graph_target` must already have
    /// an entry in `hashed_targets`.
    pub fn content_hash(
        &self,
        graph_target: &GraphTarget<'_>,
        hashed_targets: &HashedTargets,
        hashed_paths: &PathHashCache,
        destination: Option<&RunDestination>,
        additional_strings: &[String],
    ) -> Result<TargetContentHash, HashingError> {
        let cached = CachedContentHasher::new(self.content, hashed_paths);
        let context = AspectContext::new(&cached, graph_target.project.source_root());

        let children = match graph_target.project.external_hash() {
            Some(external) => self.external_children(
                &context,
                external,
                graph_target,
                hashed_targets,
                additional_strings,
            )?,
            None => self.children(
                &context,
                graph_target,
                hashed_targets,
                hashed_paths,
                destination,
                additional_strings,
            )?,
        };

        let tree = MerkleNode::branch(graph_target.target.name.clone(), children);
        debug!(
            target = %graph_target.identity(),
            hash = %tree.hash,
            "Hashed target"
        );
        Ok(TargetContentHash {
            hash: tree.hash,
            subhashes: TargetContentHashSubhashes::from_tree(&tree),
            tree,
        })
    }

    fn children(
        &self,
        context: &AspectContext<'_>,
        graph_target: &GraphTarget<'_>,
        hashed_targets: &HashedTargets,
        hashed_paths: &PathHashCache,
        destination: Option<&RunDestination>,
        additional_strings: &[String],
    ) -> Result<Vec<MerkleNode>, HashingError> {
        let target = graph_target.target;
        let mut children = vec![
            context.leaf_str("name", &target.name),
            context.leaf_str("product", target.product.as_str()),
            context.leaf_str("bundle_id", &target.bundle_id),
            context.leaf_str("product_name", target.product_name()),
            dependencies::hash(context, "dependencies", graph_target, hashed_targets)?,
            sources::hash(context, "sources", &target.sources)?,
            resources::hash(context, "resources", &target.resources)?,
            copy_files::hash(context, "copy_files", &target.copy_files)?,
            core_data_models::hash(context, "core_data_models", &target.core_data_models)?,
            scripts::hash(context, "scripts", &target.scripts)?,
            MerkleNode::leaf("environment", context.content.hash_map(&target.environment)),
            platform::hash_destinations(context, "destinations", &target.destinations),
        ];
        if let Some(target_headers) = &target.headers {
            children.push(headers::hash(context, "headers", target_headers)?);
        }
        if let Some(info_plist) = &target.info_plist {
            children.push(plist::hash(context, "info_plist", info_plist)?);
        }
        if let Some(entitlements) = &target.entitlements {
            children.push(plist::hash(context, "entitlements", entitlements)?);
        }
        if !target.buildable_folders.is_empty() {
            children.push(buildable_folders::hash(
                context,
                "buildable_folders",
                &target.buildable_folders,
            )?);
        }
        if let Some(foreign_build) = &target.foreign_build {
            let inputs = ForeignBuildHasher::new(self.content)
                .with_walker_config(self.walker_config.clone())
                .hash(&foreign_build.inputs, context.source_root, hashed_paths)?;
            let mut foreign = vec![
                context.leaf_str("script", &foreign_build.script),
                MerkleNode::leaf("inputs", inputs),
            ];
            if let Some(output) = &foreign_build.output {
                foreign.push(context.leaf_str("output", &context.label(output)));
            }
            children.push(MerkleNode::branch("foreign_build", foreign));
        }
        children.push(platform::hash_deployment_targets(
            context,
            "deployment_targets",
            &target.deployment_targets,
        ));
        children.extend(self.settings_children(context, graph_target)?);
        if let Some(destination) = destination {
            children.push(platform::hash_run_destination(
                context,
                "destination",
                destination,
            ));
        }
        children.push(context.leaf_strings("additional_strings", additional_strings));
        Ok(children)
    }

    /// Children of a target whose project carries an external hash.
    fn external_children(
        &self,
        context: &AspectContext<'_>,
        external: &str,
        graph_target: &GraphTarget<'_>,
        hashed_targets: &HashedTargets,
        additional_strings: &[String],
    ) -> Result<Vec<MerkleNode>, HashingError> {
        let target = graph_target.target;
        let mut children = vec![
            context.leaf_str("external", external),
            context.leaf_str("name", &target.name),
            context.leaf_str("product", target.product.as_str()),
        ];
        children.extend(self.settings_children(context, graph_target)?);
        children.push(dependencies::hash(
            context,
            "dependencies",
            graph_target,
            hashed_targets,
        )?);
        children.push(platform::hash_destinations(
            context,
            "destinations",
            &target.destinations,
        ));
        children.push(context.leaf_strings("additional_strings", additional_strings));
        Ok(children)
    }

    fn settings_children(
        &self,
        context: &AspectContext<'_>,
        graph_target: &GraphTarget<'_>,
    ) -> Result<Vec<MerkleNode>, HashingError> {
        let mut children = vec![settings::hash(
            context,
            &self.warning_filter,
            "project_settings",
            &graph_target.project.settings,
        )?];
        if let Some(target_settings) = &graph_target.target.settings {
            children.push(settings::hash(
                context,
                &self.warning_filter,
                "target_settings",
                target_settings,
            )?);
        }
        Ok(children)
    }
}
