//! Build phase scripts.
//!
//! Path-like fields are canonicalized before hashing so that no absolute
//! location leaks into the digest:
//!
//! - `$(SRCROOT)/x` resolves `x` against the source root,
//! - any other build variable keeps the text from its first `$` onward,
//! - plain relative paths resolve against the source root.
//!
//! Inputs that resolve to a path are content-hashed. An input missing on disk
//! hashes as its relative path instead of failing. No other aspect tolerates
//! missing files.

use crate::content::{path, MerkleNode};
use crate::error::HashingError;
use crate::graph::script::{Script, TargetScript};
use crate::hashers::AspectContext;
use crate::types::Digest;
use std::path::{Path, PathBuf};
use tracing::debug;

const SRCROOT_TOKENS: &[&str] = &["$(SRCROOT)", "${SRCROOT}", "$SRCROOT"];

#[derive(Debug, Clone, PartialEq, Eq)]
enum CanonicalPath {
    /// Location on disk.
    Resolved(PathBuf),
    /// Text that depends on the build environment.
    Variable(String),
}

fn canonicalize(raw: &str, source_root: &Path) -> CanonicalPath {
    for token in SRCROOT_TOKENS {
        // The bare form must end at a separator, otherwise it names another variable.
        let delimited = token.ends_with([')', '}']);
        for (index, _) in raw.match_indices(token) {
            let rest = &raw[index + token.len()..];
            if delimited || rest.is_empty() || rest.starts_with('/') {
                let rest = rest.trim_start_matches('/');
                return CanonicalPath::Resolved(path::lexical_normalize(&source_root.join(rest)));
            }
        }
    }
    if let Some(index) = raw.find('$') {
        return CanonicalPath::Variable(raw[index..].to_string());
    }
    CanonicalPath::Resolved(path::lexical_normalize(&source_root.join(raw)))
}

/// `(label, digest)` of an input, degrading to its label when it is missing.
fn hash_input(context: &AspectContext<'_>, raw: &str) -> Result<(String, Digest), HashingError> {
    match canonicalize(raw, context.source_root) {
        CanonicalPath::Variable(text) => Ok((text.clone(), context.content.hash_str(&text))),
        CanonicalPath::Resolved(resolved) => {
            let label = path::relative_label(&resolved, context.source_root);
            match context.content.hash_path(&resolved) {
                Ok(digest) => Ok((label, digest)),
                Err(e) if e.is_not_found() => {
                    debug!(input = %label, "Script input missing, hashing its path");
                    let digest = context.content.hash_str(&label);
                    Ok((label, digest))
                }
                Err(e) => Err(e),
            }
        }
    }
}

/// Outputs are never read: they hash as their canonical text.
fn output_text(raw: &str, source_root: &Path) -> String {
    match canonicalize(raw, source_root) {
        CanonicalPath::Variable(text) => text,
        CanonicalPath::Resolved(resolved) => path::relative_label(&resolved, source_root),
    }
}

fn inputs_node(
    context: &AspectContext<'_>,
    identifier: &str,
    raws: &[String],
) -> Result<MerkleNode, HashingError> {
    let mut children = Vec::with_capacity(raws.len());
    for raw in raws {
        let (label, digest) = hash_input(context, raw)?;
        children.push(MerkleNode::leaf(label, digest));
    }
    children.sort_by(|a, b| a.identifier.cmp(&b.identifier));
    Ok(MerkleNode::branch(identifier, children))
}

fn outputs_node(context: &AspectContext<'_>, identifier: &str, raws: &[String]) -> MerkleNode {
    let mut texts: Vec<String> = raws
        .iter()
        .map(|raw| output_text(raw, context.source_root))
        .collect();
    texts.sort();
    context.leaf_strings(identifier, &texts)
}

fn body_nodes(context: &AspectContext<'_>, script: &Script) -> Result<Vec<MerkleNode>, HashingError> {
    Ok(match script {
        Script::Tool { path, args } => vec![
            context.leaf_str("tool", path),
            context.leaf_strings("arguments", args),
        ],
        Script::ScriptPath { path, args } => {
            let (_, digest) = hash_input(context, path)?;
            vec![
                MerkleNode::leaf("script_path", digest),
                context.leaf_strings("arguments", args),
            ]
        }
        Script::Embedded { source } => vec![
            context.leaf_str("embedded", source),
            context.leaf_strings("arguments", &[]),
        ],
    })
}

fn hash_script(
    context: &AspectContext<'_>,
    script: &TargetScript,
) -> Result<MerkleNode, HashingError> {
    let mut children = vec![
        inputs_node(context, "input_paths", &script.input_paths)?,
        inputs_node(context, "input_file_list_paths", &script.input_file_list_paths)?,
    ];
    if let Some(dependency_file) = &script.dependency_file {
        let (label, digest) = hash_input(context, dependency_file)?;
        children.push(MerkleNode::branch(
            "dependency_file",
            vec![MerkleNode::leaf(label, digest)],
        ));
    }
    children.push(outputs_node(context, "output_paths", &script.output_paths));
    children.push(outputs_node(
        context,
        "output_file_list_paths",
        &script.output_file_list_paths,
    ));
    children.push(context.leaf_str("name", &script.name));
    children.extend(body_nodes(context, &script.script)?);
    children.push(context.leaf_str("order", script.order.as_str()));
    children.push(context.leaf_str("shell_path", &script.shell_path));
    children.push(context.leaf_bool("show_env_vars_in_log", script.show_env_vars_in_log));
    children.push(context.leaf_bool(
        "based_on_dependency_analysis",
        script.based_on_dependency_analysis,
    ));
    children.push(context.leaf_bool(
        "run_for_install_builds_only",
        script.run_for_install_builds_only,
    ));
    Ok(MerkleNode::branch(script.name.clone(), children))
}

/// Scripts keep their declared order, which is the order the phases run in.
pub fn hash(
    context: &AspectContext<'_>,
    identifier: &str,
    scripts: &[TargetScript],
) -> Result<MerkleNode, HashingError> {
    let children = scripts
        .iter()
        .map(|script| hash_script(context, script))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(MerkleNode::branch(identifier, children))
}
