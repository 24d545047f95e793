//! Path canonicalization and normalization utilities
//!
//! Hash inputs never carry absolute locations: every path that becomes part of a
//! digest is first rewritten relative to the owning project's source root.

use crate::error::HashingError;
use std::path::{Component, Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// Canonicalize a path on disk (resolves symlinks, `..`, `.`)
///
/// Used where identity on disk matters, e.g. detecting include cycles.
pub fn canonicalize_path(path: &Path) -> Result<PathBuf, HashingError> {
    dunce::canonicalize(path).map_err(|e| HashingError::io(path, e))
}

/// Normalize a path string for hashing (without filesystem access)
///
/// Normalizes Unicode to NFC, uses `/` separators and drops trailing
/// separators (except for the root).
pub fn normalize_path_string(path: &str) -> String {
    let normalized: String = path.nfc().collect();
    let mut result = normalized.replace('\\', "/");
    while result.len() > 1 && result.ends_with('/') {
        result.pop();
    }
    result
}

/// Resolve `.` and `..` components lexically.
pub fn lexical_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(out.components().next_back(), Some(Component::Normal(_)))
                    && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Express `path` relative to `root`, inserting `..` segments when it lies outside.
///
/// Relative inputs are taken as already relative to `root`.
pub fn relative_to(path: &Path, root: &Path) -> PathBuf {
    if path.is_relative() {
        return lexical_normalize(path);
    }
    let path = lexical_normalize(path);
    let root = lexical_normalize(root);

    let path_components: Vec<Component> = path.components().collect();
    let root_components: Vec<Component> = root.components().collect();
    let common = path_components
        .iter()
        .zip(root_components.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..root_components.len() {
        relative.push("..");
    }
    for component in &path_components[common..] {
        relative.push(component.as_os_str());
    }
    relative
}

/// Label used for a file inside a Merkle node: normalized, relative to `root`.
pub fn relative_label(path: &Path, root: &Path) -> String {
    let relative = relative_to(path, root);
    if relative.as_os_str().is_empty() {
        return ".".to_string();
    }
    normalize_path_string(&relative.to_string_lossy())
}

/// Last path component as a normalized string (empty for `/`).
pub fn file_name_label(path: &Path) -> String {
    path.file_name()
        .map(|name| normalize_path_string(&name.to_string_lossy()))
        .unwrap_or_default()
}
