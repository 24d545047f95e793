//! Cache inputs of foreign (non-Xcode) builds.
//!
//! Per-input digests are combined in the order the inputs are declared. An
//! empty input list hashes like the empty string.

use crate::content::walker::{Walker, WalkerConfig};
use crate::content::{path, CachedContentHasher, ContentHashing, PathHashCache};
use crate::error::HashingError;
use crate::graph::foreign_build::ForeignBuildInput;
use crate::types::Digest;
use globset::GlobBuilder;
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};
use std::process::Command;
use tracing::debug;

pub struct ForeignBuildHasher<'a> {
    content: &'a dyn ContentHashing,
    walker_config: WalkerConfig,
}

impl<'a> ForeignBuildHasher<'a> {
    pub fn new(content: &'a dyn ContentHashing) -> Self {
        Self {
            content,
            walker_config: WalkerConfig::default(),
        }
    }

    pub fn with_walker_config(mut self, walker_config: WalkerConfig) -> Self {
        self.walker_config = walker_config;
        self
    }

    /// Digest of `inputs`, resolved against `root`.
    pub fn hash(
        &self,
        inputs: &[ForeignBuildInput],
        root: &Path,
        hashed_paths: &PathHashCache,
    ) -> Result<Digest, HashingError> {
        let cached = CachedContentHasher::new(self.content, hashed_paths);
        let mut digests = Vec::with_capacity(inputs.len());
        for input in inputs {
            let digest = match input {
                ForeignBuildInput::File { path } | ForeignBuildInput::Folder { path } => {
                    cached.hash_path(&path::lexical_normalize(&root.join(path)))?
                }
                ForeignBuildInput::Glob { pattern } => self.hash_glob(&cached, pattern, root)?,
                ForeignBuildInput::Script { script } => self.hash_script(script, root)?,
            };
            digests.push(digest);
        }
        Ok(cached.hash_digests(&digests))
    }

    /// Matching files in sorted order, each as `(relative path, content)`.
    fn hash_glob(
        &self,
        cached: &CachedContentHasher<'_>,
        pattern: &str,
        root: &Path,
    ) -> Result<Digest, HashingError> {
        let normalized = normalize_pattern(pattern)?;
        let matcher = GlobBuilder::new(&normalized)
            .literal_separator(true)
            .build()
            .map_err(|e| HashingError::InvalidGlob {
                pattern: pattern.to_string(),
                message: e.kind().to_string(),
            })?
            .compile_matcher();

        let base = path::lexical_normalize(&root.join(literal_prefix(&normalized)));
        let files = if base.is_dir() {
            Walker::with_config(base, self.walker_config.clone()).files()?
        } else {
            Vec::new()
        };

        let mut parts = Vec::new();
        for file in files {
            let relative = path::relative_label(&file, root);
            let candidate: &Path = if Path::new(&normalized).is_absolute() {
                &file
            } else {
                Path::new(&relative)
            };
            if !matcher.is_match(candidate) {
                continue;
            }
            parts.push(relative.clone());
            parts.push(cached.hash_path(&file)?.to_hex());
        }
        debug!(pattern, matches = parts.len() / 2, "Expanded foreign build glob");
        Ok(cached.hash_strings(&parts))
    }

    /// Digest of the command's standard output, byte for byte.
    fn hash_script(&self, script: &str, root: &Path) -> Result<Digest, HashingError> {
        let output = Command::new("sh")
            .arg("-c")
            .arg(script)
            .current_dir(root)
            .output()
            .map_err(|e| HashingError::ScriptFailed {
                command: script.to_string(),
                status: "not started".to_string(),
                stderr: e.to_string(),
            })?;
        if !output.status.success() {
            return Err(HashingError::ScriptFailed {
                command: script.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(self.content.hash_bytes(&output.stdout))
    }
}

fn has_glob_syntax(name: &OsStr) -> bool {
    name.to_string_lossy()
        .contains(['*', '?', '[', ']', '{', '}'])
}

/// `pattern` with `.` and `..` folded out of its literal prefix, so it
/// compares against the normalized labels of the files it walks.
fn normalize_pattern(pattern: &str) -> Result<String, HashingError> {
    let mut literal = PathBuf::new();
    let mut wildcard = PathBuf::new();
    for component in Path::new(pattern).components() {
        let in_wildcard = !wildcard.as_os_str().is_empty();
        match component {
            Component::Normal(name) if in_wildcard || has_glob_syntax(name) => {
                wildcard.push(name)
            }
            Component::CurDir | Component::ParentDir if in_wildcard => {
                return Err(HashingError::InvalidGlob {
                    pattern: pattern.to_string(),
                    message: "`.` or `..` after a wildcard component".to_string(),
                });
            }
            other => literal.push(other.as_os_str()),
        }
    }
    let mut normalized = path::lexical_normalize(&literal);
    if !wildcard.as_os_str().is_empty() {
        normalized.push(wildcard);
    }
    Ok(normalized.to_string_lossy().into_owned())
}

/// Leading components of `pattern` that contain no glob syntax.
fn literal_prefix(pattern: &str) -> PathBuf {
    let mut prefix = PathBuf::new();
    for component in Path::new(pattern).components() {
        let is_literal = match component {
            Component::Normal(name) => !has_glob_syntax(name),
            _ => true,
        };
        if !is_literal {
            break;
        }
        prefix.push(component.as_os_str());
    }
    // The last literal component may name a file rather than a directory.
    if prefix.as_os_str().len() == pattern.len() {
        prefix.pop();
    }
    prefix
}
