//! XCConfig files and their `#include` chains.
//!
//! The composed text keeps every include directive as written and appends the
//! hash of the included file, so edits anywhere down the chain reach the
//! including file's hash.

use crate::content::{path, ContentHashing};
use crate::error::HashingError;
use std::path::{Path, PathBuf};

pub struct XcconfigHasher<'a> {
    content: &'a dyn ContentHashing,
}

struct Include<'l> {
    path: &'l str,
    optional: bool,
}

impl<'a> XcconfigHasher<'a> {
    pub fn new(content: &'a dyn ContentHashing) -> Self {
        Self { content }
    }

    /// Composed text of `path` with the hash of each included file appended.
    pub fn hash(&self, path: &Path) -> Result<String, HashingError> {
        let mut chain = Vec::new();
        self.compose(path, &mut chain)
    }

    fn compose(&self, file: &Path, chain: &mut Vec<PathBuf>) -> Result<String, HashingError> {
        let canonical = path::canonicalize_path(file)?;
        if chain.contains(&canonical) {
            let mut cycle = chain.clone();
            cycle.push(canonical);
            return Err(HashingError::XcconfigIncludeCycle(cycle));
        }
        let text = std::fs::read_to_string(&canonical).map_err(|e| HashingError::io(file, e))?;

        chain.push(canonical.clone());
        let base = canonical.parent().unwrap_or(Path::new("/")).to_path_buf();
        let mut lines = Vec::new();
        for line in text.lines() {
            let Some(include) = parse_include(line) else {
                lines.push(line.to_string());
                continue;
            };
            let included = base.join(include.path);
            if include.optional && !included.exists() {
                lines.push(line.to_string());
                continue;
            }
            let composed = self.compose(&included, chain)?;
            lines.push(format!("{line} {}", self.content.hash_str(&composed)));
        }
        chain.pop();
        Ok(lines.join("\n"))
    }
}

/// `#include "x"` or `#include? "x"`; anything else is an ordinary line.
fn parse_include(line: &str) -> Option<Include<'_>> {
    let rest = line.trim_start().strip_prefix("#include")?;
    let (optional, rest) = match rest.strip_prefix('?') {
        Some(rest) => (true, rest),
        None => (false, rest),
    };
    let rest = rest.trim_start().strip_prefix('"')?;
    let end = rest.find('"')?;
    Some(Include {
        path: &rest[..end],
        optional,
    })
}
