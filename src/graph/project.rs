//! Project model.

use crate::graph::settings::Settings;
use crate::graph::target::Target;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProjectKind {
    #[default]
    Local,
    /// Synthesized from an external package; `hash` identifies the resolved package.
    External {
        #[serde(default)]
        hash: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub path: PathBuf,
    /// Root that relative inputs resolve against; defaults to `path`.
    #[serde(default)]
    pub source_root: Option<PathBuf>,
    pub name: String,
    #[serde(default)]
    pub kind: ProjectKind,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub targets: Vec<Target>,
}

impl Project {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>, targets: Vec<Target>) -> Self {
        Self {
            path: path.into(),
            source_root: None,
            name: name.into(),
            kind: ProjectKind::Local,
            settings: Settings::default(),
            targets,
        }
    }

    pub fn source_root(&self) -> &Path {
        self.source_root.as_deref().unwrap_or(&self.path)
    }

    pub fn target(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.name == name)
    }

    /// Precomputed hash of an external package, when there is one.
    pub fn external_hash(&self) -> Option<&str> {
        match &self.kind {
            ProjectKind::External { hash } => hash.as_deref(),
            ProjectKind::Local => None,
        }
    }
}
