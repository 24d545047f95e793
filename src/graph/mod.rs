//! Resolved dependency graph handed over by the graph loader.
//!
//! The model is read-only to the hashers. It deserializes from JSON so that
//! any loader can produce it; `topological_levels` is the acyclicity check the
//! hashers rely on.

pub mod dependency;
pub mod foreign_build;
pub mod project;
pub mod resources;
pub mod script;
pub mod settings;
pub mod target;

pub use dependency::{LinkingStatus, PackageType, TargetDependency};
pub use foreign_build::{ForeignBuild, ForeignBuildInput};
pub use project::{Project, ProjectKind};
pub use target::{Destination, Product, Target};

use crate::error::{ConfigError, HashingError};
use crate::types::TargetIdentity;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub name: String,
    /// Workspace or project directory the graph was loaded from.
    pub path: PathBuf,
    #[serde(default)]
    pub projects: Vec<Project>,
}

/// Borrowed view of one target together with its owning project.
#[derive(Debug, Clone, Copy)]
pub struct GraphTarget<'a> {
    pub path: &'a Path,
    pub target: &'a Target,
    pub project: &'a Project,
}

impl GraphTarget<'_> {
    pub fn identity(&self) -> TargetIdentity {
        TargetIdentity::new(self.path, self.target.name.clone())
    }
}

impl Graph {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, projects: Vec<Project>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            projects,
        }
    }

    /// Read a graph serialized as JSON.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Graph {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| ConfigError::Graph {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn project(&self, path: &Path) -> Option<&Project> {
        self.projects.iter().find(|p| p.path == path)
    }

    pub fn target(&self, identity: &TargetIdentity) -> Option<GraphTarget<'_>> {
        let project = self.project(&identity.project_path)?;
        let target = project.target(&identity.target_name)?;
        Some(GraphTarget {
            path: &project.path,
            target,
            project,
        })
    }

    /// Every target, ordered by identity.
    pub fn targets(&self) -> Vec<GraphTarget<'_>> {
        let mut targets: Vec<GraphTarget<'_>> = self
            .projects
            .iter()
            .flat_map(|project| {
                project.targets.iter().map(move |target| GraphTarget {
                    path: &project.path,
                    target,
                    project,
                })
            })
            .collect();
        targets.sort_by_key(|t| t.identity());
        targets
    }

    /// Targets grouped by dependency depth: level 0 has no target dependencies,
    /// and every target appears after all the targets it depends on.
    ///
    /// Within a level targets are ordered by identity.
    pub fn topological_levels(&self) -> Result<Vec<Vec<GraphTarget<'_>>>, HashingError> {
        let targets: BTreeMap<TargetIdentity, GraphTarget<'_>> = self
            .targets()
            .into_iter()
            .map(|t| (t.identity(), t))
            .collect();

        let mut pending: BTreeMap<TargetIdentity, usize> = BTreeMap::new();
        let mut dependents: BTreeMap<TargetIdentity, Vec<TargetIdentity>> = BTreeMap::new();
        for (identity, graph_target) in &targets {
            let edges: BTreeSet<TargetIdentity> = graph_target
                .target
                .dependencies
                .iter()
                .filter_map(|d| d.target_identity(graph_target.path))
                .collect();
            for edge in &edges {
                if !targets.contains_key(edge) {
                    return Err(HashingError::MissingTarget {
                        project_path: edge.project_path.clone(),
                        target_name: edge.target_name.clone(),
                    });
                }
                dependents
                    .entry(edge.clone())
                    .or_default()
                    .push(identity.clone());
            }
            pending.insert(identity.clone(), edges.len());
        }

        let mut levels = Vec::new();
        let mut ready: Vec<TargetIdentity> = pending
            .iter()
            .filter(|(_, count)| **count == 0)
            .map(|(identity, _)| identity.clone())
            .collect();
        let mut visited = 0;
        while !ready.is_empty() {
            let mut next = BTreeSet::new();
            for identity in &ready {
                pending.remove(identity);
                for dependent in dependents.get(identity).into_iter().flatten() {
                    if let Some(count) = pending.get_mut(dependent) {
                        *count -= 1;
                        if *count == 0 {
                            next.insert(dependent.clone());
                        }
                    }
                }
            }
            visited += ready.len();
            levels.push(ready.iter().filter_map(|i| targets.get(i).copied()).collect());
            ready = next.into_iter().collect();
        }

        if visited != targets.len() {
            return Err(HashingError::CycleDetected(
                pending.keys().map(|i| i.to_string()).collect(),
            ));
        }
        Ok(levels)
    }
}
