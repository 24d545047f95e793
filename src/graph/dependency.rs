//! Target dependency edges.

use crate::graph::target::PlatformCondition;
use crate::types::TargetIdentity;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkingStatus {
    #[default]
    Required,
    Optional,
    None,
}

impl LinkingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkingStatus::Required => "required",
            LinkingStatus::Optional => "optional",
            LinkingStatus::None => "none",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageType {
    Runtime,
    RuntimeEmbedded,
    Plugin,
    Macro,
}

impl PackageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageType::Runtime => "runtime",
            PackageType::RuntimeEmbedded => "runtime_embedded",
            PackageType::Plugin => "plugin",
            PackageType::Macro => "macro",
        }
    }
}

/// Dependency of a target, as declared in its manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetDependency {
    /// Another target of the same project.
    Target {
        name: String,
        #[serde(default)]
        status: LinkingStatus,
        #[serde(default)]
        condition: Option<PlatformCondition>,
    },
    /// A target of another project.
    Project {
        target: String,
        path: PathBuf,
        #[serde(default)]
        status: LinkingStatus,
        #[serde(default)]
        condition: Option<PlatformCondition>,
    },
    Framework {
        path: PathBuf,
        #[serde(default)]
        status: LinkingStatus,
        #[serde(default)]
        condition: Option<PlatformCondition>,
    },
    Xcframework {
        path: PathBuf,
        #[serde(default)]
        expected_signature: Option<String>,
        #[serde(default)]
        status: LinkingStatus,
        #[serde(default)]
        condition: Option<PlatformCondition>,
    },
    Library {
        path: PathBuf,
        public_headers: PathBuf,
        #[serde(default)]
        swift_module_map: Option<PathBuf>,
        #[serde(default)]
        condition: Option<PlatformCondition>,
    },
    Package {
        product: String,
        #[serde(rename = "type")]
        package_type: PackageType,
        #[serde(default)]
        condition: Option<PlatformCondition>,
    },
    Sdk {
        name: String,
        #[serde(default)]
        status: LinkingStatus,
        #[serde(default)]
        condition: Option<PlatformCondition>,
    },
    /// Implicit dependency of test bundles on the test framework.
    Xctest,
}

impl TargetDependency {
    pub fn target(name: impl Into<String>) -> Self {
        TargetDependency::Target {
            name: name.into(),
            status: LinkingStatus::Required,
            condition: None,
        }
    }

    pub fn project(target: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        TargetDependency::Project {
            target: target.into(),
            path: path.into(),
            status: LinkingStatus::Required,
            condition: None,
        }
    }

    /// Graph target this edge points at, if it points at one.
    pub fn target_identity(&self, project_path: &Path) -> Option<TargetIdentity> {
        match self {
            TargetDependency::Target { name, .. } => {
                Some(TargetIdentity::new(project_path, name.clone()))
            }
            TargetDependency::Project { target, path, .. } => {
                Some(TargetIdentity::new(path.clone(), target.clone()))
            }
            TargetDependency::Framework { .. }
            | TargetDependency::Xcframework { .. }
            | TargetDependency::Library { .. }
            | TargetDependency::Package { .. }
            | TargetDependency::Sdk { .. }
            | TargetDependency::Xctest => None,
        }
    }

    pub fn condition(&self) -> Option<&PlatformCondition> {
        match self {
            TargetDependency::Target { condition, .. }
            | TargetDependency::Project { condition, .. }
            | TargetDependency::Framework { condition, .. }
            | TargetDependency::Xcframework { condition, .. }
            | TargetDependency::Library { condition, .. }
            | TargetDependency::Package { condition, .. }
            | TargetDependency::Sdk { condition, .. } => condition.as_ref(),
            TargetDependency::Xctest => None,
        }
    }
}
