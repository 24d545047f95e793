//! Resource-like target inputs: bundle resources, copy phases, data models,
//! headers, property lists and buildable folders.

use crate::graph::target::PlatformCondition;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResourceFileElement {
    File {
        path: PathBuf,
        #[serde(default)]
        tags: Vec<String>,
        #[serde(default)]
        inclusion_condition: Option<PlatformCondition>,
    },
    FolderReference {
        path: PathBuf,
        #[serde(default)]
        tags: Vec<String>,
        #[serde(default)]
        inclusion_condition: Option<PlatformCondition>,
    },
}

impl ResourceFileElement {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        ResourceFileElement::File {
            path: path.into(),
            tags: Vec::new(),
            inclusion_condition: None,
        }
    }

    pub fn folder_reference(path: impl Into<PathBuf>) -> Self {
        ResourceFileElement::FolderReference {
            path: path.into(),
            tags: Vec::new(),
            inclusion_condition: None,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ResourceFileElement::File { path, .. }
            | ResourceFileElement::FolderReference { path, .. } => path,
        }
    }

    pub fn tags(&self) -> &[String] {
        match self {
            ResourceFileElement::File { tags, .. }
            | ResourceFileElement::FolderReference { tags, .. } => tags,
        }
    }

    pub fn inclusion_condition(&self) -> Option<&PlatformCondition> {
        match self {
            ResourceFileElement::File {
                inclusion_condition,
                ..
            }
            | ResourceFileElement::FolderReference {
                inclusion_condition,
                ..
            } => inclusion_condition.as_ref(),
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, ResourceFileElement::FolderReference { .. })
    }
}

/// Declared privacy manifest (`PrivacyInfo.xcprivacy`) contents.
///
/// Data type and API entries are free-form dictionaries; they hash through
/// their canonical JSON text, whose object keys are always sorted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PrivacyManifest {
    #[serde(default)]
    pub tracking: bool,
    #[serde(default)]
    pub tracking_domains: Vec<String>,
    #[serde(default)]
    pub collected_data_types: Vec<serde_json::Value>,
    #[serde(default)]
    pub accessed_api_types: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResourceFileElements {
    #[serde(default)]
    pub resources: Vec<ResourceFileElement>,
    #[serde(default)]
    pub privacy_manifest: Option<PrivacyManifest>,
}

impl ResourceFileElements {
    pub fn new(resources: Vec<ResourceFileElement>) -> Self {
        Self {
            resources,
            privacy_manifest: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyFilesDestination {
    AbsolutePath,
    ProductsDirectory,
    Wrapper,
    Resources,
    Executables,
    JavaScript,
    Frameworks,
    SharedFrameworks,
    SharedSupport,
    Plugins,
    Other,
}

impl CopyFilesDestination {
    pub fn as_str(&self) -> &'static str {
        match self {
            CopyFilesDestination::AbsolutePath => "absolute_path",
            CopyFilesDestination::ProductsDirectory => "products_directory",
            CopyFilesDestination::Wrapper => "wrapper",
            CopyFilesDestination::Resources => "resources",
            CopyFilesDestination::Executables => "executables",
            CopyFilesDestination::JavaScript => "java_script",
            CopyFilesDestination::Frameworks => "frameworks",
            CopyFilesDestination::SharedFrameworks => "shared_frameworks",
            CopyFilesDestination::SharedSupport => "shared_support",
            CopyFilesDestination::Plugins => "plugins",
            CopyFilesDestination::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyFileElement {
    pub path: PathBuf,
    #[serde(default)]
    pub condition: Option<PlatformCondition>,
    #[serde(default)]
    pub code_sign_on_copy: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyFilesAction {
    pub name: String,
    pub destination: CopyFilesDestination,
    #[serde(default)]
    pub subpath: Option<String>,
    #[serde(default)]
    pub files: Vec<CopyFileElement>,
}

/// A `.xcdatamodeld` bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreDataModel {
    pub path: PathBuf,
    #[serde(default)]
    pub versions: Vec<PathBuf>,
    pub current_version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Headers {
    #[serde(default)]
    pub public: Vec<PathBuf>,
    #[serde(default)]
    pub private: Vec<PathBuf>,
    #[serde(default)]
    pub project: Vec<PathBuf>,
}

/// Info.plist or entitlements source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlistSource {
    File { path: PathBuf },
    Dictionary { content: BTreeMap<String, serde_json::Value> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderVisibility {
    Public,
    Private,
    Project,
}

impl HeaderVisibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeaderVisibility::Public => "public",
            HeaderVisibility::Private => "private",
            HeaderVisibility::Project => "project",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildableFolderFile {
    pub path: PathBuf,
    #[serde(default)]
    pub compiler_flags: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BuildableFolderException {
    #[serde(default)]
    pub excluded: Vec<PathBuf>,
    #[serde(default)]
    pub compiler_flags: BTreeMap<PathBuf, String>,
    #[serde(default)]
    pub public_headers: Vec<PathBuf>,
    #[serde(default)]
    pub private_headers: Vec<PathBuf>,
}

/// A folder synchronized with the build system; its files are resolved by the loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildableFolder {
    pub path: PathBuf,
    #[serde(default)]
    pub exceptions: Vec<BuildableFolderException>,
    #[serde(default)]
    pub resolved_files: Vec<BuildableFolderFile>,
}

impl BuildableFolder {
    pub fn is_excluded(&self, path: &Path) -> bool {
        self.exceptions
            .iter()
            .any(|e| e.excluded.iter().any(|excluded| excluded == path))
    }

    /// Header visibility declared by the exceptions, if any.
    pub fn header_visibility(&self, path: &Path) -> Option<HeaderVisibility> {
        for exception in &self.exceptions {
            if exception.public_headers.iter().any(|p| p == path) {
                return Some(HeaderVisibility::Public);
            }
            if exception.private_headers.iter().any(|p| p == path) {
                return Some(HeaderVisibility::Private);
            }
        }
        None
    }

    /// Compiler flags for `file`: an exception entry wins over the resolved value.
    pub fn compiler_flags<'a>(&'a self, file: &'a BuildableFolderFile) -> Option<&'a str> {
        self.exceptions
            .iter()
            .find_map(|e| e.compiler_flags.get(&file.path))
            .map(String::as_str)
            .or(file.compiler_flags.as_deref())
    }
}
