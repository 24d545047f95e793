//! Target model: one buildable unit.

use crate::graph::dependency::TargetDependency;
use crate::graph::foreign_build::ForeignBuild;
use crate::graph::resources::{
    BuildableFolder, CopyFilesAction, CoreDataModel, Headers, PlistSource, ResourceFileElements,
};
use crate::graph::script::TargetScript;
use crate::graph::settings::Settings;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Product {
    App,
    StaticLibrary,
    DynamicLibrary,
    Framework,
    StaticFramework,
    UnitTests,
    UiTests,
    Bundle,
    CommandLineTool,
    AppExtension,
    AppClip,
    WatchApp,
    WatchExtension,
    TvTopShelfExtension,
    XpcService,
    SystemExtension,
    ExtensionKitExtension,
    Macro,
}

impl Product {
    pub fn as_str(&self) -> &'static str {
        match self {
            Product::App => "app",
            Product::StaticLibrary => "static_library",
            Product::DynamicLibrary => "dynamic_library",
            Product::Framework => "framework",
            Product::StaticFramework => "static_framework",
            Product::UnitTests => "unit_tests",
            Product::UiTests => "ui_tests",
            Product::Bundle => "bundle",
            Product::CommandLineTool => "command_line_tool",
            Product::AppExtension => "app_extension",
            Product::AppClip => "app_clip",
            Product::WatchApp => "watch_app",
            Product::WatchExtension => "watch_extension",
            Product::TvTopShelfExtension => "tv_top_shelf_extension",
            Product::XpcService => "xpc_service",
            Product::SystemExtension => "system_extension",
            Product::ExtensionKitExtension => "extension_kit_extension",
            Product::Macro => "macro",
        }
    }

    pub const ALL: [Product; 18] = [
        Product::App,
        Product::StaticLibrary,
        Product::DynamicLibrary,
        Product::Framework,
        Product::StaticFramework,
        Product::UnitTests,
        Product::UiTests,
        Product::Bundle,
        Product::CommandLineTool,
        Product::AppExtension,
        Product::AppClip,
        Product::WatchApp,
        Product::WatchExtension,
        Product::TvTopShelfExtension,
        Product::XpcService,
        Product::SystemExtension,
        Product::ExtensionKitExtension,
        Product::Macro,
    ];
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Product {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Product::ALL
            .iter()
            .copied()
            .find(|product| product.as_str() == s)
            .ok_or_else(|| format!("unknown product '{}'", s))
    }
}

/// Device family a target can run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    Iphone,
    Ipad,
    Mac,
    MacWithIpadDesign,
    MacCatalyst,
    AppleWatch,
    AppleTv,
    AppleVision,
    AppleVisionWithIpadDesign,
}

impl Destination {
    pub fn as_str(&self) -> &'static str {
        match self {
            Destination::Iphone => "iPhone",
            Destination::Ipad => "iPad",
            Destination::Mac => "mac",
            Destination::MacWithIpadDesign => "macWithiPadDesign",
            Destination::MacCatalyst => "macCatalyst",
            Destination::AppleWatch => "appleWatch",
            Destination::AppleTv => "appleTv",
            Destination::AppleVision => "appleVision",
            Destination::AppleVisionWithIpadDesign => "appleVisionWithiPadDesign",
        }
    }
}

/// Platform filter used by inclusion conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformFilter {
    Ios,
    Macos,
    Tvos,
    Watchos,
    Visionos,
    Catalyst,
    Driverkit,
}

impl PlatformFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformFilter::Ios => "ios",
            PlatformFilter::Macos => "macos",
            PlatformFilter::Tvos => "tvos",
            PlatformFilter::Watchos => "watchos",
            PlatformFilter::Visionos => "visionos",
            PlatformFilter::Catalyst => "catalyst",
            PlatformFilter::Driverkit => "driverkit",
        }
    }
}

/// Restricts an element to a set of platforms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PlatformCondition {
    pub platform_filters: BTreeSet<PlatformFilter>,
}

impl PlatformCondition {
    pub fn when(filters: impl IntoIterator<Item = PlatformFilter>) -> Self {
        Self {
            platform_filters: filters.into_iter().collect(),
        }
    }
}

/// Minimum OS versions per platform.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeploymentTargets {
    #[serde(default)]
    pub ios: Option<String>,
    #[serde(default)]
    pub macos: Option<String>,
    #[serde(default)]
    pub watchos: Option<String>,
    #[serde(default)]
    pub tvos: Option<String>,
    #[serde(default)]
    pub visionos: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileCodeGen {
    Public,
    Private,
    Project,
    Disabled,
}

impl FileCodeGen {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileCodeGen::Public => "public",
            FileCodeGen::Private => "private",
            FileCodeGen::Project => "project",
            FileCodeGen::Disabled => "disabled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: PathBuf,
    #[serde(default)]
    pub compiler_flags: Option<String>,
    #[serde(default)]
    pub code_gen: Option<FileCodeGen>,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            compiler_flags: None,
            code_gen: None,
        }
    }
}

/// A buildable unit, as resolved by the graph loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub name: String,
    pub product: Product,
    #[serde(default)]
    pub product_name: Option<String>,
    pub bundle_id: String,
    #[serde(default)]
    pub destinations: BTreeSet<Destination>,
    #[serde(default)]
    pub deployment_targets: DeploymentTargets,
    #[serde(default)]
    pub sources: Vec<SourceFile>,
    #[serde(default)]
    pub resources: ResourceFileElements,
    #[serde(default)]
    pub copy_files: Vec<CopyFilesAction>,
    #[serde(default)]
    pub core_data_models: Vec<CoreDataModel>,
    #[serde(default)]
    pub headers: Option<Headers>,
    #[serde(default)]
    pub scripts: Vec<TargetScript>,
    #[serde(default)]
    pub environment: HashMap<String, String>,
    #[serde(default)]
    pub settings: Option<Settings>,
    #[serde(default)]
    pub dependencies: Vec<TargetDependency>,
    #[serde(default)]
    pub info_plist: Option<PlistSource>,
    #[serde(default)]
    pub entitlements: Option<PlistSource>,
    #[serde(default)]
    pub buildable_folders: Vec<BuildableFolder>,
    #[serde(default)]
    pub foreign_build: Option<ForeignBuild>,
}

impl Target {
    /// Target with no inputs, running on iPhone and iPad.
    pub fn new(name: impl Into<String>, product: Product, bundle_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            product,
            product_name: None,
            bundle_id: bundle_id.into(),
            destinations: [Destination::Iphone, Destination::Ipad].into_iter().collect(),
            deployment_targets: DeploymentTargets::default(),
            sources: Vec::new(),
            resources: ResourceFileElements::default(),
            copy_files: Vec::new(),
            core_data_models: Vec::new(),
            headers: None,
            scripts: Vec::new(),
            environment: HashMap::new(),
            settings: None,
            dependencies: Vec::new(),
            info_plist: None,
            entitlements: None,
            buildable_folders: Vec::new(),
            foreign_build: None,
        }
    }

    /// Product name, defaulting to the target name.
    pub fn product_name(&self) -> &str {
        self.product_name.as_deref().unwrap_or(&self.name)
    }
}
