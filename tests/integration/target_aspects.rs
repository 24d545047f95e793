//! Integration tests for individual target aspects seen through the target hash

use super::support::{core_target, Workspace};
use cachekey::content::{ContentHasher, PathHashCache};
use cachekey::graph::resources::PlistSource;
use cachekey::graph::script::{Script, ScriptOrder, TargetScript};
use cachekey::graph::settings::{BuildVariant, Configuration, Settings};
use cachekey::graph::{Graph, Project, ProjectKind, Target};
use cachekey::hashers::{TargetContentHash, TargetContentHasher};
use cachekey::types::{HashedTargets, TargetIdentity};
use serde_json::json;
use std::collections::BTreeMap;
use std::path::PathBuf;

fn hash_target(workspace: &Workspace, project: Project) -> TargetContentHash {
    let name = project.targets[0].name.clone();
    let path = project.path.clone();
    let graph = Graph::new("Workspace", workspace.root(), vec![project]);
    let graph_target = graph.target(&TargetIdentity::new(path, name)).unwrap();
    let content = ContentHasher::new();
    TargetContentHasher::new(&content)
        .content_hash(&graph_target, &HashedTargets::new(), &PathHashCache::new(), None, &[])
        .unwrap()
}

fn core_project(workspace: &Workspace, target: Target) -> Project {
    Project::new(workspace.path("Core"), "Core", vec![target])
}

#[test]
fn test_subhashes_point_at_the_changed_aspect() {
    let workspace = Workspace::new();
    workspace.write("Core/Sources/Core.swift", "public struct Core {}");
    let before = hash_target(&workspace, core_project(&workspace, core_target()));

    workspace.write("Core/Sources/Core.swift", "public struct Core { }");
    let after = hash_target(&workspace, core_project(&workspace, core_target()));

    assert_ne!(before.subhashes.sources, after.subhashes.sources);
    assert_eq!(before.subhashes.resources, after.subhashes.resources);
    assert_eq!(before.subhashes.project_settings, after.subhashes.project_settings);
    assert_ne!(before.hash, after.hash);
}

#[test]
fn test_missing_script_input_is_tolerated() {
    let workspace = Workspace::new();
    workspace.write("Core/Sources/Core.swift", "public struct Core {}");
    let target = || {
        let mut target = core_target();
        let mut lint = TargetScript::new(
            "Lint",
            ScriptOrder::Pre,
            Script::Tool {
                path: "swiftlint".to_string(),
                args: vec!["lint".to_string()],
            },
        );
        lint.input_paths = vec!["$(SRCROOT)/.swiftlint.yml".to_string()];
        target.scripts = vec![lint];
        target
    };

    let missing = hash_target(&workspace, core_project(&workspace, target()));
    workspace.write("Core/.swiftlint.yml", "disabled_rules: [line_length]");
    let present = hash_target(&workspace, core_project(&workspace, target()));
    assert_ne!(missing.subhashes.scripts, present.subhashes.scripts);
}

#[test]
fn test_external_project_uses_its_precomputed_hash() {
    let workspace = Workspace::new();
    workspace.write("Core/Sources/Core.swift", "public struct Core {}");
    let external = |hash: &str| {
        let mut project = core_project(&workspace, core_target());
        project.kind = ProjectKind::External {
            hash: Some(hash.to_string()),
        };
        project
    };

    let before = hash_target(&workspace, external("1.2.3"));
    assert!(before.subhashes.external.is_some());
    assert!(before.subhashes.sources.is_none());

    workspace.write("Core/Sources/Core.swift", "public struct Core { let changed = true }");
    assert_eq!(before.hash, hash_target(&workspace, external("1.2.3")).hash);
    assert_ne!(before.hash, hash_target(&workspace, external("1.2.4")).hash);
}

#[test]
fn test_xcconfig_includes_reach_the_target_hash() {
    let workspace = Workspace::new();
    workspace.write("Core/Sources/Core.swift", "public struct Core {}");
    workspace.write("Core/Configs/Debug.xcconfig", "#include \"Shared.xcconfig\"\nDEBUG = 1");
    workspace.write("Core/Configs/Shared.xcconfig", "SWIFT_VERSION = 5.9");

    let project = || {
        let mut project = core_project(&workspace, core_target());
        project.settings = Settings {
            configurations: vec![Configuration {
                name: "Debug".to_string(),
                variant: BuildVariant::Debug,
                settings: BTreeMap::new(),
                xcconfig: Some(PathBuf::from("Configs/Debug.xcconfig")),
            }],
            ..Settings::default()
        };
        project
    };

    let before = hash_target(&workspace, project());
    workspace.write("Core/Configs/Shared.xcconfig", "SWIFT_VERSION = 6.0");
    let after = hash_target(&workspace, project());

    assert_ne!(before.subhashes.project_settings, after.subhashes.project_settings);
    assert_eq!(before.subhashes.sources, after.subhashes.sources);
}

#[test]
fn test_info_plist_dictionary_keys_are_order_independent() {
    let workspace = Workspace::new();
    workspace.write("Core/Sources/Core.swift", "public struct Core {}");
    let with_plist = |pairs: Vec<(&str, serde_json::Value)>| {
        let mut target = core_target();
        target.info_plist = Some(PlistSource::Dictionary {
            content: pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
        });
        hash_target(&workspace, core_project(&workspace, target)).subhashes.info_plist
    };

    let forward = with_plist(vec![
        ("CFBundleShortVersionString", json!("1.0")),
        ("UILaunchScreen", json!({})),
    ]);
    let backward = with_plist(vec![
        ("UILaunchScreen", json!({})),
        ("CFBundleShortVersionString", json!("1.0")),
    ]);
    assert!(forward.is_some());
    assert_eq!(forward, backward);
    assert_ne!(
        forward,
        with_plist(vec![("CFBundleShortVersionString", json!("1.1"))])
    );
}
