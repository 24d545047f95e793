//! Integration tests for whole-graph hashing

use super::support::{app_and_core, core_target, Workspace};
use cachekey::content::{ContentHasher, PathHashCache};
use cachekey::error::HashingError;
use cachekey::graph::resources::{ResourceFileElement, ResourceFileElements};
use cachekey::graph::settings::Settings;
use cachekey::graph::{Graph, GraphTarget, Product, Project, TargetDependency};
use cachekey::hashers::graph::GraphContentHashes;
use cachekey::hashers::{GraphContentHasher, RunDestination, TargetContentHasher};
use cachekey::types::{Digest, HashedTargets, TargetIdentity};
use std::collections::BTreeMap;

fn hash_all(graph: &Graph) -> GraphContentHashes {
    let content = ContentHasher::new();
    GraphContentHasher::new(&content)
        .content_hashes(graph, |_: &GraphTarget<'_>| true, None, &[])
        .unwrap()
}

fn hash_of(hashes: &GraphContentHashes, workspace: &Workspace, project: &str, target: &str) -> Digest {
    hashes[&TargetIdentity::new(workspace.path(project), target)].hash
}

/// Hashes keyed by target name only, for comparing workspaces at different locations.
fn by_name(hashes: &GraphContentHashes) -> BTreeMap<String, Digest> {
    hashes
        .iter()
        .map(|(identity, content_hash)| (identity.target_name.clone(), content_hash.hash))
        .collect()
}

#[test]
fn test_dependency_change_propagates_to_dependents() {
    let workspace = Workspace::new();
    let graph = app_and_core(&workspace);
    let before = hash_all(&graph);

    workspace.write("Core/Sources/Core.swift", "public struct Core { let id = 1 }");
    let after = hash_all(&graph);

    assert_ne!(
        hash_of(&before, &workspace, "Core", "Core"),
        hash_of(&after, &workspace, "Core", "Core")
    );
    assert_ne!(
        hash_of(&before, &workspace, "App", "App"),
        hash_of(&after, &workspace, "App", "App")
    );
}

#[test]
fn test_dependent_change_leaves_dependency_alone() {
    let workspace = Workspace::new();
    let graph = app_and_core(&workspace);
    let before = hash_all(&graph);

    workspace.write("App/Sources/App.swift", "import Core\nprint(Core())");
    let after = hash_all(&graph);

    assert_eq!(
        hash_of(&before, &workspace, "Core", "Core"),
        hash_of(&after, &workspace, "Core", "Core")
    );
    assert_ne!(
        hash_of(&before, &workspace, "App", "App"),
        hash_of(&after, &workspace, "App", "App")
    );
}

#[test]
fn test_resource_name_is_part_of_the_hash() {
    let workspace = Workspace::new();
    workspace.write("Core/Resources/1.png", [0x89, 0x50, 0x4e, 0x47]);
    workspace.write("Core/Resources/2.png", [0x89, 0x50, 0x4e, 0x47]);

    let hash_with = |resource: &str| {
        let mut core = core_target();
        core.sources.clear();
        core.resources = ResourceFileElements::new(vec![ResourceFileElement::file(resource)]);
        let graph = Graph::new(
            "Workspace",
            workspace.root(),
            vec![Project::new(workspace.path("Core"), "Core", vec![core])],
        );
        hash_of(&hash_all(&graph), &workspace, "Core", "Core")
    };

    assert_ne!(hash_with("Resources/1.png"), hash_with("Resources/2.png"));
}

#[test]
fn test_declaration_order_does_not_matter() {
    let workspace = Workspace::new();
    workspace.write("Core/Sources/A.swift", "struct A {}");
    workspace.write("Core/Sources/B.swift", "struct B {}");
    let graph = app_and_core(&workspace);
    let baseline = hash_all(&graph);

    let mut shuffled = graph.clone();
    shuffled.projects.reverse();
    let shuffled_hashes = hash_all(&shuffled);
    assert_eq!(by_name(&baseline), by_name(&shuffled_hashes));

    let with_sources = |names: &[&str]| {
        let mut graph = graph.clone();
        let core = &mut graph.projects[1].targets[0];
        core.sources = names
            .iter()
            .map(|name| cachekey::graph::target::SourceFile::new(*name))
            .collect();
        by_name(&hash_all(&graph))
    };
    assert_eq!(
        with_sources(&["Sources/A.swift", "Sources/B.swift"]),
        with_sources(&["Sources/B.swift", "Sources/A.swift"])
    );
}

#[test]
fn test_warning_settings_do_not_change_hashes() {
    let workspace = Workspace::new();
    let graph = app_and_core(&workspace);

    let with_settings = |pairs: &[(&str, &str)]| {
        let mut graph = graph.clone();
        let base = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), (*value).into()))
            .collect();
        graph.projects[1].targets[0].settings = Some(Settings::with_base(base));
        hash_of(&hash_all(&graph), &workspace, "Core", "Core")
    };

    let plain = with_settings(&[("OTHER_SWIFT_FLAGS", "-DDEBUG")]);
    let noisy = with_settings(&[
        ("OTHER_SWIFT_FLAGS", "-DDEBUG -warnings-as-errors"),
        ("GCC_WARN_UNUSED_VARIABLE", "YES"),
        ("SWIFT_TREAT_WARNINGS_AS_ERRORS", "YES"),
    ]);
    assert_eq!(plain, noisy);

    let optimized = with_settings(&[("OTHER_SWIFT_FLAGS", "-DDEBUG -Onone")]);
    assert_ne!(plain, optimized);
}

#[test]
fn test_run_destination_changes_hashes() {
    let workspace = Workspace::new();
    let graph = app_and_core(&workspace);
    let content = ContentHasher::new();
    let hasher = GraphContentHasher::new(&content);
    let all = |_: &GraphTarget<'_>| true;

    let none = hasher.content_hashes(&graph, all, None, &[]).unwrap();
    let iphone = RunDestination::new("iPhone 15", "com.apple.CoreSimulator.SimRuntime.iOS-17-5");
    let ipad = RunDestination::new("iPad Pro", "com.apple.CoreSimulator.SimRuntime.iOS-17-5");
    let on_iphone = hasher.content_hashes(&graph, all, Some(&iphone), &[]).unwrap();
    let on_ipad = hasher.content_hashes(&graph, all, Some(&ipad), &[]).unwrap();

    let app = |hashes: &GraphContentHashes| hash_of(hashes, &workspace, "App", "App");
    assert_ne!(app(&none), app(&on_iphone));
    assert_ne!(app(&on_iphone), app(&on_ipad));
    let app_identity = TargetIdentity::new(workspace.path("App"), "App");
    assert!(on_iphone[&app_identity].tree.contains_identifier("iPhone 15"));
    assert!(on_ipad[&app_identity].tree.contains_identifier("iPad Pro"));
    assert_eq!(
        app(&on_iphone),
        app(&hasher.content_hashes(&graph, all, Some(&iphone), &[]).unwrap())
    );
}

#[test]
fn test_additional_strings_change_every_hash() {
    let workspace = Workspace::new();
    let graph = app_and_core(&workspace);
    let content = ContentHasher::new();
    let hasher = GraphContentHasher::new(&content);
    let all = |_: &GraphTarget<'_>| true;

    let plain = hasher.content_hashes(&graph, all, None, &[]).unwrap();
    let tagged = hasher
        .content_hashes(&graph, all, None, &["xcode-15.4".to_string()])
        .unwrap();
    for (identity, content_hash) in &plain {
        assert_ne!(content_hash.hash, tagged[identity].hash);
    }
}

#[test]
fn test_package_lock_file_changes_hashes() {
    let workspace = Workspace::new();
    let graph = app_and_core(&workspace);
    let before = hash_all(&graph);

    workspace.write("Package.resolved", r#"{"pins": [], "version": 2}"#);
    let after = hash_all(&graph);

    assert_ne!(
        hash_of(&before, &workspace, "Core", "Core"),
        hash_of(&after, &workspace, "Core", "Core")
    );
}

#[test]
fn test_missing_dependency_hash_is_an_error() {
    let workspace = Workspace::new();
    let graph = app_and_core(&workspace);
    let content = ContentHasher::new();
    let app = graph
        .target(&TargetIdentity::new(workspace.path("App"), "App"))
        .unwrap();

    let result = TargetContentHasher::new(&content).content_hash(
        &app,
        &HashedTargets::new(),
        &PathHashCache::new(),
        None,
        &[],
    );
    assert!(matches!(
        result,
        Err(HashingError::MissingProjectTargetHash { ref dependency_target_name, .. })
            if dependency_target_name == "Core"
    ));
}

#[test]
fn test_include_filter_does_not_change_hashes() {
    let workspace = Workspace::new();
    let graph = app_and_core(&workspace);
    let content = ContentHasher::new();
    let hasher = GraphContentHasher::new(&content);

    let all = hash_all(&graph);
    let frameworks = hasher
        .content_hashes(
            &graph,
            |graph_target: &GraphTarget<'_>| graph_target.target.product == Product::Framework,
            None,
            &[],
        )
        .unwrap();

    assert_eq!(frameworks.len(), 1);
    let core = TargetIdentity::new(workspace.path("Core"), "Core");
    assert_eq!(frameworks[&core].hash, all[&core].hash);
}

#[test]
fn test_hashes_do_not_depend_on_workspace_location() {
    let first = Workspace::new();
    let second = Workspace::new();
    let first_hashes = hash_all(&app_and_core(&first));
    let second_hashes = hash_all(&app_and_core(&second));
    assert_eq!(by_name(&first_hashes), by_name(&second_hashes));
}

#[test]
fn test_worker_count_does_not_change_hashes() {
    let workspace = Workspace::new();
    let graph = app_and_core(&workspace);
    let content = ContentHasher::new();
    let all = |_: &GraphTarget<'_>| true;

    let sequential = GraphContentHasher::new(&content)
        .with_workers(1)
        .content_hashes(&graph, all, None, &[])
        .unwrap();
    let parallel = GraphContentHasher::new(&content)
        .with_workers(4)
        .content_hashes(&graph, all, None, &[])
        .unwrap();
    assert_eq!(by_name(&sequential), by_name(&parallel));
}

#[test]
fn test_dependency_cycle_is_reported() {
    let workspace = Workspace::new();
    let mut graph = app_and_core(&workspace);
    graph.projects[1].targets[0].dependencies =
        vec![TargetDependency::project("App", workspace.path("App"))];

    let content = ContentHasher::new();
    let result =
        GraphContentHasher::new(&content).content_hashes(&graph, |_: &GraphTarget<'_>| true, None, &[]);
    assert!(matches!(result, Err(HashingError::CycleDetected(_))));
}
