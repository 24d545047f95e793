//! Integration tests for foreign build input hashing

use super::support::Workspace;
use cachekey::content::{ContentHasher, ContentHashing, PathHashCache};
use cachekey::error::HashingError;
use cachekey::graph::{ForeignBuild, ForeignBuildInput, Graph, GraphTarget, Product, Project, Target};
use cachekey::hashers::{ForeignBuildHasher, GraphContentHasher};
use cachekey::types::{Digest, TargetIdentity};
use std::path::PathBuf;

fn hash_inputs(workspace: &Workspace, inputs: &[ForeignBuildInput]) -> Result<Digest, HashingError> {
    let content = ContentHasher::new();
    ForeignBuildHasher::new(&content).hash(inputs, workspace.root(), &PathHashCache::new())
}

fn glob(pattern: &str) -> ForeignBuildInput {
    ForeignBuildInput::Glob {
        pattern: pattern.to_string(),
    }
}

#[test]
fn test_no_inputs_hash_like_empty_string() {
    let workspace = Workspace::new();
    let content = ContentHasher::new();
    assert_eq!(hash_inputs(&workspace, &[]).unwrap(), content.hash_str(""));
}

#[test]
fn test_folder_input_tracks_nested_files() {
    let workspace = Workspace::new();
    workspace.write("shared/src/Main.kt", "fun main() {}");
    let folder = [ForeignBuildInput::Folder {
        path: PathBuf::from("shared"),
    }];
    let before = hash_inputs(&workspace, &folder).unwrap();

    workspace.write("shared/.DS_Store", "finder noise");
    assert_eq!(before, hash_inputs(&workspace, &folder).unwrap());

    workspace.write("shared/src/nested/Util.kt", "fun util() {}");
    assert_ne!(before, hash_inputs(&workspace, &folder).unwrap());
}

#[test]
fn test_glob_input_only_sees_matching_files() {
    let workspace = Workspace::new();
    workspace.write("shared/src/Main.kt", "fun main() {}");
    let inputs = [glob("shared/src/**/*.kt")];
    let before = hash_inputs(&workspace, &inputs).unwrap();

    workspace.write("shared/src/README.md", "docs");
    assert_eq!(before, hash_inputs(&workspace, &inputs).unwrap());

    workspace.write("shared/src/net/Client.kt", "class Client");
    assert_ne!(before, hash_inputs(&workspace, &inputs).unwrap());
}

#[test]
fn test_missing_file_input_is_an_error() {
    let workspace = Workspace::new();
    let result = hash_inputs(
        &workspace,
        &[ForeignBuildInput::File {
            path: PathBuf::from("build.gradle.kts"),
        }],
    );
    assert!(matches!(result, Err(HashingError::FileNotFound(_))));
}

#[test]
fn test_script_input_hashes_its_output() {
    let workspace = Workspace::new();
    let script = |command: &str| {
        hash_inputs(
            &workspace,
            &[ForeignBuildInput::Script {
                script: command.to_string(),
            }],
        )
        .unwrap()
    };
    assert_eq!(script("echo 1.9.0"), script("printf '1.9.0\\n'"));
    assert_ne!(script("echo 1.9.0"), script("echo 2.0.0"));
}

#[test]
fn test_foreign_build_target_follows_its_inputs() {
    let workspace = Workspace::new();
    workspace.write("Shared/shared/src/Main.kt", "fun main() {}");

    let graph_with = |output: Option<&str>| {
        let mut target = Target::new("SharedKit", Product::Framework, "io.cachekey.SharedKit");
        target.foreign_build = Some(ForeignBuild {
            script: "./gradlew assembleXCFramework".to_string(),
            inputs: vec![glob("shared/src/**/*.kt")],
            output: output.map(PathBuf::from),
        });
        Graph::new(
            "Workspace",
            workspace.root(),
            vec![Project::new(workspace.path("Shared"), "Shared", vec![target])],
        )
    };
    let hash = |graph: &Graph| {
        let content = ContentHasher::new();
        let hashes = GraphContentHasher::new(&content)
            .content_hashes(graph, |_: &GraphTarget<'_>| true, None, &[])
            .unwrap();
        let content_hash = &hashes[&TargetIdentity::new(workspace.path("Shared"), "SharedKit")];
        assert!(content_hash.subhashes.foreign_build.is_some());
        content_hash.hash
    };

    let graph = graph_with(Some("build/SharedKit.xcframework"));
    let before = hash(&graph);
    assert_ne!(before, hash(&graph_with(None)));

    workspace.write("Shared/shared/src/Main.kt", "fun main() { println() }");
    assert_ne!(before, hash(&graph));
}
