//! Integration tests for configuration layering and its effect on hashing

use super::support::{app_and_core, Workspace};
use cachekey::config::{CacheKeyConfig, ConfigLoader, WORKSPACE_CONFIG_FILE};
use cachekey::content::ContentHashing;
use cachekey::graph::settings::Settings;
use cachekey::graph::GraphTarget;
use cachekey::hashers::{GraphContentHasher, TargetContentHasher};
use cachekey::types::TargetIdentity;
use std::sync::Mutex;

/// Serializes access to XDG_CONFIG_HOME across the tests of this binary.
static XDG_ENV_MUTEX: Mutex<()> = Mutex::new(());

fn load_isolated(workspace: &Workspace) -> CacheKeyConfig {
    let _guard = XDG_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let original = std::env::var_os("XDG_CONFIG_HOME");
    std::env::set_var("XDG_CONFIG_HOME", workspace.path("xdg"));
    let result = ConfigLoader::load(workspace.root());
    match original {
        Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }
    result.unwrap()
}

#[test]
fn test_workspace_file_is_picked_up() {
    let workspace = Workspace::new();
    workspace.write(
        WORKSPACE_CONFIG_FILE,
        "[hashing]\nworkers = 2\ndirectory_ignore = [\".DS_Store\", \"Thumbs.db\"]\n",
    );
    let config = load_isolated(&workspace);
    assert_eq!(config.hashing.workers, 2);
    assert!(config.hashing.directory_ignore.contains(&"Thumbs.db".to_string()));
}

#[test]
fn test_global_file_is_overridden_by_workspace_file() {
    let workspace = Workspace::new();
    workspace.write("xdg/cachekey/config.toml", "[logging]\nlevel = \"debug\"\nformat = \"json\"\n");
    workspace.write(WORKSPACE_CONFIG_FILE, "[logging]\nformat = \"text\"\n");

    let config = load_isolated(&workspace);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, "text");
}

#[test]
fn test_directory_ignore_applies_to_folder_hashing() {
    let workspace = Workspace::new();
    workspace.write("Assets/logo.svg", "<svg/>");
    let config = CacheKeyConfig::default();
    let hasher = config.hashing.content_hasher();
    let before = hasher.hash_path(&workspace.path("Assets")).unwrap();

    workspace.write("Assets/Thumbs.db", "windows noise");
    assert_ne!(before, hasher.hash_path(&workspace.path("Assets")).unwrap());

    let mut config = CacheKeyConfig::default();
    config.hashing.directory_ignore.push("Thumbs.db".to_string());
    let hasher = config.hashing.content_hasher();
    assert_eq!(before, hasher.hash_path(&workspace.path("Assets")).unwrap());
}

#[test]
fn test_extra_warning_settings_are_ignored() {
    let workspace = Workspace::new();
    let graph = app_and_core(&workspace);
    let mut config = CacheKeyConfig::default();
    config.hashing.extra_warning_settings = vec!["SWIFTLINT_STRICT".to_string()];

    let core_hash = |graph: &cachekey::graph::Graph| {
        let content = config.hashing.content_hasher();
        let hashes = GraphContentHasher::new(&content)
            .with_target_hasher(
                TargetContentHasher::new(&content).with_warning_filter(config.hashing.warning_filter()),
            )
            .content_hashes(graph, |_: &GraphTarget<'_>| true, None, &[])
            .unwrap();
        hashes[&TargetIdentity::new(workspace.path("Core"), "Core")].hash
    };

    let mut strict = graph.clone();
    strict.projects[1].targets[0].settings = Some(Settings::with_base(
        [("SWIFTLINT_STRICT".to_string(), "YES".into())].into_iter().collect(),
    ));
    assert_eq!(core_hash(&graph), core_hash(&strict));
}
