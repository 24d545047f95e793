//! Integration tests for the command front end

use super::support::{app_and_core, Workspace};
use cachekey::cli::{Commands, OutputFormat, RunContext};
use cachekey::config::CacheKeyConfig;
use cachekey::graph::Product;
use std::path::PathBuf;

fn hash_command(products: Vec<Product>, format: OutputFormat, subhashes: bool) -> Commands {
    Commands::Hash {
        graph: PathBuf::from("graph.json"),
        products,
        device: None,
        runtime: None,
        additional_strings: Vec::new(),
        format,
        subhashes,
    }
}

fn context_with_graph(workspace: &Workspace) -> RunContext {
    let graph = app_and_core(workspace);
    workspace.write("graph.json", serde_json::to_string_pretty(&graph).unwrap());
    RunContext::from_config(workspace.root().to_path_buf(), CacheKeyConfig::default())
}

#[test]
fn test_json_output_lists_every_target() {
    let workspace = Workspace::new();
    let context = context_with_graph(&workspace);

    let out = context
        .execute(&hash_command(Vec::new(), OutputFormat::Json, false))
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    let targets = value.as_object().unwrap();
    assert_eq!(targets.len(), 2);
    for entry in targets.values() {
        assert_eq!(entry["hash"].as_str().unwrap().len(), 64);
    }
}

#[test]
fn test_product_filter_limits_output() {
    let workspace = Workspace::new();
    let context = context_with_graph(&workspace);

    let out = context
        .execute(&hash_command(vec![Product::Framework], OutputFormat::Json, true))
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    let targets = value.as_object().unwrap();
    assert_eq!(targets.len(), 1);
    let (identity, entry) = targets.iter().next().unwrap();
    assert!(identity.ends_with(":Core"));
    assert!(entry["subhashes"]["sources"].is_string());
}

#[test]
fn test_table_output_mentions_targets() {
    let workspace = Workspace::new();
    let context = context_with_graph(&workspace);

    let out = context
        .execute(&hash_command(Vec::new(), OutputFormat::Table, false))
        .unwrap();
    assert!(out.contains(":App"));
    assert!(out.contains(":Core"));
}
