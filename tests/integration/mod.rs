//! Integration tests for graph, target and foreign build hashing

mod cli_output;
mod config_layers;
mod foreign_build;
mod graph_hashing;
mod support;
mod target_aspects;
