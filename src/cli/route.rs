//! CLI route: run context and dispatch to the hashers and presentation.

use crate::cli::parse::{Commands, OutputFormat};
use crate::cli::presentation::{format_hashes_json, format_hashes_table};
use crate::config::{CacheKeyConfig, ConfigLoader};
use crate::content::walker::WalkerConfig;
use crate::content::PathHashCache;
use crate::graph::{ForeignBuildInput, Graph, GraphTarget, Product};
use crate::hashers::{ForeignBuildHasher, GraphContentHasher, RunDestination, TargetContentHasher};
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::info;

/// Runtime context for CLI execution: workspace and loaded configuration.
pub struct RunContext {
    workspace_root: PathBuf,
    config: CacheKeyConfig,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> anyhow::Result<Self> {
        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        Ok(Self {
            workspace_root,
            config,
        })
    }

    pub fn from_config(workspace_root: PathBuf, config: CacheKeyConfig) -> Self {
        Self {
            workspace_root,
            config,
        }
    }

    pub fn config(&self) -> &CacheKeyConfig {
        &self.config
    }

    /// Execute a command and return its printable output.
    pub fn execute(&self, command: &Commands) -> anyhow::Result<String> {
        match command {
            Commands::Hash {
                graph,
                products,
                device,
                runtime,
                additional_strings,
                format,
                subhashes,
            } => {
                let destination = match (device, runtime) {
                    (Some(device), Some(runtime)) => Some(RunDestination::new(device, runtime)),
                    _ => None,
                };
                self.handle_hash(
                    graph,
                    products,
                    destination.as_ref(),
                    additional_strings,
                    *format,
                    *subhashes,
                )
            }
            Commands::Foreign {
                root,
                files,
                folders,
                globs,
                scripts,
            } => {
                let inputs = files
                    .iter()
                    .map(|path| ForeignBuildInput::File { path: path.clone() })
                    .chain(
                        folders
                            .iter()
                            .map(|path| ForeignBuildInput::Folder { path: path.clone() }),
                    )
                    .chain(globs.iter().map(|pattern| ForeignBuildInput::Glob {
                        pattern: pattern.clone(),
                    }))
                    .chain(scripts.iter().map(|script| ForeignBuildInput::Script {
                        script: script.clone(),
                    }))
                    .collect::<Vec<_>>();
                self.handle_foreign(root, &inputs)
            }
        }
    }

    fn handle_hash(
        &self,
        graph_path: &Path,
        products: &[Product],
        destination: Option<&RunDestination>,
        additional_strings: &[String],
        format: OutputFormat,
        subhashes: bool,
    ) -> anyhow::Result<String> {
        let graph_path = self.resolve(graph_path);
        let graph = Graph::load(&graph_path)?;

        let hashing = &self.config.hashing;
        let content = hashing.content_hasher();
        let target_hasher = TargetContentHasher::new(&content)
            .with_warning_filter(hashing.warning_filter())
            .with_ignore_names(hashing.directory_ignore.clone());
        let hasher = GraphContentHasher::new(&content)
            .with_target_hasher(target_hasher)
            .with_workers(hashing.workers);

        let include = |graph_target: &GraphTarget<'_>| {
            products.is_empty() || products.contains(&graph_target.target.product)
        };
        let hashes = hasher
            .content_hashes(&graph, include, destination, additional_strings)
            .with_context(|| format!("Failed to hash graph {}", graph_path.display()))?;
        info!(reported = hashes.len(), "Graph hashes ready");

        match format {
            OutputFormat::Table => Ok(format_hashes_table(&hashes, subhashes)),
            OutputFormat::Json => Ok(format_hashes_json(&hashes, subhashes)?),
        }
    }

    fn handle_foreign(&self, root: &Path, inputs: &[ForeignBuildInput]) -> anyhow::Result<String> {
        let root = self.resolve(root);
        let content = self.config.hashing.content_hasher();
        let walker_config = WalkerConfig {
            ignore_names: self.config.hashing.directory_ignore.clone(),
            ..WalkerConfig::default()
        };
        let digest = ForeignBuildHasher::new(&content)
            .with_walker_config(walker_config)
            .hash(inputs, &root, &PathHashCache::new())
            .with_context(|| format!("Failed to hash foreign build inputs in {}", root.display()))?;
        Ok(digest.to_hex())
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace_root.join(path)
        }
    }
}
