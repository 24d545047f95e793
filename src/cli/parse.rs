//! CLI parse: clap types for cachekey. No behavior; definitions only.

use crate::graph::Product;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// cachekey CLI - Deterministic cache keys for module graphs
#[derive(Parser)]
#[command(name = "cachekey")]
#[command(about = "Deterministic content hashes and cache keys for module dependency graphs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (where cachekey.toml is looked up)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Hash every target of a graph
    Hash {
        /// Graph description (JSON)
        #[arg(long)]
        graph: PathBuf,

        /// Only report targets with these products (e.g. framework, app)
        #[arg(long = "product", value_parser = parse_product)]
        products: Vec<Product>,

        /// Run destination device name
        #[arg(long, requires = "runtime")]
        device: Option<String>,

        /// Run destination runtime identifier
        #[arg(long, requires = "device")]
        runtime: Option<String>,

        /// Extra string mixed into every target hash
        #[arg(long = "additional-string")]
        additional_strings: Vec<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Include per-aspect hashes
        #[arg(long)]
        subhashes: bool,
    },
    /// Hash the inputs of a foreign build
    ///
    /// Inputs are hashed in the order files, folders, globs, scripts.
    Foreign {
        /// Directory inputs are resolved against
        #[arg(long, default_value = ".")]
        root: PathBuf,

        #[arg(long = "file")]
        files: Vec<PathBuf>,

        #[arg(long = "folder")]
        folders: Vec<PathBuf>,

        #[arg(long = "glob")]
        globs: Vec<String>,

        /// Shell command whose stdout is hashed
        #[arg(long = "script")]
        scripts: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

fn parse_product(value: &str) -> Result<Product, String> {
    value.parse::<Product>().map_err(|e| {
        let known: Vec<&str> = Product::ALL.iter().map(Product::as_str).collect();
        format!("{} (expected one of {})", e, known.join(", "))
    })
}
