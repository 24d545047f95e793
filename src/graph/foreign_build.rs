//! Inputs of build systems bridged into the graph.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One declared cache input of a foreign build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ForeignBuildInput {
    File { path: PathBuf },
    Folder { path: PathBuf },
    /// Pattern relative to the project source root, e.g. `shared/src/**/*.kt`.
    Glob { pattern: String },
    /// Shell command whose standard output is the input.
    Script { script: String },
}

/// A target produced by a non-native build system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignBuild {
    /// Command that produces the artifact.
    pub script: String,
    #[serde(default)]
    pub inputs: Vec<ForeignBuildInput>,
    #[serde(default)]
    pub output: Option<PathBuf>,
}
