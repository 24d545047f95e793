//! Error types for the content hashing subsystem.

use std::path::PathBuf;
use thiserror::Error;

/// Hashing errors
///
/// Nothing in the hashers swallows an error: an input that cannot be read
/// would otherwise produce a cache key that does not describe the build.
#[derive(Debug, Error)]
pub enum HashingError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "The target '{source_target_name}' depends on '{dependency_target_name}' \
         ({}), which has not been hashed yet",
        .dependency_project_path.display()
    )]
    MissingTargetHash {
        source_target_name: String,
        dependency_project_path: PathBuf,
        dependency_target_name: String,
    },

    #[error(
        "The target '{source_target_name}' from project {} depends on '{dependency_target_name}' \
         from project {}, which has not been hashed yet",
        .source_project_path.display(),
        .dependency_project_path.display()
    )]
    MissingProjectTargetHash {
        source_project_path: PathBuf,
        source_target_name: String,
        dependency_project_path: PathBuf,
        dependency_target_name: String,
    },

    #[error("Unsupported input: {0}")]
    Unsupported(String),

    #[error("Cyclic xcconfig include: {}", format_chain(.0))]
    XcconfigIncludeCycle(Vec<PathBuf>),

    #[error("Invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    #[error("Script '{command}' failed with {status}: {stderr}")]
    ScriptFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Dependency cycle detected between targets: {}", .0.join(", "))]
    CycleDetected(Vec<String>),

    #[error("Target '{target_name}' not found in project {}", .project_path.display())]
    MissingTarget {
        project_path: PathBuf,
        target_name: String,
    },
}

impl HashingError {
    /// Map an I/O error on `path`, turning `NotFound` into [`HashingError::FileNotFound`].
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            HashingError::FileNotFound(path)
        } else {
            HashingError::Io { path, source }
        }
    }

    /// Whether this error means the input simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, HashingError::FileNotFound(_))
    }
}

fn format_chain(chain: &[PathBuf]) -> String {
    chain
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Configuration and logging setup errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Invalid(String),

    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Failed to read graph {}: {message}", .path.display())]
    Graph { path: PathBuf, message: String },
}
