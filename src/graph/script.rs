//! Build phase scripts.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptOrder {
    Pre,
    Post,
}

impl ScriptOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptOrder::Pre => "pre",
            ScriptOrder::Post => "post",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Script {
    /// A tool found on `PATH`, invoked with arguments.
    Tool {
        path: String,
        #[serde(default)]
        args: Vec<String>,
    },
    /// A script file in the project, invoked with arguments.
    ScriptPath {
        path: String,
        #[serde(default)]
        args: Vec<String>,
    },
    /// Inline shell source.
    Embedded { source: String },
}

fn default_shell_path() -> String {
    "/bin/sh".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetScript {
    pub name: String,
    pub order: ScriptOrder,
    pub script: Script,
    #[serde(default)]
    pub input_paths: Vec<String>,
    #[serde(default)]
    pub input_file_list_paths: Vec<String>,
    #[serde(default)]
    pub output_paths: Vec<String>,
    #[serde(default)]
    pub output_file_list_paths: Vec<String>,
    #[serde(default)]
    pub dependency_file: Option<String>,
    #[serde(default = "default_shell_path")]
    pub shell_path: String,
    #[serde(default = "default_true")]
    pub show_env_vars_in_log: bool,
    #[serde(default = "default_true")]
    pub based_on_dependency_analysis: bool,
    #[serde(default)]
    pub run_for_install_builds_only: bool,
}

impl TargetScript {
    /// Script phase with no declared inputs or outputs.
    pub fn new(name: impl Into<String>, order: ScriptOrder, script: Script) -> Self {
        Self {
            name: name.into(),
            order,
            script,
            input_paths: Vec::new(),
            input_file_list_paths: Vec::new(),
            output_paths: Vec::new(),
            output_file_list_paths: Vec::new(),
            dependency_file: None,
            shell_path: default_shell_path(),
            show_env_vars_in_log: true,
            based_on_dependency_analysis: true,
            run_for_install_builds_only: false,
        }
    }
}
