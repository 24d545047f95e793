//! Shared fixtures: a temporary workspace with App and Core projects.

use cachekey::graph::{Graph, Product, Project, Target, TargetDependency};
use cachekey::graph::target::SourceFile;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct Workspace {
    pub temp_dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    pub fn write(&self, relative: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }
}

/// `Core` framework with one source file.
pub fn core_target() -> Target {
    let mut core = Target::new("Core", Product::Framework, "io.cachekey.Core");
    core.sources = vec![SourceFile::new("Sources/Core.swift")];
    core
}

/// `App` depending on `Core` from the project at `core_path`.
pub fn app_target(core_path: PathBuf) -> Target {
    let mut app = Target::new("App", Product::App, "io.cachekey.App");
    app.sources = vec![SourceFile::new("Sources/App.swift")];
    app.dependencies = vec![TargetDependency::project("Core", core_path)];
    app
}

/// Writes sources for both projects and returns the two-project graph.
pub fn app_and_core(workspace: &Workspace) -> Graph {
    workspace.write("Core/Sources/Core.swift", "public struct Core {}");
    workspace.write("App/Sources/App.swift", "import Core");
    Graph::new(
        "Workspace",
        workspace.root(),
        vec![
            Project::new(
                workspace.path("App"),
                "App",
                vec![app_target(workspace.path("Core"))],
            ),
            Project::new(workspace.path("Core"), "Core", vec![core_target()]),
        ],
    )
}
