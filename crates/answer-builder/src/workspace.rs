// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The temporary directory one build run stages everything in.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::BuildError;

/// A staged Cargo package plus its assets. Removed by [`Workspace::close`],
/// or on drop if the run is abandoned.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Creates `answer-build-*` under `work_root`, or the OS temp dir.
    pub fn create(work_root: Option<&Path>) -> Result<Self, BuildError> {
        let root = work_root.map_or_else(std::env::temp_dir, Path::to_path_buf);
        std::fs::create_dir_all(&root).map_err(BuildError::io("failed to create", &root))?;
        let dir = tempfile::Builder::new()
            .prefix("answer-build-")
            .tempdir_in(&root)
            .map_err(BuildError::io("failed to create workspace in", &root))?;
        Ok(Self { dir })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn manifest(&self) -> PathBuf {
        self.root().join("Cargo.toml")
    }

    pub fn entry_point(&self) -> PathBuf {
        self.root().join("src").join("main.rs")
    }

    pub fn cargo_config(&self) -> PathBuf {
        self.root().join(".cargo").join("config.toml")
    }

    pub fn target_dir(&self) -> PathBuf {
        self.root().join("target")
    }

    /// Staged copy of the core web UI.
    pub fn ui_dir(&self) -> PathBuf {
        self.root().join("assets").join("answer").join("ui")
    }

    pub fn ui_plugins_dir(&self) -> PathBuf {
        self.ui_dir().join("src").join("plugins")
    }

    /// Output directory of the UI bundler.
    pub fn ui_bundle_dir(&self) -> PathBuf {
        self.ui_dir().join("build")
    }

    /// Staged copy of the core translation catalogs.
    pub fn i18n_dir(&self) -> PathBuf {
        self.root().join("assets").join("answer").join("i18n")
    }

    /// Removes the workspace and everything in it.
    pub fn close(self) -> Result<(), BuildError> {
        let path = self.dir.path().to_path_buf();
        self.dir.close().map_err(BuildError::io("failed to remove", path))
    }
}

/// Writes `content` to `path`, creating parent directories.
pub(crate) fn write_file(path: &Path, content: &str) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(BuildError::io("failed to create", parent))?;
    }
    std::fs::write(path, content).map_err(BuildError::io("failed to write", path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_under_work_root_and_close() {
        let tmp = tempfile::tempdir().unwrap();
        let workspace = Workspace::create(Some(&tmp.path().join("builds"))).unwrap();
        let root = workspace.root().to_path_buf();

        assert!(root.starts_with(tmp.path().join("builds")));
        let name = root.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("answer-build-"));

        write_file(&workspace.entry_point(), "fn main() {}\n").unwrap();
        assert!(workspace.entry_point().is_file());

        workspace.close().unwrap();
        assert!(!root.exists());
    }

    #[test]
    fn asset_dirs_live_under_assets() {
        let workspace = Workspace::create(None).unwrap();
        assert!(workspace.ui_plugins_dir().starts_with(workspace.ui_dir()));
        assert!(workspace.i18n_dir().ends_with("assets/answer/i18n"));
    }
}
