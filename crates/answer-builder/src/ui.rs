// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Web UI staging: tree copies and the plugin index module.

use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use crate::error::BuildError;
use crate::workspace::write_file;

/// Folder under `ui/src/plugins` reserved for plugins the core ships.
pub const BUILTIN_DIR: &str = "builtin";

/// Installed dependencies are never copied; the package manager recreates them.
const SKIPPED_DIR: &str = "node_modules";

/// Recursively copies `src` into `dst`, skipping `node_modules`.
/// Returns the number of files copied.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<usize, BuildError> {
    let mut copied = 0;
    let walker = WalkDir::new(src)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || e.file_name() != SKIPPED_DIR);

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(src).to_path_buf();
            BuildError::Io {
                action: "failed to walk",
                path,
                source: e.into(),
            }
        })?;
        let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target).map_err(BuildError::io("failed to create", &target))?;
        } else {
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent).map_err(BuildError::io("failed to create", parent))?;
            }
            std::fs::copy(entry.path(), &target)
                .map_err(BuildError::io("failed to copy", entry.path()))?;
            copied += 1;
        }
    }

    debug!(src = %src.display(), dst = %dst.display(), files = copied, "tree copied");
    Ok(copied)
}

/// Rewrites `index.ts` in `plugins_dir` to re-export every plugin folder.
///
/// Folders are sorted by name and `builtin` is excluded. Returns the
/// exported folder names.
pub fn regenerate_index(plugins_dir: &Path) -> Result<Vec<String>, BuildError> {
    let mut folders = Vec::new();
    if plugins_dir.is_dir() {
        let entries =
            std::fs::read_dir(plugins_dir).map_err(BuildError::io("failed to read", plugins_dir))?;
        for entry in entries {
            let entry = entry.map_err(BuildError::io("failed to read", plugins_dir))?;
            let is_dir = entry
                .file_type()
                .map_err(BuildError::io("failed to stat", entry.path()))?
                .is_dir();
            let name = entry.file_name().to_string_lossy().into_owned();
            if is_dir && name != BUILTIN_DIR {
                folders.push(name);
            }
        }
    }
    folders.sort();

    let index: String = folders
        .iter()
        .map(|dir| format!("export {{ default as {} }} from './{dir}';\n", pascal_case(dir)))
        .collect();
    write_file(&plugins_dir.join("index.ts"), &index)?;
    Ok(folders)
}

/// `plugin-a` / `plugin_a` / `plugin.a` -> `PluginA`.
pub fn pascal_case(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}
