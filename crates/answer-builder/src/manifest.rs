// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Edits to the generated `Cargo.toml`.

use std::path::Path;

use toml_edit::{DocumentMut, InlineTable, Item, Table, value};
use tracing::debug;

use crate::descriptor::PluginSpec;
use crate::error::BuildError;
use crate::material::CORE_PACKAGE;

/// Points every plugin with a local path at that path.
///
/// The plugin's dependency entry is replaced by `{ package, path }`.
pub fn apply_local_overrides<'a>(
    manifest: &Path,
    plugins: impl IntoIterator<Item = &'a PluginSpec>,
) -> Result<usize, BuildError> {
    let mut doc = load(manifest)?;
    let dependencies = doc
        .get_mut("dependencies")
        .and_then(Item::as_table_mut)
        .ok_or_else(|| manifest_error(manifest, "missing [dependencies] table"))?;

    let mut applied = 0;
    for plugin in plugins {
        let Some(path) = &plugin.local_path else {
            continue;
        };
        let alias = plugin.alias();
        if !dependencies.contains_key(&alias) {
            return Err(manifest_error(
                manifest,
                format!("no dependency `{alias}` for plugin `{}`", plugin.name),
            ));
        }
        let mut dep = InlineTable::new();
        dep.insert("package", plugin.package().into());
        dep.insert("path", path.display().to_string().into());
        dependencies[alias.as_str()] = value(dep);
        debug!(plugin = %plugin.name, path = %path.display(), "local override applied");
        applied += 1;
    }

    save(manifest, &doc)?;
    Ok(applied)
}

/// Adds `[patch.crates-io] answer = { path = <core_path> }`.
pub fn patch_core(manifest: &Path, core_path: &Path) -> Result<(), BuildError> {
    let mut doc = load(manifest)?;

    let patch = doc
        .entry("patch")
        .or_insert_with(implicit_table)
        .as_table_mut()
        .ok_or_else(|| manifest_error(manifest, "`patch` is not a table"))?;
    let crates_io = patch
        .entry("crates-io")
        .or_insert_with(|| Item::Table(Table::new()))
        .as_table_mut()
        .ok_or_else(|| manifest_error(manifest, "`patch.crates-io` is not a table"))?;

    let mut core = InlineTable::new();
    core.insert("path", core_path.display().to_string().into());
    crates_io[CORE_PACKAGE] = value(core);

    save(manifest, &doc)
}

fn implicit_table() -> Item {
    let mut table = Table::new();
    table.set_implicit(true);
    Item::Table(table)
}

fn load(path: &Path) -> Result<DocumentMut, BuildError> {
    let content = std::fs::read_to_string(path).map_err(BuildError::io("failed to read", path))?;
    content
        .parse::<DocumentMut>()
        .map_err(|e| manifest_error(path, e.to_string()))
}

fn save(path: &Path, doc: &DocumentMut) -> Result<(), BuildError> {
    std::fs::write(path, doc.to_string()).map_err(BuildError::io("failed to write", path))
}

fn manifest_error(path: &Path, message: impl Into<String>) -> BuildError {
    BuildError::Manifest {
        path: path.to_path_buf(),
        message: message.into(),
    }
}
