// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Translation catalog merge.
//!
//! Plugins ship `i18n/<locale>.yaml` files whose translations live under a
//! top-level `plugin` key. The namespaces of all plugins are unioned per
//! catalog file name (later plugins win per leaf key) and then merged into
//! the `plugin` key of the matching core catalog. Merging replaces leaves in
//! place, so running it again with the same input changes nothing.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};
use tracing::{debug, warn};

use crate::error::BuildError;
use crate::workspace::write_file;

/// Top-level key holding plugin translations in every catalog.
pub const PLUGIN_KEY: &str = "plugin";

/// Plugin translations accumulated per catalog file name.
#[derive(Debug, Default)]
pub struct PluginCatalogs {
    catalogs: BTreeMap<String, Mapping>,
}

impl PluginCatalogs {
    /// Reads every `*.yaml` catalog in each plugin's `i18n` directory, in order.
    pub fn collect<'a>(
        i18n_dirs: impl IntoIterator<Item = &'a Path>,
    ) -> Result<Self, BuildError> {
        let mut collected = Self::default();
        for dir in i18n_dirs {
            for path in catalog_files(dir)? {
                let Some(file_name) = path.file_name().map(|n| n.to_string_lossy().into_owned())
                else {
                    continue;
                };
                let mut document = read_catalog(&path)?;
                match document.remove(PLUGIN_KEY) {
                    Some(Value::Mapping(namespace)) => {
                        let target = collected.catalogs.entry(file_name).or_default();
                        merge_leaves(target, namespace);
                    }
                    Some(_) => warn!(path = %path.display(), "`plugin` is not a mapping, catalog ignored"),
                    None => warn!(path = %path.display(), "catalog has no `plugin` key, ignored"),
                }
            }
        }
        Ok(collected)
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }

    /// Catalog file names with contributions, sorted.
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.catalogs.keys().map(String::as_str)
    }

    /// Merges the accumulated namespaces into the core catalogs in `core_dir`.
    ///
    /// Only catalogs present in both places are touched. Returns the
    /// updated file names.
    pub fn merge_into(&self, core_dir: &Path) -> Result<Vec<String>, BuildError> {
        let mut updated = Vec::new();
        for (file_name, namespace) in &self.catalogs {
            let path = core_dir.join(file_name);
            if !path.is_file() {
                debug!(catalog = %file_name, "no core catalog, plugin translations skipped");
                continue;
            }

            let mut document = read_catalog(&path)?;
            let plugin = document
                .entry(Value::String(PLUGIN_KEY.to_string()))
                .or_insert_with(|| Value::Mapping(Mapping::new()));
            if !plugin.is_mapping() {
                *plugin = Value::Mapping(Mapping::new());
            }
            if let Value::Mapping(existing) = plugin {
                merge_leaves(existing, namespace.clone());
            }

            let rendered = serde_yaml::to_string(&document).map_err(|e| BuildError::Translation {
                path: path.clone(),
                message: e.to_string(),
            })?;
            write_file(&path, &rendered)?;
            updated.push(file_name.clone());
        }
        Ok(updated)
    }
}

/// Deep-merges `incoming` into `target`; incoming leaves replace existing ones.
fn merge_leaves(target: &mut Mapping, incoming: Mapping) {
    for (key, value) in incoming {
        match value {
            Value::Mapping(nested) => match target.get_mut(&key) {
                Some(Value::Mapping(existing)) => merge_leaves(existing, nested),
                _ => {
                    target.insert(key, Value::Mapping(nested));
                }
            },
            leaf => {
                target.insert(key, leaf);
            }
        }
    }
}

fn catalog_files(dir: &Path) -> Result<Vec<PathBuf>, BuildError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(BuildError::io("failed to read", dir))? {
        let path = entry.map_err(BuildError::io("failed to read", dir))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "yaml") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn read_catalog(path: &Path) -> Result<Mapping, BuildError> {
    let content = std::fs::read_to_string(path).map_err(BuildError::io("failed to read", path))?;
    if content.trim().is_empty() {
        return Ok(Mapping::new());
    }
    serde_yaml::from_str(&content).map_err(|e| BuildError::Translation {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
