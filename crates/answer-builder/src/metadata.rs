// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The subset of `cargo metadata --format-version 1` the pipeline reads.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::BuildError;

#[derive(Debug, Clone, Deserialize)]
pub struct Metadata {
    pub packages: Vec<Package>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Package {
    pub name: String,
    pub version: String,
    pub manifest_path: PathBuf,
}

impl Package {
    /// Directory holding the package's `Cargo.toml`.
    pub fn root(&self) -> &Path {
        self.manifest_path.parent().unwrap_or(Path::new("."))
    }
}

impl Metadata {
    pub fn parse(json: &str) -> Result<Self, BuildError> {
        serde_json::from_str(json).map_err(|e| BuildError::Metadata(e.to_string()))
    }

    /// Finds a package by name, preferring the highest version when the
    /// graph contains several.
    pub fn package(&self, name: &str) -> Result<&Package, BuildError> {
        self.packages
            .iter()
            .filter(|p| p.name == name)
            .max_by(|a, b| compare_versions(&a.version, &b.version))
            .ok_or_else(|| BuildError::PackageNotFound(name.to_string()))
    }
}

fn compare_versions(a: &str, b: &str) -> std::cmp::Ordering {
    match (semver::Version::parse(a), semver::Version::parse(b)) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        _ => a.cmp(b),
    }
}
