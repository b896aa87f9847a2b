// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inputs of one build run.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use answer_core::VersionInfo;

use crate::descriptor::PluginSpec;
use crate::error::BuildError;

/// Name of the core crate the generated package depends on.
pub const CORE_PACKAGE: &str = "answer";

/// External programs the pipeline shells out to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub cargo: String,
    pub package_manager: String,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            cargo: "cargo".to_string(),
            package_manager: "pnpm".to_string(),
        }
    }
}

/// Everything a build run needs, validated up front.
#[derive(Debug, Clone)]
pub struct BuildMaterial {
    pub plugins: Vec<PluginSpec>,
    /// Final binary location.
    pub output: PathBuf,
    /// Version requirement of the core crate.
    pub core_version: String,
    /// Local core checkout replacing the registry version.
    pub core_path: Option<PathBuf>,
    /// Metadata baked into the produced binary.
    pub version_info: VersionInfo,
    pub toolchain: Toolchain,
    /// Parent directory of the temporary workspace.
    pub work_root: Option<PathBuf>,
    pub bin_name: String,
}

impl BuildMaterial {
    /// Creates material for `output` from raw descriptors.
    ///
    /// Relative local paths are resolved against the current directory, and
    /// two plugins that map to the same dependency alias are rejected.
    pub fn new(
        output: impl Into<PathBuf>,
        descriptors: &[String],
        version_info: VersionInfo,
    ) -> Result<Self, BuildError> {
        let output: PathBuf = output.into();
        let mut plugins = Vec::with_capacity(descriptors.len());
        let mut seen: HashMap<String, String> = HashMap::new();
        for descriptor in descriptors {
            let mut spec = PluginSpec::parse(descriptor)?;
            if let Some(path) = spec.local_path.take() {
                spec.local_path = Some(absolute(&path)?);
            }
            if let Some(first) = seen.insert(spec.alias(), spec.name.clone()) {
                return Err(BuildError::DuplicateAlias {
                    alias: spec.alias(),
                    first,
                    second: spec.name,
                });
            }
            plugins.push(spec);
        }

        Ok(Self {
            plugins,
            output: absolute(&output)?,
            core_version: version_info.version.clone(),
            core_path: None,
            version_info,
            toolchain: Toolchain::default(),
            work_root: None,
            bin_name: CORE_PACKAGE.to_string(),
        })
    }

    pub fn with_core_version(mut self, version: impl Into<String>) -> Self {
        self.core_version = version.into();
        self
    }

    pub fn with_core_path(mut self, path: Option<PathBuf>) -> Self {
        self.core_path = path;
        self
    }

    pub fn with_toolchain(mut self, toolchain: Toolchain) -> Self {
        self.toolchain = toolchain;
        self
    }

    pub fn with_work_root(mut self, work_root: Option<PathBuf>) -> Self {
        self.work_root = work_root;
        self
    }

    pub fn with_bin_name(mut self, bin_name: impl Into<String>) -> Self {
        self.bin_name = bin_name.into();
        self
    }

    /// Plugins fetched from a registry or git, in descriptor order.
    pub fn remote_plugins(&self) -> impl Iterator<Item = &PluginSpec> {
        self.plugins.iter().filter(|p| p.local_path.is_none())
    }

    /// Plugins built from a local checkout, in descriptor order.
    pub fn local_plugins(&self) -> impl Iterator<Item = &PluginSpec> {
        self.plugins.iter().filter(|p| p.local_path.is_some())
    }
}

fn absolute(path: &Path) -> Result<PathBuf, BuildError> {
    std::path::absolute(path).map_err(BuildError::io("failed to resolve", path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version() -> VersionInfo {
        VersionInfo {
            version: "1.4.0".into(),
            revision: "abc123".into(),
            time: String::new(),
        }
    }

    #[test]
    fn splits_remote_and_local_plugins() {
        let material = BuildMaterial::new(
            "out/answer-custom",
            &[
                "example.com/plugin-a@1.2.0".to_string(),
                "example.com/plugin-b=./local/plugin-b".to_string(),
            ],
            version(),
        )
        .unwrap();

        assert!(material.output.is_absolute());
        assert_eq!(material.core_version, "1.4.0");
        assert_eq!(material.remote_plugins().count(), 1);
        let local: Vec<_> = material.local_plugins().collect();
        assert_eq!(local.len(), 1);
        let path = local[0].local_path.as_ref().unwrap();
        assert!(path.is_absolute());
        assert!(path.ends_with("local/plugin-b"));
    }

    #[test]
    fn duplicate_alias_is_rejected() {
        let err = BuildMaterial::new(
            "out",
            &["a.com/x/plugin@1.0.0".to_string(), "b.com/y/plugin".to_string()],
            version(),
        )
        .unwrap_err();
        assert!(matches!(err, BuildError::DuplicateAlias { alias, .. } if alias == "plugin"));
    }

    #[test]
    fn different_majors_do_not_collide() {
        let material = BuildMaterial::new(
            "out",
            &["a.com/plugin@1.0.0".to_string(), "a.com/plugin@2.0.0".to_string()],
            version(),
        )
        .unwrap();
        assert_eq!(material.plugins.len(), 2);
    }
}
