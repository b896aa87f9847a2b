// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model.
//!
//! Every struct denies unknown fields so typos fail at startup instead of
//! being silently ignored.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level Answer configuration. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AnswerConfig {
    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,

    /// Plugin status persistence.
    #[serde(default)]
    pub plugin: PluginConfig,

    /// Settings for `answer build`.
    #[serde(default)]
    pub build: BuildConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Level for the `answer` targets: trace, debug, info, warn or error.
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PluginConfig {
    /// JSON file holding the `slug_name -> enabled` map.
    #[serde(default = "default_status_file")]
    pub status_file: PathBuf,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            status_file: default_status_file(),
        }
    }
}

/// Build orchestrator settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Local checkout of the core crate. When set, generated packages
    /// patch the core dependency to this path instead of the registry.
    #[serde(default)]
    pub core_path: Option<PathBuf>,

    /// Core version the generated package depends on.
    #[serde(default = "default_core_version")]
    pub core_version: String,

    /// Cargo executable.
    #[serde(default = "default_cargo")]
    pub cargo: String,

    /// Package manager used to build the web UI.
    #[serde(default = "default_package_manager")]
    pub package_manager: String,

    /// Parent directory of build workspaces. Defaults to the OS temp dir.
    #[serde(default)]
    pub work_root: Option<PathBuf>,

    /// Name of the produced binary target.
    #[serde(default = "default_bin_name")]
    pub bin_name: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            core_path: None,
            core_version: default_core_version(),
            cargo: default_cargo(),
            package_manager: default_package_manager(),
            work_root: None,
            bin_name: default_bin_name(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_status_file() -> PathBuf {
    dirs::data_dir()
        .map(|p| p.join("answer").join("plugin_status.json"))
        .unwrap_or_else(|| PathBuf::from("plugin_status.json"))
}

fn default_core_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_cargo() -> String {
    "cargo".to_string()
}

fn default_package_manager() -> String {
    "pnpm".to_string()
}

fn default_bin_name() -> String {
    "answer".to_string()
}
