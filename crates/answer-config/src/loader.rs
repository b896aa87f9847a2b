// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-based loading.
//!
//! Lookup order, later layers overriding earlier ones: compiled defaults,
//! `/etc/answer/answer.toml`, `<config dir>/answer/answer.toml`,
//! `./answer.toml`, then `ANSWER_*` environment variables.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::AnswerConfig;

const SYSTEM_CONFIG: &str = "/etc/answer/answer.toml";
const LOCAL_CONFIG: &str = "answer.toml";

/// Environment keys (prefix stripped) that map onto configuration.
///
/// `ANSWER_BUILD_VERSION` and friends are compiler inputs for custom builds
/// and must not leak into the `[build]` section, so the provider only
/// accepts the keys listed here.
const ENV_KEYS: &[&str] = &[
    "log_level",
    "plugin_status_file",
    "build_core_path",
    "build_core_version",
    "build_cargo",
    "build_package_manager",
    "build_work_root",
    "build_bin_name",
];

/// The TOML files consulted by [`load_config`], lowest precedence first.
pub fn config_file_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(SYSTEM_CONFIG)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("answer").join(LOCAL_CONFIG));
    }
    paths.push(PathBuf::from(LOCAL_CONFIG));
    paths
}

/// Builds the full figment without extracting it.
pub fn build_figment() -> Figment {
    let figment = Figment::new().merge(Serialized::defaults(AnswerConfig::default()));
    config_file_paths()
        .into_iter()
        .fold(figment, |figment, path| figment.merge(Toml::file(path)))
        .merge(env_provider())
}

/// Loads configuration from every layer.
pub fn load_config() -> Result<AnswerConfig, figment::Error> {
    build_figment().extract()
}

/// Loads configuration from a TOML string over the defaults. No files, no env.
pub fn load_config_from_str(toml_content: &str) -> Result<AnswerConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AnswerConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Loads configuration from one explicit file plus environment overrides.
pub fn load_config_from_path(path: &Path) -> Result<AnswerConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AnswerConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// `ANSWER_*` variables, mapped with an explicit section split.
///
/// Splitting on every `_` would turn `ANSWER_BUILD_CORE_PATH` into
/// `build.core.path`; only the first segment names the section.
fn env_provider() -> Env {
    Env::prefixed("ANSWER_")
        .filter(|key| {
            ENV_KEYS
                .iter()
                .any(|known| key.as_str().eq_ignore_ascii_case(known))
        })
        .map(|key| key.as_str().to_ascii_lowercase().replacen('_', ".", 1).into())
}
