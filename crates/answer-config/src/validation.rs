// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic checks serde cannot express.

use crate::diagnostic::ConfigError;
use crate::model::AnswerConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validates a deserialized configuration. Collects every problem instead of
/// stopping at the first.
pub fn validate_config(config: &AnswerConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.log.level.as_str()) {
        errors.push(ConfigError::validation(format!(
            "log.level `{}` must be one of: {}",
            config.log.level,
            LOG_LEVELS.join(", ")
        )));
    }

    if config.plugin.status_file.as_os_str().is_empty() {
        errors.push(ConfigError::validation("plugin.status_file must not be empty"));
    }

    let build = &config.build;
    for (key, value) in [
        ("build.cargo", &build.cargo),
        ("build.package_manager", &build.package_manager),
    ] {
        if value.trim().is_empty() {
            errors.push(ConfigError::validation(format!("{key} must not be empty")));
        }
    }

    if let Err(e) = semver::Version::parse(build.core_version.trim_start_matches('v')) {
        errors.push(ConfigError::validation(format!(
            "build.core_version `{}` is not a semantic version: {e}",
            build.core_version
        )));
    }

    if build.bin_name.trim().is_empty() {
        errors.push(ConfigError::validation("build.bin_name must not be empty"));
    } else if build.bin_name.contains(['/', '\\']) {
        errors.push(ConfigError::validation(format!(
            "build.bin_name `{}` must be a file name, not a path",
            build.bin_name
        )));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
