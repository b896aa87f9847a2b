// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for the Answer binary.
//!
//! Settings are layered with figment: compiled defaults, then
//! `/etc/answer/answer.toml`, the user config directory, `./answer.toml`,
//! and finally `ANSWER_*` environment variables. Unknown keys are rejected
//! and reported through miette with typo suggestions.
//!
//! ```no_run
//! use answer_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("status file: {}", config.plugin.status_file.display());
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{AnswerConfig, BuildConfig, LogConfig, PluginConfig};

/// Loads the layered configuration and validates it.
///
/// Figment errors are converted into diagnostics carrying source spans
/// where the offending key can be located in one of the TOML files.
pub fn load_and_validate() -> Result<AnswerConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = collect_toml_sources();
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Loads configuration from a TOML string over the defaults and validates it.
pub fn load_and_validate_str(toml_content: &str) -> Result<AnswerConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

fn collect_toml_sources() -> Vec<(String, String)> {
    loader::config_file_paths()
        .into_iter()
        .filter_map(|path| {
            let content = std::fs::read_to_string(&path).ok()?;
            let shown = std::path::absolute(&path).unwrap_or(path);
            Some((shown.display().to_string(), content))
        })
        .collect()
}
