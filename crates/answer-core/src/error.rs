// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Answer plugin host.

use thiserror::Error;

/// The primary error type used across plugin contracts and the registry.
#[derive(Debug, Error)]
pub enum AnswerError {
    /// Configuration errors (invalid plugin settings, malformed status file).
    #[error("configuration error: {0}")]
    Config(String),

    /// A plugin with the same slug name is already registered.
    ///
    /// Raised at startup while compiled-in plugins enroll. A duplicate
    /// identity is a build misconfiguration and must abort initialization.
    #[error("duplicate plugin slug name `{slug_name}`")]
    DuplicatePlugin { slug_name: String },

    /// A plugin call failed during dispatch.
    #[error("plugin `{slug_name}` failed: {message}")]
    Plugin {
        slug_name: String,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Requested plugin is not registered.
    #[error("plugin not found: {0}")]
    PluginNotFound(String),

    /// Reading or writing persisted plugin state failed.
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AnswerError {
    /// Shorthand for a plugin failure without an underlying source.
    pub fn plugin(slug_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Plugin {
            slug_name: slug_name.into(),
            message: message.into(),
            source: None,
        }
    }
}
