// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure of a single build stage.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid plugin descriptor `{descriptor}`: {reason}")]
    InvalidDescriptor { descriptor: String, reason: String },

    #[error("plugins `{first}` and `{second}` both map to dependency `{alias}`")]
    DuplicateAlias {
        alias: String,
        first: String,
        second: String,
    },

    #[error("{action} `{}`: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed ({status}): {stderr}")]
    Tool {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("invalid manifest `{}`: {message}", path.display())]
    Manifest { path: PathBuf, message: String },

    #[error("cargo metadata: {0}")]
    Metadata(String),

    #[error("package `{0}` not found in the resolved dependency graph")]
    PackageNotFound(String),

    #[error("invalid translation catalog `{}`: {message}", path.display())]
    Translation { path: PathBuf, message: String },

    #[error("build artifact not found at `{}`", .0.display())]
    MissingArtifact(PathBuf),

    #[error("build cancelled")]
    Cancelled,
}

impl BuildError {
    /// Wraps an I/O error with the action and path that produced it.
    pub fn io(action: &'static str, path: impl AsRef<Path>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        move |source| Self::Io {
            action,
            path,
            source,
        }
    }
}
