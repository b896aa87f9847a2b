// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Build metadata injected at compile time.
//!
//! `answer build` compiles custom binaries with `ANSWER_BUILD_VERSION`,
//! `ANSWER_BUILD_REVISION` and `ANSWER_BUILD_TIME` set in the compiler
//! environment. A plain `cargo build` leaves them unset and the crate
//! version is reported instead.

use serde::{Deserialize, Serialize};

/// Environment variable carrying the release version into the compiler.
pub const VERSION_ENV: &str = "ANSWER_BUILD_VERSION";
/// Environment variable carrying the source revision into the compiler.
pub const REVISION_ENV: &str = "ANSWER_BUILD_REVISION";
/// Environment variable carrying the build timestamp into the compiler.
pub const TIME_ENV: &str = "ANSWER_BUILD_TIME";

/// Version, revision and build time of a binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub version: String,
    pub revision: String,
    pub time: String,
}

impl VersionInfo {
    /// Metadata baked into the running binary.
    pub fn current() -> Self {
        Self {
            version: option_env!("ANSWER_BUILD_VERSION")
                .unwrap_or(env!("CARGO_PKG_VERSION"))
                .to_string(),
            revision: option_env!("ANSWER_BUILD_REVISION")
                .unwrap_or("unknown")
                .to_string(),
            time: option_env!("ANSWER_BUILD_TIME").unwrap_or("").to_string(),
        }
    }
}

impl std::fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (revision {}", self.version, self.revision)?;
        if !self.time.is_empty() {
            write!(f, ", built {}", self.time)?;
        }
        write!(f, ")")
    }
}
