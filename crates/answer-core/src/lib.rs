// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Answer plugin host.
//!
//! This crate provides the plugin contracts every compiled-in plugin
//! implements: the mandatory [`Base`] trait and one optional trait per
//! capability kind. It also carries the shared error type, plugin identity,
//! and build version metadata.

pub mod error;
pub mod traits;
pub mod types;
pub mod version;

// Re-export key items at crate root for ergonomic imports.
pub use error::AnswerError;
pub use types::{CapabilityKind, PluginInfo};
pub use version::VersionInfo;

// Re-export all capability traits at crate root.
pub use traits::{Base, Cache, Config, Connector, Notification, Reviewer, Search, Storage, UserCenter};
