// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Build orchestrator for custom Answer binaries.
//!
//! `answer build --with <descriptor>` assembles a throwaway Cargo package
//! whose `main.rs` registers the requested plugins, vendors its
//! dependencies, stages and bundles the web UI, merges plugin translations
//! into the core catalogs and compiles the result. See [`Builder::build`].

pub mod command;
pub mod descriptor;
pub mod error;
pub mod i18n;
pub mod manifest;
pub mod material;
pub mod metadata;
pub mod pipeline;
pub mod template;
pub mod ui;
pub mod workspace;

pub use command::{CommandRunner, ProcessRunner, ToolCommand, ToolOutput};
pub use descriptor::{PluginSpec, versioned_module_path};
pub use error::BuildError;
pub use material::{BuildMaterial, Toolchain};
pub use pipeline::{BuildFailure, BuildReport, Builder, Stage};
