// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Answer.
//!
//! - [`MockPlugin`]: a plugin that advertises a chosen set of capabilities
//!   and records every call into a shared log.
//! - [`ScriptedRunner`]: a [`CommandRunner`](answer_builder::CommandRunner)
//!   that fakes cargo and the UI package manager.
//! - [`BuildFixture`]: a core package, a remote plugin and a local plugin
//!   laid out on disk for pipeline tests.

pub mod mock_plugin;
pub mod scripted_runner;

pub use mock_plugin::{CallLog, MockPlugin};
pub use scripted_runner::{BuildFixture, CompileSnapshot, ScriptedRunner};
