// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The stock `answer` binary: the core with its built-in plugins only.
//!
//! Custom binaries produced by `answer build` have the same shape, with one
//! extra registrar per requested plugin crate.

use std::process::ExitCode;

fn main() -> ExitCode {
    answer::run(&[answer::builtin::register])
}
