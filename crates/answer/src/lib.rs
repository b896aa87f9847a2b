// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Answer - composition root of the plugin host.
//!
//! Every binary, stock or produced by `answer build`, hands its list of
//! plugin registrars to [`run`]. `run` parses the command line, loads the
//! layered configuration, enrolls every compiled-in plugin into a fresh
//! [`PluginHost`] and executes the requested command.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

pub mod assets;
pub mod builtin;
pub mod cli;
pub mod shutdown;

use std::process::ExitCode;
use std::sync::Arc;

use answer_config::AnswerConfig;
use answer_core::AnswerError;
use answer_plugin::{PluginHost, Registrar, StatusManager};
use clap::Parser;
use colored::Colorize;
use tracing::error;

use crate::cli::Cli;

/// Runs the command line of a binary whose plugins are `registrars`.
///
/// Configuration errors and duplicate plugin registrations abort before any
/// command runs.
pub fn run(registrars: &[Registrar]) -> ExitCode {
    let cli = Cli::parse();

    let config = match answer_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            answer_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.log.level);

    let host = match bootstrap(&config, registrars) {
        Ok(host) => host,
        Err(e) => {
            error!(error = %e, "plugin registration failed");
            eprintln!("{}: {e}", "error".red());
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("{}: failed to start async runtime: {e}", "error".red());
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(cli::execute(cli, &config, &host)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e}", "error".red());
            ExitCode::FAILURE
        }
    }
}

/// Loads the persisted plugin status and enrolls every registrar's plugins.
pub fn bootstrap(config: &AnswerConfig, registrars: &[Registrar]) -> Result<PluginHost, AnswerError> {
    let status = StatusManager::new();
    status.load_from_path(&config.plugin.status_file)?;
    PluginHost::with_registrars(Arc::new(status), registrars)
}

/// Installs the global subscriber. `RUST_LOG` overrides the configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("answer={log_level},warn")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
