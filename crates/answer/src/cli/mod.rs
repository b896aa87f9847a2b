// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command line surface.

pub mod build;
pub mod plugin;
pub mod version;

use std::sync::Arc;

use answer_builder::{BuildError, BuildFailure, ProcessRunner};
use answer_config::AnswerConfig;
use answer_core::AnswerError;
use answer_plugin::PluginHost;
use clap::{Parser, Subcommand};

use crate::shutdown;

/// Answer - Q&A platform with compiled-in plugins.
#[derive(Parser, Debug)]
#[command(name = "answer", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a custom binary with additional plugins compiled in.
    Build(build::BuildArgs),
    /// Inspect and toggle the plugins compiled into this binary.
    #[command(subcommand)]
    Plugin(plugin::PluginCommand),
    /// Print version, revision and build time.
    Version,
}

/// Failure of a command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Plugin(#[from] AnswerError),

    /// Descriptors or paths rejected before the pipeline started.
    #[error(transparent)]
    Material(#[from] BuildError),

    #[error(transparent)]
    Build(#[from] BuildFailure),
}

/// Runs the parsed command against a bootstrapped host.
pub async fn execute(cli: Cli, config: &AnswerConfig, host: &PluginHost) -> Result<(), CliError> {
    match cli.command {
        Some(Commands::Build(args)) => {
            let cancel = shutdown::install_signal_handler();
            let report = build::run(&args, &config.build, Arc::new(ProcessRunner), cancel).await?;
            println!("{}", build::render_report(&report));
            Ok(())
        }
        Some(Commands::Plugin(command)) => {
            print!("{}", plugin::run(&command, host, &config.plugin.status_file)?);
            Ok(())
        }
        Some(Commands::Version) => {
            print!("{}", version::render());
            Ok(())
        }
        None => {
            println!("answer: use --help for available commands");
            Ok(())
        }
    }
}
