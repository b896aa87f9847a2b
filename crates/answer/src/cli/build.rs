// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `answer build`: compile a custom binary with extra plugins.

use std::path::PathBuf;
use std::sync::Arc;

use answer_builder::{
    BuildError, BuildMaterial, BuildReport, Builder, CommandRunner, Toolchain,
};
use answer_config::BuildConfig;
use answer_core::VersionInfo;
use clap::Args;
use colored::Colorize;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::CliError;

/// Output path used when `--output` is omitted.
pub const DEFAULT_OUTPUT: &str = "new_answer";

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Plugin to compile in, as `name[@version][=local-path]`. Repeatable.
    #[arg(long = "with", short = 'w', value_name = "DESCRIPTOR")]
    pub with: Vec<String>,

    /// Path of the produced binary.
    #[arg(long, short = 'o', default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,
}

/// Combines command line arguments with `[build]` settings.
///
/// The produced binary reports the same version as the running one.
pub fn material(
    args: &BuildArgs,
    settings: &BuildConfig,
    version_info: VersionInfo,
) -> Result<BuildMaterial, BuildError> {
    let core_path = settings
        .core_path
        .as_deref()
        .map(|path| std::path::absolute(path).map_err(BuildError::io("failed to resolve", path)))
        .transpose()?;

    Ok(BuildMaterial::new(&args.output, &args.with, version_info)?
        .with_core_version(&settings.core_version)
        .with_core_path(core_path)
        .with_toolchain(Toolchain {
            cargo: settings.cargo.clone(),
            package_manager: settings.package_manager.clone(),
        })
        .with_work_root(settings.work_root.clone())
        .with_bin_name(&settings.bin_name))
}

/// Runs the build pipeline with `runner` executing the toolchain.
pub async fn run(
    args: &BuildArgs,
    settings: &BuildConfig,
    runner: Arc<dyn CommandRunner>,
    cancel: CancellationToken,
) -> Result<BuildReport, CliError> {
    let material = material(args, settings, VersionInfo::current())?;
    info!(
        plugins = ?material.plugins.iter().map(ToString::to_string).collect::<Vec<_>>(),
        core_version = %material.core_version,
        "building custom binary"
    );
    let report = Builder::new(runner)
        .with_cancellation(cancel)
        .build(&material)
        .await?;
    Ok(report)
}

pub fn render_report(report: &BuildReport) -> String {
    format!("{} {}", "built".green().bold(), report.output.display())
}
