// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The build pipeline.
//!
//! Stages run strictly in order inside one temporary workspace. The first
//! failing stage stops the run; the workspace is removed afterwards
//! whether the run succeeded or not.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use answer_core::version::{REVISION_ENV, TIME_ENV, VERSION_ENV};
use chrono::SecondsFormat;
use strum::Display;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::command::{CommandRunner, ToolCommand, ToolOutput};
use crate::error::BuildError;
use crate::i18n::PluginCatalogs;
use crate::manifest;
use crate::material::{BuildMaterial, CORE_PACKAGE};
use crate::metadata::Metadata;
use crate::template::{render_entry_point, render_manifest};
use crate::ui::{copy_tree, regenerate_index};
use crate::workspace::{Workspace, write_file};

/// Compiler environment variable pointing at the bundled web UI.
pub const UI_DIR_ENV: &str = "ANSWER_UI_DIR";
/// Compiler environment variable pointing at the merged translation catalogs.
pub const I18N_DIR_ENV: &str = "ANSWER_I18N_DIR";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Stage {
    CreateWorkspace,
    GenerateEntryPoint,
    ApplyLocalOverrides,
    ResolveDependencies,
    CopyUiAssets,
    RegenerateUiIndex,
    BuildUi,
    MergeTranslations,
    Compile,
    Cleanup,
}

impl Stage {
    /// Stages that run inside the workspace, in execution order.
    pub const STAGED: [Stage; 8] = [
        Stage::GenerateEntryPoint,
        Stage::ApplyLocalOverrides,
        Stage::ResolveDependencies,
        Stage::CopyUiAssets,
        Stage::RegenerateUiIndex,
        Stage::BuildUi,
        Stage::MergeTranslations,
        Stage::Compile,
    ];
}

/// A successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub output: PathBuf,
    pub executed: Vec<Stage>,
}

/// A failed build: the stage that failed and why.
#[derive(Debug, thiserror::Error)]
#[error("build failed at stage {stage}: {source}")]
pub struct BuildFailure {
    pub stage: Stage,
    #[source]
    pub source: BuildError,
    /// Every stage that started, including the failing one and cleanup.
    pub executed: Vec<Stage>,
}

/// Runs build pipelines with a given toolchain runner.
pub struct Builder {
    runner: Arc<dyn CommandRunner>,
    cancel: CancellationToken,
}

impl Builder {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            cancel: CancellationToken::new(),
        }
    }

    /// Aborts the running stage when `cancel` fires. Cleanup still runs.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Builds the binary described by `material`.
    pub async fn build(&self, material: &BuildMaterial) -> Result<BuildReport, BuildFailure> {
        info!(
            plugins = material.plugins.len(),
            output = %material.output.display(),
            "build started"
        );
        let started = Instant::now();
        let mut executed = vec![Stage::CreateWorkspace];

        let workspace = match Workspace::create(material.work_root.as_deref()) {
            Ok(workspace) => workspace,
            Err(source) => {
                error!(error = %source, "could not create build workspace");
                return Err(BuildFailure {
                    stage: Stage::CreateWorkspace,
                    source,
                    executed,
                });
            }
        };
        debug!(workspace = %workspace.root().display(), "workspace created");

        let outcome = self.run_stages(material, &workspace, &mut executed).await;

        executed.push(Stage::Cleanup);
        let cleanup = workspace.close();

        match (outcome, cleanup) {
            (Ok(()), Ok(())) => {
                info!(
                    output = %material.output.display(),
                    elapsed_secs = started.elapsed().as_secs(),
                    "build finished"
                );
                Ok(BuildReport {
                    output: material.output.clone(),
                    executed,
                })
            }
            (Ok(()), Err(source)) => Err(BuildFailure {
                stage: Stage::Cleanup,
                source,
                executed,
            }),
            (Err((stage, source)), cleanup) => {
                if let Err(e) = cleanup {
                    warn!(error = %e, "workspace cleanup failed");
                }
                Err(BuildFailure {
                    stage,
                    source,
                    executed,
                })
            }
        }
    }

    async fn run_stages(
        &self,
        material: &BuildMaterial,
        workspace: &Workspace,
        executed: &mut Vec<Stage>,
    ) -> Result<(), (Stage, BuildError)> {
        let mut run = Run {
            material,
            workspace,
            runner: self.runner.as_ref(),
            cancel: &self.cancel,
            packages: None,
            ui_staged: false,
            i18n_staged: false,
        };

        for stage in Stage::STAGED {
            executed.push(stage);
            if self.cancel.is_cancelled() {
                return Err((stage, BuildError::Cancelled));
            }
            let started = Instant::now();
            info!(stage = %stage, "stage started");
            if let Err(e) = run.execute(stage).await {
                error!(stage = %stage, error = %e, "stage failed");
                return Err((stage, e));
            }
            debug!(stage = %stage, elapsed_ms = started.elapsed().as_millis() as u64, "stage finished");
        }
        Ok(())
    }
}

/// Source directories of the core and of each plugin after resolution.
struct Packages {
    core: PathBuf,
    plugins: Vec<(String, PathBuf)>,
}

/// State threaded through the stages of one run.
struct Run<'a> {
    material: &'a BuildMaterial,
    workspace: &'a Workspace,
    runner: &'a dyn CommandRunner,
    cancel: &'a CancellationToken,
    packages: Option<Packages>,
    ui_staged: bool,
    i18n_staged: bool,
}

impl Run<'_> {
    async fn execute(&mut self, stage: Stage) -> Result<(), BuildError> {
        match stage {
            Stage::GenerateEntryPoint => self.generate_entry_point(),
            Stage::ApplyLocalOverrides => self.apply_local_overrides(),
            Stage::ResolveDependencies => self.resolve_dependencies().await,
            Stage::CopyUiAssets => self.copy_ui_assets().await,
            Stage::RegenerateUiIndex => self.regenerate_ui_index(),
            Stage::BuildUi => self.build_ui().await,
            Stage::MergeTranslations => self.merge_translations(),
            Stage::Compile => self.compile().await,
            Stage::CreateWorkspace | Stage::Cleanup => Ok(()),
        }
    }

    fn generate_entry_point(&self) -> Result<(), BuildError> {
        for plugin in &self.material.plugins {
            debug!(module = %plugin.module_path(), alias = %plugin.alias(), "plugin dependency");
        }
        write_file(&self.workspace.entry_point(), &render_entry_point(self.material))?;
        write_file(&self.workspace.manifest(), &render_manifest(self.material))
    }

    fn apply_local_overrides(&self) -> Result<(), BuildError> {
        let applied = manifest::apply_local_overrides(&self.workspace.manifest(), &self.material.plugins)?;
        debug!(applied, "local overrides applied");
        Ok(())
    }

    async fn resolve_dependencies(&self) -> Result<(), BuildError> {
        if let Some(core_path) = &self.material.core_path {
            manifest::patch_core(&self.workspace.manifest(), core_path)?;
            info!(core_path = %core_path.display(), "core redirected to local checkout");
        }
        self.cargo(["generate-lockfile"]).await?;
        let vendored = self.cargo(["vendor", "--versioned-dirs", "vendor"]).await?;
        write_file(&self.workspace.cargo_config(), &vendored.stdout)
    }

    async fn copy_ui_assets(&mut self) -> Result<(), BuildError> {
        let output = self
            .cargo(["metadata", "--format-version", "1", "--offline"])
            .await?;
        let metadata = Metadata::parse(&output.stdout)?;

        let core = metadata.package(CORE_PACKAGE)?.root().to_path_buf();
        let mut plugins = Vec::with_capacity(self.material.plugins.len());
        for plugin in &self.material.plugins {
            let root = match &plugin.local_path {
                Some(path) => path.clone(),
                None => metadata.package(plugin.package())?.root().to_path_buf(),
            };
            plugins.push((plugin.package().to_string(), root));
        }
        let packages = self.packages.insert(Packages { core, plugins });

        let core_ui = packages.core.join("ui");
        if !core_ui.is_dir() {
            warn!(core = %packages.core.display(), "core package ships no ui directory, skipping web UI");
            return Ok(());
        }
        copy_tree(&core_ui, &self.workspace.ui_dir())?;
        for (package, root) in &packages.plugins {
            let plugin_ui = root.join("ui");
            if plugin_ui.is_dir() {
                copy_tree(&plugin_ui, &self.workspace.ui_plugins_dir().join(package))?;
            }
        }
        self.ui_staged = true;
        Ok(())
    }

    fn regenerate_ui_index(&self) -> Result<(), BuildError> {
        if !self.ui_staged {
            return Ok(());
        }
        let exported = regenerate_index(&self.workspace.ui_plugins_dir())?;
        debug!(plugins = ?exported, "ui plugin index written");
        Ok(())
    }

    async fn build_ui(&self) -> Result<(), BuildError> {
        if !self.ui_staged {
            return Ok(());
        }
        let ui_dir = self.workspace.ui_dir();
        let package_manager = &self.material.toolchain.package_manager;
        self.run(ToolCommand::new(package_manager, &ui_dir).arg("install"))
            .await?;
        self.run(ToolCommand::new(package_manager, &ui_dir).arg("build"))
            .await?;
        let bundle = self.workspace.ui_bundle_dir();
        if !bundle.is_dir() {
            return Err(BuildError::MissingArtifact(bundle));
        }
        Ok(())
    }

    fn merge_translations(&mut self) -> Result<(), BuildError> {
        let Some(packages) = &self.packages else {
            return Err(BuildError::Metadata("packages were not resolved".to_string()));
        };
        let core_i18n = packages.core.join("i18n");
        if !core_i18n.is_dir() {
            warn!(core = %packages.core.display(), "core package ships no i18n directory, skipping translations");
            return Ok(());
        }

        let staged = self.workspace.i18n_dir();
        copy_tree(&core_i18n, &staged)?;
        let plugin_dirs: Vec<PathBuf> = packages
            .plugins
            .iter()
            .map(|(_, root)| root.join("i18n"))
            .collect();
        let catalogs = PluginCatalogs::collect(plugin_dirs.iter().map(PathBuf::as_path))?;
        let updated = catalogs.merge_into(&staged)?;
        for name in catalogs.file_names().filter(|name| !updated.iter().any(|u| u.as_str() == *name)) {
            warn!(catalog = name, "no core catalog for plugin translations, skipping");
        }
        info!(catalogs = ?updated, "plugin translations merged");
        self.i18n_staged = true;
        Ok(())
    }

    async fn compile(&self) -> Result<(), BuildError> {
        let material = self.material;
        let target_dir = self.workspace.target_dir();
        let build_time = chrono::Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

        let mut command = self
            .cargo_command([
                "build",
                "--release",
                "--offline",
                "--locked",
                "--bin",
                material.bin_name.as_str(),
            ])
            .arg("--target-dir")
            .arg(target_dir.display().to_string())
            .env(VERSION_ENV, &material.version_info.version)
            .env(REVISION_ENV, &material.version_info.revision)
            .env(TIME_ENV, build_time);
        if self.ui_staged {
            command = command.env(UI_DIR_ENV, self.workspace.ui_bundle_dir().display().to_string());
        }
        if self.i18n_staged {
            command = command.env(I18N_DIR_ENV, self.workspace.i18n_dir().display().to_string());
        }
        self.run(command).await?;

        let artifact = target_dir
            .join("release")
            .join(format!("{}{}", material.bin_name, std::env::consts::EXE_SUFFIX));
        if !artifact.is_file() {
            return Err(BuildError::MissingArtifact(artifact));
        }
        install(&artifact, &material.output)?;
        info!(output = %material.output.display(), "binary installed");
        Ok(())
    }

    fn cargo_command<'s>(&self, args: impl IntoIterator<Item = &'s str>) -> ToolCommand {
        ToolCommand::new(&self.material.toolchain.cargo, self.workspace.root()).args(args)
    }

    async fn cargo<'s>(&self, args: impl IntoIterator<Item = &'s str>) -> Result<ToolOutput, BuildError> {
        self.run(self.cargo_command(args)).await
    }

    async fn run(&self, command: ToolCommand) -> Result<ToolOutput, BuildError> {
        self.runner.run(command, self.cancel).await
    }
}

/// Copies the binary next to `output` and renames it into place, so a
/// failed copy never leaves a partial file at `output`.
fn install(artifact: &Path, output: &Path) -> Result<(), BuildError> {
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(BuildError::io("failed to create", dir))?;

    let mut staged =
        tempfile::NamedTempFile::new_in(dir).map_err(BuildError::io("failed to stage binary in", dir))?;
    let mut source = std::fs::File::open(artifact).map_err(BuildError::io("failed to open", artifact))?;
    std::io::copy(&mut source, staged.as_file_mut()).map_err(BuildError::io("failed to copy", artifact))?;

    let permissions = source
        .metadata()
        .map_err(BuildError::io("failed to stat", artifact))?
        .permissions();
    staged
        .as_file()
        .set_permissions(permissions)
        .map_err(BuildError::io("failed to set permissions on", output))?;

    staged
        .persist(output)
        .map_err(|e| BuildError::io("failed to install", output)(e.error))?;
    Ok(())
}
