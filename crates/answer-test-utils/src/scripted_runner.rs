// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A fake toolchain for pipeline tests.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use answer_builder::{BuildError, CommandRunner, ToolCommand, ToolOutput};
use async_trait::async_trait;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use walkdir::WalkDir;

/// Source-replacement snippet `cargo vendor` prints.
pub const VENDOR_SNIPPET: &str = "[source.crates-io]\n\
replace-with = \"vendored-sources\"\n\
\n\
[source.vendored-sources]\n\
directory = \"vendor\"\n";

/// Leading bytes of the fake binary written by `cargo build`.
///
/// The staged UI bundle and translation catalogs follow, the way
/// compile-time embedding would carry them.
pub const FAKE_BINARY: &[u8] = b"\x7fELF answer-custom";

/// The staged workspace as seen by `cargo build`, captured before the
/// pipeline removes it.
#[derive(Debug, Clone, Default)]
pub struct CompileSnapshot {
    pub main_rs: String,
    pub manifest: String,
    pub cargo_config: String,
    /// Translation catalogs under `ANSWER_I18N_DIR`, by file name.
    pub catalogs: BTreeMap<String, String>,
    /// `src/plugins/index.ts` of the staged UI, if the UI was staged.
    pub ui_index: Option<String>,
    pub envs: Vec<(String, String)>,
}

impl CompileSnapshot {
    pub fn env(&self, key: &str) -> Option<&str> {
        self.envs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn capture(command: &ToolCommand) -> Self {
        let read = |path: PathBuf| std::fs::read_to_string(path).unwrap_or_default();
        let env = |key: &str| {
            command
                .envs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| PathBuf::from(v))
        };

        let mut catalogs = BTreeMap::new();
        if let Some(dir) = env("ANSWER_I18N_DIR")
            && let Ok(entries) = std::fs::read_dir(&dir)
        {
            for entry in entries.flatten() {
                let name = entry.file_name().to_string_lossy().into_owned();
                catalogs.insert(name, read(entry.path()));
            }
        }
        let ui_index = env("ANSWER_UI_DIR")
            .and_then(|bundle| bundle.parent().map(Path::to_path_buf))
            .map(|ui| read(ui.join("src").join("plugins").join("index.ts")));

        Self {
            main_rs: read(command.cwd.join("src").join("main.rs")),
            manifest: read(command.cwd.join("Cargo.toml")),
            cargo_config: read(command.cwd.join(".cargo").join("config.toml")),
            catalogs,
            ui_index,
            envs: command.envs.clone(),
        }
    }
}

/// Answers cargo and package-manager invocations without running anything.
///
/// - `cargo vendor` prints [`VENDOR_SNIPPET`] and creates the vendor dir.
/// - `cargo metadata` lists the packages registered with [`with_package`].
/// - `cargo build` captures a [`CompileSnapshot`] and writes [`FAKE_BINARY`]
///   followed by every file under `ANSWER_UI_DIR` and `ANSWER_I18N_DIR` to
///   `<target-dir>/release/<bin>`.
/// - `<package-manager> build` writes `build/index.html` from the staged
///   `src/plugins/index.ts`.
/// - Everything else succeeds with empty output.
///
/// [`with_package`]: ScriptedRunner::with_package
#[derive(Default)]
pub struct ScriptedRunner {
    packages: Vec<(String, PathBuf)>,
    failures: Vec<(String, String)>,
    skip_ui_bundle: bool,
    commands: Mutex<Vec<ToolCommand>>,
    snapshot: Mutex<Option<CompileSnapshot>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `cargo metadata` report package `name` rooted at `root`.
    pub fn with_package(mut self, name: &str, root: impl Into<PathBuf>) -> Self {
        self.packages.push((name.to_string(), root.into()));
        self
    }

    /// Makes `<program> <subcommand> ...` exit with status 1.
    pub fn fail_on(mut self, program: &str, subcommand: &str) -> Self {
        self.failures.push((program.to_string(), subcommand.to_string()));
        self
    }

    /// Makes `<package-manager> build` succeed without producing a bundle.
    pub fn without_ui_bundle(mut self) -> Self {
        self.skip_ui_bundle = true;
        self
    }

    /// Every command received, in order.
    pub fn commands(&self) -> Vec<ToolCommand> {
        self.commands
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }

    /// Whether `<program> <subcommand>` was invoked.
    pub fn invoked(&self, program: &str, subcommand: &str) -> bool {
        self.commands()
            .iter()
            .any(|c| matches_command(c, program, subcommand))
    }

    /// What the workspace looked like when `cargo build` ran.
    pub fn snapshot(&self) -> Option<CompileSnapshot> {
        self.snapshot
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }

    fn metadata_json(&self) -> String {
        let packages: Vec<serde_json::Value> = self
            .packages
            .iter()
            .map(|(name, root)| {
                serde_json::json!({
                    "name": name,
                    "version": "1.0.0",
                    "id": format!("{name} 1.0.0"),
                    "manifest_path": root.join("Cargo.toml"),
                })
            })
            .collect();
        serde_json::json!({ "packages": packages, "version": 1 }).to_string()
    }
}

fn matches_command(command: &ToolCommand, program: &str, subcommand: &str) -> bool {
    command.program == program && command.args.first().is_some_and(|a| a == subcommand)
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> BuildError + '_ {
    move |e| BuildError::Tool {
        command: "scripted".to_string(),
        status: "io".to_string(),
        stderr: format!("{}: {e}", path.display()),
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(
        &self,
        command: ToolCommand,
        cancel: &CancellationToken,
    ) -> Result<ToolOutput, BuildError> {
        if cancel.is_cancelled() {
            return Err(BuildError::Cancelled);
        }
        self.commands
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(command.clone());

        if self
            .failures
            .iter()
            .any(|(program, sub)| matches_command(&command, program, sub))
        {
            return Err(BuildError::Tool {
                command: command.to_string(),
                status: "exit status: 1".to_string(),
                stderr: "scripted failure".to_string(),
            });
        }

        if !command.program.ends_with("cargo") {
            if !self.skip_ui_bundle && command.args.first().is_some_and(|a| a == "build") {
                bundle_ui(&command.cwd)?;
            }
            return Ok(ToolOutput::default());
        }

        match command.args.first().map(String::as_str) {
            Some("vendor") => {
                let vendor = command.cwd.join("vendor");
                std::fs::create_dir_all(&vendor).map_err(io_error(&vendor))?;
                Ok(ToolOutput {
                    stdout: VENDOR_SNIPPET.to_string(),
                    stderr: String::new(),
                })
            }
            Some("metadata") => Ok(ToolOutput {
                stdout: self.metadata_json(),
                stderr: String::new(),
            }),
            Some("build") => {
                *self.snapshot.lock().unwrap_or_else(|p| p.into_inner()) =
                    Some(CompileSnapshot::capture(&command));
                let target = command
                    .flag_value("--target-dir")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| command.cwd.join("target"));
                let bin = command.flag_value("--bin").unwrap_or("answer");
                let release = target.join("release");
                std::fs::create_dir_all(&release).map_err(io_error(&release))?;
                let binary = release.join(format!("{bin}{}", std::env::consts::EXE_SUFFIX));
                std::fs::write(&binary, embedded_binary(&command)).map_err(io_error(&binary))?;
                Ok(ToolOutput::default())
            }
            _ => Ok(ToolOutput::default()),
        }
    }
}

fn bundle_ui(ui_dir: &Path) -> Result<(), BuildError> {
    let index = std::fs::read_to_string(ui_dir.join("src").join("plugins").join("index.ts"))
        .unwrap_or_default();
    let bundle = ui_dir.join("build");
    std::fs::create_dir_all(&bundle).map_err(io_error(&bundle))?;
    let html = bundle.join("index.html");
    std::fs::write(&html, format!("<script>\n{index}</script>\n")).map_err(io_error(&html))
}

fn embedded_binary(command: &ToolCommand) -> Vec<u8> {
    let mut binary = FAKE_BINARY.to_vec();
    for key in ["ANSWER_UI_DIR", "ANSWER_I18N_DIR"] {
        let Some((_, dir)) = command.envs.iter().find(|(k, _)| k == key) else {
            continue;
        };
        let files = WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .flatten()
            .filter(|entry| entry.file_type().is_file());
        for entry in files {
            let relative = entry.path().strip_prefix(dir).unwrap_or(entry.path());
            binary.extend_from_slice(format!("\n--- {}\n", relative.display()).as_bytes());
            binary.extend(std::fs::read(entry.path()).unwrap_or_default());
        }
    }
    binary
}

/// On-disk packages for a build: the core, remote `plugin-a`, local `plugin-b`.
///
/// ```text
/// <root>/core/ui/{package.json, src/plugins/builtin/index.ts, node_modules/}
/// <root>/core/i18n/{en_US.yaml, zh_CN.yaml}
/// <root>/plugin-a/{ui/index.tsx, i18n/en_US.yaml}
/// <root>/local/plugin-b/{ui/index.tsx, i18n/en_US.yaml}
/// <root>/work/        build workspaces
/// <root>/out/         build output
/// ```
pub struct BuildFixture {
    dir: TempDir,
}

impl BuildFixture {
    pub fn new() -> std::io::Result<Self> {
        let fixture = Self {
            dir: tempfile::tempdir()?,
        };
        let files: &[(&str, &str)] = &[
            ("core/Cargo.toml", "[package]\nname = \"answer\"\n"),
            ("core/ui/package.json", "{\"name\": \"answer-ui\"}\n"),
            ("core/ui/src/plugins/builtin/index.ts", "export default {};\n"),
            ("core/ui/node_modules/react/index.js", "module.exports = {};\n"),
            ("core/i18n/en_US.yaml", "ui:\n  title: Answer\n"),
            ("core/i18n/zh_CN.yaml", "ui:\n  title: Answer\n"),
            ("plugin-a/Cargo.toml", "[package]\nname = \"plugin-a\"\n"),
            ("plugin-a/ui/index.tsx", "export default function PluginA() {}\n"),
            (
                "plugin-a/i18n/en_US.yaml",
                "plugin:\n  plugin_a:\n    title: Plugin A\n    shared: from a\n",
            ),
            ("local/plugin-b/Cargo.toml", "[package]\nname = \"plugin-b\"\n"),
            ("local/plugin-b/ui/index.tsx", "export default function PluginB() {}\n"),
            (
                "local/plugin-b/i18n/en_US.yaml",
                "plugin:\n  plugin_b:\n    title: Plugin B\n  plugin_a:\n    shared: from b\n",
            ),
        ];
        for (relative, content) in files {
            let path = fixture.path(relative);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, content)?;
        }
        std::fs::create_dir_all(fixture.work_root())?;
        Ok(fixture)
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn work_root(&self) -> PathBuf {
        self.path("work")
    }

    /// A runner whose `cargo metadata` resolves `answer` and `plugin-a`
    /// to this fixture.
    pub fn runner(&self) -> ScriptedRunner {
        ScriptedRunner::new()
            .with_package("answer", self.path("core"))
            .with_package("plugin-a", self.path("plugin-a"))
    }

    /// Removes the core UI so the web UI stages have nothing to do.
    pub fn without_core_ui(self) -> std::io::Result<Self> {
        std::fs::remove_dir_all(self.path("core/ui"))?;
        Ok(self)
    }
}
