// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end pipeline runs against a scripted toolchain.

use std::path::Path;
use std::sync::Arc;

use answer_builder::{BuildError, BuildMaterial, Builder, Stage};
use answer_core::VersionInfo;
use answer_test_utils::scripted_runner::FAKE_BINARY;
use answer_test_utils::{BuildFixture, ScriptedRunner};
use tokio_util::sync::CancellationToken;

fn version() -> VersionInfo {
    VersionInfo {
        version: "1.4.0".into(),
        revision: "abc123".into(),
        time: String::new(),
    }
}

fn material(fixture: &BuildFixture) -> BuildMaterial {
    let descriptors = vec![
        "example.com/plugin-a@1.2.0".to_string(),
        format!("example.com/plugin-b={}", fixture.path("local/plugin-b").display()),
    ];
    BuildMaterial::new(fixture.path("out/answer-custom"), &descriptors, version())
        .unwrap()
        .with_work_root(Some(fixture.work_root()))
}

fn entries(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
}

#[tokio::test]
async fn end_to_end_build_produces_one_binary() {
    let fixture = BuildFixture::new().unwrap();
    let runner = Arc::new(fixture.runner());
    let material = material(&fixture);

    let report = Builder::new(runner.clone()).build(&material).await.unwrap();

    let output = fixture.path("out/answer-custom");
    assert_eq!(report.output, output);
    assert!(std::fs::read(&output).unwrap().starts_with(FAKE_BINARY));
    assert_eq!(entries(&fixture.path("out")), 1);
    assert_eq!(entries(&fixture.work_root()), 0, "workspace must be removed");

    let mut expected = vec![Stage::CreateWorkspace];
    expected.extend(Stage::STAGED);
    expected.push(Stage::Cleanup);
    assert_eq!(report.executed, expected);

    for (program, sub) in [
        ("cargo", "generate-lockfile"),
        ("cargo", "vendor"),
        ("cargo", "metadata"),
        ("pnpm", "install"),
        ("pnpm", "build"),
        ("cargo", "build"),
    ] {
        assert!(runner.invoked(program, sub), "{program} {sub} not invoked");
    }
}

#[tokio::test]
async fn generated_package_registers_every_plugin() {
    let fixture = BuildFixture::new().unwrap();
    let runner = Arc::new(fixture.runner());
    Builder::new(runner.clone())
        .build(&material(&fixture))
        .await
        .unwrap();

    let snapshot = runner.snapshot().expect("cargo build ran");
    assert!(snapshot.main_rs.contains("answer::builtin::register,"));
    assert!(snapshot.main_rs.contains("plugin_a::register,"));
    assert!(snapshot.main_rs.contains("plugin_b::register,"));

    let manifest: toml_edit::DocumentMut = snapshot.manifest.parse().unwrap();
    let deps = &manifest["dependencies"];
    assert_eq!(deps["plugin_a"]["tag"].as_str(), Some("v1.2.0"));
    assert_eq!(
        deps["plugin_b"]["path"].as_str().map(Path::new),
        Some(fixture.path("local/plugin-b").as_path())
    );
    assert!(manifest.get("patch").is_none());
    assert!(snapshot.cargo_config.contains("vendored-sources"));

    assert_eq!(snapshot.env("ANSWER_BUILD_VERSION"), Some("1.4.0"));
    assert_eq!(snapshot.env("ANSWER_BUILD_REVISION"), Some("abc123"));
    assert!(snapshot.env("ANSWER_BUILD_TIME").is_some_and(|t| t.ends_with('Z')));
}

#[tokio::test]
async fn ui_and_translations_are_staged() {
    let fixture = BuildFixture::new().unwrap();
    let runner = Arc::new(fixture.runner());
    Builder::new(runner.clone())
        .build(&material(&fixture))
        .await
        .unwrap();
    let snapshot = runner.snapshot().unwrap();

    assert_eq!(
        snapshot.ui_index.as_deref(),
        Some(
            "export { default as PluginA } from './plugin-a';\n\
             export { default as PluginB } from './plugin-b';\n"
        )
    );

    let en: serde_yaml::Value = serde_yaml::from_str(&snapshot.catalogs["en_US.yaml"]).unwrap();
    assert_eq!(en["ui"]["title"].as_str(), Some("Answer"));
    assert_eq!(en["plugin"]["plugin_a"]["title"].as_str(), Some("Plugin A"));
    assert_eq!(en["plugin"]["plugin_a"]["shared"].as_str(), Some("from b"));
    assert_eq!(en["plugin"]["plugin_b"]["title"].as_str(), Some("Plugin B"));
    assert_eq!(snapshot.catalogs["zh_CN.yaml"], "ui:\n  title: Answer\n");

    // The source core catalogs are never modified.
    let source = std::fs::read_to_string(fixture.path("core/i18n/en_US.yaml")).unwrap();
    assert_eq!(source, "ui:\n  title: Answer\n");
}

#[tokio::test]
async fn embedded_assets_outlive_the_workspace() {
    let fixture = BuildFixture::new().unwrap();
    let report = Builder::new(Arc::new(fixture.runner()))
        .build(&material(&fixture))
        .await
        .unwrap();

    assert_eq!(entries(&fixture.work_root()), 0);
    let binary = String::from_utf8_lossy(&std::fs::read(&report.output).unwrap()).into_owned();
    assert!(binary.contains("--- index.html"));
    assert!(binary.contains("export { default as PluginB } from './plugin-b';"));
    assert!(binary.contains("--- en_US.yaml"));
    assert!(binary.contains("title: Plugin A"));
    assert!(binary.contains("shared: from b"));
}

#[tokio::test]
async fn ui_build_without_bundle_is_a_missing_artifact() {
    let fixture = BuildFixture::new().unwrap();
    let runner = Arc::new(fixture.runner().without_ui_bundle());

    let failure = Builder::new(runner.clone())
        .build(&material(&fixture))
        .await
        .unwrap_err();

    assert_eq!(failure.stage, Stage::BuildUi);
    assert!(matches!(failure.source, BuildError::MissingArtifact(_)));
    assert!(!runner.invoked("cargo", "build"));
    assert_eq!(entries(&fixture.work_root()), 0);
}

#[tokio::test]
async fn ui_build_failure_short_circuits_and_cleans_up() {
    let fixture = BuildFixture::new().unwrap();
    let runner = Arc::new(fixture.runner().fail_on("pnpm", "build"));

    let failure = Builder::new(runner.clone())
        .build(&material(&fixture))
        .await
        .unwrap_err();

    assert_eq!(failure.stage, Stage::BuildUi);
    assert!(matches!(failure.source, BuildError::Tool { .. }));
    assert!(!failure.executed.contains(&Stage::MergeTranslations));
    assert!(!failure.executed.contains(&Stage::Compile));
    assert_eq!(failure.executed.last(), Some(&Stage::Cleanup));

    assert!(!runner.invoked("cargo", "build"));
    assert!(runner.snapshot().is_none());
    assert!(!fixture.path("out/answer-custom").exists());
    assert_eq!(entries(&fixture.work_root()), 0);
}

#[tokio::test]
async fn vendoring_failure_stops_at_dependency_resolution() {
    let fixture = BuildFixture::new().unwrap();
    let runner = Arc::new(fixture.runner().fail_on("cargo", "vendor"));

    let failure = Builder::new(runner.clone())
        .build(&material(&fixture))
        .await
        .unwrap_err();

    assert_eq!(failure.stage, Stage::ResolveDependencies);
    assert!(!runner.invoked("cargo", "metadata"));
    assert!(failure.to_string().contains("resolve-dependencies"));
    assert_eq!(entries(&fixture.work_root()), 0);
}

#[tokio::test]
async fn missing_core_ui_skips_web_ui() {
    let fixture = BuildFixture::new().unwrap().without_core_ui().unwrap();
    let runner = Arc::new(fixture.runner());

    let report = Builder::new(runner.clone())
        .build(&material(&fixture))
        .await
        .unwrap();

    assert!(report.executed.contains(&Stage::BuildUi));
    assert!(!runner.invoked("pnpm", "install"));
    let snapshot = runner.snapshot().unwrap();
    assert!(snapshot.ui_index.is_none());
    assert!(snapshot.env("ANSWER_UI_DIR").is_none());
    assert!(snapshot.env("ANSWER_I18N_DIR").is_some());
}

#[tokio::test]
async fn core_path_adds_registry_patch() {
    let fixture = BuildFixture::new().unwrap();
    let runner = Arc::new(fixture.runner());
    let material = material(&fixture).with_core_path(Some(fixture.path("core")));

    Builder::new(runner.clone()).build(&material).await.unwrap();

    let manifest: toml_edit::DocumentMut = runner.snapshot().unwrap().manifest.parse().unwrap();
    assert_eq!(
        manifest["patch"]["crates-io"]["answer"]["path"]
            .as_str()
            .map(Path::new),
        Some(fixture.path("core").as_path())
    );
}

#[tokio::test]
async fn unresolved_plugin_package_fails_copy_stage() {
    let fixture = BuildFixture::new().unwrap();
    let runner = Arc::new(ScriptedRunner::new().with_package("answer", fixture.path("core")));

    let failure = Builder::new(runner)
        .build(&material(&fixture))
        .await
        .unwrap_err();

    assert_eq!(failure.stage, Stage::CopyUiAssets);
    assert!(matches!(failure.source, BuildError::PackageNotFound(ref name) if name == "plugin-a"));
}

#[tokio::test]
async fn cancelled_build_still_cleans_up() {
    let fixture = BuildFixture::new().unwrap();
    let runner = Arc::new(fixture.runner());
    let cancel = CancellationToken::new();
    cancel.cancel();

    let failure = Builder::new(runner.clone())
        .with_cancellation(cancel)
        .build(&material(&fixture))
        .await
        .unwrap_err();

    assert_eq!(failure.stage, Stage::GenerateEntryPoint);
    assert!(matches!(failure.source, BuildError::Cancelled));
    assert_eq!(
        failure.executed,
        vec![Stage::CreateWorkspace, Stage::GenerateEntryPoint, Stage::Cleanup]
    );
    assert!(runner.commands().is_empty());
    assert_eq!(entries(&fixture.work_root()), 0);
}
