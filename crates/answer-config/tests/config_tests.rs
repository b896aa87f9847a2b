// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for configuration loading and diagnostics.

use std::path::PathBuf;

use answer_config::diagnostic::ConfigError;
use answer_config::model::AnswerConfig;
use answer_config::{load_and_validate, load_and_validate_str, load_config, load_config_from_str};
use figment::Jail;
use serial_test::serial;

#[test]
fn full_toml_deserializes() {
    let toml = r#"
[log]
level = "debug"

[plugin]
status_file = "/var/lib/answer/plugin_status.json"

[build]
core_path = "/src/answer"
core_version = "1.4.0"
cargo = "/opt/cargo/bin/cargo"
package_manager = "npm"
work_root = "/tmp/builds"
bin_name = "answer-custom"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.log.level, "debug");
    assert_eq!(
        config.plugin.status_file,
        PathBuf::from("/var/lib/answer/plugin_status.json")
    );
    assert_eq!(config.build.core_path, Some(PathBuf::from("/src/answer")));
    assert_eq!(config.build.core_version, "1.4.0");
    assert_eq!(config.build.cargo, "/opt/cargo/bin/cargo");
    assert_eq!(config.build.package_manager, "npm");
    assert_eq!(config.build.work_root, Some(PathBuf::from("/tmp/builds")));
    assert_eq!(config.build.bin_name, "answer-custom");
}

#[test]
fn missing_sections_use_defaults() {
    let config = load_config_from_str("[log]\nlevel = \"warn\"\n").unwrap();
    assert_eq!(config.log.level, "warn");
    assert_eq!(config.build, AnswerConfig::default().build);
    assert!(config.build.core_path.is_none());
    assert_eq!(config.build.package_manager, "pnpm");
}

#[test]
fn defaults_point_status_file_at_answer_dir() {
    let config = AnswerConfig::default();
    assert!(config.plugin.status_file.ends_with("plugin_status.json"));
    assert_eq!(config.build.cargo, "cargo");
    assert_eq!(config.build.bin_name, "answer");
}

#[test]
fn unknown_key_gets_suggestion_and_span() {
    let toml = "[build]\ncore_pth = \"/src\"\n";
    let errors = load_and_validate_str(toml).expect_err("unknown key should fail");

    let found = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, valid_keys, span, .. } if {
            key == "core_pth"
                && suggestion.as_deref() == Some("core_path")
                && valid_keys.contains("package_manager")
                && span.is_some()
        })
    });
    assert!(found, "expected UnknownKey for core_pth, got: {errors:?}");
}

#[test]
fn unknown_top_level_section_is_rejected() {
    let errors = load_and_validate_str("[plugins]\nstatus_file = \"x\"\n").unwrap_err();
    assert!(errors.iter().any(|e| matches!(
        e,
        ConfigError::UnknownKey { key, suggestion, .. }
            if key == "plugins" && suggestion.as_deref() == Some("plugin")
    )));
}

#[test]
fn invalid_type_is_reported() {
    let errors = load_and_validate_str("[build]\nbin_name = 7\n").unwrap_err();
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { key, .. } if key.contains("bin_name"))),
        "{errors:?}"
    );
}

#[test]
fn validation_errors_surface_from_str_loader() {
    let errors = load_and_validate_str("[log]\nlevel = \"loud\"\n").unwrap_err();
    assert!(matches!(
        &errors[0],
        ConfigError::Validation { message } if message.contains("log.level")
    ));
}

#[test]
fn unknown_key_renders_with_miette() {
    let errors = load_and_validate_str("[build]\ncargoo = \"c\"\n").unwrap_err();
    let handler = miette::GraphicalReportHandler::new();
    let mut buf = String::new();
    handler.render_report(&mut buf, &errors[0]).unwrap();
    assert!(buf.contains("cargoo"));
    assert!(buf.contains("did you mean `cargo`"));
}

#[test]
#[serial]
fn local_file_and_env_layering() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "answer.toml",
            r#"
[log]
level = "debug"

[build]
package_manager = "yarn"
bin_name = "from-file"
"#,
        )?;
        jail.set_env("ANSWER_BUILD_BIN_NAME", "from-env");
        jail.set_env("ANSWER_BUILD_CORE_PATH", "/work/answer");

        let config = load_config()?;
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.build.package_manager, "yarn");
        assert_eq!(config.build.bin_name, "from-env");
        assert_eq!(config.build.core_path, Some(PathBuf::from("/work/answer")));
        Ok(())
    });
}

#[test]
#[serial]
fn build_metadata_env_does_not_leak_into_config() {
    Jail::expect_with(|jail| {
        jail.set_env("ANSWER_BUILD_VERSION", "9.9.9");
        jail.set_env("ANSWER_BUILD_REVISION", "deadbeef");
        jail.set_env("ANSWER_UI_DIR", "/tmp/ui");

        let config = load_and_validate().expect("unrelated ANSWER_ vars must be ignored");
        assert_ne!(config.build.core_version, "9.9.9");
        Ok(())
    });
}

#[test]
#[serial]
fn file_errors_point_into_the_file() {
    Jail::expect_with(|jail| {
        jail.create_file("answer.toml", "[plugin]\nstatus_fil = \"x.json\"\n")?;

        let errors = load_and_validate().expect_err("typo should fail");
        let located = errors.iter().any(|e| {
            matches!(e, ConfigError::UnknownKey { key, span, src, .. }
                if key == "status_fil" && span.is_some() && src.is_some())
        });
        assert!(located, "{errors:?}");
        Ok(())
    });
}
