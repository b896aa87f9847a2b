// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generated sources of the custom package.

use toml_edit::{ArrayOfTables, DocumentMut, InlineTable, Item, Table, value};
use tracing::warn;

use crate::descriptor::PluginSpec;
use crate::material::{BuildMaterial, CORE_PACKAGE};

/// Package name of the generated crate.
pub const GENERATED_PACKAGE: &str = "answer-custom";

/// Minimum toolchain of the generated crate.
pub const RUST_VERSION: &str = "1.88";

/// Renders `src/main.rs`: the built-in registrar, then remote plugins, then
/// local plugins, each in descriptor order.
pub fn render_entry_point(material: &BuildMaterial) -> String {
    let registrars: String = std::iter::once(format!("{CORE_PACKAGE}::builtin"))
        .chain(
            material
                .remote_plugins()
                .chain(material.local_plugins())
                .map(PluginSpec::alias),
        )
        .map(|module| format!("        {module}::register,\n"))
        .collect();

    format!(
        "// Generated by `answer build`. Do not edit.\n\
         \n\
         use std::process::ExitCode;\n\
         \n\
         fn main() -> ExitCode {{\n    \
             {CORE_PACKAGE}::run(&[\n{registrars}    ])\n\
         }}\n"
    )
}

/// Renders `Cargo.toml` with every plugin as a registry or git dependency.
///
/// Local checkouts are redirected afterwards by
/// [`apply_local_overrides`](crate::manifest::apply_local_overrides).
pub fn render_manifest(material: &BuildMaterial) -> String {
    let mut doc = DocumentMut::new();

    let mut package = Table::new();
    package["name"] = value(GENERATED_PACKAGE);
    package["version"] = value("0.0.0");
    package["edition"] = value("2024");
    package["rust-version"] = value(RUST_VERSION);
    package["publish"] = value(false);
    doc["package"] = Item::Table(package);

    let mut bin = Table::new();
    bin["name"] = value(&material.bin_name);
    bin["path"] = value("src/main.rs");
    let mut bins = ArrayOfTables::new();
    bins.push(bin);
    doc["bin"] = Item::ArrayOfTables(bins);

    let mut dependencies = Table::new();
    dependencies[CORE_PACKAGE] = value(exact(&material.core_version));
    for plugin in &material.plugins {
        dependencies[plugin.alias().as_str()] = value(remote_dependency(plugin));
    }
    doc["dependencies"] = Item::Table(dependencies);

    // Keeps the package out of any workspace enclosing the work root.
    doc["workspace"] = Item::Table(Table::new());

    doc.to_string()
}

fn remote_dependency(plugin: &PluginSpec) -> InlineTable {
    let mut dep = InlineTable::new();
    dep.insert("package", plugin.package().into());
    let pinned = plugin.pinned_version();
    if plugin.version.is_some() && pinned.is_none() {
        warn!(plugin = %plugin, "plugin version is not valid semver, using the unqualified dependency");
    }
    if plugin.is_git() {
        dep.insert("git", format!("https://{}", plugin.name).into());
        if let Some(version) = pinned {
            dep.insert("tag", format!("v{version}").into());
        }
    } else {
        let requirement = pinned.map_or_else(|| "*".to_string(), |v| exact(&v));
        dep.insert("version", requirement.into());
    }
    dep
}

fn exact(version: &str) -> String {
    format!("={}", version.trim_start_matches('v'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use answer_core::VersionInfo;

    fn material(descriptors: &[&str]) -> BuildMaterial {
        let descriptors: Vec<String> = descriptors.iter().map(|d| d.to_string()).collect();
        BuildMaterial::new(
            "out/answer-custom",
            &descriptors,
            VersionInfo {
                version: "1.4.0".into(),
                revision: "abc".into(),
                time: String::new(),
            },
        )
        .unwrap()
    }

    #[test]
    fn entry_point_lists_builtin_remote_then_local() {
        let m = material(&[
            "example.com/plugin-b=./local/plugin-b",
            "example.com/plugin-a@1.2.0",
            "example.com/plugin-c@2.0.0",
        ]);
        let main_rs = render_entry_point(&m);
        let builtin = main_rs.find("answer::builtin::register").unwrap();
        let a = main_rs.find("plugin_a::register").unwrap();
        let c = main_rs.find("plugin_c_v2::register").unwrap();
        let b = main_rs.find("plugin_b::register").unwrap();
        assert!(builtin < a && a < c && c < b, "{main_rs}");
        assert!(main_rs.contains("fn main() -> ExitCode {\n    answer::run(&[\n"));
    }

    #[test]
    fn entry_point_without_plugins_still_registers_builtin() {
        let main_rs = render_entry_point(&material(&[]));
        assert!(main_rs.contains("        answer::builtin::register,\n    ])"));
    }

    #[test]
    fn manifest_declares_package_and_dependencies() {
        let m = material(&["example.com/plugin-a@1.2.0", "answer-search-meili", "example.com/x/plugin-c@v2.0.0"]);
        let doc: DocumentMut = render_manifest(&m).parse().unwrap();

        assert_eq!(doc["package"]["name"].as_str(), Some(GENERATED_PACKAGE));
        assert_eq!(doc["package"]["rust-version"].as_str(), Some(RUST_VERSION));
        assert_eq!(doc["bin"][0]["name"].as_str(), Some("answer"));
        assert_eq!(doc["dependencies"]["answer"].as_str(), Some("=1.4.0"));

        let a = &doc["dependencies"]["plugin_a"];
        assert_eq!(a["git"].as_str(), Some("https://example.com/plugin-a"));
        assert_eq!(a["tag"].as_str(), Some("v1.2.0"));
        assert_eq!(a["package"].as_str(), Some("plugin-a"));

        let meili = &doc["dependencies"]["answer_search_meili"];
        assert_eq!(meili["version"].as_str(), Some("*"));
        assert_eq!(meili["package"].as_str(), Some("answer-search-meili"));

        let c = &doc["dependencies"]["plugin_c_v2"];
        assert_eq!(c["tag"].as_str(), Some("v2.0.0"));
        assert!(doc["workspace"].is_table());
    }

    #[test]
    fn malformed_versions_fall_back_to_unqualified_dependencies() {
        let m = material(&["answer-x@not-a-version", "example.com/y@latest"]);
        let doc: DocumentMut = render_manifest(&m).parse().unwrap();

        let x = &doc["dependencies"]["answer_x"];
        assert_eq!(x["version"].as_str(), Some("*"));
        assert_eq!(x["package"].as_str(), Some("answer-x"));

        let y = &doc["dependencies"]["y"];
        assert_eq!(y["git"].as_str(), Some("https://example.com/y"));
        assert!(y.get("tag").is_none());
    }
}
