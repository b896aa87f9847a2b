// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `answer version`.

use answer_core::VersionInfo;

use crate::assets::AssetInfo;

pub fn render() -> String {
    render_with(&VersionInfo::current(), &AssetInfo::current())
}

fn render_with(version: &VersionInfo, assets: &AssetInfo) -> String {
    let mut out = format!("answer {version}\n");
    if assets.has_custom_ui() {
        out.push_str(&format!("web ui: rebuilt with plugins ({} files)\n", assets.ui_files));
    }
    if assets.has_merged_translations() {
        out.push_str(&format!(
            "translations: merged with plugins ({})\n",
            assets.translations.join(", ")
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version() -> VersionInfo {
        VersionInfo {
            version: "1.4.0".into(),
            revision: "abc123".into(),
            time: "2026-01-02T03:04:05Z".into(),
        }
    }

    #[test]
    fn stock_binary_prints_one_line() {
        let assets = AssetInfo {
            ui_files: 0,
            translations: Vec::new(),
        };
        assert_eq!(
            render_with(&version(), &assets),
            "answer 1.4.0 (revision abc123, built 2026-01-02T03:04:05Z)\n"
        );
    }

    #[test]
    fn custom_binary_reports_staged_assets() {
        let assets = AssetInfo {
            ui_files: 4,
            translations: vec!["en_US.yaml", "zh_CN.yaml"],
        };
        let out = render_with(&version(), &assets);
        assert!(out.contains("web ui: rebuilt with plugins (4 files)"));
        assert!(out.contains("translations: merged with plugins (en_US.yaml, zh_CN.yaml)"));
    }
}
