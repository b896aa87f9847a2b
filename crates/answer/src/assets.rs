// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Web UI and translation assets compiled into the binary.
//!
//! `answer build` sets `ANSWER_UI_DIR` and `ANSWER_I18N_DIR` while
//! compiling a custom binary; the build script hands those directories to
//! [`include_dir!`], so the content lives in the executable and outlasts
//! the build workspace. A stock `cargo build` embeds nothing.

use include_dir::{Dir, include_dir};

static UI: Dir<'static> = include_dir!("$ANSWER_EMBED_UI_DIR");
static I18N: Dir<'static> = include_dir!("$ANSWER_EMBED_I18N_DIR");

/// A file of the bundled web UI, by path relative to the bundle root.
pub fn ui_file(path: &str) -> Option<&'static [u8]> {
    UI.get_file(path.trim_start_matches('/')).map(|file| file.contents())
}

/// A merged translation catalog, e.g. `en_US.yaml`.
pub fn translation(name: &str) -> Option<&'static str> {
    I18N.get_file(name).and_then(|file| file.contents_utf8())
}

/// Names of the embedded translation catalogs.
pub fn translation_names() -> impl Iterator<Item = &'static str> {
    I18N.files()
        .filter_map(|file| file.path().file_name())
        .filter_map(|name| name.to_str())
}

/// What this binary carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetInfo {
    /// Files in the embedded web UI bundle.
    pub ui_files: usize,
    /// Embedded translation catalog names, sorted.
    pub translations: Vec<&'static str>,
}

impl AssetInfo {
    pub fn current() -> Self {
        Self {
            ui_files: count_files(&UI),
            translations: {
                let mut names: Vec<_> = translation_names().collect();
                names.sort_unstable();
                names
            },
        }
    }

    /// True if the binary was produced with a rebuilt web UI.
    pub fn has_custom_ui(&self) -> bool {
        self.ui_files > 0
    }

    /// True if plugin translations were merged into the core catalogs.
    pub fn has_merged_translations(&self) -> bool {
        !self.translations.is_empty()
    }
}

fn count_files(dir: &Dir<'_>) -> usize {
    dir.files().count() + dir.dirs().map(count_files).sum::<usize>()
}
