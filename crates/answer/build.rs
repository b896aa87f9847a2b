// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Build script for answer.
//!
//! Points the embedded asset directories at the web UI bundle and merged
//! translations staged by `answer build`. A stock build embeds empty
//! directories.

use std::path::{Path, PathBuf};

const ASSETS: &[(&str, &str, &str)] = &[
    ("ANSWER_UI_DIR", "ANSWER_EMBED_UI_DIR", "ui"),
    ("ANSWER_I18N_DIR", "ANSWER_EMBED_I18N_DIR", "i18n"),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR")?);
    for (source, target, fallback) in ASSETS {
        println!("cargo:rerun-if-env-changed={source}");
        let staged = std::env::var_os(source)
            .map(PathBuf::from)
            .filter(|dir| dir.is_dir());
        let dir = match staged {
            Some(dir) => {
                println!("cargo:rerun-if-changed={}", dir.display());
                std::path::absolute(dir)?
            }
            None => empty_dir(&out_dir, fallback)?,
        };
        println!("cargo:rustc-env={target}={}", dir.display());
    }
    Ok(())
}

fn empty_dir(out_dir: &Path, name: &str) -> std::io::Result<PathBuf> {
    let dir = out_dir.join("empty").join(name);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
