// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin descriptors: `name[@version][=local-path]`.
//!
//! A name containing `/` is a git-hosted crate (`example.com/org/plugin`);
//! anything else is a crates.io package name.

use std::path::PathBuf;

use crate::error::BuildError;

/// One requested plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginSpec {
    pub name: String,
    pub version: Option<String>,
    pub local_path: Option<PathBuf>,
}

impl PluginSpec {
    /// Parses `name@version=path`. Version and path are optional; empty
    /// parts are treated as absent.
    pub fn parse(descriptor: &str) -> Result<Self, BuildError> {
        let trimmed = descriptor.trim();
        let (module, local_path) = match trimmed.split_once('=') {
            Some((module, path)) => (module.trim(), non_empty(path).map(PathBuf::from)),
            None => (trimmed, None),
        };
        let (name, version) = match module.split_once('@') {
            Some((name, version)) => (name.trim(), non_empty(version).map(str::to_string)),
            None => (module, None),
        };

        if name.is_empty() {
            return Err(BuildError::InvalidDescriptor {
                descriptor: descriptor.to_string(),
                reason: "missing plugin name".to_string(),
            });
        }

        Ok(Self {
            name: name.to_string(),
            version,
            local_path,
        })
    }

    /// True for `host/path` names fetched from git.
    pub fn is_git(&self) -> bool {
        self.name.contains('/')
    }

    /// Cargo package name: the final path segment for git names.
    pub fn package(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    /// The major-qualified module path for this plugin's version.
    pub fn module_path(&self) -> String {
        match &self.version {
            Some(version) => versioned_module_path(&self.name, version),
            None => self.name.clone(),
        }
    }

    /// The requested version normalized without its `v` prefix, or `None`
    /// when absent or not valid semver.
    pub fn pinned_version(&self) -> Option<String> {
        let version = self.version.as_deref()?.trim().trim_start_matches('v');
        semver::Version::parse(version).ok().map(|v| v.to_string())
    }

    /// Dependency key in the generated manifest and crate name in `main.rs`.
    pub fn alias(&self) -> String {
        let mut alias = sanitize_ident(self.package());
        if let Some(major) = self.version.as_deref().and_then(major_suffix) {
            alias.push_str(&format!("_v{major}"));
        }
        alias
    }
}

impl std::fmt::Display for PluginSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)?;
        if let Some(version) = &self.version {
            write!(f, "@{version}")?;
        }
        if let Some(path) = &self.local_path {
            write!(f, "={}", path.display())?;
        }
        Ok(())
    }
}

fn non_empty(part: &str) -> Option<&str> {
    let part = part.trim();
    (!part.is_empty()).then_some(part)
}

/// Appends `/vN` to `name` when `version` parses as semver with major `N > 1`.
///
/// A leading `v` is accepted. Anything that is not a valid version leaves
/// the path unchanged.
pub fn versioned_module_path(name: &str, version: &str) -> String {
    match major_suffix(version) {
        Some(major) => format!("{name}/v{major}"),
        None => name.to_string(),
    }
}

fn major_suffix(version: &str) -> Option<u64> {
    let parsed = semver::Version::parse(version.trim().trim_start_matches('v')).ok()?;
    (parsed.major > 1).then_some(parsed.major)
}

const RESERVED: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while", "answer", "std", "core",
];

fn sanitize_ident(raw: &str) -> String {
    let mut ident: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if RESERVED.contains(&ident.as_str()) {
        ident.push_str("_plugin");
    }
    ident
}
