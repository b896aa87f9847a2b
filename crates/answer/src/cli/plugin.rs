// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `answer plugin`: list and toggle compiled-in plugins.
//!
//! Toggles are written to the status file immediately so the next start of
//! the binary picks them up.

use std::path::Path;

use answer_core::{AnswerError, CapabilityKind};
use answer_plugin::{PluginHost, PluginListing};
use clap::Subcommand;
use colored::Colorize;

#[derive(Subcommand, Debug)]
pub enum PluginCommand {
    /// List plugins with their state and capabilities.
    List,
    /// Enable a plugin.
    Enable {
        /// Slug name of the plugin.
        slug: String,
    },
    /// Disable a plugin.
    Disable {
        /// Slug name of the plugin.
        slug: String,
    },
}

/// Executes `command` and returns the text to print.
pub fn run(
    command: &PluginCommand,
    host: &PluginHost,
    status_file: &Path,
) -> Result<String, AnswerError> {
    match command {
        PluginCommand::List => Ok(render_listing(&host.plugins())),
        PluginCommand::Enable { slug } => toggle(host, slug, true, status_file),
        PluginCommand::Disable { slug } => toggle(host, slug, false, status_file),
    }
}

fn toggle(
    host: &PluginHost,
    slug: &str,
    enabled: bool,
    status_file: &Path,
) -> Result<String, AnswerError> {
    host.enable(slug, enabled)?;
    host.status().save_to_path(status_file)?;
    let state = if enabled {
        "enabled".green()
    } else {
        "disabled".yellow()
    };
    Ok(format!("{state} {slug}\n"))
}

/// One line per plugin: slug, version, state, capabilities beyond base.
pub fn render_listing(plugins: &[PluginListing]) -> String {
    if plugins.is_empty() {
        return "no plugins registered\n".to_string();
    }

    let width = plugins
        .iter()
        .map(|p| p.info.slug_name.len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for plugin in plugins {
        let state = if plugin.enabled {
            format!("{:<8}", "enabled").green()
        } else {
            format!("{:<8}", "disabled").dimmed()
        };
        let capabilities = plugin
            .capabilities
            .iter()
            .filter(|kind| **kind != CapabilityKind::Base)
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!(
            "{:<width$}  {:<10}  {state}  {capabilities}\n",
            plugin.info.slug_name, plugin.info.version
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use answer_core::PluginInfo;

    fn listing(slug: &str, enabled: bool, capabilities: Vec<CapabilityKind>) -> PluginListing {
        let mut info = PluginInfo::new(slug, slug);
        info.version = "0.1.0".into();
        PluginListing {
            info,
            enabled,
            capabilities,
        }
    }

    #[test]
    fn empty_listing() {
        assert_eq!(render_listing(&[]), "no plugins registered\n");
    }

    #[test]
    fn listing_shows_state_and_capabilities() {
        colored::control::set_override(false);
        let out = render_listing(&[
            listing(
                "memory-cache",
                true,
                vec![CapabilityKind::Base, CapabilityKind::Cache, CapabilityKind::Config],
            ),
            listing("plain", false, vec![CapabilityKind::Base]),
        ]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("memory-cache  0.1.0"));
        assert!(lines[0].contains("enabled"));
        assert!(lines[0].ends_with("cache, config"));
        assert!(lines[1].starts_with("plain         0.1.0"));
        assert!(lines[1].contains("disabled"));
    }
}
