// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-wide plugin enable/disable state.
//!
//! The state is a flat `slug_name -> bool` map. A slug missing from the map
//! is disabled. Readers load an immutable snapshot without locking; writers
//! replace the snapshot copy-on-write, so dispatch never blocks on an admin
//! toggle.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use answer_core::AnswerError;
use arc_swap::ArcSwap;
use tracing::{debug, info};

/// Enable/disable state for every known plugin.
pub struct StatusManager {
    states: ArcSwap<BTreeMap<String, bool>>,
}

impl StatusManager {
    /// Creates a manager with every plugin disabled.
    pub fn new() -> Self {
        Self {
            states: ArcSwap::from_pointee(BTreeMap::new()),
        }
    }

    /// Creates a manager from an existing map.
    pub fn from_map(states: BTreeMap<String, bool>) -> Self {
        Self {
            states: ArcSwap::from_pointee(states),
        }
    }

    /// Returns whether the plugin is enabled. Unknown slugs are disabled.
    pub fn is_enabled(&self, slug_name: &str) -> bool {
        self.states.load().get(slug_name).copied().unwrap_or(false)
    }

    /// Sets the enabled state of a plugin.
    pub fn enable(&self, slug_name: &str, enabled: bool) {
        self.states.rcu(|current| {
            let mut next = BTreeMap::clone(current);
            next.insert(slug_name.to_string(), enabled);
            next
        });
        debug!(slug_name, enabled, "plugin status changed");
    }

    /// Returns the current state map.
    pub fn snapshot(&self) -> Arc<BTreeMap<String, bool>> {
        self.states.load_full()
    }

    /// Returns the slugs currently enabled, sorted.
    pub fn enabled_slugs(&self) -> Vec<String> {
        self.states
            .load()
            .iter()
            .filter(|(_, enabled)| **enabled)
            .map(|(slug, _)| slug.clone())
            .collect()
    }

    /// Replaces the whole state with the contents of a JSON object.
    ///
    /// An empty or whitespace-only document clears the state.
    pub fn load(&self, json: &str) -> Result<(), AnswerError> {
        let states: BTreeMap<String, bool> = if json.trim().is_empty() {
            BTreeMap::new()
        } else {
            serde_json::from_str(json)
                .map_err(|e| AnswerError::Config(format!("invalid plugin status: {e}")))?
        };
        self.states.store(Arc::new(states));
        Ok(())
    }

    /// Serializes the state as a flat JSON object with sorted keys.
    pub fn dump(&self) -> Result<String, AnswerError> {
        serde_json::to_string(&**self.states.load())
            .map_err(|e| AnswerError::Internal(format!("failed to serialize plugin status: {e}")))
    }

    /// Loads the state from a file. A missing file leaves every plugin disabled.
    pub fn load_from_path(&self, path: &Path) -> Result<(), AnswerError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                self.load(&content)?;
                info!(path = %path.display(), enabled = self.enabled_slugs().len(), "plugin status loaded");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no plugin status file, all plugins disabled");
                self.states.store(Arc::new(BTreeMap::new()));
                Ok(())
            }
            Err(e) => Err(AnswerError::Storage { source: Box::new(e) }),
        }
    }

    /// Writes the state to a file, replacing it atomically.
    pub fn save_to_path(&self, path: &Path) -> Result<(), AnswerError> {
        let json = self.dump()?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(|e| AnswerError::Storage { source: Box::new(e) })?;

        let mut file = tempfile::NamedTempFile::new_in(dir)
            .map_err(|e| AnswerError::Storage { source: Box::new(e) })?;
        file.write_all(json.as_bytes())
            .map_err(|e| AnswerError::Storage { source: Box::new(e) })?;
        file.persist(path)
            .map_err(|e| AnswerError::Storage { source: Box::new(e.error) })?;
        Ok(())
    }
}

impl Default for StatusManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StatusManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusManager")
            .field("states", &*self.states.load())
            .finish()
    }
}
