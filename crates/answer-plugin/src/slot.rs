// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ordered registration slot for a single capability kind.

use std::future::Future;
use std::sync::Arc;

use answer_core::{AnswerError, Base, CapabilityKind};
use tracing::{debug, trace};

struct Entry<T: ?Sized> {
    slug_name: String,
    plugin: Arc<T>,
}

/// The plugins registered for one capability kind.
///
/// Entries keep registration order, so broadcasts are deterministic:
/// first registered, first called. A mandatory slot dispatches to every
/// entry; a regular slot only to entries enabled in the [`StatusManager`].
///
/// [`StatusManager`]: crate::StatusManager
pub struct Slot<T: ?Sized> {
    kind: CapabilityKind,
    mandatory: bool,
    entries: Vec<Entry<T>>,
}

impl<T: ?Sized + Base> Slot<T> {
    /// Creates an empty slot.
    pub fn new(kind: CapabilityKind, mandatory: bool) -> Self {
        Self {
            kind,
            mandatory,
            entries: Vec::new(),
        }
    }

    /// The capability kind this slot serves.
    pub fn kind(&self) -> CapabilityKind {
        self.kind
    }

    /// Whether dispatch ignores enable/disable state.
    pub fn is_mandatory(&self) -> bool {
        self.mandatory
    }

    /// Appends a plugin to the slot.
    ///
    /// Fails with [`AnswerError::DuplicatePlugin`] if a plugin with the same
    /// slug name is already registered here; the slot is left unchanged.
    pub fn register(&mut self, plugin: Arc<T>) -> Result<(), AnswerError> {
        let slug_name = plugin.slug_name();
        if self.contains(&slug_name) {
            return Err(AnswerError::DuplicatePlugin { slug_name });
        }
        debug!(kind = %self.kind, slug_name = %slug_name, "enrolled in capability slot");
        self.entries.push(Entry { slug_name, plugin });
        Ok(())
    }

    /// Returns true if a plugin with this slug is registered in the slot.
    pub fn contains(&self, slug_name: &str) -> bool {
        self.entries.iter().any(|e| e.slug_name == slug_name)
    }

    /// Number of registered plugins, enabled or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered plugins in registration order, ignoring status.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<T>> {
        self.entries.iter().map(|e| &e.plugin)
    }

    /// Plugins a broadcast would currently reach, in registration order.
    pub fn dispatchable(&self, status: &crate::StatusManager) -> Vec<Arc<T>> {
        self.entries
            .iter()
            .filter(|e| self.admits(e, status))
            .map(|e| Arc::clone(&e.plugin))
            .collect()
    }

    /// Broadcasts a synchronous call to every dispatchable plugin.
    ///
    /// Stops at the first error and returns it; plugins after the failing
    /// one are not visited.
    pub fn call<E, F>(&self, status: &crate::StatusManager, mut visit: F) -> Result<(), E>
    where
        F: FnMut(&Arc<T>) -> Result<(), E>,
    {
        for entry in &self.entries {
            if !self.admits(entry, status) {
                continue;
            }
            visit(&entry.plugin)?;
        }
        Ok(())
    }

    /// Broadcasts an asynchronous call to every dispatchable plugin, one at a time.
    ///
    /// Same ordering and fail-fast rules as [`call`](Slot::call).
    pub async fn call_async<E, F, Fut>(
        &self,
        status: &crate::StatusManager,
        mut visit: F,
    ) -> Result<(), E>
    where
        F: FnMut(Arc<T>) -> Fut,
        Fut: Future<Output = Result<(), E>>,
    {
        for plugin in self.dispatchable(status) {
            visit(plugin).await?;
        }
        Ok(())
    }

    fn admits(&self, entry: &Entry<T>, status: &crate::StatusManager) -> bool {
        if self.mandatory || status.is_enabled(&entry.slug_name) {
            return true;
        }
        trace!(kind = %self.kind, slug_name = %entry.slug_name, "skipping disabled plugin");
        false
    }
}

impl<T: ?Sized> std::fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slot")
            .field("kind", &self.kind)
            .field("mandatory", &self.mandatory)
            .field(
                "entries",
                &self.entries.iter().map(|e| e.slug_name.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StatusManager;
    use answer_core::PluginInfo;
    use std::sync::Mutex;
    use tracing_test::traced_test;

    struct Named(&'static str);

    impl Base for Named {
        fn info(&self) -> PluginInfo {
            PluginInfo::new(self.0, self.0)
        }
    }

    fn slot_with(mandatory: bool, names: &[&'static str]) -> Slot<dyn Base> {
        let mut slot: Slot<dyn Base> = Slot::new(CapabilityKind::Cache, mandatory);
        for name in names {
            slot.register(Arc::new(Named(name))).unwrap();
        }
        slot
    }

    fn visited(slot: &Slot<dyn Base>, status: &StatusManager) -> Vec<String> {
        let mut seen = Vec::new();
        slot.call::<AnswerError, _>(status, |p| {
            seen.push(p.slug_name());
            Ok(())
        })
        .unwrap();
        seen
    }

    #[test]
    fn duplicate_slug_is_rejected() {
        let mut slot = slot_with(false, &["a"]);
        let err = slot.register(Arc::new(Named("a"))).unwrap_err();
        assert!(matches!(err, AnswerError::DuplicatePlugin { slug_name } if slug_name == "a"));
        assert_eq!(slot.len(), 1);
    }

    #[test]
    fn mandatory_slot_visits_in_registration_order() {
        let slot = slot_with(true, &["a", "b", "c"]);
        let status = StatusManager::new();
        assert_eq!(visited(&slot, &status), vec!["a", "b", "c"]);
    }

    #[test]
    fn regular_slot_skips_plugins_without_status() {
        let slot = slot_with(false, &["a", "b", "c"]);
        let status = StatusManager::new();
        assert!(visited(&slot, &status).is_empty());

        status.enable("b", true);
        assert_eq!(visited(&slot, &status), vec!["b"]);
    }

    #[test]
    #[traced_test]
    fn skipped_plugins_are_traced() {
        let slot = slot_with(false, &["quiet"]);
        let status = StatusManager::new();
        assert!(visited(&slot, &status).is_empty());
        assert!(logs_contain("skipping disabled plugin"));
    }

    #[test]
    fn explicitly_disabled_plugin_is_skipped() {
        let slot = slot_with(false, &["a", "b"]);
        let status = StatusManager::new();
        status.enable("a", true);
        status.enable("b", false);
        assert_eq!(visited(&slot, &status), vec!["a"]);
    }

    #[test]
    fn first_error_stops_the_broadcast() {
        let slot = slot_with(true, &["a", "b", "c"]);
        let status = StatusManager::new();
        let seen = Mutex::new(Vec::new());

        let result = slot.call(&status, |p| {
            let slug = p.slug_name();
            seen.lock().unwrap().push(slug.clone());
            if slug == "b" {
                return Err(AnswerError::plugin(slug, "boom"));
            }
            Ok(())
        });

        assert!(matches!(result, Err(AnswerError::Plugin { slug_name, .. }) if slug_name == "b"));
        assert_eq!(*seen.lock().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn empty_slot_succeeds() {
        let slot: Slot<dyn Base> = Slot::new(CapabilityKind::Search, false);
        let status = StatusManager::new();
        assert!(slot.call::<AnswerError, _>(&status, |_| Ok(())).is_ok());
    }

    #[tokio::test]
    async fn async_call_honors_order_and_gating() {
        let slot = slot_with(false, &["a", "b", "c"]);
        let status = StatusManager::new();
        status.enable("c", true);
        status.enable("a", true);

        let seen = Mutex::new(Vec::new());
        slot.call_async::<AnswerError, _, _>(&status, |p| {
            seen.lock().unwrap().push(p.slug_name());
            async { Ok(()) }
        })
        .await
        .unwrap();
        assert_eq!(*seen.lock().unwrap(), vec!["a", "c"]);
    }

    #[test]
    fn debug_lists_slugs() {
        let slot = slot_with(false, &["a", "b"]);
        let rendered = format!("{slot:?}");
        assert!(rendered.contains("\"a\""));
        assert!(rendered.contains("mandatory: false"));
    }
}
