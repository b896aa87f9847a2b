// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The plugin host: registration facade and dispatch entry point.
//!
//! A `PluginHost` is built once by the application's composition root.
//! Every compiled-in plugin crate exposes a [`Registrar`] that enrolls its
//! plugins; after registration completes the host is shared read-only with
//! request handlers, which broadcast calls through [`PluginHost::capability`].

use std::future::Future;
use std::sync::Arc;

use answer_core::{AnswerError, Base, CapabilityKind, PluginInfo};
use tracing::info;

use crate::registry::{Capability, CapabilityRegistry};
use crate::slot::Slot;
use crate::status::StatusManager;

/// Entry point a plugin crate exposes to enroll its plugins.
///
/// Generated entry points call one registrar per compiled-in plugin crate:
///
/// ```ignore
/// pub fn register(host: &mut PluginHost) -> Result<(), AnswerError> {
///     host.register(Arc::new(RedisCache::default()))
/// }
/// ```
pub type Registrar = fn(&mut PluginHost) -> Result<(), AnswerError>;

/// A registered plugin as shown in plugin listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginListing {
    pub info: PluginInfo,
    pub enabled: bool,
    pub capabilities: Vec<CapabilityKind>,
}

/// Owner of the capability registry and the plugin status.
pub struct PluginHost {
    registry: CapabilityRegistry,
    status: Arc<StatusManager>,
}

impl PluginHost {
    /// Creates an empty host sharing the given status manager.
    pub fn new(status: Arc<StatusManager>) -> Self {
        Self {
            registry: CapabilityRegistry::new(),
            status,
        }
    }

    /// Creates a host and runs every registrar in order.
    ///
    /// Stops at the first failing registrar; a duplicate slug surfaces as
    /// [`AnswerError::DuplicatePlugin`].
    pub fn with_registrars(
        status: Arc<StatusManager>,
        registrars: &[Registrar],
    ) -> Result<Self, AnswerError> {
        let mut host = Self::new(status);
        for registrar in registrars {
            registrar(&mut host)?;
        }
        info!(count = host.len(), "plugin registration complete");
        Ok(host)
    }

    /// Enrolls a plugin into the base slot and every capability it implements.
    pub fn register(&mut self, plugin: Arc<dyn Base>) -> Result<(), AnswerError> {
        let plugin_info = plugin.info();
        let kinds = self.registry.enroll(plugin)?;
        info!(
            slug_name = %plugin_info.slug_name,
            version = %plugin_info.version,
            capabilities = ?kinds,
            "plugin registered"
        );
        Ok(())
    }

    /// Returns a dispatcher for capability `C`.
    pub fn capability<C: Capability + ?Sized>(&self) -> Dispatch<'_, C> {
        Dispatch {
            slot: self.registry.slot::<C>(),
            status: &self.status,
        }
    }

    /// The shared status manager.
    pub fn status(&self) -> &Arc<StatusManager> {
        &self.status
    }

    /// Returns whether dispatch to the plugin is enabled.
    pub fn is_enabled(&self, slug_name: &str) -> bool {
        self.status.is_enabled(slug_name)
    }

    /// Enables or disables a registered plugin.
    pub fn enable(&self, slug_name: &str, enabled: bool) -> Result<(), AnswerError> {
        if !self.registry.slot::<dyn Base>().contains(slug_name) {
            return Err(AnswerError::PluginNotFound(slug_name.to_string()));
        }
        self.status.enable(slug_name, enabled);
        info!(slug_name, enabled, "plugin status updated");
        Ok(())
    }

    /// Every registered plugin in registration order.
    pub fn plugins(&self) -> Vec<PluginListing> {
        self.registry
            .slot::<dyn Base>()
            .iter()
            .map(|plugin| {
                let info = plugin.info();
                PluginListing {
                    enabled: self.status.is_enabled(&info.slug_name),
                    capabilities: self.registry.kinds_of(&info.slug_name),
                    info,
                }
            })
            .collect()
    }

    /// Capability kinds a plugin is enrolled in. Empty for unknown slugs.
    pub fn capabilities_of(&self, slug_name: &str) -> Vec<CapabilityKind> {
        self.registry.kinds_of(slug_name)
    }

    /// Number of registered plugins.
    pub fn len(&self) -> usize {
        self.registry.slot::<dyn Base>().len()
    }

    /// Returns true if no plugin is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PluginHost {
    fn default() -> Self {
        Self::new(Arc::new(StatusManager::new()))
    }
}

/// Broadcast handle for one capability, bound to the host's status.
pub struct Dispatch<'a, C: ?Sized> {
    slot: &'a Slot<C>,
    status: &'a StatusManager,
}

impl<C: Capability + ?Sized> Dispatch<'_, C> {
    /// Calls `visit` for every dispatchable plugin; stops at the first error.
    pub fn call<E, F>(&self, visit: F) -> Result<(), E>
    where
        F: FnMut(&Arc<C>) -> Result<(), E>,
    {
        self.slot.call(self.status, visit)
    }

    /// Awaits `visit` for every dispatchable plugin in turn; stops at the first error.
    pub async fn call_async<E, F, Fut>(&self, visit: F) -> Result<(), E>
    where
        F: FnMut(Arc<C>) -> Fut,
        Fut: Future<Output = Result<(), E>>,
    {
        self.slot.call_async(self.status, visit).await
    }

    /// Plugins a broadcast would currently reach.
    pub fn plugins(&self) -> Vec<Arc<C>> {
        self.slot.dispatchable(self.status)
    }

    /// Returns the first dispatchable plugin, if any.
    ///
    /// For capabilities where one provider wins (storage, search, user center).
    pub fn first(&self) -> Option<Arc<C>> {
        self.plugins().into_iter().next()
    }

    /// Returns true if no plugin would be reached.
    pub fn is_empty(&self) -> bool {
        self.plugins().is_empty()
    }
}
