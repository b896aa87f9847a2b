// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Type-indexed capability registry.
//!
//! [`Capability`] is implemented for each capability trait object
//! (`dyn Cache`, `dyn Search`, ...). It ties the trait to its
//! [`CapabilityKind`], its mandatory flag, the probe on [`Base`] that detects
//! it, and the slot that stores it, so callers can address a slot by type:
//! `registry.slot::<dyn Cache>()`.

use std::sync::Arc;

use answer_core::{
    AnswerError, Base, Cache, CapabilityKind, Config, Connector, Notification, Reviewer, Search,
    Storage, UserCenter,
};

use crate::slot::Slot;

/// A capability kind addressable by its trait object type.
pub trait Capability: Base {
    /// The kind tag of this capability.
    const KIND: CapabilityKind;

    /// Mandatory capabilities dispatch regardless of enable/disable state.
    const MANDATORY: bool;

    /// Returns the plugin as this capability if it implements it.
    fn probe(plugin: &Arc<dyn Base>) -> Option<Arc<Self>>;

    fn slot(registry: &CapabilityRegistry) -> &Slot<Self>;

    fn slot_mut(registry: &mut CapabilityRegistry) -> &mut Slot<Self>;
}

impl Capability for dyn Base {
    const KIND: CapabilityKind = CapabilityKind::Base;
    const MANDATORY: bool = true;

    fn probe(plugin: &Arc<dyn Base>) -> Option<Arc<Self>> {
        Some(Arc::clone(plugin))
    }

    fn slot(registry: &CapabilityRegistry) -> &Slot<Self> {
        &registry.base
    }

    fn slot_mut(registry: &mut CapabilityRegistry) -> &mut Slot<Self> {
        &mut registry.base
    }
}

macro_rules! capability {
    ($trait_:ident, $field:ident, $probe:ident, $kind:ident, mandatory = $mandatory:expr) => {
        impl Capability for dyn $trait_ {
            const KIND: CapabilityKind = CapabilityKind::$kind;
            const MANDATORY: bool = $mandatory;

            fn probe(plugin: &Arc<dyn Base>) -> Option<Arc<Self>> {
                Arc::clone(plugin).$probe()
            }

            fn slot(registry: &CapabilityRegistry) -> &Slot<Self> {
                &registry.$field
            }

            fn slot_mut(registry: &mut CapabilityRegistry) -> &mut Slot<Self> {
                &mut registry.$field
            }
        }
    };
}

capability!(Cache, cache, as_cache, Cache, mandatory = false);
capability!(Storage, storage, as_storage, Storage, mandatory = false);
capability!(Search, search, as_search, Search, mandatory = false);
capability!(Connector, connector, as_connector, Connector, mandatory = false);
capability!(Notification, notification, as_notification, Notification, mandatory = false);
capability!(Reviewer, reviewer, as_reviewer, Reviewer, mandatory = false);
capability!(Config, config, as_config, Config, mandatory = true);
capability!(UserCenter, user_center, as_user_center, UserCenter, mandatory = false);

/// One slot per capability kind.
///
/// The registry is the single owner of the slots. Only
/// [`enroll`](CapabilityRegistry::enroll) mutates them.
#[derive(Debug)]
pub struct CapabilityRegistry {
    base: Slot<dyn Base>,
    cache: Slot<dyn Cache>,
    storage: Slot<dyn Storage>,
    search: Slot<dyn Search>,
    connector: Slot<dyn Connector>,
    notification: Slot<dyn Notification>,
    reviewer: Slot<dyn Reviewer>,
    config: Slot<dyn Config>,
    user_center: Slot<dyn UserCenter>,
}

fn empty_slot<C: Capability + ?Sized>() -> Slot<C> {
    Slot::new(C::KIND, C::MANDATORY)
}

impl CapabilityRegistry {
    /// Creates a registry with every slot empty.
    pub fn new() -> Self {
        Self {
            base: empty_slot(),
            cache: empty_slot(),
            storage: empty_slot(),
            search: empty_slot(),
            connector: empty_slot(),
            notification: empty_slot(),
            reviewer: empty_slot(),
            config: empty_slot(),
            user_center: empty_slot(),
        }
    }

    /// Returns the slot of capability `C`.
    pub fn slot<C: Capability + ?Sized>(&self) -> &Slot<C> {
        C::slot(self)
    }

    /// Registers a plugin into the base slot and every capability slot it
    /// probes positive for. Returns the kinds it was enrolled in.
    ///
    /// The base slot is written first. A duplicate slug therefore fails
    /// before any capability slot is touched.
    pub fn enroll(&mut self, plugin: Arc<dyn Base>) -> Result<Vec<CapabilityKind>, AnswerError> {
        let mut kinds = Vec::new();
        self.enroll_in::<dyn Base>(&plugin, &mut kinds)?;
        self.enroll_in::<dyn Cache>(&plugin, &mut kinds)?;
        self.enroll_in::<dyn Storage>(&plugin, &mut kinds)?;
        self.enroll_in::<dyn Search>(&plugin, &mut kinds)?;
        self.enroll_in::<dyn Connector>(&plugin, &mut kinds)?;
        self.enroll_in::<dyn Notification>(&plugin, &mut kinds)?;
        self.enroll_in::<dyn Reviewer>(&plugin, &mut kinds)?;
        self.enroll_in::<dyn Config>(&plugin, &mut kinds)?;
        self.enroll_in::<dyn UserCenter>(&plugin, &mut kinds)?;
        Ok(kinds)
    }

    fn enroll_in<C: Capability + ?Sized>(
        &mut self,
        plugin: &Arc<dyn Base>,
        kinds: &mut Vec<CapabilityKind>,
    ) -> Result<(), AnswerError> {
        if let Some(handle) = C::probe(plugin) {
            C::slot_mut(self).register(handle)?;
            kinds.push(C::KIND);
        }
        Ok(())
    }

    /// Capability kinds a registered plugin is enrolled in, in kind order.
    pub fn kinds_of(&self, slug_name: &str) -> Vec<CapabilityKind> {
        let memberships = [
            (CapabilityKind::Base, self.base.contains(slug_name)),
            (CapabilityKind::Cache, self.cache.contains(slug_name)),
            (CapabilityKind::Storage, self.storage.contains(slug_name)),
            (CapabilityKind::Search, self.search.contains(slug_name)),
            (CapabilityKind::Connector, self.connector.contains(slug_name)),
            (CapabilityKind::Notification, self.notification.contains(slug_name)),
            (CapabilityKind::Reviewer, self.reviewer.contains(slug_name)),
            (CapabilityKind::Config, self.config.contains(slug_name)),
            (CapabilityKind::UserCenter, self.user_center.contains(slug_name)),
        ];
        memberships
            .into_iter()
            .filter_map(|(kind, member)| member.then_some(kind))
            .collect()
    }
}

impl Default for CapabilityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use answer_core::types::ConfigField;
    use answer_core::PluginInfo;

    struct Plain;

    impl Base for Plain {
        fn info(&self) -> PluginInfo {
            PluginInfo::new("Plain", "plain")
        }
    }

    struct Configurable(&'static str);

    impl Base for Configurable {
        fn info(&self) -> PluginInfo {
            PluginInfo::new(self.0, self.0)
        }

        fn as_config(self: Arc<Self>) -> Option<Arc<dyn Config>> {
            Some(self)
        }
    }

    impl Config for Configurable {
        fn config_fields(&self) -> Vec<ConfigField> {
            Vec::new()
        }

        fn config_receiver(&self, _config: &serde_json::Value) -> Result<(), AnswerError> {
            Ok(())
        }
    }

    #[test]
    fn mandatory_flags() {
        assert!(<dyn Base as Capability>::MANDATORY);
        assert!(<dyn Config as Capability>::MANDATORY);
        assert!(!<dyn Cache as Capability>::MANDATORY);
        assert!(!<dyn UserCenter as Capability>::MANDATORY);
    }

    #[test]
    fn slots_carry_their_kind() {
        let registry = CapabilityRegistry::new();
        assert_eq!(registry.slot::<dyn Search>().kind(), CapabilityKind::Search);
        assert!(registry.slot::<dyn Config>().is_mandatory());
    }

    #[test]
    fn base_only_plugin_enrolls_in_base() {
        let mut registry = CapabilityRegistry::new();
        let kinds = registry.enroll(Arc::new(Plain)).unwrap();
        assert_eq!(kinds, vec![CapabilityKind::Base]);
        assert!(registry.slot::<dyn Config>().is_empty());
    }

    #[test]
    fn probed_capability_is_enrolled() {
        let mut registry = CapabilityRegistry::new();
        let kinds = registry.enroll(Arc::new(Configurable("cfg"))).unwrap();
        assert_eq!(kinds, vec![CapabilityKind::Base, CapabilityKind::Config]);
        assert_eq!(registry.kinds_of("cfg"), kinds);
        assert!(registry.kinds_of("unknown").is_empty());
    }

    #[test]
    fn duplicate_fails_before_capability_slots() {
        let mut registry = CapabilityRegistry::new();
        registry.enroll(Arc::new(Plain)).unwrap();

        let err = registry.enroll(Arc::new(Configurable("plain"))).unwrap_err();
        assert!(matches!(err, AnswerError::DuplicatePlugin { slug_name } if slug_name == "plain"));
        assert_eq!(registry.slot::<dyn Base>().len(), 1);
        assert!(registry.slot::<dyn Config>().is_empty());
    }
}
