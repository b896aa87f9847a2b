// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base trait that every plugin must implement.

use std::sync::Arc;

use crate::traits::{
    Cache, Config, Connector, Notification, Reviewer, Search, Storage, UserCenter,
};
use crate::types::PluginInfo;

/// The mandatory contract for all Answer plugins.
///
/// Besides identity, `Base` carries one probe per capability kind. The
/// registration facade calls every probe once; a probe that returns `Some`
/// enrolls the plugin into that capability's slot. Implementors override
/// only the probes for capabilities they actually implement:
///
/// ```ignore
/// impl Base for RedisCache {
///     fn info(&self) -> PluginInfo { PluginInfo::new("Redis", "cache-redis") }
///     fn as_cache(self: Arc<Self>) -> Option<Arc<dyn Cache>> { Some(self) }
/// }
/// ```
pub trait Base: Send + Sync + 'static {
    /// Returns the plugin's identity metadata.
    fn info(&self) -> PluginInfo;

    /// Returns the plugin's slug name.
    fn slug_name(&self) -> String {
        self.info().slug_name
    }

    fn as_cache(self: Arc<Self>) -> Option<Arc<dyn Cache>> {
        None
    }

    fn as_storage(self: Arc<Self>) -> Option<Arc<dyn Storage>> {
        None
    }

    fn as_search(self: Arc<Self>) -> Option<Arc<dyn Search>> {
        None
    }

    fn as_connector(self: Arc<Self>) -> Option<Arc<dyn Connector>> {
        None
    }

    fn as_notification(self: Arc<Self>) -> Option<Arc<dyn Notification>> {
        None
    }

    fn as_reviewer(self: Arc<Self>) -> Option<Arc<dyn Reviewer>> {
        None
    }

    fn as_config(self: Arc<Self>) -> Option<Arc<dyn Config>> {
        None
    }

    fn as_user_center(self: Arc<Self>) -> Option<Arc<dyn UserCenter>> {
        None
    }
}
