// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugins compiled into every Answer binary.
//!
//! Generated entry points always list [`register`] first, so these plugins
//! are enrolled before any plugin requested with `answer build --with`.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use answer_core::types::{ConfigField, ConfigFieldType};
use answer_core::{AnswerError, Base, Cache, Config, PluginInfo};
use answer_plugin::PluginHost;
use async_trait::async_trait;
use dashmap::DashMap;
use serde::Deserialize;
use tokio::time::Instant;
use tracing::debug;

/// Slug of the in-process cache.
pub const MEMORY_CACHE_SLUG: &str = "memory-cache";

/// Registers the built-in plugins.
pub fn register(host: &mut PluginHost) -> Result<(), AnswerError> {
    host.register(Arc::new(MemoryCache::new()))
}

struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct MemoryCacheSettings {
    #[serde(default)]
    default_ttl_secs: u64,
}

/// A process-local key/value cache.
///
/// A zero TTL on `set` falls back to the configured default TTL; a zero
/// default keeps the entry until it is deleted or flushed.
pub struct MemoryCache {
    entries: DashMap<String, Entry>,
    default_ttl_secs: AtomicU64,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            default_ttl_secs: AtomicU64::new(0),
        }
    }

    /// Number of stored entries, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn expiry(&self, ttl: Duration) -> Option<Instant> {
        let ttl = if ttl.is_zero() {
            Duration::from_secs(self.default_ttl_secs.load(Ordering::Relaxed))
        } else {
            ttl
        };
        (!ttl.is_zero()).then(|| Instant::now() + ttl)
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Base for MemoryCache {
    fn info(&self) -> PluginInfo {
        PluginInfo {
            name: "Memory Cache".to_string(),
            slug_name: MEMORY_CACHE_SLUG.to_string(),
            description: "In-process cache kept in memory".to_string(),
            author: "Answer Contributors".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            link: None,
        }
    }

    fn as_cache(self: Arc<Self>) -> Option<Arc<dyn Cache>> {
        Some(self)
    }

    fn as_config(self: Arc<Self>) -> Option<Arc<dyn Config>> {
        Some(self)
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, AnswerError> {
        let now = Instant::now();
        if let Some(entry) = self.entries.get(key)
            && !entry.is_expired(now)
        {
            return Ok(Some(entry.value.clone()));
        }
        if self.entries.remove_if(key, |_, entry| entry.is_expired(now)).is_some() {
            debug!(key, "evicted expired cache entry");
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), AnswerError> {
        let expires_at = self.expiry(ttl);
        self.entries.insert(key.to_string(), Entry { value, expires_at });
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<(), AnswerError> {
        self.entries.remove(key);
        Ok(())
    }

    async fn flush(&self) -> Result<(), AnswerError> {
        self.entries.clear();
        Ok(())
    }
}

impl Config for MemoryCache {
    fn config_fields(&self) -> Vec<ConfigField> {
        vec![ConfigField {
            name: "default_ttl_secs".to_string(),
            field_type: ConfigFieldType::Input,
            title: "Default TTL (seconds)".to_string(),
            description: "Applied when a caller sets no TTL. 0 keeps entries forever.".to_string(),
            required: false,
            value: self.default_ttl_secs.load(Ordering::Relaxed).into(),
        }]
    }

    fn config_receiver(&self, config: &serde_json::Value) -> Result<(), AnswerError> {
        let settings = if config.is_null() {
            MemoryCacheSettings::default()
        } else {
            MemoryCacheSettings::deserialize(config).map_err(|e| {
                AnswerError::plugin(MEMORY_CACHE_SLUG, format!("invalid configuration: {e}"))
            })?
        };
        self.default_ttl_secs
            .store(settings.default_ttl_secs, Ordering::Relaxed);
        debug!(default_ttl_secs = settings.default_ttl_secs, "memory cache configured");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use answer_core::CapabilityKind;

    #[tokio::test]
    async fn set_get_del_flush() {
        let cache = MemoryCache::new();
        cache.set("a", "1".into(), Duration::ZERO).await.unwrap();
        cache.set("b", "2".into(), Duration::ZERO).await.unwrap();
        assert_eq!(cache.get("a").await.unwrap().as_deref(), Some("1"));

        cache.del("a").await.unwrap();
        assert_eq!(cache.get("a").await.unwrap(), None);

        cache.flush().await.unwrap();
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn entries_expire_after_ttl() {
        let cache = MemoryCache::new();
        cache
            .set("session", "x".into(), Duration::from_secs(5))
            .await
            .unwrap();

        tokio::time::advance(Duration::from_secs(4)).await;
        assert!(cache.get("session").await.unwrap().is_some());

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(cache.get("session").await.unwrap(), None);
        assert!(cache.is_empty(), "expired entry is evicted on read");
    }

    #[tokio::test(start_paused = true)]
    async fn configured_default_ttl_applies_to_zero_ttl() {
        let cache = MemoryCache::new();
        cache
            .config_receiver(&serde_json::json!({"default_ttl_secs": 10}))
            .unwrap();
        cache.set("k", "v".into(), Duration::ZERO).await.unwrap();

        tokio::time::advance(Duration::from_secs(11)).await;
        assert_eq!(cache.get("k").await.unwrap(), None);
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        let cache = MemoryCache::new();
        let err = cache
            .config_receiver(&serde_json::json!({"ttl": "soon"}))
            .unwrap_err();
        assert!(matches!(err, AnswerError::Plugin { ref slug_name, .. } if slug_name == MEMORY_CACHE_SLUG));
    }

    #[test]
    fn config_fields_report_current_value() {
        let cache = MemoryCache::new();
        cache
            .config_receiver(&serde_json::json!({"default_ttl_secs": 30}))
            .unwrap();
        assert_eq!(cache.config_fields()[0].value, serde_json::json!(30));
    }

    #[test]
    fn register_enrolls_cache_and_config() {
        let mut host = PluginHost::default();
        register(&mut host).unwrap();
        assert_eq!(
            host.capabilities_of(MEMORY_CACHE_SLUG),
            vec![CapabilityKind::Base, CapabilityKind::Cache, CapabilityKind::Config]
        );
    }
}
