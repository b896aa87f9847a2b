// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A plugin with a configurable capability set.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use answer_core::types::{
    ConfigField, ConfigFieldType, NotificationMessage, ReviewContent, ReviewResult, ReviewVerdict,
};
use answer_core::{
    AnswerError, Base, Cache, CapabilityKind, Config, Notification, PluginInfo, Reviewer,
};
use async_trait::async_trait;

/// Shared, ordered record of `"<slug>:<operation>"` entries.
pub type CallLog = Arc<Mutex<Vec<String>>>;

/// A plugin that implements cache, notification, reviewer and config, but
/// only advertises the capabilities it was built [`with`](MockPlugin::with).
pub struct MockPlugin {
    info: PluginInfo,
    capabilities: Vec<CapabilityKind>,
    log: CallLog,
    failure: Option<String>,
    entries: Mutex<HashMap<String, String>>,
    config: Mutex<Option<serde_json::Value>>,
}

impl MockPlugin {
    /// A base-only plugin named after its slug.
    pub fn new(slug_name: &str) -> Self {
        let mut info = PluginInfo::new(slug_name, slug_name);
        info.version = "0.1.0".to_string();
        info.author = "test".to_string();
        Self {
            info,
            capabilities: Vec::new(),
            log: CallLog::default(),
            failure: None,
            entries: Mutex::new(HashMap::new()),
            config: Mutex::new(None),
        }
    }

    /// Advertises an additional capability.
    pub fn with(mut self, kind: CapabilityKind) -> Self {
        self.capabilities.push(kind);
        self
    }

    /// Records calls into `log` instead of a private log.
    pub fn with_log(mut self, log: CallLog) -> Self {
        self.log = log;
        self
    }

    /// Makes every capability call fail with `message`.
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn calls(&self) -> Vec<String> {
        lock(&self.log).clone()
    }

    /// The last value passed to `config_receiver`.
    pub fn received_config(&self) -> Option<serde_json::Value> {
        lock(&self.config).clone()
    }

    fn advertises(&self, kind: CapabilityKind) -> bool {
        self.capabilities.contains(&kind)
    }

    fn record(&self, operation: &str) -> Result<(), AnswerError> {
        lock(&self.log).push(format!("{}:{operation}", self.info.slug_name));
        match &self.failure {
            Some(message) => Err(AnswerError::plugin(&self.info.slug_name, message)),
            None => Ok(()),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl Base for MockPlugin {
    fn info(&self) -> PluginInfo {
        self.info.clone()
    }

    fn as_cache(self: Arc<Self>) -> Option<Arc<dyn Cache>> {
        self.advertises(CapabilityKind::Cache)
            .then(|| self as Arc<dyn Cache>)
    }

    fn as_notification(self: Arc<Self>) -> Option<Arc<dyn Notification>> {
        self.advertises(CapabilityKind::Notification)
            .then(|| self as Arc<dyn Notification>)
    }

    fn as_reviewer(self: Arc<Self>) -> Option<Arc<dyn Reviewer>> {
        self.advertises(CapabilityKind::Reviewer)
            .then(|| self as Arc<dyn Reviewer>)
    }

    fn as_config(self: Arc<Self>) -> Option<Arc<dyn Config>> {
        self.advertises(CapabilityKind::Config)
            .then(|| self as Arc<dyn Config>)
    }
}

#[async_trait]
impl Cache for MockPlugin {
    async fn get(&self, key: &str) -> Result<Option<String>, AnswerError> {
        self.record("get")?;
        Ok(lock(&self.entries).get(key).cloned())
    }

    async fn set(&self, key: &str, value: String, _ttl: Duration) -> Result<(), AnswerError> {
        self.record("set")?;
        lock(&self.entries).insert(key.to_string(), value);
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<(), AnswerError> {
        self.record("del")?;
        lock(&self.entries).remove(key);
        Ok(())
    }

    async fn flush(&self) -> Result<(), AnswerError> {
        self.record("flush")?;
        lock(&self.entries).clear();
        Ok(())
    }
}

#[async_trait]
impl Notification for MockPlugin {
    async fn notify(&self, _message: NotificationMessage) -> Result<(), AnswerError> {
        self.record("notify")
    }
}

#[async_trait]
impl Reviewer for MockPlugin {
    async fn review(&self, _content: ReviewContent) -> Result<ReviewResult, AnswerError> {
        self.record("review")?;
        Ok(ReviewResult {
            verdict: ReviewVerdict::Approve,
            reason: None,
        })
    }
}

impl Config for MockPlugin {
    fn config_fields(&self) -> Vec<ConfigField> {
        vec![ConfigField {
            name: "endpoint".to_string(),
            field_type: ConfigFieldType::Input,
            title: "Endpoint".to_string(),
            description: String::new(),
            required: false,
            value: serde_json::Value::Null,
        }]
    }

    fn config_receiver(&self, config: &serde_json::Value) -> Result<(), AnswerError> {
        self.record("config")?;
        *lock(&self.config) = Some(config.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probes_follow_advertised_capabilities() {
        let plugin = MockPlugin::new("m").with(CapabilityKind::Reviewer).arc();
        assert!(Arc::clone(&plugin).as_reviewer().is_some());
        assert!(Arc::clone(&plugin).as_cache().is_none());
        assert!(plugin.as_config().is_none());
    }

    #[tokio::test]
    async fn shared_log_records_in_call_order() {
        let log = CallLog::default();
        let a = MockPlugin::new("a").with_log(log.clone());
        let b = MockPlugin::new("b").with_log(log.clone());
        a.set("k", "v".into(), Duration::from_secs(1)).await.unwrap();
        b.flush().await.unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["a:set", "b:flush"]);
        assert_eq!(a.get("k").await.unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn failing_plugin_returns_plugin_error() {
        let plugin = MockPlugin::new("bad").failing("boom");
        let err = plugin.config_receiver(&serde_json::json!({})).unwrap_err();
        assert!(matches!(err, AnswerError::Plugin { slug_name, .. } if slug_name == "bad"));
        assert_eq!(plugin.calls(), vec!["bad:config"]);
    }
}
