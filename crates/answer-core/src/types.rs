// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across plugin contracts and the plugin host.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Identity metadata every plugin reports through [`Base::info`](crate::Base::info).
///
/// `slug_name` is the unique key used by the registry and the status map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginInfo {
    /// Human-readable plugin name.
    pub name: String,
    /// Globally unique identifier (e.g. "cache-redis").
    pub slug_name: String,
    /// Short description shown in the admin plugin list.
    pub description: String,
    /// Author or maintainer.
    pub author: String,
    /// Semantic version string.
    pub version: String,
    /// Optional homepage or repository link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl PluginInfo {
    /// Creates an info record with the given name and slug; other fields are empty.
    pub fn new(name: impl Into<String>, slug_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug_name: slug_name.into(),
            description: String::new(),
            author: String::new(),
            version: String::new(),
            link: None,
        }
    }
}

/// Identifies a capability slot in the plugin registry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum CapabilityKind {
    Base,
    Cache,
    Storage,
    Search,
    Connector,
    Notification,
    Reviewer,
    Config,
    UserCenter,
}

impl CapabilityKind {
    /// Every capability kind, in registry order.
    pub const ALL: [CapabilityKind; 9] = [
        CapabilityKind::Base,
        CapabilityKind::Cache,
        CapabilityKind::Storage,
        CapabilityKind::Search,
        CapabilityKind::Connector,
        CapabilityKind::Notification,
        CapabilityKind::Reviewer,
        CapabilityKind::Config,
        CapabilityKind::UserCenter,
    ];
}

// --- Storage types ---

/// Where an uploaded file originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UploadSource {
    Avatar,
    Content,
    Branding,
}

/// A file handed to a storage plugin.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub source: UploadSource,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Publicly reachable URL of the stored object.
    pub url: String,
}

// --- Search types ---

/// A document pushed into a search index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchContent {
    pub object_id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A full-text search request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub words: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub page: u32,
    pub page_size: u32,
}

/// A page of search hits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    pub object_ids: Vec<String>,
    pub total: u64,
}

/// Descriptive metadata for a search engine plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchDescription {
    pub icon: String,
    pub link: String,
}

// --- Connector types ---

/// Callback parameters delivered to a login connector after redirect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectorCallback {
    pub query: BTreeMap<String, String>,
    pub receiver_url: String,
}

/// User identity resolved by an external login connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalLoginUser {
    pub external_id: String,
    pub display_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

// --- Notification types ---

/// A notification fan-out message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationMessage {
    pub kind: String,
    pub receiver_user_id: String,
    pub title: String,
    pub url: String,
}

// --- Reviewer types ---

/// Content submitted for moderation review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewContent {
    pub object_type: String,
    pub title: String,
    pub content: String,
    pub author_id: String,
}

/// Moderation verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReviewVerdict {
    Approve,
    NeedsReview,
    Reject,
}

/// Outcome of a moderation review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewResult {
    pub verdict: ReviewVerdict,
    pub reason: Option<String>,
}

// --- Config types ---

/// Input widget kind for a plugin configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigFieldType {
    Input,
    Textarea,
    Checkbox,
    Select,
}

/// One configurable field exposed to the admin UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigField {
    pub name: String,
    pub field_type: ConfigFieldType,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub value: serde_json::Value,
}

// --- User center types ---

/// Descriptive metadata for an external user center.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCenterDescription {
    pub name: String,
    pub display_name: String,
    pub url: String,
}

/// An entry shown in the user's control center menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlCenterItem {
    pub name: String,
    pub label: String,
    pub url: String,
}

/// A user known to the external user center.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCenterUser {
    pub external_id: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}
