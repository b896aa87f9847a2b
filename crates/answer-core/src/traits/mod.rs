// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin contract set.
//!
//! Every plugin implements the [`Base`] trait. Capability traits extend
//! `Base` and are optional; a plugin advertises the ones it implements by
//! overriding the matching `as_*` probe on `Base`.

pub mod base;
pub mod cache;
pub mod config;
pub mod connector;
pub mod notification;
pub mod reviewer;
pub mod search;
pub mod storage;
pub mod user_center;

pub use base::Base;
pub use cache::Cache;
pub use config::Config;
pub use connector::Connector;
pub use notification::Notification;
pub use reviewer::Reviewer;
pub use search::Search;
pub use storage::Storage;
pub use user_center::UserCenter;
