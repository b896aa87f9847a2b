// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cache capability trait for key/value caching backends.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::AnswerError;
use crate::traits::base::Base;

/// Plugin providing a string key/value cache.
#[async_trait]
pub trait Cache: Base {
    /// Returns the cached value, or `None` when absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, AnswerError>;

    /// Stores a value for at most `ttl`.
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), AnswerError>;

    /// Removes a key. Removing a missing key is not an error.
    async fn del(&self, key: &str) -> Result<(), AnswerError>;

    /// Removes every key.
    async fn flush(&self) -> Result<(), AnswerError>;
}
