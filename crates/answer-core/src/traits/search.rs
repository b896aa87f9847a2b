// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Search capability trait for full-text search engines.

use async_trait::async_trait;

use crate::error::AnswerError;
use crate::traits::base::Base;
use crate::types::{SearchContent, SearchDescription, SearchQuery, SearchResults};

/// Plugin backed by an external full-text index.
///
/// The core keeps the index in sync by pushing every created or edited
/// object through [`update_content`](Search::update_content) and removing
/// deleted ones through [`delete_content`](Search::delete_content).
#[async_trait]
pub trait Search: Base {
    fn search_description(&self) -> SearchDescription;

    async fn search(&self, query: SearchQuery) -> Result<SearchResults, AnswerError>;

    async fn update_content(&self, content: SearchContent) -> Result<(), AnswerError>;

    async fn delete_content(&self, object_id: &str) -> Result<(), AnswerError>;
}
