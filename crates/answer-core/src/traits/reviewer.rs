// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reviewer capability trait for content moderation.

use async_trait::async_trait;

use crate::error::AnswerError;
use crate::traits::base::Base;
use crate::types::{ReviewContent, ReviewResult};

/// Plugin that inspects submitted content before it is published.
#[async_trait]
pub trait Reviewer: Base {
    async fn review(&self, content: ReviewContent) -> Result<ReviewResult, AnswerError>;
}
