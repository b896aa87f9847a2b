// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification capability trait for outbound notification channels.

use async_trait::async_trait;

use crate::error::AnswerError;
use crate::traits::base::Base;
use crate::types::NotificationMessage;

/// Plugin that forwards notifications to an external channel (chat, email, webhook).
#[async_trait]
pub trait Notification: Base {
    async fn notify(&self, message: NotificationMessage) -> Result<(), AnswerError>;
}
