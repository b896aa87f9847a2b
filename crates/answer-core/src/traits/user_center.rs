// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User center capability trait for delegating accounts to an external system.

use async_trait::async_trait;

use crate::error::AnswerError;
use crate::traits::base::Base;
use crate::types::{ControlCenterItem, UserCenterDescription, UserCenterUser};

#[async_trait]
pub trait UserCenter: Base {
    fn user_center_description(&self) -> UserCenterDescription;

    /// Extra menu entries for the user's control center.
    fn control_center_items(&self) -> Vec<ControlCenterItem>;

    /// Looks up a user by external id. `Ok(None)` means unknown user.
    async fn user_info(&self, external_id: &str) -> Result<Option<UserCenterUser>, AnswerError>;
}
