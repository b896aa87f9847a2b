// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connector capability trait for third-party login providers.

use async_trait::async_trait;

use crate::error::AnswerError;
use crate::traits::base::Base;
use crate::types::{ConnectorCallback, ExternalLoginUser};

/// Plugin implementing an OAuth-style external login.
#[async_trait]
pub trait Connector: Base {
    /// Display name on the login button.
    fn connector_name(&self) -> String;

    /// Inline SVG logo for the login button.
    fn connector_logo_svg(&self) -> String;

    /// Returns the provider URL the user is redirected to.
    ///
    /// `receiver_url` is where the provider must send the user back.
    fn connector_sender(&self, receiver_url: &str) -> String;

    /// Exchanges the provider callback for the external user identity.
    async fn connector_receiver(
        &self,
        callback: ConnectorCallback,
    ) -> Result<ExternalLoginUser, AnswerError>;
}
