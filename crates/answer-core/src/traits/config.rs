// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Config capability trait for plugins with admin-editable settings.

use crate::error::AnswerError;
use crate::traits::base::Base;
use crate::types::ConfigField;

/// Plugin exposing settings to the admin UI.
///
/// Config dispatch ignores the enable/disable state so a plugin can be
/// configured before it is switched on.
pub trait Config: Base {
    /// Describes the fields the admin UI should render.
    fn config_fields(&self) -> Vec<ConfigField>;

    /// Applies a saved configuration object.
    fn config_receiver(&self, config: &serde_json::Value) -> Result<(), AnswerError>;
}
