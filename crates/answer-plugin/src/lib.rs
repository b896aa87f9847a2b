// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability registry, status manager, and registration facade.
//!
//! Compiled-in plugins enroll once at startup through
//! [`PluginHost::register`]. The host keeps one ordered [`Slot`] per
//! capability kind and broadcasts calls to the plugins in a slot, skipping
//! plugins the [`StatusManager`] reports as disabled unless the capability
//! is mandatory.

pub mod host;
pub mod registry;
pub mod slot;
pub mod status;

pub use host::{Dispatch, PluginHost, PluginListing, Registrar};
pub use registry::{Capability, CapabilityRegistry};
pub use slot::Slot;
pub use status::StatusManager;
