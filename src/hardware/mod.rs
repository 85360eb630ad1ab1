// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hardware resolution: from a device class to its static description.
//!
//! Every robot model is identified by a short device class (for example
//! `"yna5xi"`). The [`HardwareResolver`] maps a class to the shared
//! [`StaticDeviceInfo`] of that model, loading model declarations lazily and
//! falling back to a generic description for classes it does not know.
//!
//! ```text
//! "yna5xi" ──► loaded? ──yes──► Arc<StaticDeviceInfo>
//!                │
//!                no ──► declared? ──yes──► build once, cache ──► Arc<...>
//!                            │
//!                            no ──► fallback Arc<...>
//! ```
//!
//! # Examples
//!
//! ```
//! use deebot_core::{EventType, HardwareResolver};
//!
//! let resolver = HardwareResolver::new()?;
//!
//! let info = resolver.resolve("yna5xi")?;
//! assert_eq!(info.capabilities().get_refresh_commands(EventType::State).len(), 2);
//!
//! let unknown = resolver.resolve("not_specified")?;
//! assert!(std::sync::Arc::ptr_eq(&unknown, &resolver.fallback()));
//! # Ok::<(), deebot_core::Error>(())
//! ```

mod catalog;
pub mod models;
mod resolver;

pub use catalog::{FALLBACK, ModelCatalog, ModelDeclaration};
pub use resolver::HardwareResolver;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::capabilities::Capabilities;

/// Payload encoding spoken by a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// JSON payloads.
    Json,
    /// Legacy XML payloads.
    Xml,
}

impl DataType {
    /// Returns the lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable description shared by every device of one model.
///
/// Built once per model by the [`HardwareResolver`] and handed out as
/// `Arc<StaticDeviceInfo>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticDeviceInfo {
    data_type: DataType,
    capabilities: Capabilities,
}

impl StaticDeviceInfo {
    /// Pairs an encoding with a capability set.
    #[must_use]
    pub fn new(data_type: DataType, capabilities: Capabilities) -> Self {
        Self {
            data_type,
            capabilities,
        }
    }

    /// Returns the payload encoding.
    #[must_use]
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Returns the model capabilities.
    #[must_use]
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }
}
