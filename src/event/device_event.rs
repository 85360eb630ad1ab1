// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decoded device events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::EventType;

/// A decoded state change for one physical device.
///
/// The payload is produced by the encoding layer that applied a command
/// response; this crate only routes it.
///
/// # Examples
///
/// ```
/// use deebot_core::{DeviceEvent, EventType};
///
/// let event = DeviceEvent::new("E0001", EventType::Battery, serde_json::json!({"value": 87}));
/// assert_eq!(event.did, "E0001");
/// assert_eq!(event.event, EventType::Battery);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceEvent {
    /// Device id the event belongs to.
    pub did: String,
    /// The state category that changed.
    pub event: EventType,
    /// Decoded event data.
    pub data: serde_json::Value,
    /// When the event was received.
    pub received_at: DateTime<Utc>,
}

impl DeviceEvent {
    /// Creates an event stamped with the current time.
    #[must_use]
    pub fn new(did: impl Into<String>, event: EventType, data: serde_json::Value) -> Self {
        Self {
            did: did.into(),
            event,
            data,
            received_at: Utc::now(),
        }
    }

    /// Returns `true` if this event belongs to the given device.
    #[must_use]
    pub fn is_for(&self, did: &str) -> bool {
        self.did == did
    }
}
