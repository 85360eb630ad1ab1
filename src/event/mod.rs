// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event types and the event bus.
//!
//! [`EventType`] is the closed set of state categories a subscriber can care
//! about. [`DeviceEvent`] is a decoded change for one device, and
//! [`EventBus`] broadcasts those changes to every subscriber.
//!
//! # Examples
//!
//! ```
//! use deebot_core::event::{DeviceEvent, EventBus, EventType};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(DeviceEvent::new("E0001", EventType::Battery, serde_json::json!({"value": 100})));
//! ```

mod device_event;
mod event_bus;
mod event_type;

pub use device_event::DeviceEvent;
pub use event_bus::EventBus;
pub use event_type::EventType;
