// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `deebot_core` - Capability-driven command resolution for Deebot robots.
//!
//! Robot models differ in what they can report and accept. This library
//! answers, for a given device, "which commands refresh this piece of
//! state?" without any per-call branching on the model:
//!
//! - **Command registry**: every command by wire name, and which of them
//!   are also observed on the peer-to-peer channel.
//! - **Capabilities**: per model, the ordered commands that refresh each
//!   event.
//! - **Hardware resolver**: device class to shared model description,
//!   loaded lazily and cached, with a fallback for unknown classes.
//! - **Device info**: a validated device-listing record bound to its
//!   model description.
//!
//! Sending commands is left to a [`Transport`] implementation.
//!
//! # Quick Start
//!
//! ```
//! use deebot_core::{ApiDeviceInfo, DeviceInfo, EventType, HardwareResolver};
//!
//! let resolver = HardwareResolver::new()?;
//!
//! let api: ApiDeviceInfo = serde_json::from_str(
//!     r#"{"class": "yna5xi", "company": "eco-ng", "did": "E0001",
//!         "name": "E0001", "resource": "upQ6", "nick": "Upstairs"}"#,
//! )?;
//! let device = DeviceInfo::resolve(api, &resolver)?;
//!
//! let names: Vec<_> = device
//!     .capabilities()
//!     .get_refresh_commands(EventType::State)
//!     .iter()
//!     .map(|c| c.name())
//!     .collect();
//! assert_eq!(names, ["getChargeState", "getCleanInfo"]);
//! # Ok::<(), deebot_core::Error>(())
//! ```
//!
//! ## Refreshing Through a Transport
//!
//! ```no_run
//! use deebot_core::{DeviceInfo, EventBus, EventType, Refresher, Transport};
//!
//! async fn watch<T: Transport>(transport: T, device: &DeviceInfo) -> deebot_core::Result<()> {
//!     let bus = EventBus::new();
//!     let mut events = bus.subscribe();
//!     let refresher = Refresher::new(transport, bus);
//!
//!     refresher.refresh(device, EventType::Battery).await?;
//!     if let Ok(event) = events.recv().await {
//!         println!("battery: {}", event.data);
//!     }
//!     Ok(())
//! }
//! ```

mod capabilities;
pub mod command;
mod device;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod hardware;
pub mod protocol;

pub use capabilities::{Capabilities, CapabilitiesBuilder};
pub use command::{Command, CommandKind, CommandRegistry, LifeSpan};
pub use device::{ApiDeviceInfo, DeviceInfo};
pub use dispatch::{P2pMessage, P2pTracker, Refresher};
pub use error::{ConfigError, Error, Result, TransportError};
pub use event::{DeviceEvent, EventBus, EventType};
pub use hardware::{DataType, HardwareResolver, StaticDeviceInfo};
pub use protocol::{CommandResponse, Transport};
