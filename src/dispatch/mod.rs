// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Turning events into commands, and replies into events.
//!
//! Two paths feed the [`EventBus`](crate::EventBus):
//!
//! ```text
//! refresh(Battery) ──► Capabilities ──► [getBattery] ──► Transport ──► EventBus
//!
//! iot/p2p/setVolume/…/q/<id>/j ──► P2pTracker (park request)
//! iot/p2p/setVolume/…/p/<id>/j ──► P2pTracker (match reply) ──► EventBus
//! ```
//!
//! - [`Refresher`] actively asks a device for an event's current value.
//! - [`P2pTracker`] observes setters exchanged between another client and
//!   the device, and reports their effect once the device confirms it.

mod p2p;
mod refresher;

pub use p2p::{DEFAULT_P2P_CAPACITY, DEFAULT_P2P_TTL, Direction, P2pMessage, P2pTracker};
pub use refresher::Refresher;
