// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Peer-to-peer setter tracking.
//!
//! When another client (usually the vendor app) changes a setting, the
//! request and the device's reply travel over the broker's peer-to-peer
//! topics:
//!
//! ```text
//! iot/p2p/<command>/<from did>/<from class>/<from res>/<to did>/<to class>/<to res>/<q|p>/<request id>/<j|x>
//! ```
//!
//! The request (`q`) carries the new value; the reply (`p`) only says whether
//! it was accepted. The tracker parks each request until its reply arrives
//! and then publishes the setter's event with the requested value.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::Value;
use tokio::time::Instant;

use crate::command::{Command, CommandRegistry, RequestId};
use crate::error::{Error, Result};
use crate::event::{DeviceEvent, EventBus};

/// How long a request waits for its reply before it is dropped.
pub const DEFAULT_P2P_TTL: Duration = Duration::from_secs(60);

/// How many requests may wait for a reply at once.
pub const DEFAULT_P2P_CAPACITY: usize = 60 * 60;

/// Which half of an exchange a message is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// A client asking the device (`q`).
    Request,
    /// The device answering (`p`).
    Response,
}

impl Direction {
    fn from_wire(value: &str) -> Option<Self> {
        match value {
            "q" => Some(Self::Request),
            "p" => Some(Self::Response),
            _ => None,
        }
    }
}

/// One message observed on a peer-to-peer topic.
#[derive(Debug, Clone, PartialEq)]
pub struct P2pMessage {
    /// Wire name of the command.
    pub command: String,
    /// Request or reply.
    pub direction: Direction,
    /// Id shared by a request and its reply.
    pub request_id: RequestId,
    /// Decoded JSON payload.
    pub payload: Value,
}

impl P2pMessage {
    /// Parses a broker message.
    ///
    /// Returns `Ok(None)` for topics that are not peer-to-peer JSON
    /// messages.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`](crate::Error::Parse) if the payload of a
    /// peer-to-peer topic is not valid JSON.
    ///
    /// # Examples
    ///
    /// ```
    /// use deebot_core::dispatch::{Direction, P2pMessage};
    ///
    /// let msg = P2pMessage::parse(
    ///     "iot/p2p/setVolume/app1/class/res/E0001/yna5xi/r1/q/rq42/j",
    ///     r#"{"body":{"data":{"volume":3}}}"#,
    /// )?
    /// .expect("p2p topic");
    /// assert_eq!(msg.command, "setVolume");
    /// assert_eq!(msg.direction, Direction::Request);
    /// assert_eq!(msg.request_id.as_str(), "rq42");
    ///
    /// assert!(P2pMessage::parse("iot/atr/onBattery/E0001/yna5xi/r1/j", "{}")?.is_none());
    /// # Ok::<(), deebot_core::Error>(())
    /// ```
    pub fn parse(topic: &str, payload: &str) -> Result<Option<Self>> {
        let Some(parsed) = ParsedTopic::parse(topic) else {
            tracing::trace!(topic, "Ignoring non p2p topic");
            return Ok(None);
        };

        Ok(Some(Self {
            command: parsed.command.to_string(),
            direction: parsed.direction,
            request_id: RequestId::from(parsed.request_id),
            payload: serde_json::from_str(payload)?,
        }))
    }

    fn succeeded(&self) -> bool {
        self.payload["body"]["code"].as_i64() == Some(0)
    }
}

/// Components of a peer-to-peer topic.
#[derive(Debug)]
struct ParsedTopic<'a> {
    command: &'a str,
    direction: Direction,
    request_id: &'a str,
}

impl<'a> ParsedTopic<'a> {
    fn parse(topic: &'a str) -> Option<Self> {
        let parts: Vec<&str> = topic.split('/').collect();
        match parts.as_slice() {
            ["iot", "p2p", command, _, _, _, _, _, _, direction, request_id, "j"] => Some(Self {
                command: *command,
                direction: Direction::from_wire(direction)?,
                request_id: *request_id,
            }),
            _ => None,
        }
    }
}

/// Pairs peer-to-peer requests with their replies.
///
/// Safe to share between tasks. Requests whose reply never arrives are
/// dropped after the configured time to live. When the capacity is reached,
/// the oldest waiting request makes room for the new one.
#[derive(Debug)]
pub struct P2pTracker {
    registry: Arc<CommandRegistry>,
    bus: EventBus,
    ttl: Duration,
    capacity: usize,
    pending: Mutex<HashMap<RequestId, (Command, Instant)>>,
}

impl P2pTracker {
    /// Creates a tracker with the default time to live and capacity.
    #[must_use]
    pub fn new(registry: Arc<CommandRegistry>, bus: EventBus) -> Self {
        Self::with_limits(registry, bus, DEFAULT_P2P_TTL, DEFAULT_P2P_CAPACITY)
    }

    /// Creates a tracker dropping unanswered requests after `ttl`.
    #[must_use]
    pub fn with_ttl(registry: Arc<CommandRegistry>, bus: EventBus, ttl: Duration) -> Self {
        Self::with_limits(registry, bus, ttl, DEFAULT_P2P_CAPACITY)
    }

    /// Creates a tracker dropping unanswered requests after `ttl` and
    /// keeping at most `capacity` of them.
    ///
    /// A capacity of zero is treated as one.
    #[must_use]
    pub fn with_limits(
        registry: Arc<CommandRegistry>,
        bus: EventBus,
        ttl: Duration,
        capacity: usize,
    ) -> Self {
        Self {
            registry,
            bus,
            ttl,
            capacity: capacity.max(1),
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Handles a message observed for device `did`.
    ///
    /// Requests are parked. A successful reply to a parked request publishes
    /// the setter's event with the requested arguments as data, and returns
    /// it. Messages for commands without peer-to-peer handling are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgs`] if a request carries no `body.data`
    /// or its arguments do not fit its command.
    pub fn handle(&self, did: &str, message: P2pMessage) -> Result<Option<DeviceEvent>> {
        if !self.registry.is_peer_to_peer(&message.command) {
            tracing::trace!(command = %message.command, "Ignoring command without p2p handling");
            return Ok(None);
        }

        match message.direction {
            Direction::Request => {
                self.park(message)?;
                Ok(None)
            }
            Direction::Response => Ok(self.complete(did, &message)),
        }
    }

    fn park(&self, message: P2pMessage) -> Result<()> {
        let descriptor = self.registry.lookup(&message.command)?;
        let args = match message.payload.pointer("/body/data") {
            Some(Value::Null) | None => {
                return Err(Error::InvalidArgs {
                    command: descriptor.name(),
                    message: "request has no body.data".to_string(),
                });
            }
            Some(data) => data.clone(),
        };
        let command = descriptor.create(args)?;

        tracing::debug!(
            command = %message.command,
            request_id = %message.request_id,
            "Parking p2p request"
        );
        let mut pending = self.pending.lock();
        self.purge_expired(&mut pending);
        if pending.len() >= self.capacity && !pending.contains_key(&message.request_id) {
            let oldest = pending
                .iter()
                .min_by_key(|(_, (_, parked_at))| *parked_at)
                .map(|(id, _)| id.clone());
            if let Some(oldest) = oldest {
                pending.remove(&oldest);
                tracing::debug!(
                    request_id = %oldest,
                    capacity = self.capacity,
                    "Evicted oldest p2p request"
                );
            }
        }
        pending.insert(message.request_id, (command, Instant::now()));
        Ok(())
    }

    fn complete(&self, did: &str, message: &P2pMessage) -> Option<DeviceEvent> {
        let parked = {
            let mut pending = self.pending.lock();
            self.purge_expired(&mut pending);
            pending.remove(&message.request_id)
        };

        let Some((command, _)) = parked else {
            tracing::debug!(
                command = %message.command,
                request_id = %message.request_id,
                "No parked request for p2p reply"
            );
            return None;
        };

        if !message.succeeded() {
            tracing::debug!(
                command = %message.command,
                request_id = %message.request_id,
                "Device rejected p2p request"
            );
            return None;
        }

        let event = DeviceEvent::new(did, command.p2p_event()?, command.request_args());
        self.bus.publish(event.clone());
        Some(event)
    }

    fn purge_expired(&self, pending: &mut HashMap<RequestId, (Command, Instant)>) {
        let before = pending.len();
        pending.retain(|_, (_, parked_at)| parked_at.elapsed() < self.ttl);
        let purged = before - pending.len();
        if purged > 0 {
            tracing::debug!(purged, "Dropped unanswered p2p requests");
        }
    }

    /// Returns the number of requests waiting for a reply.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }

    /// Returns the configured time to live.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns how many requests may wait for a reply at once.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
