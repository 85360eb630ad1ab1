// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The transport seam.
//!
//! This crate decides *which* commands to send; a [`Transport`]
//! implementation decides *how*. It owns the broker session, request
//! signing, payload encoding for the device's [`DataType`](crate::DataType)
//! and decoding of the reply into events.
//!
//! ```text
//! Refresher ──► CommandRequest ──► Transport::execute ──► CommandResponse
//!                                                            │
//!                                       events ◄─────────────┘
//! ```

use serde_json::Value;

use crate::command::CommandRequest;
use crate::device::DeviceInfo;
use crate::error::TransportError;
use crate::event::EventType;

/// Reply to one executed command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandResponse {
    /// The raw response body.
    body: String,
    /// Events decoded from the body, in decoding order.
    events: Vec<(EventType, Value)>,
}

impl CommandResponse {
    /// Creates a response with the given body and no decoded events.
    #[must_use]
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            events: Vec::new(),
        }
    }

    /// Adds an event decoded from the body.
    #[must_use]
    pub fn with_event(mut self, event: EventType, data: Value) -> Self {
        self.events.push((event, data));
        self
    }

    /// Returns the raw response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the decoded events.
    #[must_use]
    pub fn events(&self) -> &[(EventType, Value)] {
        &self.events
    }

    /// Consumes the response and returns its decoded events.
    #[must_use]
    pub fn into_events(self) -> Vec<(EventType, Value)> {
        self.events
    }

    /// Parses the body as a specific type.
    ///
    /// # Errors
    ///
    /// Returns error if the body cannot be parsed into the target type.
    pub fn parse<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Executes resolved commands against a device.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Sends one request to the device and waits for its reply.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the request cannot be delivered, times
    /// out, or is rejected by the device. Callers do not retry.
    async fn execute(
        &self,
        device: &DeviceInfo,
        request: &CommandRequest,
    ) -> Result<CommandResponse, TransportError>;
}
