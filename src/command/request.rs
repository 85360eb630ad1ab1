// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outgoing command requests and their correlation ids.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Correlates a command request with its reply.
///
/// Locally issued requests get a fresh random id. Requests observed on the
/// peer-to-peer channel keep whatever id the sender chose, so any string is
/// accepted.
///
/// # Examples
///
/// ```
/// use deebot_core::command::RequestId;
///
/// let id = RequestId::new();
/// assert_eq!(id.as_str().len(), 32);
///
/// let seen = RequestId::from("kXl8");
/// assert_eq!(seen.to_string(), "kXl8");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    /// Creates a fresh random request id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Returns the id as sent on the wire.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RequestId({})", self.0)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RequestId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RequestId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<Uuid> for RequestId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid.simple().to_string())
    }
}

/// A command ready to hand to the transport.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandRequest {
    /// Correlation id for the reply.
    pub request_id: RequestId,
    /// Wire name of the command.
    pub name: &'static str,
    /// Request arguments.
    pub args: serde_json::Value,
}
