// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command definitions and the command registry.
//!
//! A [`Command`] is one request/response unit addressed to a robot. It pairs a
//! [`CommandKind`] (which implementation, hence which wire name) with the
//! construction-time arguments of this particular invocation. Two commands
//! are equal when both the kind and the arguments are equal.
//!
//! | Constructor | Kind | Arguments |
//! |---|---|---|
//! | [`Command::new`] | any | none |
//! | [`Command::with_args`] | any | JSON object |
//! | [`Command::life_span`] | `GetLifeSpan` | consumable categories |
//! | [`Command::reset_life_span`] | `ResetLifeSpan` | one category |
//! | [`Command::availability_probe`] | `GetBattery` | probe only |
//! | [`Command::clean_area`] | `Clean` | area clean request |
//!
//! # Examples
//!
//! ```
//! use deebot_core::command::{Command, CommandKind, LifeSpan};
//!
//! let life = Command::life_span(&[LifeSpan::Brush, LifeSpan::Filter]);
//! assert_eq!(life.name(), "getLifeSpan");
//! assert_eq!(life.request_args(), serde_json::json!(["brush", "heap"]));
//!
//! assert_ne!(Command::new(CommandKind::GetBattery), Command::availability_probe());
//! ```

mod kind;
mod life_span;
mod registry;
mod request;

pub use kind::CommandKind;
pub use life_span::LifeSpan;
pub use registry::{CommandDescriptor, CommandRegistry, ReplyRoute};
pub use request::{CommandRequest, RequestId};

use serde_json::{Map, Value};

use crate::event::EventType;

/// Construction-time arguments of a command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Args {
    /// The command takes no arguments.
    None,
    /// Consumable categories to query.
    LifeSpans(Vec<LifeSpan>),
    /// The command is issued only to check that the device answers.
    AvailabilityProbe,
    /// Free-form arguments forwarded as-is.
    Json(Map<String, Value>),
}

/// A single command invocation.
///
/// Immutable once built. See the [module documentation](self) for the
/// available constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    kind: CommandKind,
    args: Args,
}

impl Command {
    /// Creates a command without arguments.
    #[must_use]
    pub const fn new(kind: CommandKind) -> Self {
        Self {
            kind,
            args: Args::None,
        }
    }

    /// Creates a command with JSON object arguments.
    #[must_use]
    pub fn with_args(kind: CommandKind, args: Map<String, Value>) -> Self {
        Self {
            kind,
            args: Args::Json(args),
        }
    }

    /// Creates a life span query for the given consumables.
    #[must_use]
    pub fn life_span(types: &[LifeSpan]) -> Self {
        Self {
            kind: CommandKind::GetLifeSpan,
            args: Args::LifeSpans(types.to_vec()),
        }
    }

    /// Creates a request resetting one consumable's life span.
    #[must_use]
    pub fn reset_life_span(life_span: LifeSpan) -> Self {
        let mut args = Map::new();
        args.insert("type".to_string(), Value::from(life_span.as_str()));
        Self::with_args(CommandKind::ResetLifeSpan, args)
    }

    /// Creates a battery query used only to check the device is reachable.
    #[must_use]
    pub const fn availability_probe() -> Self {
        Self {
            kind: CommandKind::GetBattery,
            args: Args::AvailabilityProbe,
        }
    }

    /// Creates a request to clean specific areas.
    ///
    /// `mode` is the area type (`"spotArea"` or `"customArea"`), `area` the
    /// room ids or coordinates and `cleanings` the number of passes.
    #[must_use]
    pub fn clean_area(mode: &str, area: &str, cleanings: u8) -> Self {
        let mut args = Map::new();
        args.insert("act".to_string(), Value::from("start"));
        args.insert("type".to_string(), Value::from(mode));
        args.insert("content".to_string(), Value::from(area));
        args.insert("count".to_string(), Value::from(cleanings));
        Self::with_args(CommandKind::Clean, args)
    }

    /// Returns the command kind.
    #[must_use]
    pub const fn kind(&self) -> CommandKind {
        self.kind
    }

    /// Returns the stable wire name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Returns the construction-time arguments.
    #[must_use]
    pub const fn args(&self) -> &Args {
        &self.args
    }

    /// Returns `true` if this invocation only checks reachability.
    #[must_use]
    pub const fn is_availability_check(&self) -> bool {
        matches!(self.args, Args::AvailabilityProbe)
    }

    /// Returns `true` if replies may arrive over the peer-to-peer channel.
    #[must_use]
    pub const fn is_p2p(&self) -> bool {
        self.kind.supports_p2p()
    }

    /// Returns the event a successful peer-to-peer reply updates.
    #[must_use]
    pub const fn p2p_event(&self) -> Option<EventType> {
        self.kind.p2p_event()
    }

    /// Builds the request arguments sent to the device.
    ///
    /// Commands without arguments send an empty object.
    #[must_use]
    pub fn request_args(&self) -> Value {
        match &self.args {
            Args::None | Args::AvailabilityProbe => Value::Object(Map::new()),
            Args::LifeSpans(types) => types.iter().map(|t| Value::from(t.as_str())).collect(),
            Args::Json(map) => Value::Object(map.clone()),
        }
    }

    /// Builds a request with a fresh request id.
    #[must_use]
    pub fn request(&self) -> CommandRequest {
        CommandRequest {
            request_id: RequestId::new(),
            name: self.name(),
            args: self.request_args(),
        }
    }
}

impl From<CommandKind> for Command {
    fn from(kind: CommandKind) -> Self {
        Self::new(kind)
    }
}
