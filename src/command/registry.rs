// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Name-based command lookup.
//!
//! The registry maps stable wire names to [`CommandDescriptor`]s and decides
//! which path an incoming reply takes:
//!
//! ```text
//! reply for "setVolume" ──► is_peer_to_peer ──► ReplyRoute::PeerToPeer
//! reply for "getBattery" ─► is_peer_to_peer ──► ReplyRoute::Poll
//! ```

use std::collections::{BTreeSet, HashMap};

use serde_json::Value;

use super::{Command, CommandKind, LifeSpan};
use crate::error::{ConfigError, Error, Result};

/// Describes one registered command and builds invocations of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandDescriptor {
    kind: CommandKind,
}

impl CommandDescriptor {
    /// Creates a descriptor for the given command kind.
    #[must_use]
    pub const fn new(kind: CommandKind) -> Self {
        Self { kind }
    }

    /// Returns the described command kind.
    #[must_use]
    pub const fn kind(&self) -> CommandKind {
        self.kind
    }

    /// Returns the wire name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Returns `true` if the command handles peer-to-peer replies.
    #[must_use]
    pub const fn supports_p2p(&self) -> bool {
        self.kind.supports_p2p()
    }

    /// Builds a command from wire arguments.
    ///
    /// `null` and `{}` build an argument-less command. `getLifeSpan` expects
    /// an array of consumable names; every other command expects an object.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgs`] if the arguments do not fit the command.
    pub fn create(&self, args: Value) -> Result<Command> {
        match (self.kind, args) {
            (CommandKind::GetLifeSpan, Value::Array(items)) => {
                let types = items
                    .iter()
                    .map(|item| {
                        item.as_str()
                            .and_then(LifeSpan::from_wire)
                            .ok_or_else(|| self.invalid(format!("unknown life span {item}")))
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Command::life_span(&types))
            }
            (CommandKind::GetLifeSpan, other) => {
                Err(self.invalid(format!("expected an array, got {other}")))
            }
            (kind, Value::Null) => Ok(Command::new(kind)),
            (kind, Value::Object(map)) if map.is_empty() => Ok(Command::new(kind)),
            (kind, Value::Object(map)) => Ok(Command::with_args(kind, map)),
            (_, other) => Err(self.invalid(format!("expected an object, got {other}"))),
        }
    }

    fn invalid(&self, message: String) -> Error {
        Error::InvalidArgs {
            command: self.name(),
            message,
        }
    }
}

/// Which channel a command's reply is expected on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplyRoute {
    /// Pushed over the direct peer-to-peer channel.
    PeerToPeer,
    /// Returned by the broker request/poll cycle.
    Poll,
}

/// Table of every known command, keyed by wire name.
///
/// Built once from a fixed descriptor list. The peer-to-peer subset is
/// derived from the descriptors while building and never maintained
/// separately.
///
/// # Examples
///
/// ```
/// use deebot_core::command::{CommandRegistry, ReplyRoute};
///
/// let registry = CommandRegistry::builtin()?;
///
/// assert!(registry.is_peer_to_peer("setVolume"));
/// assert_eq!(registry.route("getBattery")?, ReplyRoute::Poll);
/// assert!(registry.lookup("selfDestruct").is_err());
/// # Ok::<(), deebot_core::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandDescriptor>,
    p2p: BTreeSet<&'static str>,
}

impl CommandRegistry {
    /// Builds a registry from a descriptor list.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateCommand`] if two descriptors share a
    /// wire name.
    pub fn new(
        descriptors: impl IntoIterator<Item = CommandDescriptor>,
    ) -> std::result::Result<Self, ConfigError> {
        let mut commands = HashMap::new();
        for descriptor in descriptors {
            if commands.insert(descriptor.name(), descriptor).is_some() {
                return Err(ConfigError::DuplicateCommand(descriptor.name()));
            }
        }

        let p2p: BTreeSet<_> = commands
            .values()
            .filter(|d| d.supports_p2p())
            .map(CommandDescriptor::name)
            .collect();

        tracing::debug!(
            commands = commands.len(),
            p2p = p2p.len(),
            "Built command registry"
        );
        Ok(Self { commands, p2p })
    }

    /// Builds the registry of every built-in JSON command.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateCommand`] if the built-in table lists
    /// a wire name twice.
    pub fn builtin() -> std::result::Result<Self, ConfigError> {
        Self::new(CommandKind::ALL.into_iter().map(CommandDescriptor::new))
    }

    /// Looks up the descriptor registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCommand`] if nothing is registered under
    /// `name`.
    pub fn lookup(&self, name: &str) -> Result<&CommandDescriptor> {
        self.commands
            .get(name)
            .ok_or_else(|| Error::UnknownCommand(name.to_string()))
    }

    /// Builds a command by name from wire arguments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCommand`] for unregistered names and
    /// [`Error::InvalidArgs`] for arguments the command does not accept.
    pub fn create(&self, name: &str, args: Value) -> Result<Command> {
        self.lookup(name)?.create(args)
    }

    /// Returns `true` if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Returns `true` if `name` is registered and handles peer-to-peer
    /// replies.
    #[must_use]
    pub fn is_peer_to_peer(&self, name: &str) -> bool {
        self.p2p.contains(name)
    }

    /// Decides where replies for `name` are handled.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCommand`] if nothing is registered under
    /// `name`.
    pub fn route(&self, name: &str) -> Result<ReplyRoute> {
        let descriptor = self.lookup(name)?;
        Ok(if descriptor.supports_p2p() {
            ReplyRoute::PeerToPeer
        } else {
            ReplyRoute::Poll
        })
    }

    /// Returns the peer-to-peer command names in sorted order.
    pub fn p2p_commands(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.p2p.iter().copied()
    }

    /// Returns every registered descriptor, in no particular order.
    pub fn descriptors(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.commands.values()
    }

    /// Returns the number of registered commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if no command is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
