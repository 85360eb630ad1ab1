// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-model device capabilities.
//!
//! A model's capabilities say which commands refresh which events, and which
//! further commands (setters and actions) the model accepts. They are plain
//! data built with [`CapabilitiesBuilder`]; models differ only in what they
//! declare.
//!
//! # Refresh order
//!
//! The command list for an event is returned in declaration order and must be
//! executed in that order. Composite events depend on it: the `State` event
//! needs the charge state before the clean info.
//!
//! # Undeclared events
//!
//! Asking for an event the model does not declare returns an empty list. So
//! does an event declared without producers (such as `MapChanged`), which the
//! device only ever pushes. Use [`Capabilities::supports_event`] to tell the
//! two apart.

use std::collections::{BTreeSet, HashMap};

use crate::command::{Command, CommandKind, LifeSpan};
use crate::error::ConfigError;
use crate::event::EventType;

/// Capabilities of one device model.
///
/// # Examples
///
/// ```
/// use deebot_core::{Capabilities, EventType};
/// use deebot_core::command::{Command, CommandKind};
///
/// let caps = Capabilities::builder()
///     .event(EventType::Battery, [Command::new(CommandKind::GetBattery)])
///     .event(
///         EventType::State,
///         [
///             Command::new(CommandKind::GetChargeState),
///             Command::new(CommandKind::GetCleanInfo),
///         ],
///     )
///     .push_only(EventType::MapChanged)
///     .build()?;
///
/// assert_eq!(caps.get_refresh_commands(EventType::State).len(), 2);
/// assert!(caps.get_refresh_commands(EventType::MapChanged).is_empty());
/// assert!(caps.get_refresh_commands(EventType::Ota).is_empty());
/// assert!(caps.supports_event(EventType::MapChanged));
/// assert!(!caps.supports_event(EventType::Ota));
/// # Ok::<(), deebot_core::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capabilities {
    events: HashMap<EventType, Vec<Command>>,
    commands: BTreeSet<CommandKind>,
    life_spans: Vec<LifeSpan>,
}

impl Capabilities {
    /// Starts declaring capabilities.
    #[must_use]
    pub fn builder() -> CapabilitiesBuilder {
        CapabilitiesBuilder::new()
    }

    /// Returns the commands that refresh `event`, in execution order.
    ///
    /// Empty when the model has no way to actively refresh the event.
    #[must_use]
    pub fn get_refresh_commands(&self, event: EventType) -> &[Command] {
        self.events
            .get(&event)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the declared events in sorted order.
    #[must_use]
    pub fn events(&self) -> Vec<EventType> {
        let mut events: Vec<_> = self.events.keys().copied().collect();
        events.sort_unstable();
        events
    }

    /// Returns `true` if the model declares `event`, with or without
    /// refresh commands.
    #[must_use]
    pub fn supports_event(&self, event: EventType) -> bool {
        self.events.contains_key(&event)
    }

    /// Returns `true` if the model accepts commands of this kind, either as
    /// a refresh command or as a declared setter/action.
    #[must_use]
    pub fn supports_command(&self, kind: CommandKind) -> bool {
        self.commands.contains(&kind)
            || self
                .events
                .values()
                .flatten()
                .any(|command| command.kind() == kind)
    }

    /// Returns the consumables whose life span the model reports.
    #[must_use]
    pub fn life_spans(&self) -> &[LifeSpan] {
        &self.life_spans
    }
}

/// Builder for [`Capabilities`].
///
/// Declaring the same event twice is a malformed declaration and makes
/// [`build`](Self::build) fail.
#[derive(Debug, Default)]
pub struct CapabilitiesBuilder {
    model: Option<String>,
    events: HashMap<EventType, Vec<Command>>,
    commands: BTreeSet<CommandKind>,
    life_spans: Vec<LifeSpan>,
    duplicate: Option<EventType>,
}

impl CapabilitiesBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Names the model being declared, for error messages.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Declares the ordered commands that refresh `event`.
    #[must_use]
    pub fn event(mut self, event: EventType, commands: impl IntoIterator<Item = Command>) -> Self {
        let commands = commands.into_iter().collect();
        if self.events.insert(event, commands).is_some() && self.duplicate.is_none() {
            self.duplicate = Some(event);
        }
        self
    }

    /// Declares an event the device only ever pushes.
    #[must_use]
    pub fn push_only(self, event: EventType) -> Self {
        self.event(event, [])
    }

    /// Declares setters or actions the model accepts.
    #[must_use]
    pub fn commands(mut self, kinds: impl IntoIterator<Item = CommandKind>) -> Self {
        self.commands.extend(kinds);
        self
    }

    /// Declares the life span categories and the matching refresh command.
    ///
    /// Also registers `ResetLifeSpan`, since every model reporting a life
    /// span lets it be reset.
    #[must_use]
    pub fn life_spans(mut self, types: &[LifeSpan]) -> Self {
        self.life_spans = types.to_vec();
        self.commands.insert(CommandKind::ResetLifeSpan);
        self.event(EventType::LifeSpan, [Command::life_span(types)])
    }

    /// Builds the capabilities.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateEvent`] if an event was declared more
    /// than once.
    pub fn build(self) -> Result<Capabilities, ConfigError> {
        if let Some(event) = self.duplicate {
            return Err(ConfigError::DuplicateEvent {
                model: self.model.unwrap_or_else(|| "<anonymous>".to_string()),
                event: event.as_str(),
            });
        }
        Ok(Capabilities {
            events: self.events,
            commands: self.commands,
            life_spans: self.life_spans,
        })
    }
}
