// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::command::Command;
use crate::device::DeviceInfo;
use crate::error::Result;
use crate::event::{EventBus, EventType};
use crate::protocol::{CommandResponse, Transport};

/// Refreshes device events by executing their refresh commands.
///
/// # Examples
///
/// ```no_run
/// use deebot_core::{DeviceInfo, EventBus, EventType, Refresher, Transport};
///
/// async fn refresh_state<T: Transport>(transport: T, device: &DeviceInfo) -> deebot_core::Result<()> {
///     let bus = EventBus::new();
///     let mut events = bus.subscribe();
///     let refresher = Refresher::new(transport, bus);
///
///     refresher.refresh(device, EventType::State).await?;
///     while let Ok(event) = events.try_recv() {
///         println!("{} -> {}", event.event, event.data);
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct Refresher<T> {
    transport: T,
    bus: EventBus,
}

impl<T: Transport> Refresher<T> {
    /// Creates a refresher publishing decoded events on `bus`.
    #[must_use]
    pub fn new(transport: T, bus: EventBus) -> Self {
        Self { transport, bus }
    }

    /// Returns the transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the bus events are published on.
    #[must_use]
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Executes every refresh command the device declares for `event`.
    ///
    /// Commands run one after another in declared order. Returns the number
    /// of commands executed, which is zero when the device cannot actively
    /// refresh the event.
    ///
    /// # Errors
    ///
    /// Returns the first command's error; the remaining commands are not
    /// executed and nothing is retried. Calling again starts over with the
    /// same command sequence.
    pub async fn refresh(&self, device: &DeviceInfo, event: EventType) -> Result<usize> {
        let commands = device.capabilities().get_refresh_commands(event);
        if commands.is_empty() {
            tracing::debug!(did = %device.did(), event = %event, "No refresh commands");
            return Ok(0);
        }

        for command in commands {
            self.execute(device, command).await?;
        }

        tracing::debug!(
            did = %device.did(),
            event = %event,
            commands = commands.len(),
            "Refreshed event"
        );
        Ok(commands.len())
    }

    /// Executes one command and publishes the events decoded from its reply.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`](crate::Error::Transport) if the transport
    /// fails.
    pub async fn execute(&self, device: &DeviceInfo, command: &Command) -> Result<CommandResponse> {
        let request = command.request();
        tracing::debug!(
            did = %device.did(),
            command = %request.name,
            request_id = %request.request_id,
            "Executing command"
        );

        let response = self
            .transport
            .execute(device, &request)
            .await
            .inspect_err(|e| {
                tracing::warn!(
                    did = %device.did(),
                    command = %request.name,
                    error = %e,
                    "Command failed"
                );
            })?;

        for (event, data) in response.events() {
            self.bus.notify(device.did(), *event, data.clone());
        }
        Ok(response)
    }
}
