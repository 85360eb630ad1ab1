// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Broadcast bus for decoded device events.

use tokio::sync::broadcast;

use super::{DeviceEvent, EventType};

/// Default number of events buffered per subscriber.
const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Broadcasts [`DeviceEvent`]s to every subscriber.
///
/// Backed by a tokio broadcast channel: each subscriber receives its own copy
/// of every event published after it subscribed. A subscriber that falls more
/// than `capacity` events behind receives `RecvError::Lagged` and skips ahead.
///
/// Cloning the bus yields another handle to the same channel.
///
/// # Examples
///
/// ```
/// use deebot_core::event::{DeviceEvent, EventBus, EventType};
///
/// let bus = EventBus::new();
/// let mut rx = bus.subscribe();
///
/// bus.publish(DeviceEvent::new("E0001", EventType::Volume, serde_json::json!({"volume": 7})));
/// assert_eq!(bus.subscriber_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<DeviceEvent>,
}

impl EventBus {
    /// Creates a bus with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates a bus buffering up to `capacity` events per subscriber.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribes to every event published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DeviceEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Returns `true` if nobody is listening.
    ///
    /// Callers can skip issuing refresh commands when this holds.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.subscriber_count() == 0
    }

    /// Publishes an event. Dropped silently when there are no subscribers.
    pub fn publish(&self, event: DeviceEvent) {
        tracing::trace!(did = %event.did, event = %event.event, "Publishing device event");
        let _ = self.sender.send(event);
    }

    /// Publishes an event and returns how many subscribers received it.
    #[must_use]
    pub fn publish_counted(&self, event: DeviceEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    /// Publishes a freshly stamped event built from its parts.
    pub fn notify(&self, did: &str, event: EventType, data: serde_json::Value) {
        self.publish(DeviceEvent::new(did, event, data));
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn battery(did: &str) -> DeviceEvent {
        DeviceEvent::new(did, EventType::Battery, serde_json::json!({"value": 42}))
    }

    #[test]
    fn new_bus_is_idle() {
        let bus = EventBus::new();
        assert_eq!(bus.subscriber_count(), 0);
        assert!(bus.is_idle());
    }

    #[test]
    fn subscribe_and_drop_track_count() {
        let bus = EventBus::new();

        let rx1 = bus.subscribe();
        let _rx2 = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        drop(rx1);
        assert_eq!(bus.subscriber_count(), 1);
        assert!(!bus.is_idle());
    }

    #[tokio::test]
    async fn publish_delivers_to_every_subscriber() {
        let bus = EventBus::new();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(battery("E0002"));

        let event1 = rx1.recv().await.unwrap();
        let event2 = rx2.recv().await.unwrap();
        assert_eq!(event1, event2);
        assert!(event1.is_for("E0002"));
    }

    #[tokio::test]
    async fn notify_builds_event() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        bus.notify("E0005", EventType::Volume, serde_json::json!({"volume": 3}));

        let event = rx.recv().await.unwrap();
        assert_eq!(event.event, EventType::Volume);
        assert_eq!(event.data["volume"], 3);
    }

    #[test]
    fn publish_counted_reports_receivers() {
        let bus = EventBus::new();
        assert_eq!(bus.publish_counted(battery("E0003")), 0);

        let _rx1 = bus.subscribe();
        let _rx2 = bus.subscribe();
        assert_eq!(bus.publish_counted(battery("E0003")), 2);
    }

    #[test]
    fn clones_share_the_channel() {
        let bus = EventBus::with_capacity(16);
        let other = bus.clone();

        let _rx = bus.subscribe();
        assert_eq!(other.subscriber_count(), 1);
    }
}
