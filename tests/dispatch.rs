// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for refreshing events and tracking peer-to-peer setters.

use std::collections::HashMap;
use std::sync::Arc;

use deebot_core::command::{CommandRegistry, CommandRequest};
use deebot_core::dispatch::P2pMessage;
use deebot_core::{
    ApiDeviceInfo, CommandResponse, DeviceInfo, Error, EventBus, EventType, HardwareResolver,
    P2pTracker, Refresher, Transport, TransportError,
};
use parking_lot::Mutex;
use serde_json::{Value, json};

/// Answers each command with canned events and records what was sent.
#[derive(Debug, Default)]
struct MockTransport {
    replies: HashMap<&'static str, Vec<(EventType, Value)>>,
    failures: HashMap<&'static str, TransportError>,
    sent: Mutex<Vec<CommandRequest>>,
}

impl MockTransport {
    fn reply(mut self, command: &'static str, event: EventType, data: Value) -> Self {
        self.replies.entry(command).or_default().push((event, data));
        self
    }

    fn fail(mut self, command: &'static str, error: TransportError) -> Self {
        self.failures.insert(command, error);
        self
    }

    fn sent_names(&self) -> Vec<&'static str> {
        self.sent.lock().iter().map(|r| r.name).collect()
    }
}

impl Transport for &MockTransport {
    async fn execute(
        &self,
        _device: &DeviceInfo,
        request: &CommandRequest,
    ) -> Result<CommandResponse, TransportError> {
        self.sent.lock().push(request.clone());
        if let Some(error) = self.failures.get(request.name) {
            return Err(error.clone());
        }

        let mut response = CommandResponse::new(r#"{"ret":"ok"}"#);
        for (event, data) in self.replies.get(request.name).into_iter().flatten() {
            response = response.with_event(*event, data.clone());
        }
        Ok(response)
    }
}

fn device(class: &str) -> DeviceInfo {
    let api: ApiDeviceInfo = serde_json::from_value(json!({
        "did": "E0000001",
        "name": "E0000001",
        "class": class,
        "resource": "upQ6",
        "company": "eco-ng",
    }))
    .unwrap();
    DeviceInfo::resolve(api, &HardwareResolver::new().unwrap()).unwrap()
}

// ============================================================================
// Refresher Tests
// ============================================================================

mod refresher {
    use super::*;

    #[tokio::test]
    async fn state_refresh_publishes_in_order() {
        let transport = MockTransport::default()
            .reply("getChargeState", EventType::State, json!({"state": "idle"}))
            .reply("getCleanInfo", EventType::State, json!({"state": "cleaning"}));
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        let refresher = Refresher::new(&transport, bus);

        let count = refresher
            .refresh(&device("yna5xi"), EventType::State)
            .await
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(transport.sent_names(), ["getChargeState", "getCleanInfo"]);
        assert_eq!(rx.recv().await.unwrap().data["state"], "idle");
        assert_eq!(rx.recv().await.unwrap().data["state"], "cleaning");
    }

    #[tokio::test]
    async fn life_span_refresh_sends_declared_categories() {
        let transport = MockTransport::default();
        let refresher = Refresher::new(&transport, EventBus::new());

        refresher
            .refresh(&device("p95mgv"), EventType::LifeSpan)
            .await
            .unwrap();

        let sent = transport.sent.lock();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].name, "getLifeSpan");
        assert_eq!(
            sent[0].args,
            json!(["brush", "heap", "sideBrush", "unitCare"])
        );
    }

    #[tokio::test]
    async fn unsupported_event_is_a_no_op() {
        let transport = MockTransport::default();
        let refresher = Refresher::new(&transport, EventBus::new());

        let count = refresher
            .refresh(&device("yna5xi"), EventType::TrueDetect)
            .await
            .unwrap();

        assert_eq!(count, 0);
        assert!(transport.sent_names().is_empty());
    }

    #[tokio::test]
    async fn failure_aborts_and_retry_starts_over() {
        let transport = MockTransport::default()
            .reply("getChargeState", EventType::State, json!({"state": "idle"}))
            .fail("getCleanInfo", TransportError::Rejected("busy".into()));
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        let refresher = Refresher::new(&transport, bus);
        let device = device("yna5xi");

        let err = refresher.refresh(&device, EventType::State).await.unwrap_err();
        assert!(matches!(err, Error::Transport(TransportError::Rejected(_))));

        // The first command's event was still delivered.
        assert_eq!(rx.recv().await.unwrap().event, EventType::State);

        refresher.refresh(&device, EventType::State).await.unwrap_err();
        assert_eq!(
            transport.sent_names(),
            [
                "getChargeState",
                "getCleanInfo",
                "getChargeState",
                "getCleanInfo"
            ]
        );
    }

    #[tokio::test]
    async fn availability_probe_is_a_plain_battery_request() {
        let transport = MockTransport::default();
        let refresher = Refresher::new(&transport, EventBus::new());

        refresher
            .refresh(&device("vi829v"), EventType::Availability)
            .await
            .unwrap();

        let sent = transport.sent.lock();
        assert_eq!(sent[0].name, "getBattery");
        assert_eq!(sent[0].args, json!({}));
    }
}

// ============================================================================
// P2pTracker Tests
// ============================================================================

mod p2p {
    use super::*;

    fn tracker(bus: &EventBus) -> P2pTracker {
        P2pTracker::new(Arc::new(CommandRegistry::builtin().unwrap()), bus.clone())
    }

    fn topic(command: &str, direction: &str, id: &str) -> String {
        format!("iot/p2p/{command}/app/cls/res/E0000001/yna5xi/upQ6/{direction}/{id}/j")
    }

    fn message(topic: &str, payload: Value) -> P2pMessage {
        P2pMessage::parse(topic, &payload.to_string())
            .unwrap()
            .unwrap()
    }

    #[tokio::test]
    async fn confirmed_setter_updates_subscribers() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        let tracker = tracker(&bus);

        tracker
            .handle(
                "E0000001",
                message(
                    &topic("setCleanCount", "q", "a1"),
                    json!({"body": {"data": {"count": 2}}}),
                ),
            )
            .unwrap();
        tracker
            .handle(
                "E0000001",
                message(
                    &topic("setCleanCount", "p", "a1"),
                    json!({"body": {"code": 0, "msg": "ok"}}),
                ),
            )
            .unwrap();

        let event = rx.recv().await.unwrap();
        assert!(event.is_for("E0000001"));
        assert_eq!(event.event, EventType::CleanCount);
        assert_eq!(event.data, json!({"count": 2}));
    }

    #[tokio::test]
    async fn interleaved_requests_match_by_id() {
        let bus = EventBus::new();
        let tracker = tracker(&bus);

        for (command, id, data) in [
            ("setVolume", "v1", json!({"volume": 1})),
            ("setSpeed", "f1", json!({"speed": 2})),
        ] {
            tracker
                .handle(
                    "E0000001",
                    message(&topic(command, "q", id), json!({"body": {"data": data}})),
                )
                .unwrap();
        }
        assert_eq!(tracker.pending_count(), 2);

        let fan = tracker
            .handle(
                "E0000001",
                message(&topic("setSpeed", "p", "f1"), json!({"body": {"code": 0}})),
            )
            .unwrap()
            .unwrap();
        assert_eq!(fan.event, EventType::FanSpeed);
        assert_eq!(tracker.pending_count(), 1);
    }

    #[tokio::test]
    async fn request_without_data_publishes_nothing() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        let tracker = tracker(&bus);

        let err = tracker
            .handle(
                "E0000001",
                message(&topic("setVolume", "q", "n1"), json!({"body": {}})),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidArgs {
                command: "setVolume",
                ..
            }
        ));
        assert_eq!(tracker.pending_count(), 0);

        let reply = tracker
            .handle(
                "E0000001",
                message(&topic("setVolume", "p", "n1"), json!({"body": {"code": 0}})),
            )
            .unwrap();
        assert!(reply.is_none());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn reset_life_span_reports_life_span_event() {
        let bus = EventBus::new();
        let tracker = tracker(&bus);

        tracker
            .handle(
                "E0000001",
                message(
                    &topic("resetLifeSpan", "q", "l1"),
                    json!({"body": {"data": {"type": "brush"}}}),
                ),
            )
            .unwrap();
        let event = tracker
            .handle(
                "E0000001",
                message(&topic("resetLifeSpan", "p", "l1"), json!({"body": {"code": 0}})),
            )
            .unwrap()
            .unwrap();

        assert_eq!(event.event, EventType::LifeSpan);
        assert_eq!(event.data, json!({"type": "brush"}));
    }
}
