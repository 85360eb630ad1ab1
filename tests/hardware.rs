// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for hardware resolution and model capabilities.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use deebot_core::command::{Command, CommandKind, LifeSpan};
use deebot_core::hardware::{FALLBACK, ModelCatalog, ModelDeclaration, models};
use deebot_core::{EventType, HardwareResolver};

type Golden = Vec<(EventType, Vec<Command>)>;

fn cmd(kind: CommandKind) -> Command {
    Command::new(kind)
}

fn assert_golden(class: &str, expected: Golden) {
    let resolver = HardwareResolver::new().unwrap();
    let info = resolver.resolve(class).unwrap();
    let caps = info.capabilities();

    let mut expected_events: Vec<_> = expected.iter().map(|(event, _)| *event).collect();
    expected_events.sort_unstable();
    assert_eq!(caps.events(), expected_events, "event set of {class}");

    for (event, commands) in expected {
        assert_eq!(
            caps.get_refresh_commands(event),
            commands.as_slice(),
            "{class}: {event}"
        );
    }
}

/// Entries every built-in model shares.
fn common() -> Golden {
    vec![
        (EventType::AdvancedMode, vec![cmd(CommandKind::GetAdvancedMode)]),
        (EventType::Availability, vec![Command::availability_probe()]),
        (EventType::Battery, vec![cmd(CommandKind::GetBattery)]),
        (EventType::CachedMapInfo, vec![cmd(CommandKind::GetCachedMapInfo)]),
        (
            EventType::CarpetAutoFanBoost,
            vec![cmd(CommandKind::GetCarpetAutoFanBoost)],
        ),
        (
            EventType::ContinuousCleaning,
            vec![cmd(CommandKind::GetContinuousCleaning)],
        ),
        (EventType::CustomCommand, vec![]),
        (EventType::Error, vec![cmd(CommandKind::GetError)]),
        (EventType::FanSpeed, vec![cmd(CommandKind::GetFanSpeed)]),
        (EventType::MajorMap, vec![cmd(CommandKind::GetMajorMap)]),
        (EventType::MapChanged, vec![]),
        (EventType::MapTrace, vec![cmd(CommandKind::GetMapTrace)]),
        (EventType::MultimapState, vec![cmd(CommandKind::GetMultimapState)]),
        (EventType::NetworkInfo, vec![cmd(CommandKind::GetNetInfo)]),
        (EventType::Positions, vec![cmd(CommandKind::GetPos)]),
        (EventType::ReportStats, vec![]),
        (EventType::Rooms, vec![cmd(CommandKind::GetCachedMapInfo)]),
        (
            EventType::State,
            vec![
                cmd(CommandKind::GetChargeState),
                cmd(CommandKind::GetCleanInfo),
            ],
        ),
        (EventType::Stats, vec![cmd(CommandKind::GetStats)]),
        (EventType::TotalStats, vec![cmd(CommandKind::GetTotalStats)]),
        (EventType::Volume, vec![cmd(CommandKind::GetVolume)]),
        (EventType::WaterInfo, vec![cmd(CommandKind::GetWaterInfo)]),
    ]
}

// ============================================================================
// Golden Capability Tables
// ============================================================================

mod golden {
    use super::*;

    #[test]
    fn fallback() {
        let mut expected = common();
        expected.extend([
            (EventType::CleanCount, vec![cmd(CommandKind::GetCleanCount)]),
            (EventType::CleanLog, vec![cmd(CommandKind::GetCleanLogs)]),
            (
                EventType::CleanPreference,
                vec![cmd(CommandKind::GetCleanPreference)],
            ),
            (
                EventType::LifeSpan,
                vec![Command::life_span(&[
                    LifeSpan::Brush,
                    LifeSpan::Filter,
                    LifeSpan::SideBrush,
                ])],
            ),
            (EventType::TrueDetect, vec![cmd(CommandKind::GetTrueDetect)]),
        ]);
        assert_golden(FALLBACK, expected);
    }

    #[test]
    fn yna5xi() {
        let mut expected = common();
        expected.extend([
            (EventType::CleanLog, vec![cmd(CommandKind::GetCleanLogs)]),
            (
                EventType::LifeSpan,
                vec![Command::life_span(&[
                    LifeSpan::Brush,
                    LifeSpan::Filter,
                    LifeSpan::SideBrush,
                ])],
            ),
            (EventType::Ota, vec![cmd(CommandKind::GetOta)]),
        ]);
        assert_golden("yna5xi", expected);
    }

    #[test]
    fn p95mgv() {
        let mut expected = common();
        expected.extend([
            (EventType::CleanCount, vec![cmd(CommandKind::GetCleanCount)]),
            (
                EventType::CleanPreference,
                vec![cmd(CommandKind::GetCleanPreference)],
            ),
            (
                EventType::EfficiencyMode,
                vec![cmd(CommandKind::GetEfficiencyMode)],
            ),
            (
                EventType::LifeSpan,
                vec![Command::life_span(&[
                    LifeSpan::Brush,
                    LifeSpan::Filter,
                    LifeSpan::SideBrush,
                    LifeSpan::UnitCare,
                ])],
            ),
            (EventType::Ota, vec![cmd(CommandKind::GetOta)]),
            (EventType::TrueDetect, vec![cmd(CommandKind::GetTrueDetect)]),
            (
                EventType::VoiceAssistantState,
                vec![cmd(CommandKind::GetVoiceAssistantState)],
            ),
        ]);
        assert_golden("p95mgv", expected);
    }

    #[test]
    fn family_members_share_declaration_but_not_instance() {
        let resolver = HardwareResolver::new().unwrap();
        let a = resolver.resolve("p95mgv").unwrap();
        let b = resolver.resolve("rss8xk").unwrap();

        assert_eq!(a, b);
        assert!(!Arc::ptr_eq(&a, &b));
    }
}

// ============================================================================
// Resolution
// ============================================================================

mod resolution {
    use super::*;

    #[test]
    fn unknown_class_resolves_to_fallback_instance() {
        let resolver = HardwareResolver::new().unwrap();
        let fallback = resolver.resolve(FALLBACK).unwrap();

        let first = resolver.resolve("not_specified").unwrap();
        let second = resolver.resolve("not_specified").unwrap();
        let other = resolver.resolve("zzz999").unwrap();

        assert!(Arc::ptr_eq(&first, &fallback));
        assert!(Arc::ptr_eq(&second, &fallback));
        assert!(Arc::ptr_eq(&other, &fallback));
    }

    #[test]
    fn known_class_is_reference_stable() {
        let resolver = HardwareResolver::new().unwrap();
        let first = resolver.resolve("yna5xi").unwrap();
        let second = resolver.resolve("yna5xi").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(!Arc::ptr_eq(&first, &resolver.fallback()));
    }

    #[test]
    fn empty_class_resolves_to_fallback() {
        let resolver = HardwareResolver::new().unwrap();
        let info = resolver.resolve("").unwrap();
        assert!(Arc::ptr_eq(&info, &resolver.fallback()));
    }

    #[test]
    fn load_all_yields_sorted_known_set() {
        let expected = [
            "2o4lnm", "55aiho", "626v6g", "85nbtp", "9ku8nu", "clojes", "fallback", "lx3j7m",
            "p1jij8", "p95mgv", "rss8xk", "umwv6z", "vi829v", "x5d34r", "yna5xi", "zjavof",
        ];
        let resolver = HardwareResolver::new().unwrap();

        resolver.load_all().unwrap();
        assert_eq!(resolver.loaded_models(), expected);

        resolver.load_all().unwrap();
        assert_eq!(resolver.loaded_models(), expected);
        assert_eq!(resolver.known_models(), expected);
    }

    #[test]
    fn load_all_keeps_earlier_instances() {
        let resolver = HardwareResolver::new().unwrap();
        let before = resolver.resolve("vi829v").unwrap();

        resolver.load_all().unwrap();

        let after = resolver.resolve("vi829v").unwrap();
        assert!(Arc::ptr_eq(&before, &after));
    }
}

// ============================================================================
// Concurrency
// ============================================================================

mod concurrency {
    use super::*;

    const THREADS: usize = 16;

    /// Resolver whose `slow01` declaration counts its builds and takes a while.
    fn slow_resolver() -> (HardwareResolver, Arc<AtomicUsize>) {
        let builds = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&builds);

        let mut catalog = ModelCatalog::new();
        catalog
            .declare(FALLBACK, ModelDeclaration::new(models::fallback))
            .unwrap();
        catalog
            .declare(
                "slow01",
                ModelDeclaration::new(move |class| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    thread::sleep(Duration::from_millis(20));
                    models::p95mgv(class)
                }),
            )
            .unwrap();
        (HardwareResolver::with_catalog(catalog).unwrap(), builds)
    }

    #[test]
    fn concurrent_first_resolution_builds_once() {
        let (resolver, builds) = slow_resolver();
        let barrier = Barrier::new(THREADS);

        let results: Vec<_> = thread::scope(|s| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    s.spawn(|| {
                        barrier.wait();
                        resolver.resolve("slow01").unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(builds.load(Ordering::SeqCst), 1);
        for info in &results[1..] {
            assert!(Arc::ptr_eq(info, &results[0]));
        }
    }

    #[test]
    fn load_all_racing_resolve_builds_once() {
        let (resolver, builds) = slow_resolver();
        let barrier = Barrier::new(THREADS);

        let resolved: Vec<_> = thread::scope(|s| {
            let handles: Vec<_> = (0..THREADS)
                .map(|i| {
                    let resolver = &resolver;
                    let barrier = &barrier;
                    s.spawn(move || {
                        barrier.wait();
                        if i % 2 == 0 {
                            resolver.load_all().unwrap();
                            None
                        } else {
                            Some(resolver.resolve("slow01").unwrap())
                        }
                    })
                })
                .collect();
            handles
                .into_iter()
                .filter_map(|h| h.join().unwrap())
                .collect()
        });

        assert_eq!(builds.load(Ordering::SeqCst), 1);
        assert_eq!(resolved.len(), THREADS / 2);
        let canonical = resolver.resolve("slow01").unwrap();
        for info in &resolved {
            assert!(Arc::ptr_eq(info, &canonical));
        }
        assert_eq!(resolver.loaded_models(), ["fallback", "slow01"]);
    }

    #[test]
    fn concurrent_resolution_across_classes() {
        let resolver = HardwareResolver::new().unwrap();
        let classes = ["yna5xi", "p95mgv", "p1jij8", "vi829v", "unknown"];
        let barrier = Barrier::new(classes.len() * 2);

        thread::scope(|s| {
            for class in classes.iter().chain(classes.iter()) {
                let resolver = &resolver;
                let barrier = &barrier;
                s.spawn(move || {
                    barrier.wait();
                    resolver.resolve(class).unwrap();
                });
            }
        });

        assert_eq!(
            resolver.loaded_models(),
            ["fallback", "p1jij8", "p95mgv", "vi829v", "yna5xi"]
        );
    }

    #[test]
    fn resolver_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HardwareResolver>();
    }
}
