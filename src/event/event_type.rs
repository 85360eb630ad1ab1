// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The closed set of observable device state categories.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A category of observable device state change.
///
/// Event types are tags, not commands. A device's
/// [`Capabilities`](crate::Capabilities) maps each event type to the
/// commands that refresh it.
///
/// # Examples
///
/// ```
/// use deebot_core::EventType;
///
/// assert_eq!(EventType::Battery.as_str(), "Battery");
/// assert!(EventType::ALL.contains(&EventType::State));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EventType {
    /// Advanced cleaning mode toggled.
    AdvancedMode,
    /// Device became reachable or unreachable.
    Availability,
    /// Battery level.
    Battery,
    /// Cached map metadata.
    CachedMapInfo,
    /// Carpet auto fan boost setting.
    CarpetAutoFanBoost,
    /// Number of passes per clean.
    CleanCount,
    /// Clean history entries.
    CleanLog,
    /// Clean preference toggle.
    CleanPreference,
    /// Continuous (resume after charge) cleaning setting.
    ContinuousCleaning,
    /// Response to a user-issued raw command.
    CustomCommand,
    /// Efficiency mode.
    EfficiencyMode,
    /// Device error code.
    Error,
    /// Suction power.
    FanSpeed,
    /// Consumable life span.
    LifeSpan,
    /// Major map layout.
    MajorMap,
    /// Map changed notification.
    MapChanged,
    /// Map set (rooms, virtual walls, no-mop zones).
    MapSet,
    /// Single map subset.
    MapSubset,
    /// Cleaning trace.
    MapTrace,
    /// Minor map piece.
    MinorMap,
    /// Multi-map enabled state.
    MultimapState,
    /// Network information.
    NetworkInfo,
    /// Firmware update state.
    Ota,
    /// Robot and charger positions.
    Positions,
    /// Statistics pushed while cleaning.
    ReportStats,
    /// Room list.
    Rooms,
    /// Composite vacuum state (charging, cleaning, idle...).
    State,
    /// Statistics of the last clean.
    Stats,
    /// Sweep-only mode.
    SweepMode,
    /// Lifetime statistics.
    TotalStats,
    /// Obstacle detection.
    TrueDetect,
    /// Voice assistant enabled state.
    VoiceAssistantState,
    /// Speaker volume.
    Volume,
    /// Water amount and mop attachment.
    WaterInfo,
    /// Vacuum/mop work mode.
    WorkMode,
}

impl EventType {
    /// Every event type, in declaration order.
    pub const ALL: [Self; 35] = [
        Self::AdvancedMode,
        Self::Availability,
        Self::Battery,
        Self::CachedMapInfo,
        Self::CarpetAutoFanBoost,
        Self::CleanCount,
        Self::CleanLog,
        Self::CleanPreference,
        Self::ContinuousCleaning,
        Self::CustomCommand,
        Self::EfficiencyMode,
        Self::Error,
        Self::FanSpeed,
        Self::LifeSpan,
        Self::MajorMap,
        Self::MapChanged,
        Self::MapSet,
        Self::MapSubset,
        Self::MapTrace,
        Self::MinorMap,
        Self::MultimapState,
        Self::NetworkInfo,
        Self::Ota,
        Self::Positions,
        Self::ReportStats,
        Self::Rooms,
        Self::State,
        Self::Stats,
        Self::SweepMode,
        Self::TotalStats,
        Self::TrueDetect,
        Self::VoiceAssistantState,
        Self::Volume,
        Self::WaterInfo,
        Self::WorkMode,
    ];

    /// Returns the event name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AdvancedMode => "AdvancedMode",
            Self::Availability => "Availability",
            Self::Battery => "Battery",
            Self::CachedMapInfo => "CachedMapInfo",
            Self::CarpetAutoFanBoost => "CarpetAutoFanBoost",
            Self::CleanCount => "CleanCount",
            Self::CleanLog => "CleanLog",
            Self::CleanPreference => "CleanPreference",
            Self::ContinuousCleaning => "ContinuousCleaning",
            Self::CustomCommand => "CustomCommand",
            Self::EfficiencyMode => "EfficiencyMode",
            Self::Error => "Error",
            Self::FanSpeed => "FanSpeed",
            Self::LifeSpan => "LifeSpan",
            Self::MajorMap => "MajorMap",
            Self::MapChanged => "MapChanged",
            Self::MapSet => "MapSet",
            Self::MapSubset => "MapSubset",
            Self::MapTrace => "MapTrace",
            Self::MinorMap => "MinorMap",
            Self::MultimapState => "MultimapState",
            Self::NetworkInfo => "NetworkInfo",
            Self::Ota => "Ota",
            Self::Positions => "Positions",
            Self::ReportStats => "ReportStats",
            Self::Rooms => "Rooms",
            Self::State => "State",
            Self::Stats => "Stats",
            Self::SweepMode => "SweepMode",
            Self::TotalStats => "TotalStats",
            Self::TrueDetect => "TrueDetect",
            Self::VoiceAssistantState => "VoiceAssistantState",
            Self::Volume => "Volume",
            Self::WaterInfo => "WaterInfo",
            Self::WorkMode => "WorkMode",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
