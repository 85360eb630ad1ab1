// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The closed set of JSON commands understood by the product line.

use std::fmt;

use crate::event::EventType;

/// Identifies a JSON command implementation.
///
/// Each kind has a stable wire name. Kinds whose replies can arrive over the
/// direct peer-to-peer channel declare the event such a reply updates via
/// [`CommandKind::p2p_event`]; this is the only source of the peer-to-peer
/// flag.
///
/// # Examples
///
/// ```
/// use deebot_core::command::CommandKind;
/// use deebot_core::EventType;
///
/// assert_eq!(CommandKind::GetFanSpeed.name(), "getSpeed");
/// assert!(!CommandKind::GetFanSpeed.supports_p2p());
/// assert_eq!(CommandKind::SetFanSpeed.p2p_event(), Some(EventType::FanSpeed));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CommandKind {
    /// Reads whether advanced mode is enabled.
    GetAdvancedMode,
    /// Enables or disables advanced mode.
    SetAdvancedMode,
    /// Reads the battery level.
    GetBattery,
    /// Reads whether suction is boosted on carpet.
    GetCarpetAutoFanBoost,
    /// Enables or disables suction boost on carpet.
    SetCarpetAutoFanBoost,
    /// Reads how many passes a clean makes.
    GetCleanCount,
    /// Sets how many passes a clean makes.
    SetCleanCount,
    /// Reads whether per-room clean preferences are used.
    GetCleanPreference,
    /// Enables or disables per-room clean preferences.
    SetCleanPreference,
    /// Deletes the stored map.
    ClearMap,
    /// Sends the robot back to its dock.
    Charge,
    /// Reads whether the robot is charging.
    GetChargeState,
    /// Starts, pauses, resumes or stops cleaning.
    Clean,
    /// Reads the current cleaning state.
    GetCleanInfo,
    /// Reads the cleaning history.
    GetCleanLogs,
    /// Reads whether an interrupted clean resumes after charging.
    GetContinuousCleaning,
    /// Enables or disables resuming after charging.
    SetContinuousCleaning,
    /// Reads the efficiency mode.
    GetEfficiencyMode,
    /// Sets the efficiency mode.
    SetEfficiencyMode,
    /// Reads the active error codes.
    GetError,
    /// Reads the suction power.
    GetFanSpeed,
    /// Sets the suction power.
    SetFanSpeed,
    /// Reads the remaining life of the requested consumables.
    GetLifeSpan,
    /// Resets a consumable after replacement.
    ResetLifeSpan,
    /// Reads the cached map list and room layout.
    GetCachedMapInfo,
    /// Reads the coarse map overview.
    GetMajorMap,
    /// Reads one set of map objects.
    GetMapSet,
    /// Reads one set of map objects, newer firmware.
    GetMapSetV2,
    /// Reads one map object, such as a room outline.
    GetMapSubSet,
    /// Reads the path travelled so far.
    GetMapTrace,
    /// Reads one detailed map piece.
    GetMinorMap,
    /// Reads whether several maps are stored.
    GetMultimapState,
    /// Enables or disables storing several maps.
    SetMultimapState,
    /// Reads the network connection details.
    GetNetInfo,
    /// Reads the firmware update state.
    GetOta,
    /// Enables or disables automatic firmware updates.
    SetOta,
    /// Plays a sound to locate the robot.
    PlaySound,
    /// Reads the robot and dock positions.
    GetPos,
    /// Starts relocating the robot on its map.
    SetRelocationState,
    /// Reads whether mopping only is enabled.
    GetSweepMode,
    /// Enables or disables mopping only.
    SetSweepMode,
    /// Reads the statistics of the current clean.
    GetStats,
    /// Reads the lifetime cleaning statistics.
    GetTotalStats,
    /// Reads whether obstacle detection is enabled.
    GetTrueDetect,
    /// Enables or disables obstacle detection.
    SetTrueDetect,
    /// Reads whether the voice assistant is enabled.
    GetVoiceAssistantState,
    /// Enables or disables the voice assistant.
    SetVoiceAssistantState,
    /// Reads the speaker volume.
    GetVolume,
    /// Sets the speaker volume.
    SetVolume,
    /// Reads the mop water flow and whether a mop is attached.
    GetWaterInfo,
    /// Sets the mop water flow.
    SetWaterInfo,
    /// Reads the vacuum and mop work mode.
    GetWorkMode,
    /// Sets the vacuum and mop work mode.
    SetWorkMode,
}

impl CommandKind {
    /// Every command kind, grouped by feature.
    pub const ALL: [Self; 53] = [
        Self::GetAdvancedMode,
        Self::SetAdvancedMode,
        Self::GetBattery,
        Self::GetCarpetAutoFanBoost,
        Self::SetCarpetAutoFanBoost,
        Self::GetCleanCount,
        Self::SetCleanCount,
        Self::GetCleanPreference,
        Self::SetCleanPreference,
        Self::ClearMap,
        Self::Charge,
        Self::GetChargeState,
        Self::Clean,
        Self::GetCleanInfo,
        Self::GetCleanLogs,
        Self::GetContinuousCleaning,
        Self::SetContinuousCleaning,
        Self::GetEfficiencyMode,
        Self::SetEfficiencyMode,
        Self::GetError,
        Self::GetFanSpeed,
        Self::SetFanSpeed,
        Self::GetLifeSpan,
        Self::ResetLifeSpan,
        Self::GetCachedMapInfo,
        Self::GetMajorMap,
        Self::GetMapSet,
        Self::GetMapSetV2,
        Self::GetMapSubSet,
        Self::GetMapTrace,
        Self::GetMinorMap,
        Self::GetMultimapState,
        Self::SetMultimapState,
        Self::GetNetInfo,
        Self::GetOta,
        Self::SetOta,
        Self::PlaySound,
        Self::GetPos,
        Self::SetRelocationState,
        Self::GetSweepMode,
        Self::SetSweepMode,
        Self::GetStats,
        Self::GetTotalStats,
        Self::GetTrueDetect,
        Self::SetTrueDetect,
        Self::GetVoiceAssistantState,
        Self::SetVoiceAssistantState,
        Self::GetVolume,
        Self::SetVolume,
        Self::GetWaterInfo,
        Self::SetWaterInfo,
        Self::GetWorkMode,
        Self::SetWorkMode,
    ];

    /// Returns the stable wire name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::GetAdvancedMode => "getAdvancedMode",
            Self::SetAdvancedMode => "setAdvancedMode",
            Self::GetBattery => "getBattery",
            Self::GetCarpetAutoFanBoost => "getCarpertPressure",
            Self::SetCarpetAutoFanBoost => "setCarpertPressure",
            Self::GetCleanCount => "getCleanCount",
            Self::SetCleanCount => "setCleanCount",
            Self::GetCleanPreference => "getCleanPreference",
            Self::SetCleanPreference => "setCleanPreference",
            Self::ClearMap => "clearMap",
            Self::Charge => "charge",
            Self::GetChargeState => "getChargeState",
            Self::Clean => "clean",
            Self::GetCleanInfo => "getCleanInfo",
            Self::GetCleanLogs => "GetCleanLogs",
            Self::GetContinuousCleaning => "getBreakPoint",
            Self::SetContinuousCleaning => "setBreakPoint",
            Self::GetEfficiencyMode => "getEfficiency",
            Self::SetEfficiencyMode => "setEfficiency",
            Self::GetError => "getError",
            Self::GetFanSpeed => "getSpeed",
            Self::SetFanSpeed => "setSpeed",
            Self::GetLifeSpan => "getLifeSpan",
            Self::ResetLifeSpan => "resetLifeSpan",
            Self::GetCachedMapInfo => "getCachedMapInfo",
            Self::GetMajorMap => "getMajorMap",
            Self::GetMapSet => "getMapSet",
            Self::GetMapSetV2 => "getMapSet_V2",
            Self::GetMapSubSet => "getMapSubSet",
            Self::GetMapTrace => "getMapTrace",
            Self::GetMinorMap => "getMinorMap",
            Self::GetMultimapState => "getMultiMapState",
            Self::SetMultimapState => "setMultiMapState",
            Self::GetNetInfo => "getNetInfo",
            Self::GetOta => "getOta",
            Self::SetOta => "setOta",
            Self::PlaySound => "playSound",
            Self::GetPos => "getPos",
            Self::SetRelocationState => "setRelocationState",
            Self::GetSweepMode => "getSweepMode",
            Self::SetSweepMode => "setSweepMode",
            Self::GetStats => "getStats",
            Self::GetTotalStats => "getTotalStats",
            Self::GetTrueDetect => "getTrueDetect",
            Self::SetTrueDetect => "setTrueDetect",
            Self::GetVoiceAssistantState => "getVoiceAssistantState",
            Self::SetVoiceAssistantState => "setVoiceAssistantState",
            Self::GetVolume => "getVolume",
            Self::SetVolume => "setVolume",
            Self::GetWaterInfo => "getWaterInfo",
            Self::SetWaterInfo => "setWaterInfo",
            Self::GetWorkMode => "getWorkMode",
            Self::SetWorkMode => "setWorkMode",
        }
    }

    /// Returns the event a successful peer-to-peer reply updates, if this
    /// command handles peer-to-peer replies at all.
    #[must_use]
    pub const fn p2p_event(self) -> Option<EventType> {
        match self {
            Self::SetAdvancedMode => Some(EventType::AdvancedMode),
            Self::SetCarpetAutoFanBoost => Some(EventType::CarpetAutoFanBoost),
            Self::SetCleanCount => Some(EventType::CleanCount),
            Self::SetCleanPreference => Some(EventType::CleanPreference),
            Self::SetContinuousCleaning => Some(EventType::ContinuousCleaning),
            Self::SetEfficiencyMode => Some(EventType::EfficiencyMode),
            Self::SetFanSpeed => Some(EventType::FanSpeed),
            Self::ResetLifeSpan => Some(EventType::LifeSpan),
            Self::SetMultimapState => Some(EventType::MultimapState),
            Self::SetOta => Some(EventType::Ota),
            Self::SetSweepMode => Some(EventType::SweepMode),
            Self::SetTrueDetect => Some(EventType::TrueDetect),
            Self::SetVoiceAssistantState => Some(EventType::VoiceAssistantState),
            Self::SetVolume => Some(EventType::Volume),
            Self::SetWaterInfo => Some(EventType::WaterInfo),
            Self::SetWorkMode => Some(EventType::WorkMode),
            _ => None,
        }
    }

    /// Returns `true` if replies may arrive over the peer-to-peer channel.
    #[must_use]
    pub const fn supports_p2p(self) -> bool {
        self.p2p_event().is_some()
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
