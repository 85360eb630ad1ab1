// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Built-in model declarations.
//!
//! Each public function declares one model family. Families share a baseline
//! (battery, state, map, statistics...) and add or omit features on top of
//! it. A model without a feature simply does not declare it.
//!
//! | Declaration | Classes |
//! |---|---|
//! | [`fallback`] | `fallback` and every unknown class |
//! | [`yna5xi`] | `55aiho`, `x5d34r`, `yna5xi` |
//! | [`vi829v`] | `626v6g`, `vi829v`, `zjavof` |
//! | [`p95mgv`] | `2o4lnm`, `clojes`, `p95mgv`, `rss8xk` |
//! | [`p1jij8`] | `85nbtp`, `9ku8nu`, `lx3j7m`, `p1jij8`, `umwv6z` |

use super::{DataType, StaticDeviceInfo};
use crate::capabilities::CapabilitiesBuilder;
use crate::command::{Command, CommandKind, LifeSpan};
use crate::error::ConfigError;
use crate::event::EventType;

/// Signature of a model declaration.
pub type DeclareFn = fn(&str) -> Result<StaticDeviceInfo, ConfigError>;

/// A declaration and the device classes that use it.
#[derive(Debug, Clone, Copy)]
pub struct Family {
    /// Builds the model description.
    pub declare: DeclareFn,
    /// Device classes sharing the declaration.
    pub classes: &'static [&'static str],
}

/// Every built-in family except the fallback.
pub const FAMILIES: &[Family] = &[
    Family {
        declare: yna5xi,
        classes: &["55aiho", "x5d34r", "yna5xi"],
    },
    Family {
        declare: vi829v,
        classes: &["626v6g", "vi829v", "zjavof"],
    },
    Family {
        declare: p95mgv,
        classes: &["2o4lnm", "clojes", "p95mgv", "rss8xk"],
    },
    Family {
        declare: p1jij8,
        classes: &["85nbtp", "9ku8nu", "lx3j7m", "p1jij8", "umwv6z"],
    },
];

const fn cmd(kind: CommandKind) -> Command {
    Command::new(kind)
}

/// Events and commands every JSON model supports.
fn baseline(class: &str) -> CapabilitiesBuilder {
    CapabilitiesBuilder::new()
        .model(class)
        .event(EventType::Availability, [Command::availability_probe()])
        .event(EventType::Battery, [cmd(CommandKind::GetBattery)])
        .event(EventType::CachedMapInfo, [cmd(CommandKind::GetCachedMapInfo)])
        .push_only(EventType::CustomCommand)
        .event(EventType::Error, [cmd(CommandKind::GetError)])
        .event(EventType::FanSpeed, [cmd(CommandKind::GetFanSpeed)])
        .event(EventType::MajorMap, [cmd(CommandKind::GetMajorMap)])
        .push_only(EventType::MapChanged)
        .event(EventType::MapTrace, [cmd(CommandKind::GetMapTrace)])
        .event(EventType::MultimapState, [cmd(CommandKind::GetMultimapState)])
        .event(EventType::NetworkInfo, [cmd(CommandKind::GetNetInfo)])
        .event(EventType::Positions, [cmd(CommandKind::GetPos)])
        .push_only(EventType::ReportStats)
        .event(EventType::Rooms, [cmd(CommandKind::GetCachedMapInfo)])
        .event(
            EventType::State,
            [
                cmd(CommandKind::GetChargeState),
                cmd(CommandKind::GetCleanInfo),
            ],
        )
        .event(EventType::Stats, [cmd(CommandKind::GetStats)])
        .event(EventType::TotalStats, [cmd(CommandKind::GetTotalStats)])
        .event(EventType::Volume, [cmd(CommandKind::GetVolume)])
        .event(EventType::WaterInfo, [cmd(CommandKind::GetWaterInfo)])
        .commands([
            CommandKind::Charge,
            CommandKind::Clean,
            CommandKind::ClearMap,
            CommandKind::GetMapSet,
            CommandKind::GetMapSubSet,
            CommandKind::GetMinorMap,
            CommandKind::PlaySound,
            CommandKind::SetFanSpeed,
            CommandKind::SetMultimapState,
            CommandKind::SetRelocationState,
            CommandKind::SetVolume,
            CommandKind::SetWaterInfo,
        ])
}

/// Settings shared by models with an advanced mode.
fn advanced_settings(builder: CapabilitiesBuilder) -> CapabilitiesBuilder {
    builder
        .event(EventType::AdvancedMode, [cmd(CommandKind::GetAdvancedMode)])
        .event(
            EventType::CarpetAutoFanBoost,
            [cmd(CommandKind::GetCarpetAutoFanBoost)],
        )
        .event(
            EventType::ContinuousCleaning,
            [cmd(CommandKind::GetContinuousCleaning)],
        )
        .commands([
            CommandKind::SetAdvancedMode,
            CommandKind::SetCarpetAutoFanBoost,
            CommandKind::SetContinuousCleaning,
        ])
}

/// Per-pass cleaning settings.
fn clean_settings(builder: CapabilitiesBuilder) -> CapabilitiesBuilder {
    builder
        .event(EventType::CleanCount, [cmd(CommandKind::GetCleanCount)])
        .event(
            EventType::CleanPreference,
            [cmd(CommandKind::GetCleanPreference)],
        )
        .commands([CommandKind::SetCleanCount, CommandKind::SetCleanPreference])
}

fn true_detect(builder: CapabilitiesBuilder) -> CapabilitiesBuilder {
    builder
        .event(EventType::TrueDetect, [cmd(CommandKind::GetTrueDetect)])
        .commands([CommandKind::SetTrueDetect])
}

fn ota(builder: CapabilitiesBuilder) -> CapabilitiesBuilder {
    builder
        .event(EventType::Ota, [cmd(CommandKind::GetOta)])
        .commands([CommandKind::SetOta])
}

fn clean_log(builder: CapabilitiesBuilder) -> CapabilitiesBuilder {
    builder.event(EventType::CleanLog, [cmd(CommandKind::GetCleanLogs)])
}

/// Generic declaration assumed to work on any JSON model.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the declaration is malformed.
pub fn fallback(class: &str) -> Result<StaticDeviceInfo, ConfigError> {
    let builder = baseline(class).life_spans(&[
        LifeSpan::Brush,
        LifeSpan::Filter,
        LifeSpan::SideBrush,
    ]);
    let builder = clean_log(true_detect(clean_settings(advanced_settings(builder))));
    Ok(StaticDeviceInfo::new(DataType::Json, builder.build()?))
}

/// OZMO 950 family. No per-pass settings and no obstacle detection.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the declaration is malformed.
pub fn yna5xi(class: &str) -> Result<StaticDeviceInfo, ConfigError> {
    let builder = baseline(class).life_spans(&[
        LifeSpan::Brush,
        LifeSpan::Filter,
        LifeSpan::SideBrush,
    ]);
    let builder = ota(clean_log(advanced_settings(builder)));
    Ok(StaticDeviceInfo::new(DataType::Json, builder.build()?))
}

/// OZMO 920 family. Older firmware without advanced mode or carpet boost.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the declaration is malformed.
pub fn vi829v(class: &str) -> Result<StaticDeviceInfo, ConfigError> {
    let builder = baseline(class)
        .life_spans(&[LifeSpan::Brush, LifeSpan::Filter, LifeSpan::SideBrush])
        .event(
            EventType::ContinuousCleaning,
            [cmd(CommandKind::GetContinuousCleaning)],
        )
        .commands([CommandKind::SetContinuousCleaning]);
    Ok(StaticDeviceInfo::new(DataType::Json, clean_log(builder).build()?))
}

/// T9/T10 family. Adds efficiency mode, voice assistant and the
/// maintenance kit, and drops the clean log.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the declaration is malformed.
pub fn p95mgv(class: &str) -> Result<StaticDeviceInfo, ConfigError> {
    let builder = baseline(class)
        .life_spans(&[
            LifeSpan::Brush,
            LifeSpan::Filter,
            LifeSpan::SideBrush,
            LifeSpan::UnitCare,
        ])
        .event(EventType::EfficiencyMode, [cmd(CommandKind::GetEfficiencyMode)])
        .event(
            EventType::VoiceAssistantState,
            [cmd(CommandKind::GetVoiceAssistantState)],
        )
        .commands([
            CommandKind::SetEfficiencyMode,
            CommandKind::SetVoiceAssistantState,
        ]);
    let builder = ota(true_detect(clean_settings(advanced_settings(builder))));
    Ok(StaticDeviceInfo::new(DataType::Json, builder.build()?))
}

/// X1/T20 family with rotating mops. Adds sweep and work modes and the
/// versioned map set query.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the declaration is malformed.
pub fn p1jij8(class: &str) -> Result<StaticDeviceInfo, ConfigError> {
    let builder = baseline(class)
        .life_spans(&[
            LifeSpan::Brush,
            LifeSpan::Filter,
            LifeSpan::SideBrush,
            LifeSpan::UnitCare,
            LifeSpan::RoundMop,
        ])
        .event(EventType::EfficiencyMode, [cmd(CommandKind::GetEfficiencyMode)])
        .event(EventType::SweepMode, [cmd(CommandKind::GetSweepMode)])
        .event(EventType::WorkMode, [cmd(CommandKind::GetWorkMode)])
        .commands([
            CommandKind::GetMapSetV2,
            CommandKind::SetEfficiencyMode,
            CommandKind::SetSweepMode,
            CommandKind::SetWorkMode,
        ]);
    let builder = ota(true_detect(clean_settings(advanced_settings(builder))));
    Ok(StaticDeviceInfo::new(DataType::Json, builder.build()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::FALLBACK;

    #[test]
    fn families_do_not_overlap() {
        let mut classes: Vec<_> = FAMILIES.iter().flat_map(|f| f.classes.iter()).collect();
        let total = classes.len();
        classes.sort();
        classes.dedup();
        assert_eq!(classes.len(), total);
        assert_eq!(total, 15);
    }

    #[test]
    fn model_name_flows_into_errors() {
        let err = baseline("abc123")
            .event(EventType::Battery, [])
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::DuplicateEvent {
                model: "abc123".to_string(),
                event: "Battery",
            }
        );
    }

    #[test]
    fn older_models_lack_newer_features() {
        let info = vi829v("vi829v").unwrap();
        let caps = info.capabilities();
        assert!(!caps.supports_command(CommandKind::SetAdvancedMode));
        assert!(!caps.supports_event(EventType::TrueDetect));
        assert!(caps.supports_event(EventType::ContinuousCleaning));
    }

    #[test]
    fn mop_models_track_round_mops() {
        let info = p1jij8("p1jij8").unwrap();
        assert!(info.capabilities().life_spans().contains(&LifeSpan::RoundMop));
        assert!(info.capabilities().supports_command(CommandKind::SetWorkMode));
    }

    #[test]
    fn every_declaration_is_json() {
        assert_eq!(fallback(FALLBACK).unwrap().data_type(), DataType::Json);
        for family in FAMILIES {
            let info = (family.declare)(family.classes[0]).unwrap();
            assert_eq!(info.data_type(), DataType::Json);
        }
    }
}
