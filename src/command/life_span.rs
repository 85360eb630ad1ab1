// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Consumable categories tracked by the life span commands.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A consumable whose remaining life the robot reports.
///
/// Older models track fewer categories, so the life span refresh command is
/// built with a per-model list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LifeSpan {
    /// Main brush.
    #[serde(rename = "brush")]
    Brush,
    /// Dust bin filter.
    #[serde(rename = "heap")]
    Filter,
    /// Side brush.
    #[serde(rename = "sideBrush")]
    SideBrush,
    /// Maintenance kit.
    #[serde(rename = "unitCare")]
    UnitCare,
    /// Rotating mop pads.
    #[serde(rename = "roundMop")]
    RoundMop,
    /// Air freshener module.
    #[serde(rename = "dModule")]
    AirFreshener,
    /// UV sanitizer module.
    #[serde(rename = "uv")]
    UvSanitizer,
}

impl LifeSpan {
    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Brush => "brush",
            Self::Filter => "heap",
            Self::SideBrush => "sideBrush",
            Self::UnitCare => "unitCare",
            Self::RoundMop => "roundMop",
            Self::AirFreshener => "dModule",
            Self::UvSanitizer => "uv",
        }
    }

    /// Parses a wire value.
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "brush" => Some(Self::Brush),
            "heap" => Some(Self::Filter),
            "sideBrush" => Some(Self::SideBrush),
            "unitCare" => Some(Self::UnitCare),
            "roundMop" => Some(Self::RoundMop),
            "dModule" => Some(Self::AirFreshener),
            "uv" => Some(Self::UvSanitizer),
            _ => None,
        }
    }
}

impl fmt::Display for LifeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
