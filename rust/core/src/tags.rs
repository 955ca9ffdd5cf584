// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Roof tag values
//!
//! Free-form tag strings are mapped to closed enums here so that the mesh
//! kernel never sees an unrecognized value.

use std::fmt;

/// Roof shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RoofShape {
    #[default]
    Flat,
    Pyramidal,
    Dome,
    HalfDome,
    Onion,
    Skillion,
    Gabled,
    Hipped,
    Mansard,
    Round,
    Gambrel,
    Saltbox,
    HalfHipped,
    CrossGabled,
}

impl RoofShape {
    /// Every roof shape, in declaration order
    pub const ALL: [RoofShape; 14] = [
        RoofShape::Flat,
        RoofShape::Pyramidal,
        RoofShape::Dome,
        RoofShape::HalfDome,
        RoofShape::Onion,
        RoofShape::Skillion,
        RoofShape::Gabled,
        RoofShape::Hipped,
        RoofShape::Mansard,
        RoofShape::Round,
        RoofShape::Gambrel,
        RoofShape::Saltbox,
        RoofShape::HalfHipped,
        RoofShape::CrossGabled,
    ];

    /// Tag value as written in map data
    pub fn as_str(&self) -> &'static str {
        match self {
            RoofShape::Flat => "flat",
            RoofShape::Pyramidal => "pyramidal",
            RoofShape::Dome => "dome",
            RoofShape::HalfDome => "half-dome",
            RoofShape::Onion => "onion",
            RoofShape::Skillion => "skillion",
            RoofShape::Gabled => "gabled",
            RoofShape::Hipped => "hipped",
            RoofShape::Mansard => "mansard",
            RoofShape::Round => "round",
            RoofShape::Gambrel => "gambrel",
            RoofShape::Saltbox => "saltbox",
            RoofShape::HalfHipped => "half-hipped",
            RoofShape::CrossGabled => "cross_gabled",
        }
    }

    /// Case-insensitive tag lookup; unknown values map to `Flat`
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|shape| shape.as_str().eq_ignore_ascii_case(tag))
            .unwrap_or(RoofShape::Flat)
    }

    /// Shapes that only mesh 4-vertex footprints
    pub fn requires_quadrilateral(&self) -> bool {
        matches!(
            self,
            RoofShape::Gabled
                | RoofShape::Hipped
                | RoofShape::HalfHipped
                | RoofShape::Mansard
                | RoofShape::CrossGabled
                | RoofShape::Round
                | RoofShape::Gambrel
                | RoofShape::Saltbox
        )
    }
}

impl fmt::Display for RoofShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which pair of opposite edges carries the ridge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RoofOrientation {
    /// No tag; same geometry as `Along`
    #[default]
    Unset,
    Along,
    Across,
}

impl RoofOrientation {
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim();
        if tag.eq_ignore_ascii_case("along") {
            RoofOrientation::Along
        } else if tag.eq_ignore_ascii_case("across") {
            RoofOrientation::Across
        } else {
            RoofOrientation::Unset
        }
    }

    #[inline]
    pub fn is_across(&self) -> bool {
        *self == RoofOrientation::Across
    }
}

/// Compass abbreviations, clockwise from north in 22.5° steps
const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Parse a roof direction into degrees
///
/// Accepts a decimal azimuth or one of the 16 compass abbreviations.
/// Returns `None` for empty, unrecognized or non-finite values.
pub fn parse_direction(value: &str) -> Option<f64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(degrees) = fast_float::parse::<f64, _>(value) {
        return degrees.is_finite().then_some(degrees);
    }

    COMPASS_POINTS
        .iter()
        .position(|point| point.eq_ignore_ascii_case(value))
        .map(|i| i as f64 * 22.5)
}
