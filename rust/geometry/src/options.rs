// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh generation options, optionally loaded from environment variables.

use std::str::FromStr;

/// Tunable constants of the roof meshers.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MeshOptions {
    /// Roof height used when a non-flat shape has no usable roof height.
    pub default_roof_height: f64,
    /// Horizontal offset of the mansard break line from the wall top.
    pub mansard_inset: f64,
    /// Number of profile segments for dome and half-dome roofs.
    pub dome_rows: usize,
    /// Shortest ridge of hipped-style roofs.
    pub min_ridge_length: f64,
}

impl Default for MeshOptions {
    fn default() -> Self {
        Self {
            default_roof_height: 3.0,
            mansard_inset: 2.0,
            dome_rows: 7,
            min_ridge_length: 0.1,
        }
    }
}

impl MeshOptions {
    /// Load options from `ROOFMESH_*` environment variables.
    ///
    /// Missing or invalid values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load options through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            default_roof_height: parse_or(
                lookup("ROOFMESH_DEFAULT_ROOF_HEIGHT"),
                defaults.default_roof_height,
                |v: &f64| v.is_finite() && *v >= 0.0,
            ),
            mansard_inset: parse_or(
                lookup("ROOFMESH_MANSARD_INSET"),
                defaults.mansard_inset,
                |v: &f64| v.is_finite() && *v >= 0.0,
            ),
            dome_rows: parse_or(lookup("ROOFMESH_DOME_ROWS"), defaults.dome_rows, |v: &usize| {
                *v >= 1
            }),
            min_ridge_length: parse_or(
                lookup("ROOFMESH_MIN_RIDGE_LENGTH"),
                defaults.min_ridge_length,
                |v: &f64| v.is_finite() && *v > 0.0,
            ),
        }
    }
}

fn parse_or<T, P>(value: Option<String>, default: T, valid: P) -> T
where
    T: FromStr,
    P: Fn(&T) -> bool,
{
    value
        .and_then(|v| v.trim().parse().ok())
        .filter(|v| valid(v))
        .unwrap_or(default)
}
