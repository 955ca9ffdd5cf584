// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesher input record

use crate::options::MeshOptions;
use crate::Point2;
use roofmesh_core::{Contour, RoofOrientation, RoofShape};

/// Everything a roof mesher needs to build one element
///
/// Heights satisfy `min_height <= wall_height <= height`; the roof occupies
/// `wall_height..height`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildingParams {
    pub contour: Contour,
    pub min_height: f64,
    pub wall_height: f64,
    pub height: f64,
    pub roof_shape: RoofShape,
    /// Azimuth in degrees the roof faces (0 = north), if tagged
    pub roof_direction: Option<f64>,
    pub roof_orientation: RoofOrientation,
    pub options: MeshOptions,
}

impl BuildingParams {
    /// Flat-roofed parameters with default options
    pub fn new(contour: Contour, min_height: f64, wall_height: f64, height: f64) -> Self {
        Self {
            contour,
            min_height,
            wall_height,
            height,
            roof_shape: RoofShape::Flat,
            roof_direction: None,
            roof_orientation: RoofOrientation::Unset,
            options: MeshOptions::default(),
        }
    }

    pub fn with_shape(mut self, shape: RoofShape) -> Self {
        self.roof_shape = shape;
        self
    }

    pub fn with_direction(mut self, direction: Option<f64>) -> Self {
        self.roof_direction = direction;
        self
    }

    pub fn with_orientation(mut self, orientation: RoofOrientation) -> Self {
        self.roof_orientation = orientation;
        self
    }

    pub fn with_options(mut self, options: MeshOptions) -> Self {
        self.options = options;
        self
    }

    #[inline]
    pub fn roof_height(&self) -> f64 {
        self.height - self.wall_height
    }

    /// Walls have a vertical extent
    #[inline]
    pub fn has_walls(&self) -> bool {
        self.wall_height > self.min_height
    }

    /// First outer ring of the contour
    #[inline]
    pub fn footprint(&self) -> &[Point2<f64>] {
        self.contour.outer()
    }
}
