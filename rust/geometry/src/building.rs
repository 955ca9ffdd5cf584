// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building element: raw footprint and tag values turned into mesher
//! parameters, with the mesh composed eagerly.

use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::options::MeshOptions;
use crate::params::BuildingParams;
use crate::roof;
use roofmesh_core::{parse_direction, Contour, RoofOrientation, RoofShape};

/// Raw per-element input as delivered by the footprint and tag source
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ElementInput {
    pub contour: Contour,
    /// Top of the roof
    pub height: f64,
    /// Bottom of the element
    pub min_height: f64,
    /// `0.0` when untagged
    pub roof_height: f64,
    pub wall_colour: String,
    pub roof_colour: String,
    pub roof_shape: String,
    /// Degrees or a compass abbreviation; empty when untagged
    pub roof_direction: String,
    /// `"along"`, `"across"` or empty
    pub roof_orientation: String,
}

/// A renderable building element and its mesh
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingElement {
    params: BuildingParams,
    wall_colour: String,
    roof_colour: String,
    mesh: Mesh,
}

impl BuildingElement {
    /// Normalize the input and compose the mesh
    ///
    /// Fails only for a contour without an outer ring. A shape that does
    /// not fit the footprint silently becomes a flat roof.
    pub fn new(input: ElementInput, options: &MeshOptions) -> Result<Self> {
        if input.contour.outer().is_empty() {
            return Err(Error::InvalidContour(
                "building element needs an outer ring".to_string(),
            ));
        }

        let tag = match input.roof_shape.trim() {
            "" => RoofShape::Flat.as_str(),
            tag => tag,
        };

        // An explicit zero is indistinguishable from a missing roof height
        let mut roof_height = input.roof_height;
        if !tag.eq_ignore_ascii_case(RoofShape::Flat.as_str()) && roof_height == 0.0 {
            roof_height = options.default_roof_height;
        }
        roof_height = roof_height.min(input.height - input.min_height).max(0.0);

        let roof_shape = roof::resolve(tag, input.contour.is_complex(), roof_height);
        let mut params = BuildingParams::new(
            input.contour,
            input.min_height,
            input.height - roof_height,
            input.height,
        )
        .with_shape(roof_shape)
        .with_direction(parse_direction(&input.roof_direction))
        .with_orientation(RoofOrientation::from_tag(&input.roof_orientation))
        .with_options(*options);
        // Keep the wall top exactly on min_height when the roof spans the element
        if params.wall_height < params.min_height {
            params.wall_height = params.min_height;
        }

        let mesh = roof::generate(&params);
        tracing::trace!(
            shape = %params.roof_shape,
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            "Composed building mesh"
        );

        Ok(Self {
            params,
            wall_colour: input.wall_colour,
            roof_colour: input.roof_colour,
            mesh,
        })
    }

    /// Recompute the mesh from scratch
    pub fn rebuild(&mut self) {
        self.mesh = roof::generate(&self.params);
    }

    #[inline]
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn into_mesh(self) -> Mesh {
        self.mesh
    }

    #[inline]
    pub fn params(&self) -> &BuildingParams {
        &self.params
    }

    #[inline]
    pub fn roof_shape(&self) -> RoofShape {
        self.params.roof_shape
    }

    #[inline]
    pub fn roof_height(&self) -> f64 {
        self.params.roof_height()
    }

    #[inline]
    pub fn wall_colour(&self) -> &str {
        &self.wall_colour
    }

    #[inline]
    pub fn roof_colour(&self) -> &str {
        &self.roof_colour
    }
}
