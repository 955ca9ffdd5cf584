// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Roof shape resolution and dispatch to shape meshers
//!
//! Every mesher is a free function `fn(&BuildingParams) -> Option<Mesh>`.
//! `None` means the shape does not apply to the footprint (for example a
//! gabled roof over a pentagon); [`generate`] then falls back to the flat
//! mesher, which accepts any footprint.

pub mod caps;
pub mod conic;
pub mod cross_gabled;
pub mod flat;
pub mod gabled;
pub mod half_hipped;
pub mod hipped;
pub mod linear_profile;
pub mod mansard;
pub mod skillion;
pub mod utils;

use crate::mesh::Mesh;
use crate::params::BuildingParams;
use roofmesh_core::RoofShape;

/// Shape mesher signature
pub type Mesher = fn(&BuildingParams) -> Option<Mesh>;

/// Effective roof shape for a raw shape tag
///
/// A complex contour (holes or several outer rings) only supports flat and
/// skillion roofs, and a roof without height is flat. Unknown tags are
/// flat.
pub fn resolve(tag: &str, is_complex: bool, roof_height: f64) -> RoofShape {
    let requested = RoofShape::from_tag(tag);
    let shape = if is_complex && requested != RoofShape::Skillion {
        RoofShape::Flat
    } else if roof_height == 0.0 {
        RoofShape::Flat
    } else {
        requested
    };
    tracing::trace!(tag, is_complex, roof_height, shape = %shape, "Resolved roof shape");
    shape
}

/// Mesher for a roof shape
pub fn mesher_for(shape: RoofShape) -> Mesher {
    match shape {
        RoofShape::Flat => flat::generate,
        RoofShape::Pyramidal => conic::generate_pyramidal,
        RoofShape::Dome => conic::generate_dome,
        RoofShape::HalfDome => conic::generate_half_dome,
        RoofShape::Onion => conic::generate_onion,
        RoofShape::Skillion => skillion::generate,
        RoofShape::Gabled => gabled::generate,
        RoofShape::Hipped => hipped::generate,
        RoofShape::HalfHipped => half_hipped::generate,
        RoofShape::Mansard => mansard::generate,
        RoofShape::CrossGabled => cross_gabled::generate,
        RoofShape::Round => linear_profile::generate_round,
        RoofShape::Gambrel => linear_profile::generate_gambrel,
        RoofShape::Saltbox => linear_profile::generate_saltbox,
    }
}

/// Build the mesh for `params.roof_shape`, falling back to a flat roof
pub fn generate(params: &BuildingParams) -> Mesh {
    if let Some(mesh) = mesher_for(params.roof_shape)(params) {
        return mesh;
    }

    tracing::debug!(
        shape = %params.roof_shape,
        vertices = params.footprint().len(),
        quadrilateral_only = params.roof_shape.requires_quadrilateral(),
        "Roof shape not applicable to footprint, using flat roof"
    );
    flat::build(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point2;
    use roofmesh_core::Contour;

    fn pentagon() -> Contour {
        Contour::new(
            (0..5)
                .map(|i| {
                    let a = i as f64 * std::f64::consts::TAU / 5.0;
                    Point2::new(10.0 * a.cos(), 10.0 * a.sin())
                })
                .collect(),
        )
    }

    #[test]
    fn test_resolve_known_tags() {
        assert_eq!(resolve("gabled", false, 3.0), RoofShape::Gabled);
        assert_eq!(resolve("Hipped", false, 3.0), RoofShape::Hipped);
        assert_eq!(resolve("unknown", false, 3.0), RoofShape::Flat);
    }

    #[test]
    fn test_resolve_complex_contour() {
        assert_eq!(resolve("gabled", true, 3.0), RoofShape::Flat);
        assert_eq!(resolve("skillion", true, 3.0), RoofShape::Skillion);
    }

    #[test]
    fn test_resolve_zero_roof_height() {
        assert_eq!(resolve("gabled", false, 0.0), RoofShape::Flat);
        assert_eq!(resolve("skillion", true, 0.0), RoofShape::Flat);
    }

    #[test]
    fn test_every_shape_has_a_mesher() {
        let params = BuildingParams::new(pentagon(), 0.0, 5.0, 8.0);
        for shape in RoofShape::ALL {
            let params = params.clone().with_shape(shape);
            let mesh = generate(&params);
            assert!(!mesh.is_empty(), "{shape} produced an empty mesh");
            assert!(mesh.is_watertight(), "{shape} is not watertight");
        }
    }

    #[test]
    fn test_quadrilateral_shapes_fall_back_to_flat() {
        let params = BuildingParams::new(pentagon(), 0.0, 5.0, 8.0).with_shape(RoofShape::Gabled);
        assert!(gabled::generate(&params).is_none());

        let mesh = generate(&params);
        let flat = flat::build(&params);
        assert_eq!(mesh, flat);
    }

    #[test]
    fn test_only_quadrilateral_shapes_reject_pentagon() {
        let params = BuildingParams::new(pentagon(), 0.0, 5.0, 8.0);
        for shape in RoofShape::ALL {
            let meshed = mesher_for(shape)(&params.clone().with_shape(shape)).is_some();
            assert_eq!(meshed, !shape.requires_quadrilateral(), "{shape}");
        }
    }
}
