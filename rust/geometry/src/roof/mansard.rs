// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mansard roof over a quadrilateral
//!
//! A steep lower slope runs from the wall top to an inset copy of the
//! footprint at half the roof height; a hipped roof over the inset ring
//! covers the rest.

use super::hipped::add_hipped_faces;
use super::utils::{
    add_base_and_wall_rings, add_ring, add_ring_walls, centroid, lift, reversed_ring_face,
    GableEdges,
};
use crate::mesh::{FaceGroup, Mesh};
use crate::params::BuildingParams;
use crate::Point2;
use roofmesh_core::normalize_or_zero;

/// Move every vertex towards the centroid by `inset`
///
/// The offset is limited to half the shortest centroid distance so the
/// inset ring never folds over.
fn inset_polygon(points: &[Point2<f64>], inset: f64) -> Vec<Point2<f64>> {
    let center = centroid(points);
    let nearest = points
        .iter()
        .map(|p| nalgebra::distance(p, &center))
        .fold(f64::INFINITY, f64::min);
    let inset = inset.min(nearest / 2.0);

    points
        .iter()
        .map(|p| p - normalize_or_zero(&(p - center)) * inset)
        .collect()
}

pub fn generate(params: &BuildingParams) -> Option<Mesh> {
    let points = params.footprint();
    if points.len() != 4 {
        return None;
    }

    let inset = inset_polygon(points, params.options.mansard_inset);
    // Ridge selection runs on the inset ring; "across" gets no extra clamp
    let edges = GableEdges::select(&inset, params.roof_orientation)?;
    let (ridge1, ridge2) =
        edges.hipped_ridge(&inset, 1.0, false, params.options.min_ridge_length);

    let mut mesh = Mesh::with_capacity(14, 13);
    let (base, wall) =
        add_base_and_wall_rings(&mut mesh, points, params.min_height, params.wall_height);
    let upper = add_ring(
        &mut mesh,
        &inset,
        params.wall_height + params.roof_height() / 2.0,
    );
    let r1 = mesh.add_vertex(lift(&ridge1, params.height));
    let r2 = mesh.add_vertex(lift(&ridge2, params.height));

    add_ring_walls(&mut mesh, FaceGroup::Roof, wall, upper, points.len());
    add_hipped_faces(&mut mesh, &edges, upper, r1, r2);

    if params.has_walls() {
        add_ring_walls(&mut mesh, FaceGroup::Wall, base, wall, points.len());
    }
    mesh.add_face(FaceGroup::Bottom, reversed_ring_face(base, points.len()));
    Some(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::MeshOptions;
    use approx::assert_relative_eq;
    use roofmesh_core::Contour;

    fn rect(w: f64, d: f64) -> Vec<Point2<f64>> {
        vec![
            Point2::new(-w / 2.0, -d / 2.0),
            Point2::new(w / 2.0, -d / 2.0),
            Point2::new(w / 2.0, d / 2.0),
            Point2::new(-w / 2.0, d / 2.0),
        ]
    }

    #[test]
    fn test_inset_moves_towards_center() {
        let square = rect(10.0, 10.0);
        let inset = inset_polygon(&square, 2f64.sqrt());
        assert_relative_eq!(inset[0], Point2::new(-4.0, -4.0), epsilon = 1e-12);
        assert_relative_eq!(inset[2], Point2::new(4.0, 4.0), epsilon = 1e-12);
    }

    #[test]
    fn test_inset_is_limited_on_small_footprints() {
        let tiny = rect(2.0, 2.0);
        let inset = inset_polygon(&tiny, 5.0);
        // Half the corner distance
        assert_relative_eq!(inset[0], Point2::new(-0.5, -0.5), epsilon = 1e-12);
    }

    #[test]
    fn test_mansard_topology() {
        let params = BuildingParams::new(Contour::new(rect(25.0, 10.0)), 1.0, 5.0, 10.0);
        let mesh = generate(&params).unwrap();

        assert_eq!(mesh.vertex_count(), 14);
        assert_eq!(mesh.wall_faces.len(), 4);
        // 4 lower slopes + 4 hipped faces
        assert_eq!(mesh.roof_faces.len(), 8);
        assert!(mesh.is_watertight());
        for v in &mesh.verts[8..12] {
            assert_relative_eq!(v.z, 7.5);
        }
    }

    #[test]
    fn test_configured_inset() {
        let options = MeshOptions {
            mansard_inset: 1.0,
            ..MeshOptions::default()
        };
        let square = rect(20.0, 20.0);
        let params = BuildingParams::new(Contour::new(square), 0.0, 4.0, 8.0).with_options(options);
        let mesh = generate(&params).unwrap();

        let corner = mesh.verts[8];
        let expected = 10.0 - 1.0 / 2f64.sqrt();
        assert_relative_eq!(corner.x, -expected, epsilon = 1e-9);
        assert_relative_eq!(corner.y, -expected, epsilon = 1e-9);
    }

    #[test]
    fn test_non_quadrilateral_is_not_applicable() {
        let triangle = vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(0.0, 4.0),
        ];
        let params = BuildingParams::new(Contour::new(triangle), 0.0, 3.0, 5.0);
        assert!(generate(&params).is_none());
    }
}
