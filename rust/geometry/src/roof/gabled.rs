// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Gabled roof over a quadrilateral
//!
//! The ridge joins the midpoints of the two gable edges. Gable walls are
//! pentagons reaching up to the ridge, or plain triangles when the walls
//! have no height.

use super::utils::{add_base_and_wall_rings, lift, reversed_ring_face, GableEdges};
use crate::mesh::{FaceGroup, Mesh};
use crate::params::BuildingParams;
use smallvec::smallvec;

pub fn generate(params: &BuildingParams) -> Option<Mesh> {
    let points = params.footprint();
    let edges = GableEdges::select(points, params.roof_orientation)?;
    let (mid1, mid2) = edges.midpoints(points);

    let mut mesh = Mesh::with_capacity(10, 7);
    let (b, w) = add_base_and_wall_rings(&mut mesh, points, params.min_height, params.wall_height);
    let r1 = mesh.add_vertex(lift(&mid1, params.height));
    let r2 = mesh.add_vertex(lift(&mid2, params.height));

    let [g1_0, g1_1] = edges.first.map(|i| i as u32);
    let [g2_0, g2_1] = edges.second.map(|i| i as u32);
    let [[e1_0, e1_1], [e2_0, e2_1]] = edges.eaves().map(|e| e.map(|i| i as u32));

    if params.has_walls() {
        mesh.add_face(FaceGroup::Wall, smallvec![b + e1_0, b + e1_1, w + e1_1, w + e1_0]);
        mesh.add_face(FaceGroup::Wall, smallvec![b + e2_0, b + e2_1, w + e2_1, w + e2_0]);
        mesh.add_face(FaceGroup::Wall, smallvec![b + g1_0, b + g1_1, w + g1_1, r1, w + g1_0]);
        mesh.add_face(FaceGroup::Wall, smallvec![b + g2_0, b + g2_1, w + g2_1, r2, w + g2_0]);
    } else {
        mesh.add_face(FaceGroup::Wall, smallvec![w + g1_0, w + g1_1, r1]);
        mesh.add_face(FaceGroup::Wall, smallvec![w + g2_0, w + g2_1, r2]);
    }

    mesh.add_face(FaceGroup::Roof, smallvec![w + e1_0, w + e1_1, r2, r1]);
    mesh.add_face(FaceGroup::Roof, smallvec![w + e2_0, w + e2_1, r1, r2]);

    mesh.add_face(FaceGroup::Bottom, reversed_ring_face(b, points.len()));
    Some(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Point2, Point3};
    use approx::assert_relative_eq;
    use roofmesh_core::{Contour, RoofOrientation};

    fn rect(w: f64, d: f64) -> Contour {
        Contour::new(vec![
            Point2::new(-w / 2.0, -d / 2.0),
            Point2::new(w / 2.0, -d / 2.0),
            Point2::new(w / 2.0, d / 2.0),
            Point2::new(-w / 2.0, d / 2.0),
        ])
    }

    #[test]
    fn test_ridge_along_long_side() {
        let params = BuildingParams::new(rect(25.0, 10.0), 1.0, 5.0, 10.0);
        let mesh = generate(&params).unwrap();

        assert_eq!(mesh.vertex_count(), 10);
        assert_eq!(mesh.wall_faces.len(), 4);
        assert_eq!(mesh.roof_faces.len(), 2);
        assert!(mesh.is_watertight());
        assert_relative_eq!(mesh.verts[8], Point3::new(12.5, 0.0, 10.0));
        assert_relative_eq!(mesh.verts[9], Point3::new(-12.5, 0.0, 10.0));
    }

    #[test]
    fn test_gable_walls_are_pentagons() {
        let params = BuildingParams::new(rect(25.0, 10.0), 1.0, 5.0, 10.0);
        let mesh = generate(&params).unwrap();
        let pentagons = mesh.wall_faces.iter().filter(|f| f.len() == 5).count();
        assert_eq!(pentagons, 2);
    }

    #[test]
    fn test_no_walls_gives_triangular_gables() {
        let params = BuildingParams::new(rect(25.0, 10.0), 2.0, 2.0, 11.0);
        let mesh = generate(&params).unwrap();

        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.wall_faces.len(), 2);
        assert!(mesh.wall_faces.iter().all(|f| f.len() == 3));
        assert!(mesh.is_watertight());
    }

    #[test]
    fn test_across_orientation() {
        let params = BuildingParams::new(rect(10.0, 20.0), 0.0, 6.0, 10.0)
            .with_orientation(RoofOrientation::Across);
        let mesh = generate(&params).unwrap();

        // Ridge spans the short direction
        let r1 = mesh.verts[8];
        let r2 = mesh.verts[9];
        assert_relative_eq!(r1.y, 0.0);
        assert_relative_eq!(r2.y, 0.0);
        assert_relative_eq!((r1.x - r2.x).abs(), 10.0);
        assert!(mesh.is_watertight());
    }

    #[test]
    fn test_non_quadrilateral_is_not_applicable() {
        let triangle = Contour::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(0.0, 4.0),
        ]);
        let params = BuildingParams::new(triangle, 0.0, 3.0, 5.0);
        assert!(generate(&params).is_none());
    }
}
