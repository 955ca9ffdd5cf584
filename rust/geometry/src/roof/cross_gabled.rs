// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cross-gabled roof over a quadrilateral
//!
//! Two ridges cross over the middle of the footprint, so every side ends in
//! a gable. The corners keep their contour order; no edge selection takes
//! place.

use super::utils::{add_base_and_wall_rings, lift, reversed_ring_face};
use crate::mesh::{FaceGroup, Mesh};
use crate::params::BuildingParams;
use smallvec::smallvec;

pub fn generate(params: &BuildingParams) -> Option<Mesh> {
    let points = params.footprint();
    if points.len() != 4 {
        return None;
    }

    let mut mesh = Mesh::with_capacity(13, 13);
    let (base, w) =
        add_base_and_wall_rings(&mut mesh, points, params.min_height, params.wall_height);

    // Gable tops, one per edge: ab, bc, cd, da
    let gable_mids: [_; 4] =
        std::array::from_fn(|i| nalgebra::center(&points[i], &points[(i + 1) % 4]));
    let tops = gable_mids.map(|m| mesh.add_vertex(lift(&m, params.height)));
    let peak = nalgebra::center(&gable_mids[0], &gable_mids[2]);
    let o = mesh.add_vertex(lift(&peak, params.height));

    for i in 0..4u32 {
        let next = (i + 1) % 4;
        let top = tops[i as usize];
        if params.has_walls() {
            mesh.add_face(
                FaceGroup::Wall,
                smallvec![base + i, base + next, w + next, top, w + i],
            );
        } else {
            mesh.add_face(FaceGroup::Wall, smallvec![w + next, top, w + i]);
        }
    }

    // Each corner spans the two gable tops next to it
    for i in 0..4u32 {
        let before = tops[((i + 3) % 4) as usize];
        let after = tops[i as usize];
        mesh.add_face(FaceGroup::Roof, smallvec![w + i, o, before]);
        mesh.add_face(FaceGroup::Roof, smallvec![w + i, after, o]);
    }

    mesh.add_face(FaceGroup::Bottom, reversed_ring_face(base, 4));
    Some(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Point2, Point3};
    use approx::assert_relative_eq;
    use roofmesh_core::Contour;

    fn rect(w: f64, d: f64) -> Contour {
        Contour::new(vec![
            Point2::new(-w / 2.0, -d / 2.0),
            Point2::new(w / 2.0, -d / 2.0),
            Point2::new(w / 2.0, d / 2.0),
            Point2::new(-w / 2.0, d / 2.0),
        ])
    }

    #[test]
    fn test_cross_gabled_topology() {
        let params = BuildingParams::new(rect(25.0, 10.0), 1.0, 5.0, 10.0);
        let mesh = generate(&params).unwrap();

        assert_eq!(mesh.vertex_count(), 13);
        assert_eq!(mesh.wall_faces.len(), 4);
        assert!(mesh.wall_faces.iter().all(|f| f.len() == 5));
        assert_eq!(mesh.roof_faces.len(), 8);
        assert!(mesh.is_watertight());
        assert_relative_eq!(mesh.verts[12], Point3::new(0.0, 0.0, 10.0));
    }

    #[test]
    fn test_no_walls_gives_triangular_gables() {
        let params = BuildingParams::new(rect(25.0, 10.0), 2.0, 2.0, 11.0);
        let mesh = generate(&params).unwrap();

        assert_eq!(mesh.vertex_count(), 9);
        assert!(mesh.wall_faces.iter().all(|f| f.len() == 3));
        assert!(mesh.is_watertight());
    }

    #[test]
    fn test_gables_face_outward() {
        let params = BuildingParams::new(rect(25.0, 10.0), 2.0, 2.0, 11.0);
        let mesh = generate(&params).unwrap();
        let centroid = mesh.centroid();
        for (_, face) in mesh.all_faces() {
            let n = mesh.face_normal(face);
            assert!(n.dot(&(mesh.face_center(face) - centroid)) > 0.0);
        }
    }
}
