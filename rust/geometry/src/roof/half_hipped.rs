// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Half-hipped roof over a quadrilateral
//!
//! A gabled roof whose gable tips are clipped by small hips. Each gable
//! edge gets two quarter points at half the roof height; the gable wall
//! continues up to them as a trapezoid and a hip triangle closes the tip.

use super::utils::{add_base_and_wall_rings, add_ring_walls, lift, reversed_ring_face, GableEdges};
use crate::mesh::{FaceGroup, Mesh};
use crate::params::BuildingParams;
use crate::Point2;
use smallvec::smallvec;

/// Points a quarter of the way in from each end of an edge
fn quarter_points(p0: &Point2<f64>, p1: &Point2<f64>) -> (Point2<f64>, Point2<f64>) {
    let mid = nalgebra::center(p0, p1);
    (nalgebra::center(p0, &mid), nalgebra::center(p1, &mid))
}

pub fn generate(params: &BuildingParams) -> Option<Mesh> {
    let points = params.footprint();
    let edges = GableEdges::select(points, params.roof_orientation)?;
    let (ridge1, ridge2) = edges.hipped_ridge(
        points,
        0.5,
        params.roof_orientation.is_across(),
        params.options.min_ridge_length,
    );
    let (q1a, q1b) = quarter_points(&points[edges.first[0]], &points[edges.first[1]]);
    let (q2a, q2b) = quarter_points(&points[edges.second[0]], &points[edges.second[1]]);

    let mut mesh = Mesh::with_capacity(14, 11);
    let (base, w) =
        add_base_and_wall_rings(&mut mesh, points, params.min_height, params.wall_height);
    let r1 = mesh.add_vertex(lift(&ridge1, params.height));
    let r2 = mesh.add_vertex(lift(&ridge2, params.height));

    let z_mid = params.wall_height + params.roof_height() / 2.0;
    let m1a = mesh.add_vertex(lift(&q1a, z_mid));
    let m1b = mesh.add_vertex(lift(&q1b, z_mid));
    let m2a = mesh.add_vertex(lift(&q2a, z_mid));
    let m2b = mesh.add_vertex(lift(&q2b, z_mid));

    if params.has_walls() {
        add_ring_walls(&mut mesh, FaceGroup::Wall, base, w, points.len());
    }

    let [g1_0, g1_1] = edges.first.map(|i| w + i as u32);
    let [g2_0, g2_1] = edges.second.map(|i| w + i as u32);

    // Gable wall above the wall top, present even without walls
    mesh.add_face(FaceGroup::Wall, smallvec![m1b, m1a, g1_0, g1_1]);
    mesh.add_face(FaceGroup::Wall, smallvec![m2b, m2a, g2_0, g2_1]);

    mesh.add_face(FaceGroup::Roof, smallvec![m1b, r1, m1a]);
    mesh.add_face(FaceGroup::Roof, smallvec![m2b, r2, m2a]);
    mesh.add_face(FaceGroup::Roof, smallvec![g1_1, g2_0, m2a, r2, r1, m1b]);
    mesh.add_face(FaceGroup::Roof, smallvec![g2_1, g1_0, m1a, r1, r2, m2b]);

    mesh.add_face(FaceGroup::Bottom, reversed_ring_face(base, points.len()));
    Some(mesh)
}
