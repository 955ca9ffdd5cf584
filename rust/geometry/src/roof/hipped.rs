// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hipped roof over a quadrilateral

use super::utils::{add_base_and_wall_rings, add_ring_walls, lift, reversed_ring_face, GableEdges};
use crate::mesh::{FaceGroup, Mesh};
use crate::params::BuildingParams;
use smallvec::smallvec;

pub fn generate(params: &BuildingParams) -> Option<Mesh> {
    let points = params.footprint();
    let edges = GableEdges::select(points, params.roof_orientation)?;
    let (ridge1, ridge2) = edges.hipped_ridge(
        points,
        1.0,
        params.roof_orientation.is_across(),
        params.options.min_ridge_length,
    );

    let mut mesh = Mesh::with_capacity(10, 9);
    let (base, wall) =
        add_base_and_wall_rings(&mut mesh, points, params.min_height, params.wall_height);
    let r1 = mesh.add_vertex(lift(&ridge1, params.height));
    let r2 = mesh.add_vertex(lift(&ridge2, params.height));

    if params.has_walls() {
        add_ring_walls(&mut mesh, FaceGroup::Wall, base, wall, points.len());
    }
    add_hipped_faces(&mut mesh, &edges, wall, r1, r2);

    mesh.add_face(FaceGroup::Bottom, reversed_ring_face(base, points.len()));
    Some(mesh)
}

/// Two hip triangles and two eave quads from the ring at `ring` up to the
/// ridge `r1`-`r2`
pub(super) fn add_hipped_faces(mesh: &mut Mesh, edges: &GableEdges, ring: u32, r1: u32, r2: u32) {
    let [g1_0, g1_1] = edges.first.map(|i| ring + i as u32);
    let [g2_0, g2_1] = edges.second.map(|i| ring + i as u32);

    mesh.add_face(FaceGroup::Roof, smallvec![g1_1, r1, g1_0]);
    mesh.add_face(FaceGroup::Roof, smallvec![g2_1, r2, g2_0]);
    mesh.add_face(FaceGroup::Roof, smallvec![g1_1, g2_0, r2, r1]);
    mesh.add_face(FaceGroup::Roof, smallvec![g2_1, g1_0, r1, r2]);
}
