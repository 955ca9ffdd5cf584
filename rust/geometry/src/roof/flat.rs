// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Flat roof: a prism over every ring of the contour
//!
//! Each ring gets up to three vertex levels: `min_height`, `wall_height` and
//! `height`. Coinciding levels share vertices. Walls span the lower two
//! levels, a fascia strip (counted as roof) spans the upper two.

use super::caps::{add_cap, CapRing};
use super::utils::{add_ring, add_ring_walls, reversed_ring_face, ring_face};
use crate::mesh::{FaceGroup, Mesh};
use crate::params::BuildingParams;
use crate::triangulation::{EarcutTriangulator, PolygonTriangulator};
use crate::Point2;
use roofmesh_core::signed_area;
use std::borrow::Cow;

/// Vertex levels of one ring
#[derive(Debug, Clone, Copy)]
struct RingLevels {
    base: u32,
    wall: u32,
    top: u32,
}

pub fn generate(params: &BuildingParams) -> Option<Mesh> {
    Some(build(params))
}

/// Flat roof mesh; never fails
pub fn build(params: &BuildingParams) -> Mesh {
    build_with(params, &EarcutTriangulator)
}

/// Flat roof mesh using a specific cap triangulator
pub fn build_with(params: &BuildingParams, triangulator: &dyn PolygonTriangulator) -> Mesh {
    let outer_rings = usable_rings(&params.contour.outer_rings, Winding::CounterClockwise);
    let inner_rings = usable_rings(&params.contour.inner_rings, Winding::Clockwise);
    let outer: Vec<&[Point2<f64>]> = outer_rings.iter().map(|r| &r[..]).collect();
    let inner: Vec<&[Point2<f64>]> = inner_rings.iter().map(|r| &r[..]).collect();

    let (min_height, wall_height, height) = (params.min_height, params.wall_height, params.height);
    let total_points: usize = outer.iter().chain(&inner).map(|r| r.len()).sum();
    let mut mesh = Mesh::with_capacity(total_points * 3, total_points * 2);

    let levels: Vec<RingLevels> = outer
        .iter()
        .chain(&inner)
        .map(|ring| {
            let base = add_ring(&mut mesh, ring, min_height);
            let wall = if wall_height > min_height {
                add_ring(&mut mesh, ring, wall_height)
            } else {
                base
            };
            let top = if height > wall_height {
                add_ring(&mut mesh, ring, height)
            } else {
                wall
            };
            RingLevels { base, wall, top }
        })
        .collect();

    let rings: Vec<&[Point2<f64>]> = outer.iter().chain(&inner).copied().collect();

    for (ring, level) in rings.iter().zip(&levels) {
        if wall_height > min_height {
            add_ring_walls(&mut mesh, FaceGroup::Wall, level.base, level.wall, ring.len());
        }
        if height > wall_height {
            add_ring_walls(&mut mesh, FaceGroup::Roof, level.wall, level.top, ring.len());
        }
    }

    if rings.len() == 1 {
        let n = rings[0].len();
        mesh.add_face(FaceGroup::Roof, ring_face(levels[0].top, n));
        mesh.add_face(FaceGroup::Bottom, reversed_ring_face(levels[0].base, n));
        return mesh;
    }

    let (outer_levels, inner_levels) = levels.split_at(outer.len());

    add_cap(
        &mut mesh,
        triangulator,
        &cap_rings(&outer, outer_levels, |l| l.top),
        &cap_rings(&inner, inner_levels, |l| l.top),
        FaceGroup::Roof,
        &|_| height,
    );
    add_cap(
        &mut mesh,
        triangulator,
        &cap_rings(&outer, outer_levels, |l| l.base),
        &cap_rings(&inner, inner_levels, |l| l.base),
        FaceGroup::Bottom,
        &|_| min_height,
    );

    mesh
}

fn cap_rings<'a>(
    rings: &[&'a [Point2<f64>]],
    levels: &[RingLevels],
    level: fn(&RingLevels) -> u32,
) -> Vec<CapRing<'a>> {
    rings
        .iter()
        .zip(levels)
        .map(|(ring, l)| CapRing::consecutive(ring, level(l)))
        .collect()
}

/// Plan-view winding of a ring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Winding {
    CounterClockwise,
    Clockwise,
}

/// Rings with at least three points, rewound to `winding`
///
/// Side walls are emitted with the solid on the left of each ring edge,
/// which takes outer rings counter-clockwise and holes clockwise.
pub(crate) fn usable_rings(
    rings: &[Vec<Point2<f64>>],
    winding: Winding,
) -> Vec<Cow<'_, [Point2<f64>]>> {
    rings
        .iter()
        .filter(|ring| {
            let usable = ring.len() >= 3;
            if !usable {
                tracing::debug!(vertices = ring.len(), "Skipping degenerate ring");
            }
            usable
        })
        .map(|ring| {
            let area = signed_area(ring);
            let reversed = match winding {
                Winding::CounterClockwise => area < 0.0,
                Winding::Clockwise => area > 0.0,
            };
            if reversed {
                Cow::Owned(ring.iter().rev().copied().collect())
            } else {
                Cow::Borrowed(ring.as_slice())
            }
        })
        .collect()
}
