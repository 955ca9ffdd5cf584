// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Triangulated roof and bottom caps for multi-ring footprints

use crate::mesh::{Face, FaceGroup, Mesh};
use crate::triangulation::PolygonTriangulator;
use crate::{Point2, Point3};
use roofmesh_core::{perp_dot, point_in_ring};
use smallvec::smallvec;

/// A footprint ring together with the mesh vertices it maps to at the cap
/// level
pub struct CapRing<'a> {
    pub points: &'a [Point2<f64>],
    pub indices: Vec<u32>,
}

impl<'a> CapRing<'a> {
    /// Ring whose cap vertices are consecutive, starting at `start`
    pub fn consecutive(points: &'a [Point2<f64>], start: u32) -> Self {
        Self {
            points,
            indices: (start..start + points.len() as u32).collect(),
        }
    }
}

/// Triangulate a cap over outer rings and holes and add it to `group`
///
/// Each hole is assigned to the outer ring containing its first vertex and
/// triangulated with it; a hole inside no outer ring is filled as its own
/// region. Roof caps are wound counter-clockwise in plan (facing up), bottom
/// caps clockwise. Points synthesized by the triangulator become new
/// vertices at `z_at` of their position. A failed triangulation skips that
/// region with a warning.
pub fn add_cap(
    mesh: &mut Mesh,
    triangulator: &dyn PolygonTriangulator,
    outer: &[CapRing<'_>],
    inner: &[CapRing<'_>],
    group: FaceGroup,
    z_at: &dyn Fn(&Point2<f64>) -> f64,
) {
    let owners: Vec<Option<usize>> = inner
        .iter()
        .map(|hole| {
            let first = hole.points.first()?;
            outer.iter().position(|ring| point_in_ring(ring.points, first))
        })
        .collect();

    for (o, ring) in outer.iter().enumerate() {
        let holes: Vec<&CapRing<'_>> = inner
            .iter()
            .zip(&owners)
            .filter(|(_, owner)| **owner == Some(o))
            .map(|(hole, _)| hole)
            .collect();
        add_region(mesh, triangulator, ring, &holes, group, z_at);
    }

    for (hole, _) in inner.iter().zip(&owners).filter(|(_, owner)| owner.is_none()) {
        tracing::warn!(
            vertices = hole.points.len(),
            "Inner ring outside every outer ring, filling it as its own region"
        );
        add_region(mesh, triangulator, hole, &[], group, z_at);
    }
}

fn add_region(
    mesh: &mut Mesh,
    triangulator: &dyn PolygonTriangulator,
    outer: &CapRing<'_>,
    holes: &[&CapRing<'_>],
    group: FaceGroup,
    z_at: &dyn Fn(&Point2<f64>) -> f64,
) {
    let hole_points: Vec<&[Point2<f64>]> = holes.iter().map(|h| h.points).collect();
    let triangulation = match triangulator.triangulate(outer.points, &hole_points) {
        Ok(t) => t,
        Err(e) => {
            tracing::warn!(
                error = %e,
                vertices = outer.points.len(),
                holes = holes.len(),
                "Cap triangulation failed, skipping cap"
            );
            return;
        }
    };

    let mut points: Vec<Point2<f64>> = outer.points.to_vec();
    let mut indices: Vec<u32> = outer.indices.clone();
    for hole in holes {
        points.extend_from_slice(hole.points);
        indices.extend_from_slice(&hole.indices);
    }

    for p in &triangulation.synthesized {
        indices.push(mesh.add_vertex(Point3::new(p.x, p.y, z_at(p))));
        points.push(*p);
    }

    let upward = group != FaceGroup::Bottom;
    for tri in triangulation.indices.chunks_exact(3) {
        let (Some(&a), Some(&b), Some(&c)) =
            (indices.get(tri[0]), indices.get(tri[1]), indices.get(tri[2]))
        else {
            tracing::warn!(?tri, "Triangle index out of range, skipping");
            continue;
        };
        let (p0, p1, p2) = (points[tri[0]], points[tri[1]], points[tri[2]]);
        let area = perp_dot(&(p1 - p0), &(p2 - p0));
        let face: Face = if (area >= 0.0) == upward {
            smallvec![a, b, c]
        } else {
            smallvec![a, c, b]
        };
        mesh.add_face(group, face);
    }
}
