// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Skillion (single slope) roof over any contour, holes included
//!
//! The roof is a plane rising from `wall_height` along the slope vector to
//! `height`. Vertices whose roof height equals `min_height` reuse the base
//! vertex, so walls there degenerate to triangles or vanish.

use super::caps::{add_cap, CapRing};
use super::flat::{usable_rings, Winding};
use super::utils::{add_ring, lift, longest_edge, reversed_ring_face};
use crate::mesh::{Face, FaceGroup, Mesh};
use crate::params::BuildingParams;
use crate::triangulation::{EarcutTriangulator, PolygonTriangulator};
use crate::{Point2, Vector2};
use roofmesh_core::normalize_or_zero;
use smallvec::smallvec;

/// Heights closer than this to `min_height` share the base vertex
const REUSE_EPSILON: f64 = 1e-6;

/// Projection ranges below this give a level roof
const MIN_PROJECTION_RANGE: f64 = 1e-9;

/// Roof plane: `z = wall_height + (p · slope - min_projection) * tan`
#[derive(Debug, Clone, Copy)]
struct SlopePlane {
    slope: Vector2<f64>,
    min_projection: f64,
    tan: f64,
    base_height: f64,
}

impl SlopePlane {
    fn height_at(&self, p: &Point2<f64>) -> f64 {
        self.base_height + (p.coords.dot(&self.slope) - self.min_projection) * self.tan
    }
}

/// Unit vector pointing uphill
///
/// An azimuth (0 = north, clockwise) maps to `(-sin, -cos)`. Without one
/// the roof rises perpendicular to the longest edge of the first ring.
fn slope_vector(direction: Option<f64>, ring: &[Point2<f64>]) -> Vector2<f64> {
    let v = match direction {
        Some(degrees) => {
            let (sin, cos) = degrees.to_radians().sin_cos();
            Vector2::new(-sin, -cos)
        }
        None => match longest_edge(ring) {
            Some(i) => {
                let d = ring[(i + 1) % ring.len()] - ring[i];
                Vector2::new(-d.y, d.x)
            }
            None => Vector2::zeros(),
        },
    };
    normalize_or_zero(&v)
}

pub fn generate(params: &BuildingParams) -> Option<Mesh> {
    generate_with(params, &EarcutTriangulator)
}

/// Skillion mesh using a specific cap triangulator
pub fn generate_with(
    params: &BuildingParams,
    triangulator: &dyn PolygonTriangulator,
) -> Option<Mesh> {
    let outer_rings = usable_rings(&params.contour.outer_rings, Winding::CounterClockwise);
    if outer_rings.is_empty() {
        return None;
    }
    let inner_rings = usable_rings(&params.contour.inner_rings, Winding::Clockwise);
    let outer: Vec<&[Point2<f64>]> = outer_rings.iter().map(|r| &r[..]).collect();
    let inner: Vec<&[Point2<f64>]> = inner_rings.iter().map(|r| &r[..]).collect();
    let rings: Vec<&[Point2<f64>]> = outer.iter().chain(&inner).copied().collect();

    let slope = slope_vector(params.roof_direction, rings[0]);
    let (min_projection, max_projection) = rings
        .iter()
        .flat_map(|ring| ring.iter())
        .map(|p| p.coords.dot(&slope))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), d| (lo.min(d), hi.max(d)));
    let range = max_projection - min_projection;
    let plane = SlopePlane {
        slope,
        min_projection,
        tan: if range > MIN_PROJECTION_RANGE {
            params.roof_height() / range
        } else {
            0.0
        },
        base_height: params.wall_height,
    };

    let total: usize = rings.iter().map(|r| r.len()).sum();
    let mut mesh = Mesh::with_capacity(total * 2, total + 2);

    let mut bases = Vec::with_capacity(rings.len());
    let mut tops: Vec<Vec<u32>> = Vec::with_capacity(rings.len());
    for ring in &rings {
        let base = add_ring(&mut mesh, ring, params.min_height);
        let top = ring
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let z = plane.height_at(p);
                if (z - params.min_height).abs() < REUSE_EPSILON {
                    base + i as u32
                } else {
                    mesh.add_vertex(lift(p, z))
                }
            })
            .collect();
        bases.push(base);
        tops.push(top);
    }

    for (&base, top) in bases.iter().zip(&tops) {
        add_sloped_walls(&mut mesh, base, top);
    }

    if rings.len() == 1 {
        mesh.add_face(FaceGroup::Roof, Face::from_slice(&tops[0]));
        mesh.add_face(FaceGroup::Bottom, reversed_ring_face(bases[0], rings[0].len()));
        return Some(mesh);
    }

    let (outer_tops, inner_tops) = tops.split_at(outer.len());
    let (outer_bases, inner_bases) = bases.split_at(outer.len());
    add_cap(
        &mut mesh,
        triangulator,
        &top_rings(&outer, outer_tops),
        &top_rings(&inner, inner_tops),
        FaceGroup::Roof,
        &|p| plane.height_at(p),
    );
    add_cap(
        &mut mesh,
        triangulator,
        &bottom_rings(&outer, outer_bases),
        &bottom_rings(&inner, inner_bases),
        FaceGroup::Bottom,
        &|_| params.min_height,
    );

    Some(mesh)
}

fn top_rings<'a>(rings: &[&'a [Point2<f64>]], tops: &[Vec<u32>]) -> Vec<CapRing<'a>> {
    rings
        .iter()
        .zip(tops)
        .map(|(points, indices)| CapRing {
            points,
            indices: indices.clone(),
        })
        .collect()
}

fn bottom_rings<'a>(rings: &[&'a [Point2<f64>]], bases: &[u32]) -> Vec<CapRing<'a>> {
    rings
        .iter()
        .zip(bases)
        .map(|(points, &base)| CapRing::consecutive(points, base))
        .collect()
}

/// Walls between a base ring and its (partly shared) roof vertices
fn add_sloped_walls(mesh: &mut Mesh, base: u32, top: &[u32]) {
    let n = top.len() as u32;
    for i in 0..n {
        let next = (i + 1) % n;
        let (b1, b2) = (base + i, base + next);
        let (r1, r2) = (top[i as usize], top[next as usize]);
        let face: Face = match (b1 == r1, b2 == r2) {
            (true, true) => continue,
            (false, false) => smallvec![b1, b2, r2, r1],
            (true, false) => smallvec![b2, r2, b1],
            (false, true) => smallvec![b1, b2, r1],
        };
        mesh.add_face(FaceGroup::Wall, face);
    }
}
