// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Roofs of revolution: pyramidal, dome, half-dome and onion
//!
//! A profile of `(radius, height)` samples, both normalized to `0..=1`, is
//! swept around a center. Radius 1 is the footprint itself, radius 0 the
//! center. Works on any footprint.

use super::utils::{
    add_base_and_wall_rings, add_ring_walls, centroid, lift, midpoint_of_longest_edge,
    reversed_ring_face,
};
use crate::mesh::{FaceGroup, Mesh};
use crate::params::BuildingParams;
use crate::Point2;
use smallvec::smallvec;
use std::f64::consts::FRAC_PI_2;

const PYRAMIDAL_PROFILE: [[f64; 2]; 2] = [[1.0, 0.0], [0.0, 1.0]];

const ONION_PROFILE: [[f64; 2]; 8] = [
    [1.0000, 0.0000],
    [1.2971, 0.0999],
    [1.2971, 0.2462],
    [1.1273, 0.3608],
    [0.6219, 0.4785],
    [0.2131, 0.5984],
    [0.1003, 0.7243],
    [0.0000, 1.0000],
];

/// Quarter circle sampled in `rows` segments
fn dome_profile(rows: usize) -> Vec<[f64; 2]> {
    let rows = rows.max(1);
    (0..=rows)
        .map(|j| {
            let angle = j as f64 / rows as f64 * FRAC_PI_2;
            [angle.cos(), angle.sin()]
        })
        .collect()
}

pub fn generate_pyramidal(params: &BuildingParams) -> Option<Mesh> {
    let center = centroid(params.footprint());
    build(params, &PYRAMIDAL_PROFILE, center)
}

pub fn generate_dome(params: &BuildingParams) -> Option<Mesh> {
    let center = centroid(params.footprint());
    build(params, &dome_profile(params.options.dome_rows), center)
}

/// Dome centered on the middle of the longest edge
pub fn generate_half_dome(params: &BuildingParams) -> Option<Mesh> {
    let center = midpoint_of_longest_edge(params.footprint())?;
    build(params, &dome_profile(params.options.dome_rows), center)
}

pub fn generate_onion(params: &BuildingParams) -> Option<Mesh> {
    let center = centroid(params.footprint());
    build(params, &ONION_PROFILE, center)
}

fn build(params: &BuildingParams, profile: &[[f64; 2]], center: Point2<f64>) -> Option<Mesh> {
    let points = params.footprint();
    let n = points.len();
    if n < 3 || profile.len() < 2 {
        return None;
    }
    let rows = profile.len() - 1;

    let mut mesh = Mesh::with_capacity(n * (rows + 1) + 1, n * (rows + 1));
    let (base, wall) =
        add_base_and_wall_rings(&mut mesh, points, params.min_height, params.wall_height);
    if params.has_walls() {
        add_ring_walls(&mut mesh, FaceGroup::Wall, base, wall, n);
    }

    // Intermediate rings follow the wall-top ring directly
    let roof_height = params.roof_height();
    for &[radius, h] in &profile[1..rows] {
        let z = params.wall_height + roof_height * h;
        for p in points {
            let q = p + (center - p) * (1.0 - radius);
            mesh.add_vertex(lift(&q, z));
        }
    }
    let apex = mesh.add_vertex(lift(&center, params.height));

    let n = n as u32;
    let ring_start = |j: usize| wall + j as u32 * n;

    for j in 0..rows - 1 {
        let lower = ring_start(j);
        let upper = lower + n;
        for i in 0..n {
            let next = (i + 1) % n;
            mesh.add_face(
                FaceGroup::Roof,
                smallvec![lower + i, lower + next, upper + next, upper + i],
            );
        }
    }

    let last = ring_start(rows - 1);
    for i in 0..n {
        let next = (i + 1) % n;
        mesh.add_face(FaceGroup::Roof, smallvec![last + i, last + next, apex]);
    }

    mesh.add_face(FaceGroup::Bottom, reversed_ring_face(base, n as usize));
    Some(mesh)
}
