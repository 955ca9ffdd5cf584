// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Roofs extruded from a cross-section profile: round, gambrel, saltbox
//!
//! The footprint `A B C D` starts at its longest side `A→B` (the next side
//! for "across" roofs). The profile, `(t, h)` pairs running from `(0, 0)`
//! to `(1, 0)`, is laid across the short sides `A→D` and `B→C` and the two
//! copies are joined by one roof quad per profile segment.

use super::utils::{lift, longest_edge};
use crate::mesh::{Face, FaceGroup, Mesh};
use crate::params::BuildingParams;
use smallvec::smallvec;
use std::f64::consts::PI;

const ROUND_SEGMENTS: usize = 8;

const GAMBREL_PROFILE: [[f64; 2]; 5] = [
    [0.0, 0.0],
    [0.25, 0.75],
    [0.5, 1.0],
    [0.75, 0.75],
    [1.0, 0.0],
];

const SALTBOX_PROFILE: [[f64; 2]; 4] = [[0.0, 0.0], [1.0 / 3.0, 1.0], [2.0 / 3.0, 1.0], [1.0, 0.0]];

/// Half circle over the unit span
fn round_profile(segments: usize) -> Vec<[f64; 2]> {
    (0..=segments)
        .map(|k| {
            let angle = k as f64 / segments as f64 * PI;
            [(1.0 - angle.cos()) / 2.0, angle.sin()]
        })
        .collect()
}

pub fn generate_round(params: &BuildingParams) -> Option<Mesh> {
    build(params, &round_profile(ROUND_SEGMENTS))
}

pub fn generate_gambrel(params: &BuildingParams) -> Option<Mesh> {
    build(params, &GAMBREL_PROFILE)
}

pub fn generate_saltbox(params: &BuildingParams) -> Option<Mesh> {
    build(params, &SALTBOX_PROFILE)
}

fn build(params: &BuildingParams, profile: &[[f64; 2]]) -> Option<Mesh> {
    let points = params.footprint();
    if points.len() != 4 || profile.len() < 3 {
        return None;
    }

    let mut start = longest_edge(points)?;
    if params.roof_orientation.is_across() {
        start = (start + 1) % 4;
    }
    let [a, b, c, d] = std::array::from_fn(|i| points[(start + i) % 4]);
    let (ad, bc) = (d - a, c - b);

    let p = profile.len() as u32;
    let mut mesh = Mesh::with_capacity(2 * profile.len() + 4, profile.len() + 6);
    let roof_height = params.roof_height();
    for &[t, h] in profile {
        mesh.add_vertex(lift(&(a + ad * t), params.wall_height + h * roof_height));
    }
    for &[t, h] in profile {
        mesh.add_vertex(lift(&(b + bc * t), params.wall_height + h * roof_height));
    }

    let (f1_start, f1_end) = (0, p - 1);
    let (f2_start, f2_end) = (p, 2 * p - 1);

    let [ag, bg, cg, dg] = if params.has_walls() {
        [a, b, c, d].map(|q| mesh.add_vertex(lift(&q, params.min_height)))
    } else {
        // Eave corners double as ground corners
        [f1_start, f2_start, f2_end, f1_end]
    };

    mesh.add_face(FaceGroup::Wall, (f1_start..=f1_end).collect());
    mesh.add_face(FaceGroup::Wall, (f2_start..=f2_end).rev().collect());

    for i in 0..p - 1 {
        mesh.add_face(
            FaceGroup::Roof,
            smallvec![f1_start + i, f2_start + i, f2_start + i + 1, f1_start + i + 1],
        );
    }

    if params.has_walls() {
        let walls: [Face; 4] = [
            smallvec![bg, f2_start, f1_start, ag],
            smallvec![cg, f2_end, f2_start, bg],
            smallvec![dg, f1_end, f2_end, cg],
            smallvec![ag, f1_start, f1_end, dg],
        ];
        for wall in walls {
            mesh.add_face(FaceGroup::Wall, wall);
        }
    }

    mesh.add_face(FaceGroup::Bottom, smallvec![ag, dg, cg, bg]);
    Some(mesh)
}
