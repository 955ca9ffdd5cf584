// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vector helpers not provided by nalgebra

use nalgebra::{Point2, SVector, Vector2};

/// Normalize a vector, returning the zero vector for zero-length input
#[inline]
pub fn normalize_or_zero<const D: usize>(v: &SVector<f64, D>) -> SVector<f64, D> {
    v.try_normalize(0.0).unwrap_or_else(SVector::zeros)
}

/// 2D cross product (z component of the 3D cross product)
#[inline]
pub fn perp_dot(a: &Vector2<f64>, b: &Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Signed area of a polygon (positive for counter-clockwise winding)
pub fn signed_area(points: &[Point2<f64>]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    let mut sum = 0.0;
    for i in 0..n {
        let p1 = &points[i];
        let p2 = &points[(i + 1) % n];
        sum += p1.x * p2.y - p2.x * p1.y;
    }
    sum * 0.5
}
