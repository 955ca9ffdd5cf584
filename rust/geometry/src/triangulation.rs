// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polygon triangulation utilities
//!
//! The [`PolygonTriangulator`] capability decomposes an outer ring plus holes
//! into triangles. [`EarcutTriangulator`] wraps earcutr.

use crate::{Error, Point2, Result};

/// Triangles over an outer ring and its holes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Triangulation {
    /// Triangle corner indices, three per triangle
    ///
    /// Index `i < n` (with `n` the total number of input points, outer ring
    /// first, then each hole in order) refers to an input point. Index
    /// `n + k` refers to `synthesized[k]`.
    pub indices: Vec<usize>,
    /// Points the triangulator had to create, e.g. at self-intersections
    pub synthesized: Vec<Point2<f64>>,
}

impl Triangulation {
    /// Number of triangles
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Decomposes a polygon with holes into triangles
///
/// Implementations must not keep state between calls.
pub trait PolygonTriangulator {
    fn triangulate(
        &self,
        outer: &[Point2<f64>],
        holes: &[&[Point2<f64>]],
    ) -> Result<Triangulation>;
}

/// Ear-clipping triangulator backed by earcutr
///
/// Never synthesizes points.
#[derive(Debug, Clone, Copy, Default)]
pub struct EarcutTriangulator;

impl PolygonTriangulator for EarcutTriangulator {
    fn triangulate(
        &self,
        outer: &[Point2<f64>],
        holes: &[&[Point2<f64>]],
    ) -> Result<Triangulation> {
        Ok(Triangulation {
            indices: triangulate_polygon_with_holes(outer, holes)?,
            synthesized: Vec::new(),
        })
    }
}

/// Fans every hole-free polygon around one added point at its vertex
/// average
#[cfg(test)]
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct CenterFanTriangulator;

#[cfg(test)]
impl PolygonTriangulator for CenterFanTriangulator {
    fn triangulate(
        &self,
        outer: &[Point2<f64>],
        holes: &[&[Point2<f64>]],
    ) -> Result<Triangulation> {
        let n = outer.len();
        if n < 3 || !holes.is_empty() {
            return EarcutTriangulator.triangulate(outer, holes);
        }
        let sum = outer
            .iter()
            .fold(crate::Vector2::zeros(), |acc, p| acc + p.coords);
        Ok(Triangulation {
            indices: (0..n).flat_map(|i| [i, (i + 1) % n, n]).collect(),
            synthesized: vec![Point2::from(sum / n as f64)],
        })
    }
}

/// Check if a polygon is convex (all cross products have same sign)
#[inline]
fn is_convex(points: &[Point2<f64>]) -> bool {
    if points.len() < 3 {
        return false;
    }

    let n = points.len();
    let mut sign = 0i8;

    for i in 0..n {
        let p0 = &points[i];
        let p1 = &points[(i + 1) % n];
        let p2 = &points[(i + 2) % n];

        // Cross product of edges
        let cross = (p1.x - p0.x) * (p2.y - p1.y) - (p1.y - p0.y) * (p2.x - p1.x);

        if cross.abs() > 1e-10 {
            let current_sign = if cross > 0.0 { 1i8 } else { -1i8 };
            if sign == 0 {
                sign = current_sign;
            } else if sign != current_sign {
                return false; // Sign changed - not convex
            }
        }
    }

    sign != 0
}

/// Simple fan triangulation for convex polygons
#[inline]
fn fan_triangulate(n: usize) -> Vec<usize> {
    let mut indices = Vec::with_capacity((n - 2) * 3);
    for i in 1..n - 1 {
        indices.push(0);
        indices.push(i);
        indices.push(i + 1);
    }
    indices
}

/// Triangulate a simple polygon (no holes)
/// Returns triangle indices into the input points
#[inline]
pub fn triangulate_polygon(points: &[Point2<f64>]) -> Result<Vec<usize>> {
    let n = points.len();

    if n < 3 {
        return Err(Error::TriangulationError(
            "Need at least 3 points to triangulate".to_string(),
        ));
    }

    // FAST PATH: Triangle - no triangulation needed
    if n == 3 {
        return Ok(vec![0, 1, 2]);
    }

    // FAST PATH: Convex polygon - use fan triangulation
    if n <= 8 && is_convex(points) {
        return Ok(fan_triangulate(n));
    }

    // Flatten points for earcutr
    let mut vertices = Vec::with_capacity(n * 2);
    for p in points {
        vertices.push(p.x);
        vertices.push(p.y);
    }

    let indices = earcutr::earcut(&vertices, &[], 2)
        .map_err(|e| Error::TriangulationError(format!("{:?}", e)))?;

    Ok(indices)
}

/// Triangulate a polygon with holes
///
/// Returns triangle indices into the combined input (outer + all holes, in
/// order). Holes with fewer than 3 points are left out of the triangulation
/// but keep their index range.
pub fn triangulate_polygon_with_holes(
    outer: &[Point2<f64>],
    holes: &[&[Point2<f64>]],
) -> Result<Vec<usize>> {
    if outer.len() < 3 {
        return Err(Error::TriangulationError(
            "Need at least 3 points in outer boundary".to_string(),
        ));
    }

    // FAST PATH: No usable holes
    if holes.iter().all(|h| h.len() < 3) {
        return triangulate_polygon(outer);
    }

    // Map from earcut input index to combined input index
    let total_points = outer.len() + holes.iter().map(|h| h.len()).sum::<usize>();
    let mut vertices = Vec::with_capacity(total_points * 2);
    let mut input_index = Vec::with_capacity(total_points);

    for (i, p) in outer.iter().enumerate() {
        vertices.push(p.x);
        vertices.push(p.y);
        input_index.push(i);
    }

    let mut hole_indices = Vec::with_capacity(holes.len());
    let mut offset = outer.len();
    for hole in holes {
        if hole.len() >= 3 {
            hole_indices.push(vertices.len() / 2);
            for (i, p) in hole.iter().enumerate() {
                vertices.push(p.x);
                vertices.push(p.y);
                input_index.push(offset + i);
            }
        }
        offset += hole.len();
    }

    let indices = earcutr::earcut(&vertices, &hole_indices, 2)
        .map_err(|e| Error::TriangulationError(format!("{:?}", e)))?;

    Ok(indices.into_iter().map(|i| input_index[i]).collect())
}
