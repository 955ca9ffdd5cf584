// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared footprint measurements and mesh-building helpers for the roof
//! meshers.

use crate::mesh::{Face, FaceGroup, Mesh};
use crate::{Point2, Point3};
use roofmesh_core::{perp_dot, RoofOrientation};

/// Area centroid of a polygon
///
/// Falls back to the vertex average for (nearly) zero-area input.
pub fn centroid(points: &[Point2<f64>]) -> Point2<f64> {
    let n = points.len();
    if n == 0 {
        return Point2::origin();
    }

    let mut signed_area = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let p1 = &points[i];
        let p2 = &points[(i + 1) % n];
        let cross = perp_dot(&p1.coords, &p2.coords);
        signed_area += cross;
        cx += (p1.x + p2.x) * cross;
        cy += (p1.y + p2.y) * cross;
    }
    signed_area *= 0.5;

    if signed_area.abs() < 1e-9 {
        let sum = points.iter().fold(Point2::origin().coords, |acc, p| acc + p.coords);
        return Point2::from(sum / n as f64);
    }

    Point2::new(cx / (6.0 * signed_area), cy / (6.0 * signed_area))
}

/// Squared length of edge `i` (from vertex `i` to the next one)
#[inline]
fn edge_length_sq(points: &[Point2<f64>], i: usize) -> f64 {
    let n = points.len();
    (points[(i + 1) % n] - points[i]).norm_squared()
}

/// Index of the longest edge; the first one wins on ties
pub fn longest_edge(points: &[Point2<f64>]) -> Option<usize> {
    if points.len() < 2 {
        return None;
    }
    let mut best = 0;
    let mut best_len = -1.0;
    for i in 0..points.len() {
        let len = edge_length_sq(points, i);
        if len > best_len {
            best_len = len;
            best = i;
        }
    }
    Some(best)
}

/// Midpoint of the longest edge
pub fn midpoint_of_longest_edge(points: &[Point2<f64>]) -> Option<Point2<f64>> {
    let i = longest_edge(points)?;
    Some(nalgebra::center(&points[i], &points[(i + 1) % points.len()]))
}

/// Opposite-edge pair of a quadrilateral with the larger summed squared
/// length
pub fn longest_opposite_edges(points: &[Point2<f64>]) -> Option<[usize; 2]> {
    if points.len() != 4 {
        return None;
    }
    let l: [f64; 4] = std::array::from_fn(|i| edge_length_sq(points, i));
    if l[0] + l[2] > l[1] + l[3] {
        Some([0, 2])
    } else {
        Some([1, 3])
    }
}

/// Two short edges of a quadrilateral that do not share a vertex
///
/// The two shortest edges are used when they are opposite. Otherwise the
/// opposite pair with the smaller summed squared length is chosen.
pub fn shortest_opposite_edges(points: &[Point2<f64>]) -> Option<[usize; 2]> {
    if points.len() != 4 {
        return None;
    }
    let l: [f64; 4] = std::array::from_fn(|i| edge_length_sq(points, i));

    let mut shortest1 = 0;
    let mut shortest2 = 0;
    let mut min1 = f64::MAX;
    let mut min2 = f64::MAX;
    for (i, &len) in l.iter().enumerate() {
        if len < min1 {
            min2 = min1;
            shortest2 = shortest1;
            min1 = len;
            shortest1 = i;
        } else if len < min2 {
            min2 = len;
            shortest2 = i;
        }
    }

    let gap = shortest1.abs_diff(shortest2);
    if gap == 1 || gap == 3 {
        if l[0] + l[2] < l[1] + l[3] {
            Some([0, 2])
        } else {
            Some([1, 3])
        }
    } else {
        Some([shortest1, shortest2])
    }
}

/// The two gable (or hip) ends of a quadrilateral footprint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GableEdges {
    /// Start and end vertex of the first gable edge
    pub first: [usize; 2],
    /// Start and end vertex of the second gable edge
    pub second: [usize; 2],
}

impl GableEdges {
    /// Select the gable edges of a quadrilateral for an orientation
    ///
    /// `Across` puts the gables on the long sides, anything else on the
    /// short sides.
    pub fn select(points: &[Point2<f64>], orientation: RoofOrientation) -> Option<Self> {
        let [a, b] = if orientation.is_across() {
            longest_opposite_edges(points)?
        } else {
            shortest_opposite_edges(points)?
        };
        Some(Self {
            first: [a, (a + 1) % 4],
            second: [b, (b + 1) % 4],
        })
    }

    /// Eave edges connecting the gables: (first end → second start) and
    /// (second end → first start)
    #[inline]
    pub fn eaves(&self) -> [[usize; 2]; 2] {
        [
            [self.first[1], self.second[0]],
            [self.second[1], self.first[0]],
        ]
    }

    /// Midpoints of the two gable edges
    pub fn midpoints(&self, points: &[Point2<f64>]) -> (Point2<f64>, Point2<f64>) {
        (
            nalgebra::center(&points[self.first[0]], &points[self.first[1]]),
            nalgebra::center(&points[self.second[0]], &points[self.second[1]]),
        )
    }

    /// Ridge of a hipped-style roof: the gable midpoint span shortened
    /// around its center
    ///
    /// The ridge length is `eave − gable · gable_factor`, at least
    /// `min_length`; with `across_clamp` it is at least a third of the eave.
    pub fn hipped_ridge(
        &self,
        points: &[Point2<f64>],
        gable_factor: f64,
        across_clamp: bool,
        min_length: f64,
    ) -> (Point2<f64>, Point2<f64>) {
        let (mid1, mid2) = self.midpoints(points);
        let eave = nalgebra::distance(&points[self.first[0]], &points[self.second[1]]);
        let gable = nalgebra::distance(&points[self.first[0]], &points[self.first[1]]);
        if eave <= 0.0 {
            return (mid1, mid2);
        }

        let mut ridge_length = (eave - gable * gable_factor).max(min_length);
        if across_clamp {
            ridge_length = ridge_length.max(eave / 3.0);
        }
        shorten_segment(&mid1, &mid2, ridge_length / eave)
    }
}

/// Scale a segment by `k` about its midpoint
pub fn shorten_segment(
    p1: &Point2<f64>,
    p2: &Point2<f64>,
    k: f64,
) -> (Point2<f64>, Point2<f64>) {
    let c = nalgebra::center(p1, p2);
    (c + (p1 - c) * k, c + (p2 - c) * k)
}

/// Raise a planar point to height `z`
#[inline]
pub fn lift(p: &Point2<f64>, z: f64) -> Point3<f64> {
    Point3::new(p.x, p.y, z)
}

/// Append a ring at height `z` and return the index of its first vertex
pub fn add_ring(mesh: &mut Mesh, points: &[Point2<f64>], z: f64) -> u32 {
    let start = mesh.verts.len() as u32;
    mesh.verts.extend(points.iter().map(|p| lift(p, z)));
    start
}

/// Base ring at `min_height` plus wall-top ring at `wall_height`
///
/// The wall-top ring reuses the base ring when the walls have no height.
pub fn add_base_and_wall_rings(
    mesh: &mut Mesh,
    points: &[Point2<f64>],
    min_height: f64,
    wall_height: f64,
) -> (u32, u32) {
    let base = add_ring(mesh, points, min_height);
    let wall = if wall_height > min_height {
        add_ring(mesh, points, wall_height)
    } else {
        base
    };
    (base, wall)
}

/// One quad per ring edge between a lower and an upper ring
pub fn add_ring_walls(mesh: &mut Mesh, group: FaceGroup, lower: u32, upper: u32, n: usize) {
    let n = n as u32;
    for i in 0..n {
        let next = (i + 1) % n;
        mesh.add_face(
            group,
            Face::from_slice(&[lower + i, lower + next, upper + next, upper + i]),
        );
    }
}

/// Ring face over `n` consecutive vertices
pub fn ring_face(start: u32, n: usize) -> Face {
    (start..start + n as u32).collect()
}

/// Ring face over `n` consecutive vertices in reverse order (downward)
pub fn reversed_ring_face(start: u32, n: usize) -> Face {
    (start..start + n as u32).rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rect(w: f64, d: f64) -> Vec<Point2<f64>> {
        vec![
            Point2::new(-w / 2.0, -d / 2.0),
            Point2::new(w / 2.0, -d / 2.0),
            Point2::new(w / 2.0, d / 2.0),
            Point2::new(-w / 2.0, d / 2.0),
        ]
    }

    #[test]
    fn test_centroid_of_rectangle() {
        let c = centroid(&rect(25.0, 10.0));
        assert_relative_eq!(c, Point2::new(0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_centroid_is_area_weighted() {
        // L-shape: 2x2 square plus a 2x1 bar to the right
        let l = vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(4.0, 1.0),
            Point2::new(2.0, 1.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
        ];
        let c = centroid(&l);
        // (4*(1,1) + 2*(3,0.5)) / 6
        assert_relative_eq!(c, Point2::new(10.0 / 6.0, 5.0 / 6.0), epsilon = 1e-12);
    }

    #[test]
    fn test_centroid_degenerate_falls_back_to_average() {
        let line = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(2.0, 0.0)];
        assert_relative_eq!(centroid(&line), Point2::new(1.0, 0.0));
    }

    #[test]
    fn test_longest_edge_first_wins() {
        let square = rect(2.0, 2.0);
        assert_eq!(longest_edge(&square), Some(0));
        assert_eq!(longest_edge(&rect(2.0, 5.0)), Some(1));
        assert_eq!(longest_edge(&square[..1]), None);
    }

    #[test]
    fn test_midpoint_of_longest_edge() {
        let m = midpoint_of_longest_edge(&rect(25.0, 10.0)).unwrap();
        assert_relative_eq!(m, Point2::new(0.0, -5.0));
    }

    #[test]
    fn test_opposite_edges() {
        let wide = rect(25.0, 10.0);
        assert_eq!(longest_opposite_edges(&wide), Some([0, 2]));
        assert_eq!(shortest_opposite_edges(&wide), Some([1, 3]));

        let tall = rect(10.0, 20.0);
        assert_eq!(longest_opposite_edges(&tall), Some([1, 3]));
        assert_eq!(shortest_opposite_edges(&tall), Some([0, 2]));

        assert_eq!(longest_opposite_edges(&tall[..3]), None);
        assert_eq!(shortest_opposite_edges(&tall[..3]), None);
    }

    #[test]
    fn test_shortest_edges_adjacent_tie_break() {
        // Edges 0 and 1 are the two shortest and adjacent
        let quad = vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 3.0),
            Point2::new(-6.0, 9.0),
        ];
        // l0=4, l1=9, l2=100, l3=117: pair (1,3) sums to 126 > 104
        assert_eq!(shortest_opposite_edges(&quad), Some([0, 2]));
    }

    #[test]
    fn test_gable_edges_orientation() {
        let tall = rect(10.0, 20.0);
        let along = GableEdges::select(&tall, RoofOrientation::Unset).unwrap();
        assert_eq!(along.first, [0, 1]);
        assert_eq!(along.second, [2, 3]);
        assert_eq!(along.eaves(), [[1, 2], [3, 0]]);

        let across = GableEdges::select(&tall, RoofOrientation::Across).unwrap();
        assert_eq!(across.first, [1, 2]);
        assert_eq!(across.second, [3, 0]);
    }

    #[test]
    fn test_shorten_segment() {
        let (a, b) = shorten_segment(&Point2::new(0.0, 0.0), &Point2::new(10.0, 0.0), 0.5);
        assert_relative_eq!(a, Point2::new(2.5, 0.0));
        assert_relative_eq!(b, Point2::new(7.5, 0.0));
    }

    #[test]
    fn test_hipped_ridge_length() {
        let wide = rect(25.0, 10.0);
        let edges = GableEdges::select(&wide, RoofOrientation::Unset).unwrap();

        let (r1, r2) = edges.hipped_ridge(&wide, 1.0, false, 0.1);
        assert_relative_eq!(nalgebra::distance(&r1, &r2), 15.0, epsilon = 1e-9);

        let (r1, r2) = edges.hipped_ridge(&wide, 0.5, false, 0.1);
        assert_relative_eq!(nalgebra::distance(&r1, &r2), 20.0, epsilon = 1e-9);

        // Square: ridge collapses to the minimum
        let square = rect(10.0, 10.0);
        let edges = GableEdges::select(&square, RoofOrientation::Unset).unwrap();
        let (r1, r2) = edges.hipped_ridge(&square, 1.0, false, 0.1);
        assert_relative_eq!(nalgebra::distance(&r1, &r2), 0.1, epsilon = 1e-9);

        // Across clamp: at least a third of the eave
        let (r1, r2) = edges.hipped_ridge(&square, 1.0, true, 0.1);
        assert_relative_eq!(nalgebra::distance(&r1, &r2), 10.0 / 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_ring_faces() {
        assert_eq!(ring_face(4, 3).as_slice(), &[4, 5, 6]);
        assert_eq!(reversed_ring_face(4, 3).as_slice(), &[6, 5, 4]);
    }

    #[test]
    fn test_base_and_wall_rings_reuse() {
        let square = rect(2.0, 2.0);
        let mut mesh = Mesh::new();
        let (base, wall) = add_base_and_wall_rings(&mut mesh, &square, 1.0, 1.0);
        assert_eq!(base, wall);
        assert_eq!(mesh.vertex_count(), 4);

        let (base, wall) = add_base_and_wall_rings(&mut mesh, &square, 0.0, 3.0);
        assert_eq!((base, wall), (4, 8));
        assert_eq!(mesh.verts[8].z, 3.0);
    }
}
