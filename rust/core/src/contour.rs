// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building footprint contours
//!
//! A contour is one or more outer rings plus zero or more inner rings
//! (holes). Rings are implicitly closed: the first point is not repeated as
//! the last one. Outer rings built from map data are counter-clockwise.

use crate::error::{Error, Result};
use crate::geo::{GeoNode, LatLon, Member, MemberRole, Way};
use crate::vector::{perp_dot, signed_area};
use nalgebra::{Point2, Vector2};

/// Tangent tolerance for treating a vertex as lying on a straight line.
/// 0.08 corresponds to roughly 175.5°..184.5°, which absorbs slight
/// deviations in hand-placed nodes.
pub const STRAIGHT_ANGLE_TAN_TOLERANCE: f64 = 0.08;

/// Tolerance for point-on-border tests
const BORDER_EPSILON: f64 = 1e-10;

/// Ordered ring of planar points
pub type Ring = Vec<Point2<f64>>;

/// Planar building footprint
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Contour {
    /// Outer boundaries (counter-clockwise)
    pub outer_rings: Vec<Ring>,
    /// Holes (winding as delivered, not forced)
    pub inner_rings: Vec<Ring>,
}

impl Contour {
    /// Create a contour from a single planar outer ring, taken as-is
    pub fn new(outer: Ring) -> Self {
        Self {
            outer_rings: vec![outer],
            inner_rings: Vec::new(),
        }
    }

    /// Create a contour from a planar outer ring and holes, taken as-is
    pub fn with_holes(outer: Ring, inner: Vec<Ring>) -> Self {
        Self {
            outer_rings: vec![outer],
            inner_rings: inner,
        }
    }

    /// Build a contour from a single closed way
    ///
    /// Nodes are projected to local meters around `origin` and the ring is
    /// simplified and wound counter-clockwise.
    pub fn from_way(way: &Way, origin: LatLon) -> Result<Self> {
        if way.nodes.len() < 3 {
            return Err(Error::TooFewNodes(way.nodes.len()));
        }
        Ok(Self::new(project_and_simplify(&way.nodes, origin)))
    }

    /// Build a contour from multipolygon members
    ///
    /// Fragments are chained into rings by shared end nodes, separately for
    /// the outer and the inner role. A chain that cannot be closed is kept
    /// open.
    pub fn from_multipolygon(members: &[Member], origin: LatLon) -> Result<Self> {
        let outer_ways: Vec<&Way> = members
            .iter()
            .filter(|m| m.role == MemberRole::Outer)
            .map(|m| &m.way)
            .collect();
        let inner_ways: Vec<&Way> = members
            .iter()
            .filter(|m| m.role == MemberRole::Inner)
            .map(|m| &m.way)
            .collect();

        if outer_ways.is_empty() {
            return Err(Error::NoOuterRing);
        }

        let outer_rings = assemble_rings(&outer_ways)
            .iter()
            .map(|nodes| project_and_simplify(nodes, origin))
            .collect();
        let inner_rings = assemble_rings(&inner_ways)
            .iter()
            .map(|nodes| project_and_simplify(nodes, origin))
            .collect();

        Ok(Self {
            outer_rings,
            inner_rings,
        })
    }

    /// First outer ring (empty slice if there is none)
    #[inline]
    pub fn outer(&self) -> &[Point2<f64>] {
        self.outer_rings.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// More than one outer ring, or any hole
    #[inline]
    pub fn is_complex(&self) -> bool {
        self.outer_rings.len() > 1 || !self.inner_rings.is_empty()
    }

    /// Translate every ring so that `origin` becomes (0, 0)
    pub fn rebase(&mut self, origin: &Point2<f64>) {
        let offset = origin.coords;
        for ring in self.outer_rings.iter_mut().chain(self.inner_rings.iter_mut()) {
            for p in ring.iter_mut() {
                *p -= offset;
            }
        }
    }

    /// Check whether `other` lies within this contour
    ///
    /// Every vertex of every outer ring of `other` must be inside (or on the
    /// border of) this contour's first outer ring and outside all holes.
    pub fn contains(&self, other: &Contour) -> bool {
        let Some(boundary) = self.outer_rings.first() else {
            return false;
        };
        if other.outer_rings.is_empty() {
            return false;
        }

        other.outer_rings.iter().flatten().all(|p| {
            point_in_ring(boundary, p)
                && !self.inner_rings.iter().any(|hole| point_in_ring(hole, p))
        })
    }

    /// Split a multi-outer contour without holes into one contour per ring
    pub fn split_disjoint(self) -> Vec<Contour> {
        if self.outer_rings.len() <= 1 || !self.inner_rings.is_empty() {
            return vec![self];
        }
        self.outer_rings.into_iter().map(Contour::new).collect()
    }
}

/// Project nodes to local meters and simplify the resulting ring
fn project_and_simplify(nodes: &[GeoNode], origin: LatLon) -> Ring {
    let ring = nodes.iter().map(|n| n.coord.to_local(origin)).collect();
    simplify_ring(ring)
}

/// Chain way fragments into rings by matching end node ids
fn assemble_rings(ways: &[&Way]) -> Vec<Vec<GeoNode>> {
    let mut remaining: Vec<&Way> = ways.iter().copied().filter(|w| !w.nodes.is_empty()).collect();
    let mut rings = Vec::new();

    while !remaining.is_empty() {
        let mut ring = remaining.remove(0).nodes.clone();

        while !remaining.is_empty() {
            let (Some(first), Some(last)) = (ring.first(), ring.last()) else {
                break;
            };
            if first.id == last.id {
                break;
            }
            let last_id = last.id;

            let next = remaining.iter().position(|w| {
                w.nodes.len() >= 2
                    && (w.first_id() == Some(last_id) || w.last_id() == Some(last_id))
            });
            let Some(i) = next else {
                // Unmatched fragment: keep the open chain as-is
                break;
            };

            let way = remaining.remove(i);
            if way.first_id() == Some(last_id) {
                ring.extend_from_slice(&way.nodes[1..]);
            } else {
                ring.extend(way.nodes.iter().rev().skip(1).copied());
            }
        }

        rings.push(ring);
    }

    rings
}

/// Simplify a ring with the default straight-angle tolerance
pub fn simplify_ring(ring: Ring) -> Ring {
    simplify_ring_with_tolerance(ring, STRAIGHT_ANGLE_TAN_TOLERANCE)
}

/// Remove near-straight vertices and normalize winding
///
/// A ring whose first point equals its last is treated as closed: the
/// closing duplicate is dropped, vertex 0 is tested against its wrap-around
/// neighbour and the result is wound counter-clockwise. Open rings keep both
/// endpoints and their winding. A result with fewer than 3 points falls back
/// to the unsimplified ring.
pub fn simplify_ring_with_tolerance(mut ring: Ring, tolerance: f64) -> Ring {
    ring.dedup();
    let n = ring.len();
    if n < 3 {
        return ring;
    }

    let closed = ring[0] == ring[n - 1];
    let last = n - 1;

    let mut simplified = Vec::with_capacity(n);
    let start = if closed {
        0
    } else {
        simplified.push(ring[0]);
        1
    };

    for i in start..last {
        let prev = if i == 0 { ring[last - 1] } else { ring[i - 1] };
        if !is_anti_collinear(&prev, &ring[i], &ring[i + 1], tolerance) {
            simplified.push(ring[i]);
        }
    }

    if !closed {
        simplified.push(ring[last]);
    }

    if simplified.len() < 3 {
        if !closed || last < 3 {
            return ring;
        }
        ring.truncate(last);
        simplified = ring;
    }

    if closed && signed_area(&simplified) < 0.0 {
        simplified.reverse();
    }

    simplified
}

/// Incoming and outgoing edges point in nearly opposite directions
fn is_anti_collinear(
    prev: &Point2<f64>,
    current: &Point2<f64>,
    next: &Point2<f64>,
    tolerance: f64,
) -> bool {
    let v1: Vector2<f64> = prev - current;
    let v2: Vector2<f64> = next - current;

    let dot = v1.dot(&v2);
    // dot >= 0: perpendicular or acute, never straight
    if dot >= 0.0 {
        return false;
    }
    (perp_dot(&v1, &v2) / dot).abs() < tolerance
}

/// Point-in-polygon test (even-odd); points on the border count as inside
pub fn point_in_ring(ring: &[Point2<f64>], point: &Point2<f64>) -> bool {
    let n = ring.len();
    if n == 0 {
        return false;
    }

    let on_border = (0..n).any(|i| point_on_segment(&ring[i], &ring[(i + 1) % n], point));
    if on_border {
        return true;
    }

    let mut crossings = 0usize;
    for i in 0..n {
        let p1 = &ring[i];
        let p2 = &ring[(i + 1) % n];
        if p1.y == p2.y {
            continue;
        }
        if point.y < p1.y.min(p2.y) || point.y >= p1.y.max(p2.y) {
            continue;
        }
        let x = (point.y - p1.y) * (p2.x - p1.x) / (p2.y - p1.y) + p1.x;
        if x > point.x {
            crossings += 1;
        }
    }
    crossings % 2 == 1
}

fn point_on_segment(p1: &Point2<f64>, p2: &Point2<f64>, point: &Point2<f64>) -> bool {
    if nalgebra::distance(point, p1) < BORDER_EPSILON
        || nalgebra::distance(point, p2) < BORDER_EPSILON
    {
        return true;
    }

    let cross = perp_dot(&(point - p1), &(p2 - p1));
    let within_box = point.x >= p1.x.min(p2.x) - BORDER_EPSILON
        && point.x <= p1.x.max(p2.x) + BORDER_EPSILON
        && point.y >= p1.y.min(p2.y) - BORDER_EPSILON
        && point.y <= p1.y.max(p2.y) + BORDER_EPSILON;

    cross.abs() < BORDER_EPSILON && within_box
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square(size: f64) -> Ring {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(size, 0.0),
            Point2::new(size, size),
            Point2::new(0.0, size),
        ]
    }

    fn closed(mut ring: Ring) -> Ring {
        ring.push(ring[0]);
        ring
    }

    #[test]
    fn test_simplify_drops_closing_duplicate() {
        let ring = simplify_ring(closed(square(10.0)));
        assert_eq!(ring, square(10.0));
    }

    #[test]
    fn test_simplify_fallback_keeps_distinct_points() {
        // Dropping the straight vertex would leave two points
        let ring = closed(vec![
            Point2::new(0.0, 0.0),
            Point2::new(5.0, 0.0),
            Point2::new(10.0, 0.0),
        ]);
        assert_eq!(
            simplify_ring(ring),
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(5.0, 0.0),
                Point2::new(10.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_simplify_fallback_too_short_to_drop_closing_point() {
        let ring = closed(vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)]);
        assert_eq!(simplify_ring(ring.clone()), ring);
        assert_eq!(ring.len(), 3);
    }

    #[test]
    fn test_simplify_removes_collinear_midpoint() {
        let ring = closed(vec![
            Point2::new(0.0, 0.0),
            Point2::new(5.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ]);
        let simplified = simplify_ring(ring);
        assert_eq!(simplified, square(10.0));
    }

    #[test]
    fn test_simplify_first_vertex_uses_wraparound_neighbour() {
        // Vertex 0 sits in the middle of the bottom edge
        let ring = closed(vec![
            Point2::new(5.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
            Point2::new(0.0, 0.0),
        ]);
        let simplified = simplify_ring(ring);
        assert_eq!(simplified.len(), 4);
        assert!(!simplified.contains(&Point2::new(5.0, 0.0)));
    }

    #[test]
    fn test_simplify_angle_tolerance() {
        // 178°: removed
        let bend = 10.0 * 2.0f64.to_radians().tan();
        let ring = closed(vec![
            Point2::new(-10.0, 0.0),
            Point2::new(0.0, 0.0),
            Point2::new(10.0, bend),
            Point2::new(10.0, 10.0),
            Point2::new(-10.0, 10.0),
        ]);
        assert_eq!(simplify_ring(ring).len(), 4);

        // 170°: kept
        let bend = 10.0 * 10.0f64.to_radians().tan();
        let ring = closed(vec![
            Point2::new(-10.0, 0.0),
            Point2::new(0.0, 0.0),
            Point2::new(10.0, bend),
            Point2::new(10.0, 10.0),
            Point2::new(-10.0, 10.0),
        ]);
        assert_eq!(simplify_ring(ring).len(), 5);
    }

    #[test]
    fn test_simplify_forces_counter_clockwise() {
        let cw: Ring = square(4.0).into_iter().rev().collect();
        let simplified = simplify_ring(closed(cw));
        assert!(signed_area(&simplified) > 0.0);
        assert_relative_eq!(signed_area(&simplified), 16.0);
    }

    #[test]
    fn test_simplify_keeps_open_ring_endpoints_and_winding() {
        let open = vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 5.0),
            Point2::new(0.0, 10.0),
            Point2::new(-10.0, 10.0),
        ];
        let simplified = simplify_ring(open);
        assert_eq!(
            simplified,
            vec![Point2::new(0.0, 0.0), Point2::new(0.0, 10.0), Point2::new(-10.0, 10.0)]
        );
    }

    #[test]
    fn test_simplify_never_below_three_points() {
        // Degenerate closed "ring" along a line collapses; fall back
        let ring = closed(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(3.0, 0.0),
        ]);
        let simplified = simplify_ring(ring);
        assert!(simplified.len() >= 3);
    }

    fn node_square(first_id: i64) -> Vec<GeoNode> {
        vec![
            GeoNode::new(first_id, 55.0, 37.0),
            GeoNode::new(first_id + 1, 55.0, 37.001),
            GeoNode::new(first_id + 2, 55.001, 37.001),
            GeoNode::new(first_id + 3, 55.001, 37.0),
        ]
    }

    #[test]
    fn test_from_way_projects_and_closes() {
        let mut nodes = node_square(1);
        nodes.push(nodes[0]);
        let origin = LatLon::new(55.0, 37.0);
        let contour = Contour::from_way(&Way::new(nodes), origin).unwrap();

        assert!(!contour.is_complex());
        let ring = contour.outer();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring[0], Point2::new(0.0, 0.0));
        assert!(signed_area(ring) > 0.0);
        // ~64 m east, ~111 m north
        assert!(ring.iter().any(|p| p.x > 60.0 && p.x < 70.0));
        assert!(ring.iter().any(|p| p.y > 110.0 && p.y < 112.0));
    }

    #[test]
    fn test_from_way_rejects_short_way() {
        let nodes = node_square(1)[..2].to_vec();
        let err = Contour::from_way(&Way::new(nodes), LatLon::default()).unwrap_err();
        assert_eq!(err, Error::TooFewNodes(2));
    }

    #[test]
    fn test_multipolygon_assembles_fragments() {
        let n = node_square(1);
        // Two fragments; the second one is reversed
        let a = Way::new(vec![n[0], n[1], n[2]]);
        let b = Way::new(vec![n[0], n[3], n[2]]);
        let members = vec![Member::new(MemberRole::Outer, a), Member::new(MemberRole::Outer, b)];

        let contour = Contour::from_multipolygon(&members, LatLon::new(55.0, 37.0)).unwrap();
        assert_eq!(contour.outer_rings.len(), 1);
        assert_eq!(contour.outer().len(), 4);
        assert!(signed_area(contour.outer()) > 0.0);
    }

    #[test]
    fn test_multipolygon_keeps_unmatched_chain_open() {
        let n = node_square(1);
        let a = Way::new(vec![n[0], n[1], n[2]]);
        let b = Way::new(vec![GeoNode::new(100, 56.0, 38.0), GeoNode::new(101, 56.0, 38.1)]);
        let members = vec![Member::new(MemberRole::Outer, a), Member::new(MemberRole::Outer, b)];

        let contour = Contour::from_multipolygon(&members, LatLon::new(55.0, 37.0)).unwrap();
        assert_eq!(contour.outer_rings.len(), 2);
        assert_eq!(contour.outer_rings[0].len(), 3);
    }

    #[test]
    fn test_multipolygon_with_hole() {
        let mut outer = node_square(1);
        outer.push(outer[0]);
        let mut inner = vec![
            GeoNode::new(10, 55.0004, 37.0004),
            GeoNode::new(11, 55.0006, 37.0004),
            GeoNode::new(12, 55.0006, 37.0006),
            GeoNode::new(13, 55.0004, 37.0006),
        ];
        inner.push(inner[0]);
        let members = vec![
            Member::new(MemberRole::Outer, Way::new(outer)),
            Member::new(MemberRole::Inner, Way::new(inner)),
            Member::new(MemberRole::Other, Way::default()),
        ];

        let contour = Contour::from_multipolygon(&members, LatLon::new(55.0, 37.0)).unwrap();
        assert!(contour.is_complex());
        assert_eq!(contour.inner_rings.len(), 1);
        assert_eq!(contour.inner_rings[0].len(), 4);
    }

    #[test]
    fn test_multipolygon_requires_outer() {
        let members = vec![Member::new(MemberRole::Inner, Way::new(node_square(1)))];
        let err = Contour::from_multipolygon(&members, LatLon::default()).unwrap_err();
        assert_eq!(err, Error::NoOuterRing);
    }

    #[test]
    fn test_rebase() {
        let mut contour = Contour::new(square(2.0));
        contour.rebase(&Point2::new(1.0, 1.0));
        assert_eq!(contour.outer()[0], Point2::new(-1.0, -1.0));
        assert_eq!(contour.outer()[2], Point2::new(1.0, 1.0));
    }

    #[test]
    fn test_contains() {
        let building = Contour::with_holes(
            square(10.0),
            vec![vec![
                Point2::new(4.0, 4.0),
                Point2::new(6.0, 4.0),
                Point2::new(6.0, 6.0),
                Point2::new(4.0, 6.0),
            ]],
        );

        // Shares the building's border
        let part = Contour::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(3.0, 0.0),
            Point2::new(3.0, 3.0),
            Point2::new(0.0, 3.0),
        ]);
        assert!(building.contains(&part));

        // Inside the hole
        let in_hole = Contour::new(vec![
            Point2::new(4.5, 4.5),
            Point2::new(5.5, 4.5),
            Point2::new(5.5, 5.5),
        ]);
        assert!(!building.contains(&in_hole));

        // Sticks out
        let outside = Contour::new(vec![
            Point2::new(8.0, 8.0),
            Point2::new(12.0, 8.0),
            Point2::new(12.0, 9.0),
        ]);
        assert!(!building.contains(&outside));
    }

    #[test]
    fn test_split_disjoint() {
        let mut contour = Contour::new(square(1.0));
        let shifted: Ring = square(1.0).iter().map(|p| p + Vector2::new(5.0, 0.0)).collect();
        contour.outer_rings.push(shifted);
        assert!(contour.is_complex());

        let parts = contour.split_disjoint();
        assert_eq!(parts.len(), 2);
        assert!(parts.iter().all(|c| !c.is_complex()));

        let holed = Contour::with_holes(square(10.0), vec![square(1.0)]);
        assert_eq!(holed.split_disjoint().len(), 1);
    }
}
