// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh data structures
//!
//! An indexed polygon mesh with faces grouped by role. Faces are vertex
//! index loops wound counter-clockwise when seen from outside, so the
//! right-hand rule over the first three vertices gives the outward normal.

use crate::triangulation::triangulate_polygon;
use nalgebra::{Point2, Point3, Vector3};
use roofmesh_core::{normalize_or_zero, perp_dot};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Polygon face: an ordered loop of vertex indices
///
/// Most faces are triangles, quads, pentagons or hexagons and stay inline.
pub type Face = SmallVec<[u32; 6]>;

/// Role of a face in the building
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FaceGroup {
    Roof,
    Wall,
    Bottom,
}

impl FaceGroup {
    pub const ALL: [FaceGroup; 3] = [FaceGroup::Roof, FaceGroup::Wall, FaceGroup::Bottom];
}

/// Building mesh
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mesh {
    /// Vertex positions
    pub verts: Vec<Point3<f64>>,
    /// Roof surfaces, including fascia strips of flat roofs
    pub roof_faces: Vec<Face>,
    /// Vertical walls and gable ends
    pub wall_faces: Vec<Face>,
    /// Ground-facing caps
    pub bottom_faces: Vec<Face>,
}

impl Mesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh with capacity
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            verts: Vec::with_capacity(vertex_count),
            roof_faces: Vec::with_capacity(face_count),
            wall_faces: Vec::with_capacity(face_count),
            bottom_faces: Vec::with_capacity(2),
        }
    }

    /// Add a vertex and return its index
    #[inline]
    pub fn add_vertex(&mut self, position: Point3<f64>) -> u32 {
        self.verts.push(position);
        (self.verts.len() - 1) as u32
    }

    /// Add a face to a group
    #[inline]
    pub fn add_face(&mut self, group: FaceGroup, face: Face) {
        self.faces_mut(group).push(face);
    }

    /// Faces of one group
    #[inline]
    pub fn faces(&self, group: FaceGroup) -> &[Face] {
        match group {
            FaceGroup::Roof => &self.roof_faces,
            FaceGroup::Wall => &self.wall_faces,
            FaceGroup::Bottom => &self.bottom_faces,
        }
    }

    #[inline]
    fn faces_mut(&mut self, group: FaceGroup) -> &mut Vec<Face> {
        match group {
            FaceGroup::Roof => &mut self.roof_faces,
            FaceGroup::Wall => &mut self.wall_faces,
            FaceGroup::Bottom => &mut self.bottom_faces,
        }
    }

    /// Every face with its group: roof, then walls, then bottom
    pub fn all_faces(&self) -> impl Iterator<Item = (FaceGroup, &Face)> {
        FaceGroup::ALL
            .into_iter()
            .flat_map(move |group| self.faces(group).iter().map(move |face| (group, face)))
    }

    /// Get vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.verts.len()
    }

    /// Get face count over all groups
    #[inline]
    pub fn face_count(&self) -> usize {
        self.roof_faces.len() + self.wall_faces.len() + self.bottom_faces.len()
    }

    /// Check if mesh is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.verts.is_empty()
    }

    /// Calculate bounds (min, max)
    pub fn bounds(&self) -> (Point3<f64>, Point3<f64>) {
        if self.is_empty() {
            return (Point3::origin(), Point3::origin());
        }

        let mut min = Point3::new(f64::MAX, f64::MAX, f64::MAX);
        let mut max = Point3::new(f64::MIN, f64::MIN, f64::MIN);

        for v in &self.verts {
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            min.z = min.z.min(v.z);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
            max.z = max.z.max(v.z);
        }

        (min, max)
    }

    /// Average of all vertex positions
    pub fn centroid(&self) -> Point3<f64> {
        if self.is_empty() {
            return Point3::origin();
        }

        let sum = self
            .verts
            .iter()
            .fold(Vector3::zeros(), |acc: Vector3<f64>, v| acc + v.coords);
        Point3::from(sum / self.verts.len() as f64)
    }

    /// Unit normal of a face from its first three vertices
    ///
    /// Zero for faces with fewer than three vertices or a degenerate
    /// leading corner.
    pub fn face_normal(&self, face: &[u32]) -> Vector3<f64> {
        if face.len() < 3 {
            return Vector3::zeros();
        }
        let v0 = self.verts[face[0] as usize];
        let v1 = self.verts[face[1] as usize];
        let v2 = self.verts[face[2] as usize];
        normalize_or_zero(&(v1 - v0).cross(&(v2 - v0)))
    }

    /// Average position of a face's vertices
    pub fn face_center(&self, face: &[u32]) -> Point3<f64> {
        if face.is_empty() {
            return Point3::origin();
        }
        let sum = face
            .iter()
            .fold(Vector3::zeros(), |acc: Vector3<f64>, &i| acc + self.verts[i as usize].coords);
        Point3::from(sum / face.len() as f64)
    }

    /// Number of faces using each undirected edge
    ///
    /// Keys are `(min, max)` vertex index pairs.
    pub fn edge_use_counts(&self) -> FxHashMap<(u32, u32), usize> {
        let mut counts: FxHashMap<(u32, u32), usize> = FxHashMap::default();
        for (_, face) in self.all_faces() {
            let n = face.len();
            for i in 0..n {
                let a = face[i];
                let b = face[(i + 1) % n];
                *counts.entry((a.min(b), a.max(b))).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Every edge is shared by exactly two faces
    pub fn is_watertight(&self) -> bool {
        let counts = self.edge_use_counts();
        !counts.is_empty() && counts.values().all(|&count| count == 2)
    }

    /// Every edge is walked exactly once in each direction
    ///
    /// Holds for a closed mesh whose faces all wind the same way.
    pub fn is_consistently_wound(&self) -> bool {
        let mut directed: FxHashMap<(u32, u32), usize> = FxHashMap::default();
        for (_, face) in self.all_faces() {
            let n = face.len();
            for i in 0..n {
                *directed.entry((face[i], face[(i + 1) % n])).or_insert(0) += 1;
            }
        }
        !directed.is_empty()
            && directed
                .iter()
                .all(|(&(a, b), &count)| count == 1 && directed.get(&(b, a)) == Some(&1))
    }

    /// Enclosed volume; positive when the faces point outward
    pub fn signed_volume(&self) -> f64 {
        let sum: f64 = self
            .triangles()
            .iter()
            .map(|(_, [a, b, c])| {
                let p0 = self.verts[*a as usize].coords;
                let p1 = self.verts[*b as usize].coords;
                let p2 = self.verts[*c as usize].coords;
                p0.dot(&p1.cross(&p2))
            })
            .sum();
        sum / 6.0
    }

    /// Triangulate every face, tagged with its group
    ///
    /// Convex faces are fanned; others are projected onto their plane and
    /// ear-clipped. Triangles keep the winding of their face.
    pub fn triangles(&self) -> Vec<(FaceGroup, [u32; 3])> {
        let mut triangles = Vec::with_capacity(self.face_count() * 2);
        for (group, face) in self.all_faces() {
            if face.len() == 3 {
                triangles.push((group, [face[0], face[1], face[2]]));
                continue;
            }
            if face.len() < 3 {
                continue;
            }

            let projected = self.project_face(face);
            match triangulate_polygon(&projected) {
                Ok(indices) => {
                    for tri in indices.chunks_exact(3) {
                        let (a, b, c) = (tri[0], tri[1], tri[2]);
                        let area = perp_dot(
                            &(projected[b] - projected[a]),
                            &(projected[c] - projected[a]),
                        );
                        let corners = if area >= 0.0 {
                            [face[a], face[b], face[c]]
                        } else {
                            [face[a], face[c], face[b]]
                        };
                        triangles.push((group, corners));
                    }
                }
                Err(_) => {
                    for i in 1..face.len() - 1 {
                        triangles.push((group, [face[0], face[i], face[i + 1]]));
                    }
                }
            }
        }
        triangles
    }

    /// Face vertices in a 2D frame of the face plane, counter-clockwise
    /// when the face is wound counter-clockwise about its normal
    fn project_face(&self, face: &[u32]) -> Vec<Point2<f64>> {
        let normal = normalize_or_zero(&self.newell_normal(face));
        let axis = if normal.x.abs() < 0.9 {
            Vector3::x()
        } else {
            Vector3::y()
        };
        let u = normalize_or_zero(&normal.cross(&axis));
        let v = normal.cross(&u);
        let origin = self.verts[face[0] as usize];
        face.iter()
            .map(|&i| {
                let d = self.verts[i as usize] - origin;
                Point2::new(d.dot(&u), d.dot(&v))
            })
            .collect()
    }

    /// Newell normal of a polygon face (robust for non-convex loops)
    fn newell_normal(&self, face: &[u32]) -> Vector3<f64> {
        let mut normal = Vector3::zeros();
        for (i, &index) in face.iter().enumerate() {
            let cur = self.verts[index as usize];
            let next = self.verts[face[(i + 1) % face.len()] as usize];
            normal.x += (cur.y - next.y) * (cur.z + next.z);
            normal.y += (cur.z - next.z) * (cur.x + next.x);
            normal.z += (cur.x - next.x) * (cur.y + next.y);
        }
        normal
    }
}
