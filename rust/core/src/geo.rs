// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geographic footprint input
//!
//! Nodes, ways and multipolygon members as delivered by the map data source,
//! plus the local planar projection used to turn them into meters.

use nalgebra::Point2;

/// Length of one degree of latitude on the WGS84 equator, in meters
pub const DEGREE_LENGTH_M: f64 = 6378137.0 * 2.0 * std::f64::consts::PI / 360.0;

/// Geographic coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Project to local meters around `origin` (equirectangular)
    ///
    /// X grows eastwards, Y northwards. Accurate enough for building-sized
    /// extents; distortion grows with the distance from the origin.
    #[inline]
    pub fn to_local(&self, origin: LatLon) -> Point2<f64> {
        let dx = self.lon - origin.lon;
        let dy = self.lat - origin.lat;
        Point2::new(
            dx * origin.lat.to_radians().cos() * DEGREE_LENGTH_M,
            dy * DEGREE_LENGTH_M,
        )
    }
}

/// A map node: identity plus position
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoNode {
    pub id: i64,
    pub coord: LatLon,
}

impl GeoNode {
    #[inline]
    pub fn new(id: i64, lat: f64, lon: f64) -> Self {
        Self {
            id,
            coord: LatLon::new(lat, lon),
        }
    }
}

/// Ordered node sequence. A closed way repeats its first node as the last.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Way {
    pub nodes: Vec<GeoNode>,
}

impl Way {
    pub fn new(nodes: Vec<GeoNode>) -> Self {
        Self { nodes }
    }

    #[inline]
    pub fn first_id(&self) -> Option<i64> {
        self.nodes.first().map(|n| n.id)
    }

    #[inline]
    pub fn last_id(&self) -> Option<i64> {
        self.nodes.last().map(|n| n.id)
    }

    /// First and last node are the same node
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.nodes.len() > 1 && self.first_id() == self.last_id()
    }
}

/// Role of a way inside a multipolygon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MemberRole {
    Outer,
    Inner,
    /// Any other role; ignored by ring assembly
    Other,
}

impl MemberRole {
    pub fn from_tag(role: &str) -> Self {
        match role {
            "outer" => Self::Outer,
            "inner" => Self::Inner,
            _ => Self::Other,
        }
    }
}

/// Multipolygon member way
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Member {
    pub role: MemberRole,
    pub way: Way,
}

impl Member {
    pub fn new(role: MemberRole, way: Way) -> Self {
        Self { role, way }
    }
}

/// Arithmetic mean of the nodes, suitable as a projection origin
///
/// Returns `None` for an empty slice. A closed way's repeated last node is
/// counted twice; the bias is negligible for choosing an origin.
pub fn geo_centroid(nodes: &[GeoNode]) -> Option<LatLon> {
    if nodes.is_empty() {
        return None;
    }
    let n = nodes.len() as f64;
    let (lat, lon) = nodes
        .iter()
        .fold((0.0, 0.0), |(lat, lon), node| (lat + node.coord.lat, lon + node.coord.lon));
    Some(LatLon::new(lat / n, lon / n))
}
