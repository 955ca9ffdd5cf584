// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Roofmesh Core
//!
//! Input-side data model for roof mesh generation.
//!
//! ## Overview
//!
//! - **Contours**: ring assembly from boundary fragments, projection of
//!   geographic nodes to local meters, simplification of near-straight
//!   vertices and winding normalization
//! - **Tag values**: roof shape, roof orientation and roof direction parsing
//! - **Vector helpers**: small additions on top of [nalgebra](https://docs.rs/nalgebra)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use roofmesh_core::{Contour, GeoNode, LatLon, RoofShape, Way};
//!
//! let way = Way::new(nodes);
//! let origin = LatLon::new(55.75, 37.62);
//! let contour = Contour::from_way(&way, origin)?;
//! assert!(!contour.is_complex());
//! assert_eq!(RoofShape::from_tag("Gabled"), RoofShape::Gabled);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization support for contours and tag values

pub mod contour;
pub mod error;
pub mod geo;
pub mod tags;
pub mod vector;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector2, Vector3};

pub use contour::{
    point_in_ring, simplify_ring, simplify_ring_with_tolerance, Contour, Ring,
    STRAIGHT_ANGLE_TAN_TOLERANCE,
};
pub use error::{Error, Result};
pub use geo::{geo_centroid, GeoNode, LatLon, Member, MemberRole, Way};
pub use tags::{parse_direction, RoofOrientation, RoofShape};
pub use vector::{normalize_or_zero, perp_dot, signed_area};
