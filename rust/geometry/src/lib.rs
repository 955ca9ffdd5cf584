// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Roofmesh Geometry
//!
//! Watertight building meshes from 2D footprints, using earcutr for cap
//! triangulation and nalgebra for the math.
//!
//! A building is a prism between `min_height` and `wall_height` capped by a
//! roof reaching `height`. Every roof shape has a mesher
//! (`fn(&BuildingParams) -> Option<Mesh>`); shapes that do not fit the
//! footprint fall back to a flat roof, which accepts any contour.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use roofmesh_geometry::{BuildingElement, ElementInput, MeshOptions, to_obj_string};
//!
//! let input = ElementInput {
//!     contour,
//!     height: 10.0,
//!     min_height: 0.0,
//!     roof_height: 4.0,
//!     roof_shape: "hipped".into(),
//!     ..Default::default()
//! };
//! let element = BuildingElement::new(input, &MeshOptions::from_env())?;
//! assert!(element.mesh().is_watertight());
//! let obj = to_obj_string(element.mesh())?;
//! ```

pub mod batch;
pub mod building;
pub mod error;
pub mod export;
pub mod mesh;
pub mod options;
pub mod params;
pub mod roof;
pub mod triangulation;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector2, Vector3};

pub use batch::build_elements;
pub use building::{BuildingElement, ElementInput};
pub use error::{Error, Result};
pub use export::{to_obj_string, write_obj};
pub use mesh::{Face, FaceGroup, Mesh};
pub use options::MeshOptions;
pub use params::BuildingParams;
pub use roof::{generate, mesher_for, resolve, Mesher};
pub use triangulation::{
    triangulate_polygon, triangulate_polygon_with_holes, EarcutTriangulator, PolygonTriangulator,
    Triangulation,
};

pub use roofmesh_core::{Contour, RoofOrientation, RoofShape};
