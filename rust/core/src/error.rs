// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for contour construction
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building contours from footprint data
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Way has too few nodes to form a ring: {0}")]
    TooFewNodes(usize),

    #[error("Multipolygon has no outer ring")]
    NoOuterRing,
}
