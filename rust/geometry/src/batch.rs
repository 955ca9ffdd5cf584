// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building many elements at once
//!
//! Elements share no state, so they are built in parallel on native
//! targets. Results come back in input order.

use crate::building::{BuildingElement, ElementInput};
use crate::error::Result;
use crate::options::MeshOptions;

/// Build every element, one result per input
pub fn build_elements(
    inputs: Vec<ElementInput>,
    options: &MeshOptions,
) -> Vec<Result<BuildingElement>> {
    #[cfg(not(target_arch = "wasm32"))]
    use rayon::prelude::*;

    // On WASM: no threads available, build sequentially
    #[cfg(not(target_arch = "wasm32"))]
    let results: Vec<Result<BuildingElement>> = inputs
        .into_par_iter()
        .map(|input| BuildingElement::new(input, options))
        .collect();

    #[cfg(target_arch = "wasm32")]
    let results: Vec<Result<BuildingElement>> = inputs
        .into_iter()
        .map(|input| BuildingElement::new(input, options))
        .collect();

    let failed = results.iter().filter(|r| r.is_err()).count();
    if failed > 0 {
        tracing::warn!(
            total = results.len(),
            failed,
            "Some building elements could not be built"
        );
    } else {
        tracing::debug!(total = results.len(), "Built building elements");
    }

    results
}
