// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors from simulating visibilities.

use thiserror::Error;

use crate::coord::RADec;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulateError {
    #[error("Cannot simulate a source at l = {l}, m = {m}; l^2 + m^2 must not exceed 1")]
    Domain { l: f64, m: f64 },

    #[error("Got {num_fluxes} flux densities but {num_freqs} frequencies; these must be equal")]
    FluxLength { num_fluxes: usize, num_freqs: usize },

    #[error("The visibility array has shape {got:?}, but (num_freqs, num_baselines) = {expected:?}")]
    VisShape {
        got: (usize, usize),
        expected: (usize, usize),
    },

    #[error("Component '{name}' at {direction} is on the far side of the sky from the phase centre {phase_centre}")]
    FarSide {
        name: String,
        direction: RADec,
        phase_centre: RADec,
    },
}
