// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all skysolve-related errors. This should be the *only*
//! error enum that is publicly visible from the binary.

use thiserror::Error;

use super::{common::ObservationArgsError, simulate::SimulateArgsError, solve::SolveArgsError};
use crate::{
    coord::CoordError,
    simulate::SimulateError,
    skymodel::SkyModelError,
    solve::{SolveError, SolverConfigError},
};

/// The *only* publicly visible error from skysolve.
#[derive(Error, Debug)]
pub enum SkysolveError {
    /// An error related to the observation being simulated or solved.
    #[error("{0}\n\nAntenna positions, hour angles, frequencies and the phase centre are all required")]
    Observation(String),

    /// An error related to simulate.
    #[error("{0}")]
    Simulate(String),

    /// An error related to solve.
    #[error("{0}")]
    Solve(String),

    /// An error related to sky models and their components.
    #[error("{0}")]
    SkyModel(String),

    /// An error related to argument files.
    #[error("{0}\n\nArgument files may be toml or json; the CLI help lists each section's fields")]
    ArgFile(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

// When changing the error propagation below, ensure `Self::from(e)` uses the
// correct `e`!

impl From<ObservationArgsError> for SkysolveError {
    fn from(e: ObservationArgsError) -> Self {
        match e {
            ObservationArgsError::Antenna(e) => Self::from(e),
            _ => Self::Observation(e.to_string()),
        }
    }
}

impl From<SimulateArgsError> for SkysolveError {
    fn from(e: SimulateArgsError) -> Self {
        match e {
            SimulateArgsError::Observation(e) => Self::from(e),
            SimulateArgsError::SkyModel(e) => Self::from(e),
        }
    }
}

impl From<SolveArgsError> for SkysolveError {
    fn from(e: SolveArgsError) -> Self {
        match e {
            SolveArgsError::SkyModel(e) => Self::from(e),
            SolveArgsError::Config(e) => Self::from(e),
            SolveArgsError::ZeroPixels | SolveArgsError::CellSizeInvalid(_) => {
                Self::Solve(e.to_string())
            }
        }
    }
}

impl From<CoordError> for SkysolveError {
    fn from(e: CoordError) -> Self {
        Self::Observation(e.to_string())
    }
}

impl From<SimulateError> for SkysolveError {
    fn from(e: SimulateError) -> Self {
        Self::Simulate(e.to_string())
    }
}

impl From<SkyModelError> for SkysolveError {
    fn from(e: SkyModelError) -> Self {
        Self::SkyModel(e.to_string())
    }
}

impl From<SolverConfigError> for SkysolveError {
    fn from(e: SolverConfigError) -> Self {
        Self::Solve(e.to_string())
    }
}

impl From<SolveError> for SkysolveError {
    fn from(e: SolveError) -> Self {
        Self::Solve(e.to_string())
    }
}

impl From<std::io::Error> for SkysolveError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
