// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors from solving for a sky model.

use thiserror::Error;

use crate::{deconv::DeconvolveError, skymodel::SkyModel, skymodel::SkyModelError, vis::VisError};

/// A boxed error from one of the solver's collaborators.
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverConfigError {
    #[error("The solver threshold must not be negative, but got {0}")]
    NegativeThreshold(f64),

    #[error("The solver threshold slack must not be negative, but got {0}")]
    NegativeSlack(f64),

    #[error("Invalid CLEAN parameters: {0}")]
    Clean(#[from] DeconvolveError),
}

#[derive(Error, Debug)]
pub enum SolveErrorKind {
    #[error("Prediction failed: {0}")]
    Predict(CollaboratorError),

    #[error("Couldn't subtract the model from the observed visibilities: {0}")]
    Subtract(#[from] VisError),

    #[error("Inversion failed: {0}")]
    Invert(CollaboratorError),

    #[error("Deconvolution failed: {0}")]
    Deconvolve(CollaboratorError),

    #[error("Couldn't add the CLEAN components to the model: {0}")]
    Accumulate(#[from] SkyModelError),
}

/// A failure during a solve. The sky model accumulated before the failure is
/// kept so that progress isn't lost.
///
/// `cycle` is the (1-indexed) major cycle that failed. A failure during the
/// prediction after the last major cycle reports the last cycle.
#[derive(Error, Debug)]
#[error("Major cycle {cycle} failed: {kind}")]
pub struct SolveError {
    pub cycle: usize,
    pub kind: SolveErrorKind,
    pub sky_model: Box<SkyModel>,
}
