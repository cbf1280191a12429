// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Deconvolution of dirty images, i.e. the "minor cycle".

mod error;
mod hogbom;

pub use error::DeconvolveError;
pub use hogbom::Hogbom;

use serde::{Deserialize, Serialize};

use crate::{constants::*, skymodel::Image};

/// An algorithm that separates a dirty image into model components and a
/// residual.
///
/// Implementations must be stateless across calls; everything needed to
/// carry on is in the returned images.
pub trait Deconvolve {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Deconvolve `psf` from `dirty`, returning the component image (the
    /// flux that was found) and the residual image (what is left).
    fn deconvolve(
        &self,
        dirty: &Image,
        psf: &Image,
        config: &CleanConfig,
    ) -> Result<(Image, Image), Self::Error>;
}

/// Parameters of a CLEAN minor cycle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanConfig {
    /// The fraction of the peak removed on each iteration.
    pub gain: f64,

    /// The maximum number of iterations per channel.
    pub max_iterations: usize,

    /// Stop once the peak absolute residual is at or below this \[Jy\].
    pub threshold: f64,
}

impl Default for CleanConfig {
    fn default() -> Self {
        CleanConfig {
            gain: DEFAULT_CLEAN_GAIN,
            max_iterations: DEFAULT_CLEAN_MAX_ITERATIONS,
            threshold: DEFAULT_CLEAN_THRESHOLD,
        }
    }
}

impl CleanConfig {
    pub fn validate(&self) -> Result<(), DeconvolveError> {
        if self.gain.is_nan() || self.gain <= 0.0 || self.gain > 1.0 {
            return Err(DeconvolveError::InvalidGain(self.gain));
        }
        if self.threshold.is_nan() || self.threshold < 0.0 {
            return Err(DeconvolveError::NegativeThreshold(self.threshold));
        }
        Ok(())
    }
}
