// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeconvolveError {
    #[error("The CLEAN gain must be in (0, 1], but got {0}")]
    InvalidGain(f64),

    #[error("The CLEAN threshold must not be negative, but got {0}")]
    NegativeThreshold(f64),

    #[error("The dirty image has shape {dirty:?}, but the PSF has shape {psf:?}; they must be the same")]
    ShapeMismatch {
        dirty: (usize, usize, usize),
        psf: (usize, usize, usize),
    },
}
