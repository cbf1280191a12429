// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all predict- and invert-related errors.

use thiserror::Error;

use crate::simulate::SimulateError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("A model image has {num_chans} channels, but the visibilities have {num_freqs} frequencies")]
    ChannelMismatch { num_chans: usize, num_freqs: usize },

    #[error("Model image pixel ({x}, {y}) is not zero, but it isn't on the sky")]
    PixelOffSky { x: usize, y: usize },

    #[error("Cannot make an image with a cell size of {0}; it must be positive")]
    InvalidCellSize(f64),

    #[error("Cannot make an image with {0:?} pixels")]
    NoPixels((usize, usize)),

    #[error(transparent)]
    Simulate(#[from] SimulateError),
}
