// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with sky models, images and components.

use thiserror::Error;

use crate::coord::RADec;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SkyModelError {
    #[error("A sky component was given {num_fluxes} flux densities but {num_freqs} frequencies; these must be equal")]
    FluxFrequencyMismatch { num_fluxes: usize, num_freqs: usize },

    #[error("An image has {num_chans} channels, but its coordinate grid has {num_freqs} frequencies")]
    ImageChannelMismatch { num_chans: usize, num_freqs: usize },

    #[error("Cannot combine images with shapes {got:?} and {expected:?}")]
    ImageShapeMismatch {
        got: (usize, usize, usize),
        expected: (usize, usize, usize),
    },

    #[error("Cannot find a sky component in an image with no pixels")]
    EmptyImage,

    #[error("Pixel ({x}, {y}) does not correspond to a position on the sky")]
    PixelOffSky { x: f64, y: f64 },

    #[error("Sky position {direction} is at pixel ({x:.2}, {y:.2}), which is not inside the image")]
    PixelOutOfBounds { direction: RADec, x: f64, y: f64 },

    #[error("Sky position {0} is not on the image's hemisphere")]
    DirectionBehindImage(RADec),

    #[error("The image's coordinate grid has no frequency for channel {0}")]
    NoFrequency(usize),
}
