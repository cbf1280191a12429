// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to go between sky models and visibilities: predicting the
//! visibilities of a sky model, and inverting visibilities into images.

mod dft;
mod error;

pub use dft::{DftInverter, DftPredictor};
pub use error::ModelError;

use ndarray::Array1;

use crate::{
    skymodel::{Image, SkyModel},
    vis::Visibility,
};

/// An object that predicts the visibilities of a sky model.
pub trait Predict {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Predict the visibilities of `sky_model`. `vis` supplies the UVWs,
    /// frequencies, weights and phase centre of the result; its visibilities
    /// are not used.
    fn predict(&self, vis: &Visibility, sky_model: &SkyModel) -> Result<Visibility, Self::Error>;
}

/// The products of inverting visibilities.
#[derive(Clone, Debug, PartialEq)]
pub struct Inversion {
    /// The weighted image of the visibilities.
    pub dirty: Image,

    /// The image of unit visibilities with the same weights, i.e. the
    /// point-spread function.
    pub psf: Image,

    /// The total weight of each channel.
    pub sum_of_weights: Array1<f64>,
}

/// An object that transforms visibilities into images.
pub trait Invert {
    type Error: std::error::Error + Send + Sync + 'static;

    fn invert(&self, vis: &Visibility) -> Result<Inversion, Self::Error>;
}
