// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Sky-model component types.

use ndarray::Array1;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::SkyModelError;
use crate::coord::RADec;

/// A discrete source on the sky, with a flux density per frequency.
#[derive(Clone, Debug, PartialEq)]
pub struct SkyComponent {
    /// The absolute position of the component.
    pub direction: RADec,

    /// The flux density \[Jy\] at each of `frequencies`.
    pub flux: Array1<f64>,

    /// \[Hz\]
    pub frequencies: Vec<f64>,

    pub shape: ComponentType,

    pub name: String,
}

impl SkyComponent {
    pub fn new(
        direction: RADec,
        flux: Array1<f64>,
        frequencies: Vec<f64>,
        shape: ComponentType,
        name: impl Into<String>,
    ) -> Result<SkyComponent, SkyModelError> {
        if flux.len() != frequencies.len() {
            return Err(SkyModelError::FluxFrequencyMismatch {
                num_fluxes: flux.len(),
                num_freqs: frequencies.len(),
            });
        }
        Ok(SkyComponent {
            direction,
            flux,
            frequencies,
            shape,
            name: name.into(),
        })
    }

    /// Make an unnamed point component.
    pub fn point(
        direction: RADec,
        flux: Array1<f64>,
        frequencies: Vec<f64>,
    ) -> Result<SkyComponent, SkyModelError> {
        Self::new(direction, flux, frequencies, ComponentType::Point, "")
    }

    /// Is this component a gaussian source?
    pub fn is_gaussian(&self) -> bool {
        self.shape.is_gaussian()
    }
}

/// Source component types.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Point,

    Gaussian {
        /// Major axis size (FWHM) \[radians\]
        #[serde(serialize_with = "radians_to_arcsecs")]
        #[serde(deserialize_with = "arcsecs_to_radians")]
        maj: f64,

        /// Minor axis size (FWHM) \[radians\]
        #[serde(serialize_with = "radians_to_arcsecs")]
        #[serde(deserialize_with = "arcsecs_to_radians")]
        min: f64,

        /// Position angle \[radians\]
        #[serde(serialize_with = "radians_to_degrees")]
        #[serde(deserialize_with = "degrees_to_radians")]
        pa: f64,
    },
}

impl ComponentType {
    pub fn is_point(&self) -> bool {
        matches!(self, Self::Point)
    }

    pub fn is_gaussian(&self) -> bool {
        matches!(self, Self::Gaussian { .. })
    }
}

impl Default for ComponentType {
    fn default() -> Self {
        Self::Point
    }
}

fn radians_to_arcsecs<S: Serializer>(num: &f64, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(num.to_degrees() * 3600.0)
}

fn radians_to_degrees<S: Serializer>(num: &f64, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(num.to_degrees())
}

fn arcsecs_to_radians<'de, D>(d: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let num: f64 = Deserialize::deserialize(d)?;
    Ok(num.to_radians() / 3600.0)
}

fn degrees_to_radians<'de, D>(d: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let num: f64 = Deserialize::deserialize(d)?;
    Ok(num.to_radians())
}
