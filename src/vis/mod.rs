// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A container for visibilities and the metadata needed to model them.

mod error;

pub use error::VisError;

use ndarray::prelude::*;

use crate::{
    c64,
    coord::{baselines_over_time_tb, RADec, XyzGeodetic, UVW},
};

/// Visibilities, their weights and the baselines that measured them.
///
/// `vis_tfb` and `weights_tfb` have dimensions `[num_times][num_freqs]
/// [num_baselines]`; `uvws_tb` has dimensions `[num_times][num_baselines]`.
/// All visibilities are phased to `phase_centre`.
#[derive(Clone, Debug, PartialEq)]
pub struct Visibility {
    pub vis_tfb: Array3<c64>,
    pub weights_tfb: Array3<f64>,
    /// \[metres\]
    pub uvws_tb: Array2<UVW>,
    /// \[Hz\]
    pub freqs: Vec<f64>,
    pub phase_centre: RADec,
}

impl Visibility {
    /// Make a container of zero-valued visibilities with unit weights.
    pub fn new(uvws_tb: Array2<UVW>, freqs: Vec<f64>, phase_centre: RADec) -> Visibility {
        let (num_times, num_baselines) = uvws_tb.dim();
        let shape = (num_times, freqs.len(), num_baselines);
        Visibility {
            vis_tfb: Array3::zeros(shape),
            weights_tfb: Array3::ones(shape),
            uvws_tb,
            freqs,
            phase_centre,
        }
    }

    /// Make a container from existing visibilities and weights, checking that
    /// everything agrees on the shape.
    pub fn from_parts(
        vis_tfb: Array3<c64>,
        weights_tfb: Array3<f64>,
        uvws_tb: Array2<UVW>,
        freqs: Vec<f64>,
        phase_centre: RADec,
    ) -> Result<Visibility, VisError> {
        let dim = vis_tfb.dim();
        if weights_tfb.dim() != dim {
            return Err(VisError::WeightsShapeMismatch {
                got: weights_tfb.dim(),
                expected: dim,
            });
        }
        if freqs.len() != dim.1 {
            return Err(VisError::FreqMismatch {
                num_freqs: freqs.len(),
                num_chans: dim.1,
            });
        }
        if uvws_tb.dim() != (dim.0, dim.2) {
            return Err(VisError::UvwShapeMismatch {
                got: uvws_tb.dim(),
                expected: (dim.0, dim.2),
            });
        }
        Ok(Visibility {
            vis_tfb,
            weights_tfb,
            uvws_tb,
            freqs,
            phase_centre,
        })
    }

    /// Make an empty container for an observation of `phase_centre` by
    /// antennas at celestial `xyzs` \[metres\] over a set of hour angles
    /// \[radians\].
    pub fn from_observation(
        xyzs: &[XyzGeodetic],
        hour_angles: &[f64],
        freqs: Vec<f64>,
        phase_centre: RADec,
    ) -> Visibility {
        let uvws_tb = baselines_over_time_tb(xyzs, hour_angles, phase_centre.dec);
        Visibility::new(uvws_tb, freqs, phase_centre)
    }

    /// A copy of this container with all visibilities zeroed. The weights are
    /// kept.
    pub fn zeros_like(&self) -> Visibility {
        Visibility {
            vis_tfb: Array3::zeros(self.vis_tfb.dim()),
            weights_tfb: self.weights_tfb.clone(),
            uvws_tb: self.uvws_tb.clone(),
            freqs: self.freqs.clone(),
            phase_centre: self.phase_centre,
        }
    }

    pub fn num_times(&self) -> usize {
        self.vis_tfb.len_of(Axis(0))
    }

    pub fn num_freqs(&self) -> usize {
        self.vis_tfb.len_of(Axis(1))
    }

    pub fn num_baselines(&self) -> usize {
        self.vis_tfb.len_of(Axis(2))
    }

    /// Get `a * self + b * other`. The weights and metadata of `self` are
    /// kept.
    pub fn combine(&self, other: &Visibility, a: f64, b: f64) -> Result<Visibility, VisError> {
        if other.vis_tfb.dim() != self.vis_tfb.dim() {
            return Err(VisError::ShapeMismatch {
                got: other.vis_tfb.dim(),
                expected: self.vis_tfb.dim(),
            });
        }
        let mut vis_tfb = self.vis_tfb.mapv(|v| v * a);
        vis_tfb.scaled_add(c64::new(b, 0.0), &other.vis_tfb);
        Ok(Visibility {
            vis_tfb,
            weights_tfb: self.weights_tfb.clone(),
            uvws_tb: self.uvws_tb.clone(),
            freqs: self.freqs.clone(),
            phase_centre: self.phase_centre,
        })
    }

    /// Get `self - other`, keeping the weights of `self`.
    pub fn subtract(&self, other: &Visibility) -> Result<Visibility, VisError> {
        self.combine(other, 1.0, -1.0)
    }

    /// The largest visibility amplitude, or 0 if there are no visibilities.
    pub fn peak_abs(&self) -> f64 {
        self.vis_tfb.iter().fold(0.0, |acc, v| acc.max(v.norm()))
    }
}
