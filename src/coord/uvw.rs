// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Handle UVW coordinates, and build projected baselines from antenna positions.
 */

use itertools::Itertools;
use ndarray::Array2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{xyzs_to_uvws, HADec, XyzGeodetic};

/// The (u,v,w) coordinates of a baseline. The units depend on context; these
/// are metres unless they have been divided by a wavelength.
///
/// UVW is a right-handed coordinate system with W pointing towards the
/// source. The baseline convention is `ant2 - ant1`, where `index(ant1) <
/// index(ant2)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UVW {
    /// u-coordinate
    pub u: f64,
    /// v-coordinate
    pub v: f64,
    /// w-coordinate
    pub w: f64,
}

impl std::ops::Sub<UVW> for UVW {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        UVW {
            u: self.u - rhs.u,
            v: self.v - rhs.v,
            w: self.w - rhs.w,
        }
    }
}

impl std::ops::Mul<f64> for UVW {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        UVW {
            u: self.u * rhs,
            v: self.v * rhs,
            w: self.w * rhs,
        }
    }
}

impl std::ops::Div<f64> for UVW {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        UVW {
            u: self.u / rhs,
            v: self.v / rhs,
            w: self.w / rhs,
        }
    }
}

/// For each pair of antenna [`UVW`]s `(i, j)` with `i < j`, calculate the
/// baseline `uvw[j] - uvw[i]`. The number of baselines is `N * (N - 1) / 2`,
/// and they are ordered by the lexicographic enumeration of the pairs (i.e.
/// (0,1), (0,2), ..., (1,2), ...).
pub fn baselines(antenna_uvws: &[UVW]) -> Vec<UVW> {
    antenna_uvws
        .iter()
        .tuple_combinations()
        .map(|(&uvw_i, &uvw_j)| uvw_j - uvw_i)
        .collect()
}

/// Calculate baselines for a range of hour angles (i.e. a non-snapshot
/// observation), building the UVW sampling distribution. The baselines for
/// each hour angle are calculated in parallel, but the result is ordered by
/// hour angle and then baseline.
///
/// `xyzs` must be celestial XYZ positions \[metres\]. `hour_angles` and
/// `declination` are those of the phase-tracking centre \[radians\].
pub fn baselines_over_time(xyzs: &[XyzGeodetic], hour_angles: &[f64], declination: f64) -> Vec<UVW> {
    hour_angles
        .par_iter()
        .map(|&ha| baselines(&xyzs_to_uvws(xyzs, HADec::new(ha, declination))))
        .collect::<Vec<_>>()
        .concat()
}

/// Like [`baselines_over_time`], but the result has shape (num_hour_angles,
/// num_baselines).
pub fn baselines_over_time_tb(
    xyzs: &[XyzGeodetic],
    hour_angles: &[f64],
    declination: f64,
) -> Array2<UVW> {
    let num_antennas = xyzs.len();
    let num_baselines = (num_antennas * num_antennas.saturating_sub(1)) / 2;
    let flat = baselines_over_time(xyzs, hour_angles, declination);
    Array2::from_shape_vec((hour_angles.len(), num_baselines), flat)
        .expect("baselines_over_time always returns num_hour_angles * num_baselines UVWs")
}
