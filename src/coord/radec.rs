// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Handle (right ascension, declination) coordinates.
 */

use serde::{Deserialize, Serialize};

use super::lmn::LMN;

/// A struct containing a Right Ascension and Declination. All units are in
/// radians.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RADec {
    /// Right ascension \[radians\]
    pub ra: f64,
    /// Declination \[radians\]
    pub dec: f64,
}

/// A unit vector on the celestial sphere.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cartesian {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RADec {
    /// Make a new `RADec` struct from values in radians.
    pub fn new(ra: f64, dec: f64) -> Self {
        Self { ra, dec }
    }

    /// Make a new `RADec` struct from values in degrees.
    pub fn new_degrees(ra: f64, dec: f64) -> Self {
        Self::new(ra.to_radians(), dec.to_radians())
    }

    /// Get these coordinates as a unit vector in the frame of a `centre`; x
    /// points at the centre, y towards increasing RA and z towards increasing
    /// Dec.
    pub(crate) fn to_offset_cartesian(self, centre: RADec) -> Cartesian {
        let d_ra = self.ra - centre.ra;
        let (s_d_ra, c_d_ra) = d_ra.sin_cos();
        let (s_dec, c_dec) = self.dec.sin_cos();
        let (pc_s_dec, pc_c_dec) = centre.dec.sin_cos();
        Cartesian {
            x: s_dec * pc_s_dec + c_dec * pc_c_dec * c_d_ra,
            y: c_dec * s_d_ra,
            z: s_dec * pc_c_dec - c_dec * pc_s_dec * c_d_ra,
        }
    }

    /// Get the (l,m,n) direction cosines from these coordinates, relative to a
    /// phase centre. l increases with right ascension, m increases with
    /// declination and n points towards the source.
    ///
    /// Derived using "Coordinate transformations" on page 388 of Synthesis
    /// Imaging in Radio Astronomy II.
    pub fn to_lmn(self, phase_centre: RADec) -> LMN {
        let Cartesian { x, y, z } = self.to_offset_cartesian(phase_centre);
        LMN { l: y, m: z, n: x }
    }

    /// Calculate the great-circle distance between two sets of coordinates
    /// \[radians\]. This uses the Vincenty formula, which is accurate at all
    /// separations.
    pub fn separation(self, b: Self) -> f64 {
        let d_ra = b.ra - self.ra;
        let (s_d_ra, c_d_ra) = d_ra.sin_cos();
        let (s_dec1, c_dec1) = self.dec.sin_cos();
        let (s_dec2, c_dec2) = b.dec.sin_cos();
        let num1 = c_dec2 * s_d_ra;
        let num2 = c_dec1 * s_dec2 - s_dec1 * c_dec2 * c_d_ra;
        let denom = s_dec1 * s_dec2 + c_dec1 * c_dec2 * c_d_ra;
        num1.hypot(num2).atan2(denom)
    }
}

impl std::fmt::Display for RADec {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({}°, {}°)", self.ra.to_degrees(), self.dec.to_degrees())
    }
}
