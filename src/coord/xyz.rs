// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Handle (x,y,z) coordinates of an antenna (a.k.a. tile or station).
//!
//! This coordinate system is discussed at length in Interferometry and
//! Synthesis in Radio Astronomy, Third Edition, Section 4: Geometrical
//! Relationships, Polarimetry, and the Measurement Equation.

use ndarray::prelude::*;
use serde::{Deserialize, Serialize};

use super::{CoordError, HADec, UVW};
use crate::constants::FRAC_PI_2;

/// The (x,y,z) coordinates of an antenna (a.k.a. tile or station). All units
/// are in metres.
///
/// Before [`rotate_to_celestial`], X points east and Z points to the local
/// zenith. Afterwards X still points east, but Z is parallel to the Earth's
/// rotation axis (towards the north celestial pole).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct XyzGeodetic {
    /// x-coordinate \[meters\]
    pub x: f64,
    /// y-coordinate \[meters\]
    pub y: f64,
    /// z-coordinate \[meters\]
    pub z: f64,
}

impl XyzGeodetic {
    /// Read antenna positions out of an array with shape (N, 3).
    pub fn from_array(xyzs: ArrayView2<f64>) -> Result<Vec<Self>, CoordError> {
        let (rows, cols) = xyzs.dim();
        if cols != 3 {
            return Err(CoordError::NotNx3 { rows, cols });
        }
        Ok(xyzs
            .outer_iter()
            .map(|row| Self {
                x: row[0],
                y: row[1],
                z: row[2],
            })
            .collect())
    }

    /// Read antenna positions out of rows that should each contain exactly 3
    /// values. This is how positions arrive from argument files.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Vec<Self>, CoordError> {
        rows.iter()
            .enumerate()
            .map(|(index, row)| match row.as_ref() {
                &[x, y, z] => Ok(Self { x, y, z }),
                other => Err(CoordError::BadAntennaRow {
                    index,
                    len: other.len(),
                }),
            })
            .collect()
    }

    /// Rotate about the X axis by `angle` \[radians\].
    fn rotate_x(self, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            x: self.x,
            y: -self.z * s + self.y * c,
            z: self.z * c + self.y * s,
        }
    }

    /// Rotate local XYZ coordinates (Z towards the zenith) into celestial XYZ
    /// coordinates (Z parallel to the Earth's axis), given the array latitude
    /// \[radians\].
    pub fn to_celestial(self, latitude: f64) -> Self {
        self.rotate_x(FRAC_PI_2 - latitude)
    }

    /// The inverse of [`XyzGeodetic::to_celestial`].
    pub fn to_local(self, latitude: f64) -> Self {
        self.rotate_x(latitude - FRAC_PI_2)
    }

    /// Rotate this celestial position into (u,v,w) coordinates for the
    /// supplied phase-tracking centre. W points towards the source.
    ///
    /// When the phase centre is the north celestial pole (`ha == 0`,
    /// `dec == pi/2`), the UVW coordinates are aligned with XYZ.
    pub fn to_uvw(self, phase_centre: HADec) -> UVW {
        let (s_ha, c_ha) = phase_centre.ha.sin_cos();
        let (s_dec, c_dec) = phase_centre.dec.sin_cos();
        self.to_uvw_inner(s_ha, c_ha, s_dec, c_dec)
    }

    /// Like [`XyzGeodetic::to_uvw`], but with the sines and cosines of the
    /// phase centre already computed.
    fn to_uvw_inner(self, s_ha: f64, c_ha: f64, s_dec: f64, c_dec: f64) -> UVW {
        let v0 = self.x * s_ha + self.y * c_ha;
        UVW {
            u: self.x * c_ha - self.y * s_ha,
            v: self.z * c_dec + v0 * s_dec,
            w: self.z * s_dec - v0 * c_dec,
        }
    }
}

impl std::ops::Sub<XyzGeodetic> for XyzGeodetic {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

/// Rotate many local XYZ positions into celestial XYZ positions.
pub fn rotate_to_celestial(local_xyzs: &[XyzGeodetic], latitude: f64) -> Vec<XyzGeodetic> {
    local_xyzs
        .iter()
        .map(|xyz| xyz.to_celestial(latitude))
        .collect()
}

/// Rotate many celestial XYZ positions back into local XYZ positions.
pub fn rotate_to_local(celestial_xyzs: &[XyzGeodetic], latitude: f64) -> Vec<XyzGeodetic> {
    celestial_xyzs
        .iter()
        .map(|xyz| xyz.to_local(latitude))
        .collect()
}

/// Get a [`UVW`] for each antenna, given a phase centre.
pub fn xyzs_to_uvws(xyzs: &[XyzGeodetic], phase_centre: HADec) -> Vec<UVW> {
    let (s_ha, c_ha) = phase_centre.ha.sin_cos();
    let (s_dec, c_dec) = phase_centre.dec.sin_cos();
    xyzs.iter()
        .map(|xyz| xyz.to_uvw_inner(s_ha, c_ha, s_dec, c_dec))
        .collect()
}
