// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Handle interferometric direction-cosine coordinates.
//!
//! This coordinate system is discussed at length in Interferometry and
//! Synthesis in Radio Astronomy, Third Edition, Section 3: Analysis of the
//! Interferometer Response.

use super::{CoordError, RADec, UVW};
use crate::constants::TAU;

/// (l,m,n) direction-cosine coordinates. There are no units (i.e.
/// dimensionless).
///
/// The coordinates are a right-handed system with its origin on the sky
/// sphere; l increases with right ascension (east-wards), m increases with
/// declination and n points towards the source.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[allow(clippy::upper_case_acronyms)]
pub struct LMN {
    /// l coordinate \[dimensionless\]
    pub l: f64,
    /// m coordinate \[dimensionless\]
    pub m: f64,
    /// n coordinate \[dimensionless\]
    pub n: f64,
}

impl LMN {
    /// Make an [`LMN`] from only `l` and `m`; `n` is `sqrt(1 - l^2 - m^2)`.
    /// If `l^2 + m^2 > 1` (or either isn't finite), there is no corresponding
    /// direction on the sky, and an error is returned.
    pub fn from_lm(l: f64, m: f64) -> Result<LMN, CoordError> {
        let lm_sq = l * l + m * m;
        if !lm_sq.is_finite() || lm_sq > 1.0 {
            return Err(CoordError::Domain { l, m });
        }
        Ok(LMN {
            l,
            m,
            n: (1.0 - lm_sq).sqrt(),
        })
    }

    /// Get the sky position described by these direction cosines, relative to
    /// `phase_centre`. This is the inverse of [`RADec::to_lmn`].
    pub fn to_radec(self, phase_centre: RADec) -> RADec {
        // (n, l, m) are Cartesian coordinates in the phase centre's offset
        // frame; rotate them back.
        let (pc_s_dec, pc_c_dec) = phase_centre.dec.sin_cos();
        let x = self.n * pc_c_dec - self.m * pc_s_dec;
        let y = self.l;
        let z = self.n * pc_s_dec + self.m * pc_c_dec;
        RADec {
            ra: phase_centre.ra + y.atan2(x),
            dec: z.clamp(-1.0, 1.0).asin(),
        }
    }

    /// Subtract 1 from `n` and multiply each of (`l`,`m`,`n`) by 2pi. This is
    /// convenient for application with the radio interferometer measurement
    /// equation (RIME), as performing some multiplies and subtracts ahead of
    /// time could result in many fewer FLOPs.
    pub fn prepare_for_rime(self) -> LmnRime {
        LmnRime {
            l: TAU * self.l,
            m: TAU * self.m,
            n: TAU * (self.n - 1.0),
        }
    }
}

/// A "radio interferometer measurement equation (RIME)"-ready version of
/// [`LMN`]; i.e. `LmnRime.l == 2 * pi * LMN.l`, `LmnRime.m == 2 * pi * LMN.m`,
/// `LmnRime.n == 2 * pi * (LMN.n - 1)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LmnRime {
    /// 2 * pi * l \[dimensionless\]
    pub l: f64,
    /// 2 * pi * m \[dimensionless\]
    pub m: f64,
    /// 2 * pi * (n - 1) \[dimensionless\]
    pub n: f64,
}

impl LmnRime {
    /// Get the dot product of a [`UVW`] with a [`LmnRime`], i.e. `2 * pi * (u *
    /// l + v * m + w * (n - 1))`. The [`UVW`] must be in units of wavelength.
    pub fn dot(self, uvw: UVW) -> f64 {
        uvw.u * self.l + uvw.v * self.m + uvw.w * self.n
    }
}

/// Convert a sky position into direction cosines relative to a phase centre.
/// The returned triple is `(l, m, n - 1)`; with phase tracking, only the
/// offset of `n` from the phase centre's `n` (which is 1) matters.
pub fn sky_to_direction_cosines(position: RADec, phase_centre: RADec) -> (f64, f64, f64) {
    let LMN { l, m, n } = position.to_lmn(phase_centre);
    (l, m, n - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_from_lm() {
        let lmn = LMN::from_lm(0.6, 0.0).unwrap();
        assert_abs_diff_eq!(lmn.n, 0.8, epsilon = 1e-15);

        // The horizon is fine.
        let lmn = LMN::from_lm(1.0, 0.0).unwrap();
        assert_abs_diff_eq!(lmn.n, 0.0);

        assert!(matches!(
            LMN::from_lm(0.9, 0.9),
            Err(CoordError::Domain { .. })
        ));
        assert!(LMN::from_lm(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_lmn_prepare_for_rime() {
        let lmn = LMN {
            l: 0.5,
            m: 0.5,
            n: 0.707,
        };
        let lmn_rime = lmn.prepare_for_rime();
        assert_abs_diff_eq!(lmn_rime.l, PI);
        assert_abs_diff_eq!(lmn_rime.m, PI);
        assert_abs_diff_eq!(lmn_rime.n, -1.840973295003619);
    }

    #[test]
    fn test_lmn_rime_dot() {
        let lmn = LmnRime {
            l: 0.5,
            m: 0.5,
            n: 0.707,
        };
        let uvw = UVW {
            u: 1.0,
            v: 2.0,
            w: 3.0,
        };
        assert_abs_diff_eq!(lmn.dot(uvw), 3.621);
    }

    #[test]
    fn test_to_radec_round_trip() {
        let pc = RADec::new_degrees(15.0, 35.0);
        for radec in [
            RADec::new_degrees(17.0, 36.5),
            RADec::new_degrees(10.0, 30.0),
            RADec::new_degrees(15.0, 35.0),
            RADec::new_degrees(40.0, 80.0),
        ] {
            let result = radec.to_lmn(pc).to_radec(pc);
            assert_abs_diff_eq!(result.ra, radec.ra, epsilon = 1e-12);
            assert_abs_diff_eq!(result.dec, radec.dec, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_sky_to_direction_cosines() {
        let pc = RADec::new_degrees(15.0, 35.0);
        let (l, m, n) = sky_to_direction_cosines(pc, pc);
        assert_abs_diff_eq!(l, 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(m, 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(n, 0.0, epsilon = 1e-15);

        let pos = RADec::new_degrees(17.0, 36.5);
        let (l, m, n) = sky_to_direction_cosines(pos, pc);
        let lmn = pos.to_lmn(pc);
        assert_abs_diff_eq!(l, lmn.l);
        assert_abs_diff_eq!(m, lmn.m);
        assert_abs_diff_eq!(n, lmn.n - 1.0);
        assert!(l > 0.0);
        assert!(m > 0.0);
        assert!(n < 0.0);
        assert_abs_diff_eq!(l * l + m * m + (n + 1.0).powi(2), 1.0, epsilon = 1e-12);
    }
}
